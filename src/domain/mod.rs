// Copyright (c) 2025 - Cowboy AI, Inc.
//! Circuit Topology Domain Models
//!
//! Value objects shared by the topology store, path computation and peer
//! discovery.
//!
//! # Value Objects with Invariants
//!
//! - [`Label`] - VLAN value or range within 1-4095, never empty
//! - [`NetworkId`] - OGF network identifier (`urn:ogf:network:` base name)
//! - [`Port`] - Service termination point with label range and capacity
//! - [`Network`] - Domain owning ordered ports, with label swap capability
//!
//! # Path Elements
//!
//! - [`Link`] - Transit through one network with ingress/egress labels
//! - [`Path`] - Ordered links, no network repeated

pub mod label;
pub mod network;
pub mod path;

pub use label::{Label, LabelError, LabelType, LabelValue};
pub use network::{
    Network, NetworkError, NetworkId, NetworkServiceAgent, Port, RemotePort, Stp, URN_OGF_PREFIX,
};
pub use path::{Link, Path};
