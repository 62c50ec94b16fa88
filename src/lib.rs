// Copyright (c) 2025 - Cowboy AI, Inc.
//! Inter-domain circuit path computation for NSI networks
//!
//! This crate provides the topology store, label algebra and path computation
//! used to stitch a circuit across independently operated network domains,
//! together with the peer discovery fetcher that keeps inter-domain
//! reachability current.
//!
//! # Architecture
//!
//! ```text
//! FetcherService ──► LinkVectors ──┐
//!       │                          ├──► TopologyGraph ──► PathFinder ──► Vec<Path>
//!       ▼               Networks ──┘                                        │
//! ProviderRegistry                                              LinkBackend ◄┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use nsi_topology::domain::{Label, Network, NetworkId, Port, Stp};
//! use nsi_topology::{LinkVectors, PathFinder, PathFinderConfig, TopologyGraph};
//!
//! let aruba = NetworkId::new("aruba:topology").unwrap();
//! let bonaire = NetworkId::new("bonaire:topology").unwrap();
//! let vlans = Label::vlan_range(1780, 1789).unwrap();
//!
//! let graph = TopologyGraph::with_networks(
//!     [
//!         Network::new(aruba.clone(), false)
//!             .with_port(Port::new("ps", vlans, 1000).unwrap()).unwrap()
//!             .with_port(Port::new("bon", vlans, 1000).unwrap().with_remote(bonaire.clone(), "aru")).unwrap(),
//!         Network::new(bonaire.clone(), false)
//!             .with_port(Port::new("ps", vlans, 1000).unwrap()).unwrap()
//!             .with_port(Port::new("aru", vlans, 1000).unwrap().with_remote(aruba.clone(), "bon")).unwrap(),
//!     ],
//!     Arc::new(LinkVectors::new()),
//! );
//!
//! let finder = PathFinder::new(Arc::new(graph), PathFinderConfig::default());
//! let paths = finder
//!     .find_paths(&Stp::new(aruba, "ps"), &Stp::new(bonaire, "ps"), 100, &Label::any_vlan())
//!     .unwrap();
//! assert_eq!(paths.len(), 1);
//! assert_eq!(paths[0].hop_count(), 1);
//! ```

pub mod backend;
pub mod config;
pub mod discovery;
pub mod domain;
pub mod errors;
pub mod pathfinding;
pub mod reachability;
pub mod topology;

// Re-export commonly used types
pub use backend::{activate_link, link_targets, LinkBackend, LoggingBackend, Target};
pub use config::ServiceConfig;
pub use discovery::{
    DiscoveryConfig, DocumentSource, FetchOutcome, FetcherService, HttpDocumentSource,
    LoggingProviderRegistry, PeerDescriptor, PeerStatus, ProviderRegistry,
};
pub use errors::{
    BackendError, BackendResult, ConfigError, ConfigResult, FetchError, FetchResult,
    TopologyError, TopologyResult,
};
pub use pathfinding::{PathFinder, PathFinderConfig};
pub use reachability::{LinkVectors, ReachabilityVector};
pub use topology::{TopologyGraph, TopologySnapshot};
