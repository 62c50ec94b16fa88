// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for nsi-topology
//!
//! Deterministic topologies shared by the integration tests.
//!
//! # Four islands
//!
//! ```text
//!            1780-1789 / 1000
//!   aruba ─────────────────────── bonaire
//!     │                          /    │
//!     │ 1780-1789     1781-1782 /     │ 1780-1789
//!     │ 1000          500      /      │ 1000
//!   dominica ─────────────────     curacao
//!     └──────────────────────────────┘
//!              1783-1786 / 200
//! ```
//!
//! Every network has an STP `ps` carrying 1780-1789 at 1000 Mbps. Port order
//! fixes the discovery order of aruba → bonaire routes:
//! `A-B`, `A-D-B`, `A-D-C-B`.

#![allow(dead_code)]

use std::sync::Arc;

use nsi_topology::domain::{Label, Network, NetworkId, Port, Stp};
use nsi_topology::{LinkVectors, PathFinder, PathFinderConfig, TopologyGraph};

pub const ARUBA: &str = "aruba:topology";
pub const BONAIRE: &str = "bonaire:topology";
pub const CURACAO: &str = "curacao:topology";
pub const DOMINICA: &str = "dominica:topology";

pub fn id(s: &str) -> NetworkId {
    NetworkId::new(s).expect("Invalid network id in test fixture")
}

pub fn label(s: &str) -> Label {
    s.parse().expect("Invalid label in test fixture")
}

pub fn stp(network: &str, port: &str) -> Stp {
    Stp::new(id(network), port)
}

/// Request label used throughout the four-island tests
pub fn request_label() -> Label {
    label("1781-1789")
}

fn port(name: &str, range: &str, capacity: u64) -> Port {
    Port::new(name, label(range), capacity).expect("Invalid port in test fixture")
}

fn peer(name: &str, range: &str, capacity: u64, remote: &str, remote_port: &str) -> Port {
    port(name, range, capacity).with_remote(id(remote), remote_port)
}

fn network(name: &str, swapping: &[&str], ports: Vec<Port>) -> Network {
    let mut network = Network::new(id(name), swapping.contains(&name));
    for p in ports {
        network.add_port(p).expect("Invalid network in test fixture");
    }
    network
}

/// Four-island networks; names listed in `swapping` can swap labels
pub fn four_island_networks(swapping: &[&str]) -> Vec<Network> {
    vec![
        network(
            ARUBA,
            swapping,
            vec![
                port("ps", "1780-1789", 1000),
                peer("bon", "1780-1789", 1000, BONAIRE, "aru"),
                peer("dom", "1780-1789", 1000, DOMINICA, "aru"),
            ],
        ),
        network(
            BONAIRE,
            swapping,
            vec![
                port("ps", "1780-1789", 1000),
                peer("aru", "1780-1789", 1000, ARUBA, "bon"),
                peer("dom", "1781-1782", 500, DOMINICA, "bon"),
                peer("cur", "1780-1789", 1000, CURACAO, "bon"),
            ],
        ),
        network(
            CURACAO,
            swapping,
            vec![
                port("ps", "1780-1789", 1000),
                peer("dom", "1783-1786", 200, DOMINICA, "cur"),
                peer("bon", "1780-1789", 1000, BONAIRE, "cur"),
            ],
        ),
        network(
            DOMINICA,
            swapping,
            vec![
                port("ps", "1780-1789", 1000),
                peer("aru", "1780-1789", 1000, ARUBA, "dom"),
                peer("bon", "1781-1782", 500, BONAIRE, "dom"),
                peer("cur", "1783-1786", 200, CURACAO, "dom"),
            ],
        ),
    ]
}

pub fn four_islands(swapping: &[&str]) -> PathFinder {
    finder(four_island_networks(swapping))
}

/// Linear A ── B ── C; A–B carries 1781-1789, B–C carries `bc_range`
pub fn linear(b_swaps: bool, c_swaps: bool, bc_range: &str) -> PathFinder {
    let a = Network::new(id("a:topology"), false)
        .with_port(port("ps", "1781-1789", 1000))
        .and_then(|n| n.with_port(peer("b", "1781-1789", 1000, "b:topology", "a")))
        .expect("Invalid network in test fixture");
    let b = Network::new(id("b:topology"), b_swaps)
        .with_port(peer("a", "1781-1789", 1000, "a:topology", "b"))
        .and_then(|n| n.with_port(peer("c", bc_range, 1000, "c:topology", "b")))
        .expect("Invalid network in test fixture");
    let c = Network::new(id("c:topology"), c_swaps)
        .with_port(peer("b", bc_range, 1000, "b:topology", "c"))
        .and_then(|n| n.with_port(port("ps", "1780-1789", 1000)))
        .expect("Invalid network in test fixture");
    finder(vec![a, b, c])
}

pub fn finder(networks: Vec<Network>) -> PathFinder {
    let graph = TopologyGraph::with_networks(networks, Arc::new(LinkVectors::new()));
    PathFinder::new(Arc::new(graph), PathFinderConfig::default())
}

/// Network ids along a path, for compact comparisons
pub fn route_of(path: &nsi_topology::domain::Path) -> Vec<String> {
    path.networks().map(ToString::to_string).collect()
}
