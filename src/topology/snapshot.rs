// Copyright (c) 2025 - Cowboy AI, Inc.
//! Consistent topology view for one query
//!
//! A [`TopologySnapshot`] pairs the static network layer (shared, immutable)
//! with a copy of the reachability vectors taken at the same moment. The two
//! layers stay separate; [`TopologySnapshot::neighbors`] merges them per call.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{Network, NetworkId, Port};
use crate::errors::{TopologyError, TopologyResult};
use crate::reachability::{PortKey, ReachabilityVector, VectorSnapshot};

/// Where an adjacency was learned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdjacencySource {
    /// Configured port peering
    Static,
    /// Advertised in a peer's reachability vector
    Vector,
}

/// One outgoing edge of a network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjacency {
    pub remote_network: NetworkId,
    /// Local egress port
    pub via_port: String,
    /// Ingress port on the remote network, known only for static peerings
    pub remote_port: Option<String>,
    pub cost: u32,
    pub source: AdjacencySource,
}

/// Immutable view over networks and vectors
#[derive(Debug, Clone)]
pub struct TopologySnapshot {
    networks: Arc<HashMap<NetworkId, Network>>,
    vectors: VectorSnapshot,
}

impl TopologySnapshot {
    pub(crate) fn new(networks: Arc<HashMap<NetworkId, Network>>, vectors: VectorSnapshot) -> Self {
        Self { networks, vectors }
    }

    pub fn network(&self, id: &NetworkId) -> Option<&Network> {
        self.networks.get(id)
    }

    pub fn get_network(&self, id: &NetworkId) -> TopologyResult<&Network> {
        self.network(id)
            .ok_or_else(|| TopologyError::NotFound(format!("network {}", id)))
    }

    pub fn get_port(&self, network: &NetworkId, port: &str) -> TopologyResult<&Port> {
        self.get_network(network)?
            .port(port)
            .ok_or_else(|| TopologyError::NotFound(format!("port {} in network {}", port, network)))
    }

    pub fn contains(&self, id: &NetworkId) -> bool {
        self.networks.contains_key(id)
    }

    pub fn vector(&self, network: &NetworkId, port: &str) -> Option<&ReachabilityVector> {
        self.vectors
            .get(&PortKey::new(network.clone(), port))
            .map(Arc::as_ref)
    }

    /// Whether any local port advertises reachability to the network
    pub fn is_advertised(&self, id: &NetworkId) -> bool {
        self.vectors.values().any(|v| v.contains(id))
    }

    /// Whether a local port is statically peered with the network
    pub fn is_peered(&self, id: &NetworkId) -> bool {
        self.networks
            .values()
            .flat_map(Network::ports)
            .any(|port| port.remote_network() == Some(id))
    }

    /// Outgoing edges of a network: static peerings first in port order, then
    /// vector-advertised networks per port ordered by cost and id
    ///
    /// Unknown networks have no neighbors.
    pub fn neighbors(&self, id: &NetworkId) -> Vec<Adjacency> {
        let Some(network) = self.network(id) else {
            return Vec::new();
        };

        let mut edges: Vec<Adjacency> = network
            .ports()
            .iter()
            .filter_map(|port| {
                port.remote().map(|remote| Adjacency {
                    remote_network: remote.network.clone(),
                    via_port: port.name().to_string(),
                    remote_port: Some(remote.port.clone()),
                    cost: 1,
                    source: AdjacencySource::Static,
                })
            })
            .collect();

        for port in network.ports() {
            let Some(vector) = self.vector(id, port.name()) else {
                continue;
            };
            for (remote, cost) in vector.by_cost() {
                if remote == id {
                    continue;
                }
                let known = edges
                    .iter()
                    .any(|e| &e.remote_network == remote && e.via_port == port.name());
                if known {
                    continue;
                }
                edges.push(Adjacency {
                    remote_network: remote.clone(),
                    via_port: port.name().to_string(),
                    remote_port: None,
                    cost,
                    source: AdjacencySource::Vector,
                });
            }
        }

        edges
    }
}
