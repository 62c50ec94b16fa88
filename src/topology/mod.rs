// Copyright (c) 2025 - Cowboy AI, Inc.
//! Topology Graph Store
//!
//! Holds every locally known [`Network`] and answers adjacency queries.
//!
//! # Layers
//!
//! ```text
//! static layer   RwLock<Arc<HashMap<NetworkId, Network>>>   (configuration)
//! vector layer   Arc<LinkVectors>                           (peer discovery)
//!                          ↓ snapshot()
//!                  TopologySnapshot → neighbors()
//! ```
//!
//! The static layer is replaced copy-on-write, so a snapshot holds the `Arc`
//! it saw and is unaffected by later additions. Networks are added or replaced
//! by id; nothing is deleted.

mod snapshot;

pub use snapshot::{Adjacency, AdjacencySource, TopologySnapshot};

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::info;

use crate::domain::{Network, NetworkId, Port};
use crate::errors::TopologyResult;
use crate::reachability::LinkVectors;

/// Networks plus the reachability vectors that extend their adjacency
#[derive(Debug)]
pub struct TopologyGraph {
    networks: RwLock<Arc<HashMap<NetworkId, Network>>>,
    vectors: Arc<LinkVectors>,
}

impl TopologyGraph {
    pub fn new(vectors: Arc<LinkVectors>) -> Self {
        Self {
            networks: RwLock::new(Arc::new(HashMap::new())),
            vectors,
        }
    }

    /// Build a graph from a set of networks
    pub fn with_networks(networks: impl IntoIterator<Item = Network>, vectors: Arc<LinkVectors>) -> Self {
        let graph = Self::new(vectors);
        for network in networks {
            graph.add_network(network);
        }
        graph
    }

    /// Add a network, replacing any network with the same id
    pub fn add_network(&self, network: Network) {
        let mut guard = self
            .networks
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut next = HashMap::clone(&guard);
        info!(
            network = %network.id(),
            ports = network.ports().len(),
            "Adding network to topology"
        );
        next.insert(network.id().clone(), network);
        *guard = Arc::new(next);
    }

    pub fn link_vectors(&self) -> &Arc<LinkVectors> {
        &self.vectors
    }

    /// Consistent view of both layers
    pub fn snapshot(&self) -> TopologySnapshot {
        let networks = Arc::clone(
            &self
                .networks
                .read()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        );
        TopologySnapshot::new(networks, self.vectors.snapshot())
    }

    pub fn get_network(&self, id: &NetworkId) -> TopologyResult<Network> {
        self.snapshot().get_network(id).cloned()
    }

    pub fn get_port(&self, network: &NetworkId, port: &str) -> TopologyResult<Port> {
        self.snapshot().get_port(network, port).cloned()
    }

    /// Ids of all local networks, sorted
    pub fn network_ids(&self) -> Vec<NetworkId> {
        let snapshot = self.networks.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut ids: Vec<_> = snapshot.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn neighbors(&self, id: &NetworkId) -> Vec<Adjacency> {
        self.snapshot().neighbors(id)
    }

    /// Every local port with a configured peering, as `(owning network, port)`
    pub fn peered_ports(&self) -> Vec<(NetworkId, Port)> {
        let snapshot = self.networks.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut ports: Vec<_> = snapshot
            .values()
            .flat_map(|network| {
                network
                    .ports()
                    .iter()
                    .filter(|p| p.remote().is_some())
                    .map(move |p| (network.id().clone(), p.clone()))
            })
            .collect();
        ports.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.name().cmp(b.1.name())));
        ports
    }
}
