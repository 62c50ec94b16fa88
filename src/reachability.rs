// Copyright (c) 2025 - Cowboy AI, Inc.
//! Reachability Vector Propagator
//!
//! Path-vector state learned from peer discovery documents: for every local
//! port, which remote networks are reachable through it and at what hop cost.
//!
//! # Semantics
//!
//! - A vector is replaced wholesale on update (last writer wins, no merge)
//! - There is no expiry: a vector reflects the last successful fetch for the
//!   peer behind the port, however old
//! - Readers get whole vectors; a reader never observes a half-applied update
//!
//! The fetcher is the only writer. Path computation reads through
//! [`LinkVectors::snapshot`].

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tracing::debug;

use crate::domain::NetworkId;

/// Remote network id → positive hop cost
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReachabilityVector(BTreeMap<NetworkId, u32>);

impl ReachabilityVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cost for a network; costs are at least 1
    pub fn insert(&mut self, network: NetworkId, cost: u32) {
        self.0.insert(network, cost.max(1));
    }

    pub fn cost(&self, network: &NetworkId) -> Option<u32> {
        self.0.get(network).copied()
    }

    pub fn contains(&self, network: &NetworkId) -> bool {
        self.0.contains_key(network)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NetworkId, u32)> {
        self.0.iter().map(|(n, c)| (n, *c))
    }

    /// Entries ordered by ascending cost, then network id
    pub fn by_cost(&self) -> Vec<(&NetworkId, u32)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

impl FromIterator<(NetworkId, u32)> for ReachabilityVector {
    fn from_iter<I: IntoIterator<Item = (NetworkId, u32)>>(iter: I) -> Self {
        let mut vector = Self::new();
        for (network, cost) in iter {
            vector.insert(network, cost);
        }
        vector
    }
}

/// Local port a vector is attached to
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PortKey {
    pub network: NetworkId,
    pub port: String,
}

impl PortKey {
    pub fn new(network: NetworkId, port: impl Into<String>) -> Self {
        Self {
            network,
            port: port.into(),
        }
    }
}

/// Point-in-time copy of every stored vector
pub type VectorSnapshot = HashMap<PortKey, Arc<ReachabilityVector>>;

/// Per-port reachability vectors shared between the fetcher and path computation
#[derive(Debug, Default)]
pub struct LinkVectors {
    vectors: RwLock<HashMap<PortKey, Arc<ReachabilityVector>>>,
    generation: AtomicU64,
}

impl LinkVectors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the vector of a local port
    pub fn update_vector(&self, network: &NetworkId, port: &str, vector: ReachabilityVector) {
        debug!(
            network = %network,
            port,
            entries = vector.len(),
            "Replacing reachability vector"
        );
        let key = PortKey::new(network.clone(), port);
        self.write().insert(key, Arc::new(vector));
        self.generation.fetch_add(1, Ordering::Release);
    }

    /// Drop the vector of a local port, returning whether one was stored
    pub fn delete_vector(&self, network: &NetworkId, port: &str) -> bool {
        let key = PortKey::new(network.clone(), port);
        let removed = self.write().remove(&key).is_some();
        if removed {
            self.generation.fetch_add(1, Ordering::Release);
        }
        removed
    }

    /// Last stored vector for the port, or an empty one
    pub fn vector_for(&self, network: &NetworkId, port: &str) -> ReachabilityVector {
        let key = PortKey::new(network.clone(), port);
        self.read()
            .get(&key)
            .map(|v| v.as_ref().clone())
            .unwrap_or_default()
    }

    /// Consistent copy of all vectors for one path computation
    pub fn snapshot(&self) -> VectorSnapshot {
        self.read().clone()
    }

    /// Lowest cost local port of `network` advertising `destination`
    ///
    /// Ties go to the lexicographically smallest port name.
    pub fn best_port(&self, network: &NetworkId, destination: &NetworkId) -> Option<(String, u32)> {
        self.read()
            .iter()
            .filter(|(key, _)| &key.network == network)
            .filter_map(|(key, vector)| vector.cost(destination).map(|c| (key.port.clone(), c)))
            .min_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)))
    }

    /// Merged view across all ports: each remote network at its lowest cost
    pub fn reachability(&self) -> ReachabilityVector {
        let mut merged = ReachabilityVector::new();
        for vector in self.read().values() {
            for (network, cost) in vector.iter() {
                match merged.cost(network) {
                    Some(existing) if existing <= cost => {}
                    _ => merged.insert(network.clone(), cost),
                }
            }
        }
        merged
    }

    /// Counter bumped on every change
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<PortKey, Arc<ReachabilityVector>>> {
        self.vectors.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<PortKey, Arc<ReachabilityVector>>> {
        self.vectors.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
