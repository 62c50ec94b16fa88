// Copyright (c) 2025 - Cowboy AI, Inc.
//! Path Computation Engine
//!
//! Computes ordered candidate paths for a circuit request between two STPs.
//!
//! # Algorithm
//!
//! 1. Enumerate simple routes between the two networks over static and
//!    vector-advertised adjacency, bounded by `max_hops`, shortest first
//! 2. Derive the usable label range at every boundary of a route and commit
//!    labels segment by segment, honoring each network's swap capability
//! 3. Drop paths crossing a port with less capacity than requested
//!
//! The result distinguishes "no path" (`Ok` with an empty list) from "paths
//! exist but none has the bandwidth" ([`TopologyError::BandwidthUnavailable`]).
//!
//! Path computation is synchronous and performs no I/O. Each call works on a
//! single [`TopologySnapshot`], so concurrent vector updates never tear a
//! result.

mod labels;
mod routes;

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::domain::{Label, Link, Path, Port, Stp};
use crate::errors::{TopologyError, TopologyResult};
use crate::topology::{TopologyGraph, TopologySnapshot};

use labels::commit_labels;
use routes::{enumerate_routes, Route};

/// Path search settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathFinderConfig {
    /// Upper bound on inter-domain hops per path
    #[serde(default = "default_max_hops")]
    pub max_hops: usize,
}

fn default_max_hops() -> usize {
    8
}

impl Default for PathFinderConfig {
    fn default() -> Self {
        Self {
            max_hops: default_max_hops(),
        }
    }
}

/// Entry point used by the reservation layer
#[derive(Debug, Clone)]
pub struct PathFinder {
    graph: Arc<TopologyGraph>,
    config: PathFinderConfig,
}

impl PathFinder {
    pub fn new(graph: Arc<TopologyGraph>, config: PathFinderConfig) -> Self {
        Self { graph, config }
    }

    pub fn graph(&self) -> &Arc<TopologyGraph> {
        &self.graph
    }

    /// Candidate paths from `source` to `destination`, shortest first
    ///
    /// # Errors
    /// - `Validation` when source and destination are the same STP or the
    ///   requested label is of another dimension than the ports carry
    /// - `NotFound` for an unknown source, or an unknown destination that no
    ///   reachability vector advertises
    /// - `BandwidthUnavailable` when every label-feasible path lacks capacity
    pub fn find_paths(
        &self,
        source: &Stp,
        destination: &Stp,
        bandwidth: u64,
        label: &Label,
    ) -> TopologyResult<Vec<Path>> {
        let snapshot = self.graph.snapshot();
        find_paths(&snapshot, source, destination, bandwidth, label, self.config.max_hops)
    }
}

/// Path computation over an explicit snapshot
pub fn find_paths(
    snapshot: &TopologySnapshot,
    source: &Stp,
    destination: &Stp,
    bandwidth: u64,
    label: &Label,
    max_hops: usize,
) -> TopologyResult<Vec<Path>> {
    if source == destination {
        return Err(TopologyError::Validation(format!(
            "source and destination are the same STP: {}",
            source
        )));
    }

    let source_port = snapshot.get_port(&source.network, &source.port)?;
    if source_port.label().label_type() != label.label_type() {
        return Err(TopologyError::Validation(format!(
            "requested label type {} does not match port {}",
            label.label_type(),
            source
        )));
    }

    let destination_port = if snapshot.contains(&destination.network) {
        Some(snapshot.get_port(&destination.network, &destination.port)?)
    } else if snapshot.is_peered(&destination.network)
        || snapshot.is_advertised(&destination.network)
    {
        None
    } else {
        return Err(TopologyError::NotFound(format!("network {}", destination.network)));
    };

    let request = Request {
        snapshot,
        source,
        source_port,
        destination,
        destination_port,
        label,
    };

    let routes = enumerate_routes(snapshot, &source.network, &destination.network, max_hops);
    let candidates: Vec<Candidate> = routes.iter().filter_map(|r| request.build(r)).collect();
    let feasible = candidates.len();

    let paths: Vec<Path> = candidates
        .into_iter()
        .filter(|c| c.min_capacity.map_or(true, |cap| cap >= bandwidth))
        .map(|c| c.path)
        .collect();

    debug!(
        source = %source,
        destination = %destination,
        routes = routes.len(),
        feasible,
        paths = paths.len(),
        "Computed paths"
    );

    if paths.is_empty() && feasible > 0 {
        return Err(TopologyError::BandwidthUnavailable {
            requested: bandwidth,
            feasible,
        });
    }

    Ok(paths)
}

/// Label-feasible path with the smallest capacity among its known ports
struct Candidate {
    path: Path,
    min_capacity: Option<u64>,
}

struct Request<'a> {
    snapshot: &'a TopologySnapshot,
    source: &'a Stp,
    source_port: &'a Port,
    destination: &'a Stp,
    destination_port: Option<&'a Port>,
    label: &'a Label,
}

impl Request<'_> {
    /// Turn a route into a label-feasible path, or `None`
    fn build(&self, route: &Route) -> Option<Candidate> {
        let networks: Vec<_> = std::iter::once(&self.source.network)
            .chain(route.iter().map(|hop| &hop.remote_network))
            .collect();

        // ingress and egress port per network; None where unknown
        let mut ingress: Vec<Option<&Port>> = vec![Some(self.source_port)];
        let mut egress: Vec<Option<&Port>> = Vec::with_capacity(networks.len());
        let mut boundaries = vec![self.label.intersect(self.source_port.label())?];

        for (i, hop) in route.iter().enumerate() {
            let out = self.snapshot.network(networks[i])?.port(&hop.via_port)?;
            let into = match (&hop.remote_port, self.snapshot.network(&hop.remote_network)) {
                (Some(name), Some(remote)) => Some(remote.port(name)?),
                _ => None,
            };

            let mut range = *out.label();
            if let Some(port) = into {
                range = range.intersect(port.label())?;
            }

            egress.push(Some(out));
            ingress.push(into);
            boundaries.push(range);
        }

        egress.push(self.destination_port);
        let terminal = match self.destination_port {
            Some(port) => self.label.intersect(port.label())?,
            None => *self.label,
        };
        boundaries.push(terminal);

        let swaps: Vec<bool> = networks
            .iter()
            .map(|id| {
                self.snapshot
                    .network(id)
                    .is_some_and(|n| n.can_swap_label(self.label.label_type()))
            })
            .collect();

        let committed = commit_labels(&boundaries, &swaps)?;

        let links = networks
            .iter()
            .enumerate()
            .map(|(i, &network)| Link {
                network: network.clone(),
                src_port: if i == 0 {
                    Some(self.source.port.clone())
                } else {
                    route[i - 1].remote_port.clone()
                },
                dst_port: match route.get(i) {
                    Some(hop) => hop.via_port.clone(),
                    None => self.destination.port.clone(),
                },
                src_label: committed[i],
                dst_label: committed[i + 1],
            })
            .collect();

        let min_capacity = ingress
            .iter()
            .chain(egress.iter())
            .flatten()
            .map(|p| p.capacity())
            .min();

        Some(Candidate {
            path: Path::new(links),
            min_capacity,
        })
    }
}
