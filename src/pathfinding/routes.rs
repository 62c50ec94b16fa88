// Copyright (c) 2025 - Cowboy AI, Inc.
//! Simple route enumeration over the merged adjacency relation

use crate::domain::NetworkId;
use crate::topology::{Adjacency, TopologySnapshot};

/// A route is the sequence of inter-domain hops taken from the source network
pub(crate) type Route = Vec<Adjacency>;

/// All simple routes from `source` to `destination` with at most `max_hops`
/// hops, shortest first
///
/// Depth-first over [`TopologySnapshot::neighbors`]; within one length the
/// order in which routes were discovered is kept. A network outside the local
/// topology can only end a route, and only if it is the destination.
pub(crate) fn enumerate_routes(
    snapshot: &TopologySnapshot,
    source: &NetworkId,
    destination: &NetworkId,
    max_hops: usize,
) -> Vec<Route> {
    let mut routes = Vec::new();
    if source == destination {
        routes.push(Vec::new());
        return routes;
    }

    let mut walk = Walk {
        snapshot,
        destination,
        max_hops,
        visited: vec![source.clone()],
        hops: Vec::new(),
        routes: &mut routes,
    };
    walk.descend(source);

    // stable: equal lengths keep discovery order
    routes.sort_by_key(Vec::len);
    routes
}

struct Walk<'a> {
    snapshot: &'a TopologySnapshot,
    destination: &'a NetworkId,
    max_hops: usize,
    visited: Vec<NetworkId>,
    hops: Route,
    routes: &'a mut Vec<Route>,
}

impl Walk<'_> {
    fn descend(&mut self, current: &NetworkId) {
        if self.hops.len() >= self.max_hops {
            return;
        }

        for edge in self.snapshot.neighbors(current) {
            let next = edge.remote_network.clone();
            if self.visited.contains(&next) {
                continue;
            }

            if &next == self.destination {
                self.hops.push(edge);
                self.routes.push(self.hops.clone());
                self.hops.pop();
                continue;
            }

            if !self.snapshot.contains(&next) {
                continue;
            }

            self.visited.push(next.clone());
            self.hops.push(edge);
            self.descend(&next);
            self.hops.pop();
            self.visited.pop();
        }
    }
}
