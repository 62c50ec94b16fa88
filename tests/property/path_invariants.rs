// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Path Computation
//!
//! Random topologies of up to six networks with random peering, link label
//! ranges and swap capabilities. Every returned path must be simple, follow
//! real adjacency, keep labels within port ranges, and leave labels untouched
//! across networks that cannot swap.

use crate::fixtures::{finder, id, stp};
use nsi_topology::domain::{Label, Network, Port};
use nsi_topology::PathFinder;
use proptest::prelude::*;

const MAX_NETWORKS: usize = 6;

fn range() -> impl Strategy<Value = Label> {
    (1u16..=4000, 0u16..=60).prop_map(|(min, width)| {
        Label::vlan_range(min, (min + width).min(Label::MAX_VLAN)).expect("valid range")
    })
}

fn name(i: usize) -> String {
    format!("n{}:topology", i)
}

/// Networks `n0..n{count}`, peered per pair where `links` has a range
fn build(count: usize, links: &[Option<Label>], swaps: &[bool], stp_range: Label) -> PathFinder {
    let mut networks: Vec<Network> = (0..count)
        .map(|i| {
            Network::new(id(&name(i)), swaps[i])
                .with_port(Port::new("ps", stp_range, 1000).unwrap())
                .unwrap()
        })
        .collect();

    let mut pair = 0;
    for i in 0..count {
        for j in (i + 1)..count {
            if let Some(range) = links[pair] {
                let to_j = Port::new(format!("to-n{}", j), range, 1000)
                    .unwrap()
                    .with_remote(id(&name(j)), format!("to-n{}", i));
                let to_i = Port::new(format!("to-n{}", i), range, 1000)
                    .unwrap()
                    .with_remote(id(&name(i)), format!("to-n{}", j));
                networks[i].add_port(to_j).unwrap();
                networks[j].add_port(to_i).unwrap();
            }
            pair += 1;
        }
    }

    finder(networks)
}

fn scenario() -> impl Strategy<Value = (usize, Vec<Option<Label>>, Vec<bool>, Label, Label)> {
    (2..=MAX_NETWORKS).prop_flat_map(|count| {
        let pairs = count * (count - 1) / 2;
        (
            Just(count),
            prop::collection::vec(prop::option::weighted(0.6, range()), pairs),
            prop::collection::vec(any::<bool>(), count),
            range(),
            prop_oneof![Just(Label::any_vlan()), range()],
        )
    })
}

fn within(inner: &Label, outer: &Label) -> bool {
    outer.intersect(inner) == Some(*inner)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_paths_are_valid((count, links, swaps, stp_range, request) in scenario()) {
        let finder = build(count, &links, &swaps, stp_range);
        let source = stp(&name(0), "ps");
        let destination = stp(&name(count - 1), "ps");

        let paths = finder.find_paths(&source, &destination, 100, &request).unwrap();
        let graph = finder.graph();

        let mut previous_len = 0;
        for path in &paths {
            prop_assert!(path.is_simple());
            prop_assert!(path.len() >= previous_len, "paths not shortest first");
            previous_len = path.len();

            let first = path.first().unwrap();
            let last = path.last().unwrap();
            prop_assert_eq!(&first.network, &source.network);
            prop_assert_eq!(&last.network, &destination.network);
            prop_assert!(within(&first.src_label, &request));
            prop_assert!(within(&last.dst_label, &request));

            for link in path.links() {
                let network = graph.get_network(&link.network).unwrap();
                if !network.can_swap_label(request.label_type()) {
                    prop_assert_eq!(link.src_label, link.dst_label);
                }

                let egress = network.port(&link.dst_port).unwrap();
                prop_assert!(within(&link.dst_label, egress.label()));
                let ingress = network.port(link.src_port.as_deref().unwrap()).unwrap();
                prop_assert!(within(&link.src_label, ingress.label()));
            }

            for pair in path.links().windows(2) {
                let (here, next) = (&pair[0], &pair[1]);
                let egress = graph.get_port(&here.network, &here.dst_port).unwrap();
                let remote = egress.remote().unwrap();
                prop_assert_eq!(&remote.network, &next.network);
                prop_assert_eq!(Some(remote.port.as_str()), next.src_port.as_deref());
                prop_assert_eq!(here.dst_label, next.src_label);
            }
        }
    }

    #[test]
    fn prop_results_are_deterministic((count, links, swaps, stp_range, request) in scenario()) {
        let source = stp(&name(0), "ps");
        let destination = stp(&name(count - 1), "ps");

        let first = build(count, &links, &swaps, stp_range)
            .find_paths(&source, &destination, 100, &request);
        let second = build(count, &links, &swaps, stp_range)
            .find_paths(&source, &destination, 100, &request);
        prop_assert_eq!(first, second);
    }
}
