// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Label Algebra

use nsi_topology::domain::Label;
use proptest::prelude::*;

fn vlan() -> impl Strategy<Value = u16> {
    Label::MIN_VLAN..=Label::MAX_VLAN
}

fn label() -> impl Strategy<Value = Label> {
    (vlan(), vlan()).prop_map(|(a, b)| {
        Label::vlan_range(a.min(b), a.max(b)).expect("bounds are ordered and in range")
    })
}

fn within(inner: &Label, outer: &Label) -> bool {
    outer.min() <= inner.min() && inner.max() <= outer.max()
}

proptest! {
    #[test]
    fn prop_intersect_commutes(a in label(), b in label()) {
        prop_assert_eq!(a.intersect(&b), b.intersect(&a));
    }

    #[test]
    fn prop_intersect_idempotent(a in label()) {
        prop_assert_eq!(a.intersect(&a), Some(a));
    }

    #[test]
    fn prop_intersection_within_both(a in label(), b in label()) {
        match a.intersect(&b) {
            Some(c) => {
                prop_assert!(within(&c, &a));
                prop_assert!(within(&c, &b));
                prop_assert_eq!(c.min(), a.min().max(b.min()));
                prop_assert_eq!(c.max(), a.max().min(b.max()));
            }
            None => prop_assert!(a.max() < b.min() || b.max() < a.min()),
        }
    }

    #[test]
    fn prop_intersect_associates(a in label(), b in label(), c in label()) {
        let left = a.intersect(&b).and_then(|ab| ab.intersect(&c));
        let right = b.intersect(&c).and_then(|bc| a.intersect(&bc));
        prop_assert_eq!(left, right);
    }

    #[test]
    fn prop_pick_is_smallest_member(a in label()) {
        prop_assert_eq!(a.pick(), a.min());
        prop_assert!(a.contains(a.pick()));
        prop_assert_eq!(a.picked(), Label::vlan(a.min()).unwrap());
    }

    #[test]
    fn prop_len_counts_members(a in label()) {
        prop_assert_eq!(a.len(), u32::from(a.max() - a.min()) + 1);
        prop_assert_eq!(a.is_single(), a.len() == 1);
    }

    #[test]
    fn prop_out_of_range_rejected(v in (Label::MAX_VLAN + 1)..=u16::MAX) {
        prop_assert!(Label::vlan(v).is_err());
        prop_assert!(Label::vlan_range(1, v).is_err());
        prop_assert!(Label::vlan(0).is_err());
    }

    #[test]
    fn prop_inverted_range_rejected(a in vlan(), b in vlan()) {
        prop_assume!(a != b);
        prop_assert!(Label::vlan_range(a.max(b), a.min(b)).is_err());
    }
}
