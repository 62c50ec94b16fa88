// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for the Fetch Interval

use nsi_topology::discovery::{FetchSchedule, FETCH_INTERVAL_MAX};
use proptest::prelude::*;
use std::time::Duration;

proptest! {
    #[test]
    fn prop_interval_after_round_k(k in 0u32..64) {
        let mut schedule = FetchSchedule::default();
        for _ in 0..k {
            schedule.advance();
        }

        let expected = if k >= 10 { 3600 } else { (5u64 << k).min(3600) };
        prop_assert_eq!(schedule.interval(), Duration::from_secs(expected));
        prop_assert_eq!(schedule.rounds(), u64::from(k));
    }

    #[test]
    fn prop_interval_monotone_and_capped(
        min_secs in 2u64..600,
        extra_secs in 0u64..7200,
        rounds in 1usize..40,
    ) {
        let max = Duration::from_secs(min_secs + extra_secs);
        let mut schedule = FetchSchedule::new(Duration::from_secs(min_secs), max);
        let mut previous = schedule.interval();

        for _ in 0..rounds {
            let next = schedule.advance();
            prop_assert!(next >= previous);
            prop_assert!(next <= max);
            previous = next;
        }
    }
}

#[test]
fn test_default_cap_is_one_hour() {
    assert_eq!(FETCH_INTERVAL_MAX, Duration::from_secs(3600));
}
