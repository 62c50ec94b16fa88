// Copyright (c) 2025 - Cowboy AI, Inc.
//! Label commitment along a route
//!
//! A route of `n` networks has `n + 1` label boundaries: the source STP, one
//! per inter-domain hop, and the destination STP. Network `i` sits between
//! boundary `i` (ingress) and boundary `i + 1` (egress).
//!
//! A network that cannot swap labels ties its two boundaries together, so a
//! maximal run of such networks shares one label: the intersection of every
//! boundary range in the run. A swap-capable network closes the run on its
//! ingress side and opens a new one on its egress side.
//!
//! ```text
//! boundary   b0 ── A ── b1 ── D ── b2 ── C ── b3 ── B ── b4
//! swap            no        yes        no        yes
//! segments   [b0 b1]       [b2 b3]                 [b4]
//! ```

use crate::domain::Label;

/// Label a new segment starts from on the egress side of a swap-capable
/// network
///
/// The network's full native egress range is used; the segment it opens
/// narrows it further only if the following networks cannot swap.
fn swap_egress_seed(native_egress: Label) -> Label {
    native_egress
}

/// Commit one label per boundary, or `None` if any segment is infeasible
///
/// `boundaries` holds the usable range at each boundary (already intersected
/// with the request at the two ends); `swaps[i]` is the swap capability of
/// network `i`. Requires `boundaries.len() == swaps.len() + 1`.
pub(crate) fn commit_labels(boundaries: &[Label], swaps: &[bool]) -> Option<Vec<Label>> {
    let (&first, rest) = boundaries.split_first()?;
    if rest.len() != swaps.len() {
        return None;
    }

    let mut committed = Vec::with_capacity(boundaries.len());
    let mut segment_start = 0;
    let mut segment = first;

    for (network, (&can_swap, &egress)) in swaps.iter().zip(rest).enumerate() {
        if can_swap {
            let closed = network + 1 - segment_start;
            committed.extend(std::iter::repeat(segment).take(closed));
            segment_start = network + 1;
            segment = swap_egress_seed(egress);
        } else {
            segment = segment.intersect(&egress)?;
        }
    }

    committed.extend(std::iter::repeat(segment).take(boundaries.len() - segment_start));
    Some(committed)
}
