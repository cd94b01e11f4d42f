//! Benchmark workload generators for the silt change-tracking engine.
//!
//! Everything is seeded so runs are reproducible: the same seed always
//! produces the same workload.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::collections::BTreeSet;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use silt_core::{ComponentId, ItemId};

/// Generate `len` distinct item IDs below `bound`, ascending.
///
/// Panics if `len > bound` (the set cannot be filled).
pub fn ascending_ids(seed: u64, len: usize, bound: u32) -> Vec<ItemId> {
    assert!(len as u64 <= bound as u64, "cannot draw {len} distinct ids below {bound}");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut ids = BTreeSet::new();
    while ids.len() < len {
        ids.insert(rng.random_range(0..bound));
    }
    ids.into_iter().map(ItemId).collect()
}

/// Generate a per-frame modification schedule: `len` (item, component)
/// pairs drawn uniformly below the given bounds. Duplicates are kept —
/// the tracker's dedup path is part of what the flush bench measures.
pub fn modification_schedule(
    seed: u64,
    len: usize,
    item_bound: u32,
    component_bound: u32,
) -> Vec<(ItemId, ComponentId)> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len)
        .map(|_| {
            (
                ItemId(rng.random_range(0..item_bound)),
                ComponentId(rng.random_range(0..component_bound)),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascending_ids_is_deterministic() {
        assert_eq!(ascending_ids(42, 100, 1000), ascending_ids(42, 100, 1000));
    }

    #[test]
    fn ascending_ids_is_strictly_ascending() {
        let ids = ascending_ids(7, 200, 500);
        assert_eq!(ids.len(), 200);
        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn modification_schedule_stays_in_bounds() {
        for (item, component) in modification_schedule(3, 500, 100, 4) {
            assert!(item.0 < 100);
            assert!(component.0 < 4);
        }
    }
}
