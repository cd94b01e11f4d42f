//! Linear-time algorithms over ascending sequences.
//!
//! Notification batches are delivered as sorted, duplicate-free index
//! slices that observers can binary-search or merge-join against their
//! own structures. These primitives do the sorting-adjacent work of a
//! flush — set subtraction, merging, and partitioning — in a single
//! pass each, without temporary buffers.

/// Remove from `target` every element that appears in `to_remove`.
///
/// Both sequences must be ascending; `target` is compacted in place and
/// truncated. Elements of `to_remove` absent from `target` are ignored.
/// O(n + m), no allocation.
pub fn remove_from_sorted<T: Ord + Copy>(target: &mut Vec<T>, to_remove: &[T]) {
    if target.is_empty() || to_remove.is_empty() {
        return;
    }
    let mut write = 0;
    let mut skip = 0;
    for read in 0..target.len() {
        let v = target[read];
        while skip < to_remove.len() && to_remove[skip] < v {
            skip += 1;
        }
        if skip < to_remove.len() && to_remove[skip] == v {
            continue;
        }
        target[write] = v;
        write += 1;
    }
    target.truncate(write);
}

/// Merge ascending `from` into already-ascending `into`, preserving order.
///
/// The destination grows by `from.len()` and is filled back-to-front, so
/// no second buffer is needed. On equal keys, elements of `from` are
/// placed ahead of equal elements already in `into`. O(n + m).
pub fn merge_into<T: Ord + Copy>(into: &mut Vec<T>, from: &[T]) {
    if from.is_empty() {
        return;
    }
    let old_len = into.len();
    // Grow by the merged-in length; the tail is overwritten below.
    into.extend_from_slice(from);
    let mut write = into.len();
    let mut a = old_len;
    let mut b = from.len();
    while b > 0 {
        write -= 1;
        if a > 0 && into[a - 1] >= from[b - 1] {
            into[write] = into[a - 1];
            a -= 1;
        } else {
            into[write] = from[b - 1];
            b -= 1;
        }
    }
}

/// Move every element satisfying `pred` from `items` into `out`,
/// compacting the remainder in place.
///
/// Single pass, stable within both partitions; `items` is truncated to
/// the retained elements. Returns the number of elements extracted.
pub fn extract_to<T: Copy, F>(items: &mut Vec<T>, out: &mut Vec<T>, mut pred: F) -> usize
where
    F: FnMut(&T) -> bool,
{
    let mut write = 0;
    let mut extracted = 0;
    for read in 0..items.len() {
        let v = items[read];
        if pred(&v) {
            out.push(v);
            extracted += 1;
        } else {
            items[write] = v;
            write += 1;
        }
    }
    items.truncate(write);
    extracted
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cmp::Ordering;

    #[test]
    fn remove_middle_elements() {
        let mut v = vec![1, 2, 3, 4, 5];
        remove_from_sorted(&mut v, &[2, 4]);
        assert_eq!(v, vec![1, 3, 5]);
    }

    #[test]
    fn remove_ignores_absent_elements() {
        let mut v = vec![10, 20, 30];
        remove_from_sorted(&mut v, &[5, 20, 25, 40]);
        assert_eq!(v, vec![10, 30]);
    }

    #[test]
    fn remove_everything() {
        let mut v = vec![1, 2, 3];
        remove_from_sorted(&mut v, &[1, 2, 3]);
        assert!(v.is_empty());
    }

    #[test]
    fn remove_with_empty_inputs() {
        let mut v: Vec<u32> = vec![];
        remove_from_sorted(&mut v, &[1]);
        assert!(v.is_empty());

        let mut v = vec![1, 2];
        remove_from_sorted(&mut v, &[]);
        assert_eq!(v, vec![1, 2]);
    }

    #[test]
    fn merge_interleaved() {
        let mut v = vec![1, 3, 5];
        merge_into(&mut v, &[2, 4, 6]);
        assert_eq!(v, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn merge_into_empty_destination() {
        let mut v: Vec<u32> = vec![];
        merge_into(&mut v, &[7, 8]);
        assert_eq!(v, vec![7, 8]);
    }

    #[test]
    fn merge_from_empty_source() {
        let mut v = vec![1, 2];
        merge_into(&mut v, &[]);
        assert_eq!(v, vec![1, 2]);
    }

    /// Key-only ordering with a distinguishing tag, to observe tie placement.
    #[derive(Clone, Copy, Debug)]
    struct Tagged {
        key: u32,
        tag: char,
    }

    impl PartialEq for Tagged {
        fn eq(&self, other: &Self) -> bool {
            self.key == other.key
        }
    }
    impl Eq for Tagged {}
    impl PartialOrd for Tagged {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            Some(self.cmp(other))
        }
    }
    impl Ord for Tagged {
        fn cmp(&self, other: &Self) -> Ordering {
            self.key.cmp(&other.key)
        }
    }

    #[test]
    fn merge_ties_place_source_first() {
        let mut into = vec![
            Tagged { key: 1, tag: 'i' },
            Tagged { key: 2, tag: 'i' },
        ];
        let from = [
            Tagged { key: 1, tag: 'f' },
            Tagged { key: 2, tag: 'f' },
        ];
        merge_into(&mut into, &from);
        let tags: Vec<(u32, char)> = into.iter().map(|t| (t.key, t.tag)).collect();
        assert_eq!(tags, vec![(1, 'f'), (1, 'i'), (2, 'f'), (2, 'i')]);
    }

    #[test]
    fn extract_partitions_and_counts() {
        let mut items = vec![1, 2, 3, 4, 5, 6];
        let mut out = Vec::new();
        let n = extract_to(&mut items, &mut out, |v| v % 2 == 0);
        assert_eq!(n, 3);
        assert_eq!(items, vec![1, 3, 5]);
        assert_eq!(out, vec![2, 4, 6]);
    }

    #[test]
    fn extract_nothing_matches() {
        let mut items = vec![1, 3];
        let mut out = Vec::new();
        assert_eq!(extract_to(&mut items, &mut out, |_| false), 0);
        assert_eq!(items, vec![1, 3]);
        assert!(out.is_empty());
    }

    #[test]
    fn extract_appends_to_existing_output() {
        let mut items = vec![4, 5];
        let mut out = vec![0];
        extract_to(&mut items, &mut out, |v| *v == 5);
        assert_eq!(out, vec![0, 5]);
    }

    fn ascending(range: std::ops::Range<u32>, max_len: usize) -> impl Strategy<Value = Vec<u32>> {
        prop::collection::btree_set(range, 0..max_len)
            .prop_map(|s| s.into_iter().collect::<Vec<u32>>())
    }

    proptest! {
        #[test]
        fn remove_matches_set_difference(
            target in ascending(0..400, 64),
            to_remove in ascending(0..400, 64),
        ) {
            let mut v = target.clone();
            remove_from_sorted(&mut v, &to_remove);
            let expect: Vec<u32> = target
                .iter()
                .copied()
                .filter(|x| to_remove.binary_search(x).is_err())
                .collect();
            prop_assert_eq!(v, expect);
        }

        #[test]
        fn merge_is_sorted_union_multiset(
            into in ascending(0..400, 64),
            from in ascending(0..400, 64),
        ) {
            let mut v = into.clone();
            merge_into(&mut v, &from);
            let mut expect = into;
            expect.extend_from_slice(&from);
            expect.sort_unstable();
            prop_assert_eq!(v, expect);
        }

        #[test]
        fn extract_preserves_order_and_multiset(
            items in prop::collection::vec(0u32..100, 0..64),
            pivot in 0u32..100,
        ) {
            let before = items.clone();
            let mut items = items;
            let mut out = Vec::new();
            let n = extract_to(&mut items, &mut out, |v| *v < pivot);
            prop_assert_eq!(n, out.len());
            let kept: Vec<u32> = before.iter().copied().filter(|v| *v >= pivot).collect();
            let moved: Vec<u32> = before.iter().copied().filter(|v| *v < pivot).collect();
            prop_assert_eq!(items, kept);
            prop_assert_eq!(out, moved);
        }
    }
}
