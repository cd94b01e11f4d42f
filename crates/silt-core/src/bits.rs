//! The [`ItemSet`] dirty bitmap.

use crate::id::ItemId;

/// A set of item IDs implemented as a dynamically-sized bitset.
///
/// Backs the per-component dirty bitmaps in the tracker: membership is
/// the "already reported this cycle" test, so [`insert`](ItemSet::insert)
/// doubles as the dedup check by reporting whether the bit was newly
/// set. The bitset grows lazily as higher indices are inserted; indices
/// beyond the allocated words are simply absent.
#[derive(Clone, Debug, Default)]
pub struct ItemSet {
    bits: Vec<u64>,
}

impl ItemSet {
    const BITS_PER_WORD: usize = 64;

    /// Create an empty item set.
    pub fn empty() -> Self {
        Self { bits: Vec::new() }
    }

    /// Insert an item ID, returning `true` if it was not already present.
    pub fn insert(&mut self, item: ItemId) -> bool {
        let word = item.0 as usize / Self::BITS_PER_WORD;
        let bit = item.0 as usize % Self::BITS_PER_WORD;
        if word >= self.bits.len() {
            self.bits.resize(word + 1, 0);
        }
        let mask = 1u64 << bit;
        let fresh = self.bits[word] & mask == 0;
        self.bits[word] |= mask;
        fresh
    }

    /// Remove an item ID, returning `true` if it was present.
    pub fn remove(&mut self, item: ItemId) -> bool {
        let word = item.0 as usize / Self::BITS_PER_WORD;
        let bit = item.0 as usize % Self::BITS_PER_WORD;
        if word >= self.bits.len() {
            return false;
        }
        let mask = 1u64 << bit;
        let present = self.bits[word] & mask != 0;
        self.bits[word] &= !mask;
        present
    }

    /// Check whether the set contains an item ID.
    pub fn contains(&self, item: ItemId) -> bool {
        let word = item.0 as usize / Self::BITS_PER_WORD;
        let bit = item.0 as usize % Self::BITS_PER_WORD;
        word < self.bits.len() && (self.bits[word] & (1u64 << bit)) != 0
    }

    /// Remove every item ID while keeping the allocated words.
    pub fn clear(&mut self) {
        self.bits.fill(0);
    }

    /// Returns `true` if the set contains no items.
    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&w| w == 0)
    }

    /// Returns the number of items in the set.
    pub fn len(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Iterate over the item IDs in the set, in ascending order.
    pub fn iter(&self) -> ItemSetIter<'_> {
        ItemSetIter {
            bits: &self.bits,
            word_idx: 0,
            bit_idx: 0,
        }
    }
}

impl PartialEq for ItemSet {
    fn eq(&self, other: &Self) -> bool {
        let max_len = self.bits.len().max(other.bits.len());
        for i in 0..max_len {
            let a = self.bits.get(i).copied().unwrap_or(0);
            let b = other.bits.get(i).copied().unwrap_or(0);
            if a != b {
                return false;
            }
        }
        true
    }
}

impl Eq for ItemSet {}

impl FromIterator<ItemId> for ItemSet {
    fn from_iter<I: IntoIterator<Item = ItemId>>(iter: I) -> Self {
        let mut set = Self::empty();
        for item in iter {
            set.insert(item);
        }
        set
    }
}

impl<'a> IntoIterator for &'a ItemSet {
    type Item = ItemId;
    type IntoIter = ItemSetIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over item IDs in an [`ItemSet`], yielding IDs in ascending order.
pub struct ItemSetIter<'a> {
    bits: &'a [u64],
    word_idx: usize,
    bit_idx: usize,
}

impl Iterator for ItemSetIter<'_> {
    type Item = ItemId;

    fn next(&mut self) -> Option<Self::Item> {
        while self.word_idx < self.bits.len() {
            let word = self.bits[self.word_idx];
            while self.bit_idx < 64 {
                let bit = self.bit_idx;
                self.bit_idx += 1;
                if word & (1u64 << bit) != 0 {
                    return Some(ItemId((self.word_idx * 64 + bit) as u32));
                }
            }
            self.word_idx += 1;
            self.bit_idx = 0;
        }
        None
    }
}
