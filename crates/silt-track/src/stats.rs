//! Cumulative reconciliation counters.

/// Counters accumulated across every flush of one tracker.
///
/// Counts reflect delivered batches, after within-cycle cancellation:
/// an item added and removed in the same cycle increments `cancelled`
/// and neither `items_added` nor `items_removed`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlushStats {
    /// Number of flushes that found the tracker dirty and reconciled.
    pub flushes: u64,
    /// Item indices delivered through items-added batches.
    pub items_added: u64,
    /// Item indices delivered through items-removed batches.
    pub items_removed: u64,
    /// Add-then-remove pairs cancelled before delivery.
    pub cancelled: u64,
    /// Non-empty modified-components batches delivered.
    pub component_batches: u64,
}
