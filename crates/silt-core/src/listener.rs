//! The observer trait for flush notifications.

use crate::id::{ComponentId, ItemId};

/// Receives reconciled change batches from a tracked store.
///
/// A listener registers per category on a tracker; all callbacks run
/// synchronously inside `flush`, after every upstream store in the graph
/// has already delivered its own batches. Item batches are strictly
/// ascending with no duplicates; the component batch arrives in the
/// order components were first marked dirty within the cycle.
///
/// The borrowed slices are owned by the tracker and reused next cycle —
/// copy out anything that must outlive the callback. Callbacks must not
/// flush or mutate the same graph (the delivering tracker is mid-flush).
///
/// Every method has a no-op default body, so an implementation only
/// overrides the categories it registers for.
pub trait ChangeListener {
    /// Item slots that became live since the previous flush.
    fn on_items_added(&self, _items: &[ItemId]) {}

    /// Item slots removed since the previous flush. Their indices are
    /// already back on the free stack when this is called.
    fn on_items_removed(&self, _items: &[ItemId]) {}

    /// Items whose data for `component` changed since the previous
    /// flush. Newly added items report as modified for every component
    /// that existed when they were added.
    fn on_item_component_modified(&self, _items: &[ItemId], _component: ComponentId) {}

    /// Components whose aggregate state changed since the previous
    /// flush, in first-dirtied order.
    fn on_container_components_modified(&self, _components: &[ComponentId]) {}
}
