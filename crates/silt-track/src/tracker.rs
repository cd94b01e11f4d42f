//! The per-store change tracker.

use silt_core::sorted::{extract_to, remove_from_sorted};
use silt_core::{ChangeListener, ComponentId, ItemId, ItemSet};

use crate::listeners::ListenerSet;
use crate::stats::FlushStats;

use std::rc::Rc;

/// Records pending changes to one component-indexed store and delivers
/// them to listeners on [`flush`](StoreTracker::flush).
///
/// The tracker holds indices only, never payloads: the owning store
/// mutates its own backing storage, then reports each mutation here.
/// Between flushes the tracker accumulates pending buffers, deduplicated
/// through per-component dirty bitmaps; a flush sorts the buffers,
/// cancels add-then-remove pairs, subtracts removed items from every
/// batch, delivers, and resets the per-cycle state.
///
/// # Slot lifecycle
///
/// Item slots are announced through [`note_item_added`]. Announcing at
/// or past the frontier extends it, and any skipped slots become free
/// immediately (the gap-fill contract). Removal frees a slot, but only
/// at the next flush — within the removing cycle the slot is neither
/// live nor reusable. [`pop_free_slot`] hands reclaimed slots back LIFO
/// for the store to reuse instead of growing the frontier.
///
/// # Contracts
///
/// Index arguments must refer to announced slots and registered
/// components, each slot is added or removed at most once per cycle,
/// and a freed slot is re-announced only after being popped. These are
/// caller contracts checked with `debug_assert!` — debug builds panic
/// on violation, release builds take the unchecked fast path.
///
/// A fresh tracker starts dirty, so the first flush establishes the
/// baseline even when nothing was reported.
///
/// [`note_item_added`]: StoreTracker::note_item_added
/// [`pop_free_slot`]: StoreTracker::pop_free_slot
#[derive(Debug)]
pub struct StoreTracker {
    /// One past the highest slot ever announced.
    frontier: u32,
    /// Live item count.
    live: u32,
    /// Reclaimed slots, reusable LIFO. Populated at flush time, and
    /// immediately for gap-filled slots.
    free: Vec<ItemId>,
    /// Whether this tracker has unreconciled state.
    dirty: bool,
    /// Per-component container-level dirty flag.
    component_dirty: Vec<bool>,
    /// Per-component per-item dirty bitmap; the within-cycle dedup test.
    item_dirty: Vec<ItemSet>,
    pending_added: Vec<ItemId>,
    pending_removed: Vec<ItemId>,
    /// Per-component pending-modified lists, indexed by component.
    pending_modified: Vec<Vec<ItemId>>,
    /// Components first dirtied this cycle, in insertion order.
    pending_components: Vec<ComponentId>,
    /// Flush scratch for cancelled add-then-remove pairs, reused across cycles.
    cancelled: Vec<ItemId>,
    listeners: ListenerSet,
    stats: FlushStats,
}

impl StoreTracker {
    /// Create a tracker with no components and no announced slots.
    ///
    /// Starts dirty so the first flush establishes the baseline.
    pub fn new() -> Self {
        Self {
            frontier: 0,
            live: 0,
            free: Vec::new(),
            dirty: true,
            component_dirty: Vec::new(),
            item_dirty: Vec::new(),
            pending_added: Vec::new(),
            pending_removed: Vec::new(),
            pending_modified: Vec::new(),
            pending_components: Vec::new(),
            cancelled: Vec::new(),
            listeners: ListenerSet::new(),
            stats: FlushStats::default(),
        }
    }

    // ── Mutation reporting ─────────────────────────────────────────

    /// Record that the store made `item` live.
    ///
    /// Announcing at or past the frontier extends it; skipped slots in
    /// between become free immediately. Announcing below the frontier
    /// reuses a slot previously returned by
    /// [`pop_free_slot`](StoreTracker::pop_free_slot).
    ///
    /// Add implies modify: the item is queued as modified for every
    /// component that currently exists, so first-flush consumers observe
    /// populated component data for new items.
    pub fn note_item_added(&mut self, item: ItemId) {
        debug_assert!(
            !self.pending_added.contains(&item),
            "item {item} already added this cycle"
        );
        debug_assert!(
            !self.pending_removed.contains(&item),
            "item {item} removed this cycle; its slot is reusable only after the next flush"
        );
        debug_assert!(
            !self.free.contains(&item),
            "item {item} is on the free stack; pop it before re-announcing"
        );
        if item.0 >= self.frontier {
            for gap in self.frontier..item.0 {
                self.free.push(ItemId(gap));
            }
            self.frontier = item.0 + 1;
        }
        self.live += 1;
        self.pending_added.push(item);
        for c in 0..self.component_count() {
            self.mark_item_component(item, ComponentId(c));
        }
        self.dirty = true;
    }

    /// Record that the store removed `item`.
    ///
    /// The aggregate state of every component changed, so all components
    /// are marked container-dirty; no per-item bits are set — removed
    /// items are not reported through item-component-modified. The slot
    /// joins the free stack at the next flush.
    pub fn note_item_removed(&mut self, item: ItemId) {
        debug_assert!(item.0 < self.frontier, "item {item} was never announced");
        debug_assert!(self.live > 0, "no live items to remove");
        debug_assert!(
            !self.pending_removed.contains(&item),
            "item {item} already removed this cycle"
        );
        self.live -= 1;
        self.pending_removed.push(item);
        for c in 0..self.component_count() {
            self.mark_component(ComponentId(c));
        }
        self.dirty = true;
    }

    /// Record that the store modified `item`'s data for `component`.
    ///
    /// A repeat report for the same pair within one cycle is a no-op.
    pub fn note_item_component_modified(&mut self, item: ItemId, component: ComponentId) {
        debug_assert!(item.0 < self.frontier, "item {item} was never announced");
        debug_assert!(
            (component.0 as usize) < self.item_dirty.len(),
            "component {component} is not registered"
        );
        if self.mark_item_component(item, component) {
            self.dirty = true;
        }
    }

    /// Register `n` new components.
    ///
    /// Each starts container-dirty (queued into the modified-components
    /// batch) with an all-clear per-item bitmap: pre-existing items are
    /// never retroactively reported modified for a component they had no
    /// data for.
    pub fn note_components_added(&mut self, n: u32) {
        for _ in 0..n {
            let component = ComponentId(self.item_dirty.len() as u32);
            self.item_dirty.push(ItemSet::empty());
            self.pending_modified.push(Vec::new());
            self.component_dirty.push(true);
            self.pending_components.push(component);
        }
        if n > 0 {
            self.dirty = true;
        }
    }

    /// Mark the tracker dirty without recording a local change.
    ///
    /// Returns `true` only on the clean→dirty transition; an
    /// already-dirty tracker reports `false` so graph propagation can
    /// short-circuit instead of re-walking downstream nodes.
    pub fn mark_dirty(&mut self) -> bool {
        if self.dirty {
            return false;
        }
        self.dirty = true;
        true
    }

    // ── Reconciliation ─────────────────────────────────────────────

    /// Reconcile this tracker's pending state and notify listeners.
    ///
    /// No-op when clean. Delivery order: items-removed, items-added,
    /// item-component-modified per component in ascending component
    /// order, then container-components-modified in first-dirtied
    /// order. Empty batches are skipped. After delivery every pending
    /// buffer and dirty bit is cleared.
    ///
    /// Dependency ordering across stores is the graph's job: when this
    /// tracker is a node in a change graph, flush it through the graph
    /// so upstream stores deliver first.
    pub fn flush(&mut self) {
        if !self.dirty {
            return;
        }

        self.pending_removed.sort_unstable();
        self.pending_added.sort_unstable();

        // Removals commit first: freed slots are reusable from the next
        // cycle on, including slots whose add was cancelled below.
        self.free.extend_from_slice(&self.pending_removed);

        // Clear-on-flush: every bit set this cycle has an entry in some
        // pending list (removal sets no bits), so clearing the listed
        // entries restores an all-clear bitmap.
        for (c, list) in self.pending_modified.iter().enumerate() {
            let bits = &mut self.item_dirty[c];
            for &item in list {
                bits.remove(item);
            }
        }

        // Modifications of removed items are never delivered, including
        // the add-implied ones of items cancelled below.
        for list in &mut self.pending_modified {
            list.sort_unstable();
            remove_from_sorted(list, &self.pending_removed);
        }

        // An item added and removed within one cycle appears in neither
        // delivered batch.
        self.cancelled.clear();
        let added = &self.pending_added;
        extract_to(&mut self.pending_removed, &mut self.cancelled, |item| {
            added.binary_search(item).is_ok()
        });
        remove_from_sorted(&mut self.pending_added, &self.cancelled);

        self.stats.flushes += 1;
        self.stats.items_added += self.pending_added.len() as u64;
        self.stats.items_removed += self.pending_removed.len() as u64;
        self.stats.cancelled += self.cancelled.len() as u64;

        if !self.pending_removed.is_empty() {
            for listener in self.listeners.items_removed() {
                listener.on_items_removed(&self.pending_removed);
            }
        }
        if !self.pending_added.is_empty() {
            for listener in self.listeners.items_added() {
                listener.on_items_added(&self.pending_added);
            }
        }
        for (c, list) in self.pending_modified.iter().enumerate() {
            if list.is_empty() {
                continue;
            }
            let component = ComponentId(c as u32);
            for listener in self.listeners.item_component_modified() {
                listener.on_item_component_modified(list, component);
            }
        }
        if !self.pending_components.is_empty() {
            self.stats.component_batches += 1;
            for listener in self.listeners.container_components_modified() {
                listener.on_container_components_modified(&self.pending_components);
            }
        }

        for &component in &self.pending_components {
            self.component_dirty[component.0 as usize] = false;
        }
        self.pending_added.clear();
        self.pending_removed.clear();
        for list in &mut self.pending_modified {
            list.clear();
        }
        self.pending_components.clear();
        self.cancelled.clear();
        self.dirty = false;
    }

    // ── Slot and component reads ───────────────────────────────────

    /// Number of live items.
    pub fn live_count(&self) -> u32 {
        self.live
    }

    /// One past the highest slot ever announced (the frontier).
    pub fn slot_count(&self) -> u32 {
        self.frontier
    }

    /// Number of registered components.
    pub fn component_count(&self) -> u32 {
        self.item_dirty.len() as u32
    }

    /// Whether any reclaimed slot is available for reuse.
    pub fn has_free_slots(&self) -> bool {
        !self.free.is_empty()
    }

    /// Number of reclaimed slots available for reuse.
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Whether `item` is currently on the free stack.
    pub fn is_slot_free(&self, item: ItemId) -> bool {
        self.free.contains(&item)
    }

    /// Remove and return the most recently freed slot, if any.
    ///
    /// The store re-announces the popped slot with
    /// [`note_item_added`](StoreTracker::note_item_added) once it has
    /// placed an item there.
    pub fn pop_free_slot(&mut self) -> Option<ItemId> {
        self.free.pop()
    }

    /// Whether this tracker has unreconciled state.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Cumulative reconciliation counters.
    pub fn stats(&self) -> &FlushStats {
        &self.stats
    }

    // ── Listener registration ──────────────────────────────────────

    /// The listener registries, for registration and removal.
    pub fn listeners_mut(&mut self) -> &mut ListenerSet {
        &mut self.listeners
    }

    /// Convenience: register one listener for all four categories.
    pub fn listen_all(&mut self, listener: Rc<dyn ChangeListener>) {
        self.listeners.add_items_added(listener.clone());
        self.listeners.add_items_removed(listener.clone());
        self.listeners.add_item_component_modified(listener.clone());
        self.listeners.add_container_components_modified(listener);
    }

    // ── Internals ──────────────────────────────────────────────────

    /// Set the per-item bit and queue the pending entry unless the pair
    /// was already reported this cycle. Returns whether it was fresh.
    fn mark_item_component(&mut self, item: ItemId, component: ComponentId) -> bool {
        let c = component.0 as usize;
        if !self.item_dirty[c].insert(item) {
            return false;
        }
        self.pending_modified[c].push(item);
        self.mark_component(component);
        true
    }

    fn mark_component(&mut self, component: ComponentId) {
        let c = component.0 as usize;
        if !self.component_dirty[c] {
            self.component_dirty[c] = true;
            self.pending_components.push(component);
        }
    }
}

impl Default for StoreTracker {
    fn default() -> Self {
        Self::new()
    }
}
