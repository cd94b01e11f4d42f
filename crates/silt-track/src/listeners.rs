//! Per-category listener registries.

use std::rc::Rc;

use silt_core::ChangeListener;

/// The four listener registries of a tracker, one per change category.
///
/// A listener registers only for the categories it cares about; one
/// object may register for several (hence `Rc`). Adding is amortized
/// O(1); removing is a linear scan by pointer identity. Registering a
/// listener mid-cycle fires no catch-up callback — the next flush
/// delivers to whoever is registered at delivery time.
#[derive(Default)]
pub struct ListenerSet {
    items_added: Vec<Rc<dyn ChangeListener>>,
    items_removed: Vec<Rc<dyn ChangeListener>>,
    item_component_modified: Vec<Rc<dyn ChangeListener>>,
    container_components_modified: Vec<Rc<dyn ChangeListener>>,
}

fn remove_by_identity(registry: &mut Vec<Rc<dyn ChangeListener>>, listener: &Rc<dyn ChangeListener>) {
    if let Some(pos) = registry.iter().position(|l| Rc::ptr_eq(l, listener)) {
        registry.remove(pos);
    }
}

impl ListenerSet {
    /// Create an empty listener set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for items-added batches.
    pub fn add_items_added(&mut self, listener: Rc<dyn ChangeListener>) {
        self.items_added.push(listener);
    }

    /// Unregister an items-added listener by pointer identity.
    pub fn remove_items_added(&mut self, listener: &Rc<dyn ChangeListener>) {
        remove_by_identity(&mut self.items_added, listener);
    }

    /// Register a listener for items-removed batches.
    pub fn add_items_removed(&mut self, listener: Rc<dyn ChangeListener>) {
        self.items_removed.push(listener);
    }

    /// Unregister an items-removed listener by pointer identity.
    pub fn remove_items_removed(&mut self, listener: &Rc<dyn ChangeListener>) {
        remove_by_identity(&mut self.items_removed, listener);
    }

    /// Register a listener for item-component-modified batches.
    pub fn add_item_component_modified(&mut self, listener: Rc<dyn ChangeListener>) {
        self.item_component_modified.push(listener);
    }

    /// Unregister an item-component-modified listener by pointer identity.
    pub fn remove_item_component_modified(&mut self, listener: &Rc<dyn ChangeListener>) {
        remove_by_identity(&mut self.item_component_modified, listener);
    }

    /// Register a listener for container-components-modified batches.
    pub fn add_container_components_modified(&mut self, listener: Rc<dyn ChangeListener>) {
        self.container_components_modified.push(listener);
    }

    /// Unregister a container-components-modified listener by pointer identity.
    pub fn remove_container_components_modified(&mut self, listener: &Rc<dyn ChangeListener>) {
        remove_by_identity(&mut self.container_components_modified, listener);
    }

    pub(crate) fn items_added(&self) -> &[Rc<dyn ChangeListener>] {
        &self.items_added
    }

    pub(crate) fn items_removed(&self) -> &[Rc<dyn ChangeListener>] {
        &self.items_removed
    }

    pub(crate) fn item_component_modified(&self) -> &[Rc<dyn ChangeListener>] {
        &self.item_component_modified
    }

    pub(crate) fn container_components_modified(&self) -> &[Rc<dyn ChangeListener>] {
        &self.container_components_modified
    }
}

impl std::fmt::Debug for ListenerSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerSet")
            .field("items_added", &self.items_added.len())
            .field("items_removed", &self.items_removed.len())
            .field("item_component_modified", &self.item_component_modified.len())
            .field(
                "container_components_modified",
                &self.container_components_modified.len(),
            )
            .finish()
    }
}
