//! Test fixtures for silt development.
//!
//! Provides [`RecordingListener`], which captures every delivered batch
//! for assertions, and [`EventLog`] / [`TaggedListener`] for asserting
//! cross-store delivery order.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::cell::RefCell;
use std::rc::Rc;

use silt_core::{ChangeListener, ComponentId, ItemId};

/// Captures every callback invocation, one entry per delivered batch.
///
/// Slices are copied out at delivery time, so assertions can run after
/// the flush returns. Construct with [`RecordingListener::shared`] and
/// register the same `Rc` in as many categories as the test needs.
#[derive(Default)]
pub struct RecordingListener {
    pub added: RefCell<Vec<Vec<ItemId>>>,
    pub removed: RefCell<Vec<Vec<ItemId>>>,
    pub modified: RefCell<Vec<(ComponentId, Vec<ItemId>)>>,
    pub components: RefCell<Vec<Vec<ComponentId>>>,
}

impl RecordingListener {
    pub fn shared() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Total callback invocations across all four categories.
    pub fn total_callbacks(&self) -> usize {
        self.added.borrow().len()
            + self.removed.borrow().len()
            + self.modified.borrow().len()
            + self.components.borrow().len()
    }

    pub fn added_batches(&self) -> Vec<Vec<ItemId>> {
        self.added.borrow().clone()
    }

    pub fn removed_batches(&self) -> Vec<Vec<ItemId>> {
        self.removed.borrow().clone()
    }

    pub fn modified_batches(&self) -> Vec<(ComponentId, Vec<ItemId>)> {
        self.modified.borrow().clone()
    }

    pub fn component_batches(&self) -> Vec<Vec<ComponentId>> {
        self.components.borrow().clone()
    }
}

impl ChangeListener for RecordingListener {
    fn on_items_added(&self, items: &[ItemId]) {
        self.added.borrow_mut().push(items.to_vec());
    }

    fn on_items_removed(&self, items: &[ItemId]) {
        self.removed.borrow_mut().push(items.to_vec());
    }

    fn on_item_component_modified(&self, items: &[ItemId], component: ComponentId) {
        self.modified.borrow_mut().push((component, items.to_vec()));
    }

    fn on_container_components_modified(&self, components: &[ComponentId]) {
        self.components.borrow_mut().push(components.to_vec());
    }
}

/// A shared, append-only log of notification events.
///
/// Clone it into several [`TaggedListener`]s registered on different
/// stores, then assert on the interleaving after a flush.
#[derive(Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<String>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, event: impl Into<String>) {
        self.events.borrow_mut().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }
}

/// Records `"<tag>:<category>"` into a shared [`EventLog`] on every callback.
pub struct TaggedListener {
    tag: String,
    log: EventLog,
}

impl TaggedListener {
    pub fn shared(tag: impl Into<String>, log: EventLog) -> Rc<Self> {
        Rc::new(Self {
            tag: tag.into(),
            log,
        })
    }
}

impl ChangeListener for TaggedListener {
    fn on_items_added(&self, _items: &[ItemId]) {
        self.log.record(format!("{}:added", self.tag));
    }

    fn on_items_removed(&self, _items: &[ItemId]) {
        self.log.record(format!("{}:removed", self.tag));
    }

    fn on_item_component_modified(&self, _items: &[ItemId], component: ComponentId) {
        self.log.record(format!("{}:modified:{component}", self.tag));
    }

    fn on_container_components_modified(&self, _components: &[ComponentId]) {
        self.log.record(format!("{}:components", self.tag));
    }
}
