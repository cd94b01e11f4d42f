//! Silt: change tracking and flush notification for component-indexed stores.
//!
//! This is the top-level facade crate that re-exports the public API
//! from the silt sub-crates. For most users, adding `silt` as a single
//! dependency is sufficient.
//!
//! A store owns its own item and component storage; silt tracks which
//! indices changed. The store reports every mutation to its tracker,
//! and a [`graph::ChangeGraph`] of trackers delivers sorted,
//! duplicate-free notification batches to listeners on `flush` —
//! always reconciling upstream dependencies first.
//!
//! # Quick start
//!
//! ```rust
//! use silt::prelude::*;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! // A listener that mirrors added items into its own index list.
//! #[derive(Default)]
//! struct AddedIndex {
//!     items: RefCell<Vec<ItemId>>,
//! }
//! impl ChangeListener for AddedIndex {
//!     fn on_items_added(&self, items: &[ItemId]) {
//!         self.items.borrow_mut().extend_from_slice(items);
//!     }
//! }
//!
//! // instances depends on meshes: mesh listeners always deliver first.
//! let mut builder = GraphBuilder::new();
//! let meshes = builder.add_store();
//! let instances = builder.add_store();
//! builder.depends_on(instances, meshes).unwrap();
//! let mut graph = builder.build().unwrap();
//!
//! let index = Rc::new(AddedIndex::default());
//! graph.listeners_mut(meshes).add_items_added(index.clone());
//!
//! // The store mutates its own storage, then reports each change.
//! graph.note_components_added(meshes, 1);
//! graph.note_item_added(meshes, ItemId(0));
//! graph.note_item_component_modified(meshes, ItemId(0), ComponentId(0));
//! graph.flush_all();
//!
//! assert_eq!(&*index.items.borrow(), &[ItemId(0)]);
//! assert!(!graph.store(meshes).is_dirty());
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `silt-core` | IDs, `ItemSet`, sorted-sequence algorithms, `ChangeListener` |
//! | [`track`] | `silt-track` | `StoreTracker`, `ListenerSet`, `FlushStats` |
//! | [`graph`] | `silt-graph` | `GraphBuilder`, `ChangeGraph`, `GraphError` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, the listener trait, and sorted-sequence algorithms (`silt-core`).
pub use silt_core as types;

/// Single-store change tracking (`silt-track`).
pub use silt_track as track;

/// Dependency-graph ownership and ordered flushing (`silt-graph`).
pub use silt_graph as graph;

pub mod prelude {
    //! The types most users need, in one import.

    pub use silt_core::{ChangeListener, ComponentId, ItemId, ItemSet, NodeId};
    pub use silt_graph::{ChangeGraph, GraphBuilder, GraphError};
    pub use silt_track::{FlushStats, ListenerSet, StoreTracker};
}
