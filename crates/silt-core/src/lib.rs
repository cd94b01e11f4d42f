//! Core types and primitives for the silt change-tracking engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the typed indices, the [`ItemSet`] bitset used for dirty tracking,
//! the sorted-sequence algorithms that keep notification batches
//! ordered and duplicate-free, and the [`ChangeListener`] observer
//! trait.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod bits;
mod id;
mod listener;
pub mod sorted;

pub use bits::{ItemSet, ItemSetIter};
pub use id::{ComponentId, ItemId, NodeId};
pub use listener::ChangeListener;
