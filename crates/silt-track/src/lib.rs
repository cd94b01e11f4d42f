//! Single-store change tracking for the silt engine.
//!
//! [`StoreTracker`] records which item slots and components of one
//! externally owned store were added, removed, or modified since the
//! last reconciliation, and delivers sorted, deduplicated batches to
//! registered listeners when flushed.
//!
//! # Architecture
//!
//! ```text
//! StoreTracker
//! ├── frontier / live counters + free-slot stack (LIFO, flush-gated reuse)
//! ├── ItemSet per component (per-item dirty bitmap, dedup within a cycle)
//! ├── pending buffers (added / removed / per-component modified / components)
//! ├── ListenerSet (four Rc<dyn ChangeListener> registries)
//! └── FlushStats (cumulative counters)
//! ```
//!
//! A tracker on its own reconciles locally; cross-store dependency
//! ordering lives in `silt-graph`, which owns a tracker per node.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod listeners;
mod stats;
mod tracker;

pub use listeners::ListenerSet;
pub use stats::FlushStats;
pub use tracker::StoreTracker;
