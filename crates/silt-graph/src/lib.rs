//! Dependency-graph ownership for silt trackers.
//!
//! A [`ChangeGraph`] owns one [`silt_track::StoreTracker`] per node and
//! the edges between them. Stores declare their upstream dependencies
//! while the graph is built; [`GraphBuilder::build`] validates the edge
//! structure once (rejecting cycles with a typed error rather than
//! recursing forever at flush time) and precomputes the topological
//! order and per-node ancestor sets that make every flush iterative.
//!
//! Mutations reported through the graph propagate dirtiness to
//! downstream nodes with a short-circuiting worklist, so each node's
//! clean→dirty transition happens at most once per cycle regardless of
//! graph shape. Flushing a node reconciles all of its dirty ancestors
//! first, in dependency order — downstream listeners never run before
//! the data they depend on has stabilized and been announced.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod graph;

pub use graph::{ChangeGraph, GraphBuilder, GraphError};
