//! Graph construction, validation, and ordered flushing.

use indexmap::IndexSet;
use smallvec::SmallVec;

use silt_core::sorted::merge_into;
use silt_core::{ComponentId, ItemId, NodeId};
use silt_track::{ListenerSet, StoreTracker};

use std::collections::VecDeque;
use std::error::Error;
use std::fmt;

/// Upstream lists are short in practice; keep them inline.
type UpstreamList = SmallVec<[NodeId; 4]>;

// ── Errors ─────────────────────────────────────────────────────────

/// Errors from graph construction (build-time, never per-cycle).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphError {
    /// An edge references a node the builder never created.
    UnknownNode {
        /// The unrecognised node.
        node: NodeId,
    },
    /// A store declared itself as its own upstream dependency.
    SelfDependency {
        /// The offending node.
        node: NodeId,
    },
    /// The same upstream dependency was declared twice for one store.
    DuplicateUpstream {
        /// The downstream node.
        node: NodeId,
        /// The dependency declared twice.
        upstream: NodeId,
    },
    /// The declared dependencies contain at least one cycle.
    CycleDetected {
        /// Every node involved in (or downstream of) a cycle, ascending.
        nodes: Vec<NodeId>,
    },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownNode { node } => write!(f, "unknown node {node}"),
            Self::SelfDependency { node } => {
                write!(f, "node {node} cannot depend on itself")
            }
            Self::DuplicateUpstream { node, upstream } => {
                write!(f, "node {node} already depends on {upstream}")
            }
            Self::CycleDetected { nodes } => {
                write!(f, "dependency cycle among nodes: ")?;
                for (i, node) in nodes.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{node}")?;
                }
                Ok(())
            }
        }
    }
}

impl Error for GraphError {}

// ── Builder ────────────────────────────────────────────────────────

/// Collects stores and dependency declarations, then validates them
/// into a [`ChangeGraph`].
///
/// Edges may be declared in any order between any pair of created
/// nodes; [`build`](GraphBuilder::build) is where acyclicity is
/// checked. After build the edge structure is frozen — there is no
/// operation to add or remove dependencies on a live graph.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    upstream: Vec<UpstreamList>,
}

impl GraphBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a store with no dependencies yet, returning its handle.
    pub fn add_store(&mut self) -> NodeId {
        let id = NodeId(self.upstream.len() as u32);
        self.upstream.push(UpstreamList::new());
        id
    }

    /// Declare that `node` depends on `upstream`.
    ///
    /// Declaration order is preserved as the node's upstream list
    /// order. Self-edges, duplicate edges, and unknown handles are
    /// rejected immediately; cycles are rejected at
    /// [`build`](GraphBuilder::build).
    pub fn depends_on(&mut self, node: NodeId, upstream: NodeId) -> Result<(), GraphError> {
        let n = self.upstream.len() as u32;
        for id in [node, upstream] {
            if id.0 >= n {
                return Err(GraphError::UnknownNode { node: id });
            }
        }
        if node == upstream {
            return Err(GraphError::SelfDependency { node });
        }
        let list = &mut self.upstream[node.0 as usize];
        if list.contains(&upstream) {
            return Err(GraphError::DuplicateUpstream { node, upstream });
        }
        list.push(upstream);
        Ok(())
    }

    /// Number of stores added so far.
    pub fn len(&self) -> usize {
        self.upstream.len()
    }

    /// Whether no stores have been added.
    pub fn is_empty(&self) -> bool {
        self.upstream.is_empty()
    }

    /// Validate the declared structure and construct the graph.
    ///
    /// Computes downstream edge sets, a deterministic topological order
    /// (Kahn's algorithm; every upstream node precedes its downstream
    /// nodes), and per-node ancestor sets. Returns
    /// [`GraphError::CycleDetected`] if any dependency cycle exists.
    /// Every tracker starts dirty, so the first flush establishes the
    /// baseline.
    pub fn build(self) -> Result<ChangeGraph, GraphError> {
        let n = self.upstream.len();

        let mut downstream: Vec<IndexSet<NodeId>> = vec![IndexSet::new(); n];
        for (i, ups) in self.upstream.iter().enumerate() {
            for &u in ups {
                downstream[u.0 as usize].insert(NodeId(i as u32));
            }
        }

        let mut indegree: Vec<usize> = self.upstream.iter().map(|ups| ups.len()).collect();
        let mut ready: VecDeque<NodeId> = (0..n as u32)
            .map(NodeId)
            .filter(|id| indegree[id.0 as usize] == 0)
            .collect();
        let mut topo: Vec<NodeId> = Vec::with_capacity(n);
        while let Some(id) = ready.pop_front() {
            topo.push(id);
            for &d in &downstream[id.0 as usize] {
                let deg = &mut indegree[d.0 as usize];
                *deg -= 1;
                if *deg == 0 {
                    ready.push_back(d);
                }
            }
        }
        if topo.len() != n {
            let nodes: Vec<NodeId> = (0..n as u32)
                .map(NodeId)
                .filter(|id| indegree[id.0 as usize] > 0)
                .collect();
            return Err(GraphError::CycleDetected { nodes });
        }

        // Ancestor sets, in topo order so each upstream set is final
        // before anything downstream of it merges it in.
        let mut ancestors: Vec<Vec<NodeId>> = vec![Vec::new(); n];
        for &id in &topo {
            let mut acc: Vec<NodeId> = Vec::new();
            for &u in &self.upstream[id.0 as usize] {
                merge_into(&mut acc, &ancestors[u.0 as usize]);
                merge_into(&mut acc, &[u]);
                acc.dedup();
            }
            ancestors[id.0 as usize] = acc;
        }

        Ok(ChangeGraph {
            nodes: (0..n).map(|_| StoreTracker::new()).collect(),
            upstream: self.upstream,
            downstream,
            topo,
            ancestors,
        })
    }
}

// ── Graph ──────────────────────────────────────────────────────────

/// An owned, validated dependency graph of store trackers.
///
/// All mutation reporting goes through the graph so that a clean→dirty
/// transition propagates to downstream nodes; reads and listener
/// registration address nodes directly. Dropping the graph tears
/// everything down — handles never outlive it usefully.
///
/// Node handles are plain indices: passing a handle from a different
/// graph is a contract violation (it addresses whatever node has that
/// index here, or panics if out of range).
#[derive(Debug)]
pub struct ChangeGraph {
    nodes: Vec<StoreTracker>,
    upstream: Vec<UpstreamList>,
    downstream: Vec<IndexSet<NodeId>>,
    topo: Vec<NodeId>,
    ancestors: Vec<Vec<NodeId>>,
}

impl ChangeGraph {
    /// Number of stores in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no stores.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Read access to a node's tracker.
    pub fn store(&self, node: NodeId) -> &StoreTracker {
        &self.nodes[node.0 as usize]
    }

    /// The listener registries of a node, for registration and removal.
    pub fn listeners_mut(&mut self, node: NodeId) -> &mut ListenerSet {
        self.nodes[node.0 as usize].listeners_mut()
    }

    /// A node's upstream dependencies, in declaration order.
    pub fn upstream(&self, node: NodeId) -> &[NodeId] {
        &self.upstream[node.0 as usize]
    }

    /// The nodes that depend on `node`, in registration order.
    pub fn downstream(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.downstream[node.0 as usize].iter().copied()
    }

    /// The precomputed flush order: every upstream node before its
    /// downstream nodes.
    pub fn topo_order(&self) -> &[NodeId] {
        &self.topo
    }

    // ── Mutation reporting ─────────────────────────────────────────

    /// Report an item made live in `node`'s store.
    /// See [`StoreTracker::note_item_added`].
    pub fn note_item_added(&mut self, node: NodeId, item: ItemId) {
        let tracker = &mut self.nodes[node.0 as usize];
        let was_dirty = tracker.is_dirty();
        tracker.note_item_added(item);
        if !was_dirty {
            self.dirty_downstream(node);
        }
    }

    /// Report an item removed from `node`'s store.
    /// See [`StoreTracker::note_item_removed`].
    pub fn note_item_removed(&mut self, node: NodeId, item: ItemId) {
        let tracker = &mut self.nodes[node.0 as usize];
        let was_dirty = tracker.is_dirty();
        tracker.note_item_removed(item);
        if !was_dirty {
            self.dirty_downstream(node);
        }
    }

    /// Report an item's component data modified in `node`'s store.
    /// See [`StoreTracker::note_item_component_modified`].
    pub fn note_item_component_modified(
        &mut self,
        node: NodeId,
        item: ItemId,
        component: ComponentId,
    ) {
        let tracker = &mut self.nodes[node.0 as usize];
        let was_dirty = tracker.is_dirty();
        tracker.note_item_component_modified(item, component);
        if !was_dirty && tracker.is_dirty() {
            self.dirty_downstream(node);
        }
    }

    /// Register `n` new components on `node`'s store.
    /// See [`StoreTracker::note_components_added`].
    pub fn note_components_added(&mut self, node: NodeId, n: u32) {
        let tracker = &mut self.nodes[node.0 as usize];
        let was_dirty = tracker.is_dirty();
        tracker.note_components_added(n);
        if !was_dirty && tracker.is_dirty() {
            self.dirty_downstream(node);
        }
    }

    /// Mark `node` dirty without a local change, propagating downstream.
    ///
    /// Idempotent within a cycle: marking an already-dirty node does
    /// nothing, and propagation short-circuits at every already-dirty
    /// node, so a diamond-shaped fan is walked at most once.
    pub fn mark_dirty(&mut self, node: NodeId) {
        if self.nodes[node.0 as usize].mark_dirty() {
            self.dirty_downstream(node);
        }
    }

    /// Remove and return the most recently freed slot of `node`'s store.
    pub fn pop_free_slot(&mut self, node: NodeId) -> Option<ItemId> {
        self.nodes[node.0 as usize].pop_free_slot()
    }

    // ── Reconciliation ─────────────────────────────────────────────

    /// Flush `node`, reconciling all of its upstream dependencies first.
    ///
    /// No-op when the node is clean (a clean node cannot have dirty
    /// ancestors — dirtiness propagates downstream eagerly). Otherwise
    /// walks the precomputed topological order restricted to the node's
    /// ancestors and the node itself, flushing each dirty member: every
    /// upstream store delivers its notifications before any store that
    /// depends on it.
    pub fn flush(&mut self, node: NodeId) {
        if !self.nodes[node.0 as usize].is_dirty() {
            return;
        }
        let idx = node.0 as usize;
        for i in 0..self.topo.len() {
            let member = self.topo[i];
            if member == node || self.ancestors[idx].binary_search(&member).is_ok() {
                self.nodes[member.0 as usize].flush();
            }
        }
    }

    /// Flush every store in dependency order.
    ///
    /// The typical once-per-frame entry point after all mutations for
    /// the frame have been reported.
    pub fn flush_all(&mut self) {
        for i in 0..self.topo.len() {
            let member = self.topo[i];
            self.nodes[member.0 as usize].flush();
        }
    }

    /// Worklist propagation of dirtiness to downstream nodes.
    ///
    /// Short-circuits at every node that is already dirty, so each
    /// reachable node is enqueued at most once per cycle.
    fn dirty_downstream(&mut self, origin: NodeId) {
        let mut worklist: Vec<NodeId> = self.downstream[origin.0 as usize].iter().copied().collect();
        while let Some(node) = worklist.pop() {
            if self.nodes[node.0 as usize].mark_dirty() {
                worklist.extend(self.downstream[node.0 as usize].iter().copied());
            }
        }
    }
}
