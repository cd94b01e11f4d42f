//! Strongly-typed index newtypes.
//!
//! All three are opaque handles into externally owned collections: silt
//! tracks which indices changed, never the payloads behind them.

use std::fmt;

/// Identifies an item slot within a tracked store.
///
/// Item slots are announced by the owning store as it allocates its own
/// backing storage; `ItemId(n)` is the n-th slot of that storage. Slots
/// freed by removal become eligible for reuse after the next flush.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ItemId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a component column within a tracked store.
///
/// Components are appended over the store's lifetime and never removed;
/// `ComponentId(n)` is the n-th column ever registered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub u32);

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ComponentId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a tracker node within a change graph.
///
/// Handed out by the graph builder; `NodeId(n)` is the n-th store added.
/// Valid only for the graph that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
