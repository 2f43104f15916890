//! Identity-keyed visit tracking
//!
//! One guard lives for exactly one extraction call. It is keyed by arena
//! index, so structurally equal but distinct nodes are tracked separately
//! while a node reached twice (shared reference or cycle) is seen once.

use std::collections::HashSet;

use super::document::NodeId;

/// Set of container nodes already processed in the current traversal
#[derive(Debug, Default)]
pub struct VisitedGuard {
    seen: HashSet<NodeId>,
}

impl VisitedGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `node`; true on the first visit, false on every later one
    ///
    /// Only containers should be passed in; the extractor never registers
    /// primitives or null.
    pub fn visit(&mut self, node: NodeId) -> bool {
        self.seen.insert(node)
    }

    pub fn is_visited(&self, node: NodeId) -> bool {
        self.seen.contains(&node)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
