//! Shared shape of goal-tree nodes.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::id::NodeId;
use crate::task::Task;

/// Direct measurement of a node: how far along it is against its target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Counter {
    /// Progress so far. May exceed `target`.
    pub current: f64,

    /// Goal value. Expected to be positive on leaves.
    pub target: f64,
}

impl Counter {
    /// Create a counter.
    pub fn new(current: f64, target: f64) -> Self {
        Self { current, target }
    }
}

/// How a node reports progress.
///
/// A node with subtasks is an aggregate and its own counter is not read.
#[derive(Debug, Clone, Copy)]
pub enum NodeKind<'a> {
    /// No subtasks: progress comes from the counter.
    Leaf(&'a Counter),

    /// One or more subtasks: progress comes from the children.
    Aggregate(&'a [Arc<Task>]),
}

/// A node in a goal tree, either the goal root or a task beneath it.
pub trait ProgressNode: Clone {
    /// Node identifier.
    fn id(&self) -> &NodeId;

    /// Display label.
    fn title(&self) -> &str;

    /// Stored counter, read only when the node is a leaf.
    fn counter(&self) -> &Counter;

    /// Direct children, in order.
    fn subtasks(&self) -> &[Arc<Task>];

    /// Shallow copy of this node with its child list replaced.
    fn with_subtasks(&self, subtasks: Vec<Arc<Task>>) -> Self;

    /// Leaf or aggregate view of this node.
    fn kind(&self) -> NodeKind<'_> {
        match self.subtasks() {
            [] => NodeKind::Leaf(self.counter()),
            children => NodeKind::Aggregate(children),
        }
    }

    /// Whether this node has no subtasks.
    fn is_leaf(&self) -> bool {
        self.subtasks().is_empty()
    }
}
