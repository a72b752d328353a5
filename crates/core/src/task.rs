//! Task model - one measurable unit of work inside a goal tree.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::id::TaskId;
use crate::node::{Counter, ProgressNode};

/// A task is either a leaf measured by its counter, or an aggregate of
/// subtasks.
///
/// Children are held behind `Arc` so an edited tree can share every
/// subtree that was not on the edited path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,

    /// Display label
    pub title: String,

    /// Direct measurement
    #[serde(flatten)]
    pub counter: Counter,

    /// Ordered subtasks
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtasks: Vec<Arc<Task>>,
}

impl Task {
    /// Create a leaf task with a fresh id.
    pub fn new(title: impl Into<String>, current: f64, target: f64) -> Self {
        Self::with_id(TaskId::new(), title, current, target)
    }

    /// Create a leaf task with the given id.
    pub fn with_id(
        id: impl Into<TaskId>,
        title: impl Into<String>,
        current: f64,
        target: f64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            counter: Counter::new(current, target),
            subtasks: Vec::new(),
        }
    }

    /// Builder-style: append a subtask.
    pub fn with_subtask(mut self, task: Task) -> Self {
        self.subtasks.push(Arc::new(task));
        self
    }
}

impl ProgressNode for Task {
    fn id(&self) -> &TaskId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn counter(&self) -> &Counter {
        &self.counter
    }

    fn subtasks(&self) -> &[Arc<Task>] {
        &self.subtasks
    }

    fn with_subtasks(&self, subtasks: Vec<Arc<Task>>) -> Self {
        Self {
            id: self.id.clone(),
            title: self.title.clone(),
            counter: self.counter,
            subtasks,
        }
    }
}
