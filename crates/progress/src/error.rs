//! Errors raised around the progress engine.

use goalboard_core::{GoalId, NodeId};

/// Error type for progress operations.
pub type Result<T> = std::result::Result<T, ProgressError>;

/// Errors that can occur when editing or tracking goal trees.
#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    /// No node in the tree carries the requested id
    #[error("Node not found: {0}")]
    NotFound(NodeId),

    /// No goal with this id is held by the source
    #[error("Goal not found: {0}")]
    GoalNotFound(GoalId),

    /// A new task failed validation
    #[error("Invalid task: {0}")]
    InvalidTask(String),

    /// Undo history is empty
    #[error("Nothing to undo")]
    NothingToUndo,
}
