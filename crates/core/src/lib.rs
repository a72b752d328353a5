//! GoalBoard core data models.
//!
//! Goals own a tree of tasks. Leaves are measured by a `current`/`target`
//! counter, aggregates by their children. Children sit behind `Arc` so edits
//! can produce new trees that share unchanged subtrees with the old ones.

#![warn(missing_docs)]

// Core identities
mod id;

// Tree shape
mod node;

// Goal & task
mod goal;
mod task;

// Re-exports
pub use id::{GoalId, NodeId, TaskId};
pub use node::{Counter, NodeKind, ProgressNode};
pub use goal::{Goal, GoalProgress, GoalStatus};
pub use task::Task;

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
