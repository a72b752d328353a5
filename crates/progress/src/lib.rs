//! Progress Tracking
//!
//! Goal-tree progress rollup, copy-on-write subtask edits, and the board
//! that owns the canonical goal list.

#![warn(missing_docs)]

pub mod board;
pub mod engine;
pub mod error;
pub mod tracker;
pub mod validation;

pub use board::{BoardConfig, GoalBoard};
pub use engine::{
    add_subtask, find_node, find_task, goal_progress, leaf_stats, summarize, task_progress,
    try_add_subtask, NodeRef,
};
pub use error::{ProgressError, Result};
pub use tracker::{
    BasicProgressTracker, GoalSource, InMemoryGoalSource, ProgressSnapshot, ProgressTracker,
};
pub use validation::NewTask;
