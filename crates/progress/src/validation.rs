//! Validation of new tasks before they enter a tree.
//!
//! The engine accepts whatever it is given; callers that take input from a
//! form run it through [`NewTask::validate`] first.

use goalboard_core::{Task, TaskId};
use serde::{Deserialize, Serialize};

use crate::error::{ProgressError, Result};

/// A task as entered by a user, not yet part of any tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    /// Display label
    pub title: String,

    /// Goal value, must be positive
    pub target: f64,

    /// Starting progress
    #[serde(default)]
    pub current: f64,
}

impl NewTask {
    /// Draft with no progress yet.
    pub fn new(title: impl Into<String>, target: f64) -> Self {
        Self {
            title: title.into(),
            target,
            current: 0.0,
        }
    }

    /// Builder-style: set starting progress.
    pub fn with_current(mut self, current: f64) -> Self {
        self.current = current;
        self
    }

    /// Check the draft.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(ProgressError::InvalidTask("title must not be empty".into()));
        }
        if !self.target.is_finite() || self.target <= 0.0 {
            return Err(ProgressError::InvalidTask(format!(
                "target must be a positive number, got {}",
                self.target
            )));
        }
        if !self.current.is_finite() || self.current < 0.0 {
            return Err(ProgressError::InvalidTask(format!(
                "current must be zero or more, got {}",
                self.current
            )));
        }
        Ok(())
    }

    /// Validate and turn the draft into a leaf task with a fresh id.
    pub fn into_task(self) -> Result<Task> {
        self.validate()?;
        Ok(Task::with_id(
            TaskId::new(),
            self.title.trim(),
            self.current,
            self.target,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use goalboard_core::ProgressNode;

    #[test]
    fn accepts_well_formed_draft() {
        let task = NewTask::new("  Call leads ", 20.0).with_current(5.0).into_task().unwrap();
        assert_eq!(task.title, "Call leads");
        assert_eq!(task.counter.current, 5.0);
        assert_eq!(task.counter.target, 20.0);
        assert!(task.is_leaf());
    }

    #[test]
    fn rejects_blank_title() {
        let err = NewTask::new("   ", 1.0).validate().unwrap_err();
        assert!(matches!(err, ProgressError::InvalidTask(msg) if msg.contains("title")));
    }

    #[test]
    fn rejects_bad_targets() {
        for target in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(NewTask::new("x", target).validate().is_err(), "target {target}");
        }
    }

    #[test]
    fn rejects_bad_current() {
        assert!(NewTask::new("x", 1.0).with_current(-0.5).validate().is_err());
        assert!(NewTask::new("x", 1.0).with_current(f64::NAN).validate().is_err());
        // Overshooting the target is allowed.
        assert!(NewTask::new("x", 1.0).with_current(3.0).validate().is_ok());
    }
}
