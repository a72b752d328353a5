//! Goal model - root of a task tree with progress tracking.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::id::GoalId;
use crate::node::{Counter, ProgressNode};
use crate::task::Task;
use crate::Time;

/// A goal is the top-level objective that owns a tree of tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// Unique identifier
    pub id: GoalId,

    /// Goal title
    pub title: String,

    /// Detailed description
    #[serde(default)]
    pub description: String,

    /// Goal status
    pub status: GoalStatus,

    /// Due date
    pub deadline: NaiveDate,

    /// Direct measurement, used when the goal has no subtasks
    #[serde(flatten)]
    pub counter: Counter,

    /// Top-level tasks
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtasks: Vec<Arc<Task>>,

    /// When created
    #[serde(default = "Utc::now")]
    pub created_at: Time,

    /// Last updated
    #[serde(default = "Utc::now")]
    pub updated_at: Time,
}

impl Goal {
    /// Create an in-progress goal with no tasks.
    pub fn new(
        id: impl Into<GoalId>,
        title: impl Into<String>,
        deadline: NaiveDate,
        counter: Counter,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            status: GoalStatus::InProgress,
            deadline,
            counter,
            subtasks: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Builder-style: set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder-style: append a top-level task.
    pub fn with_subtask(mut self, task: Task) -> Self {
        self.subtasks.push(Arc::new(task));
        self
    }

    /// Whether the deadline has passed on `today` without the goal being completed.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status != GoalStatus::Completed && self.deadline < today
    }
}

impl ProgressNode for Goal {
    fn id(&self) -> &GoalId {
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
            subtasks,
            updated_at: Utc::now(),
            ..self.clone_header()
        }
    }
}

impl Goal {
    // Everything except the child list; the caller supplies new children.
    fn clone_header(&self) -> Self {
        Self {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status,
            deadline: self.deadline,
            counter: self.counter,
            subtasks: Vec::new(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Goal status. Set by the owner; does not feed into progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoalStatus {
    /// Goal is being worked on
    InProgress,
    /// Goal completed
    Completed,
    /// Goal paused
    OnHold,
}

impl std::fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GoalStatus::InProgress => "in-progress",
            GoalStatus::Completed => "completed",
            GoalStatus::OnHold => "on-hold",
        };
        f.write_str(s)
    }
}

/// Progress summary for a goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    /// Goal this summary belongs to
    pub goal_id: GoalId,

    /// Percentage complete (0-100)
    pub percentage: f64,

    /// Leaf nodes in the tree (the goal itself when it has no tasks)
    pub leaf_count: usize,

    /// Leaves at 100%
    pub completed_leaves: usize,

    /// Goal status at the time of the summary
    pub status: GoalStatus,

    /// Deadline passed without completion
    pub overdue: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn status_uses_kebab_case() {
        assert_eq!(serde_json::to_string(&GoalStatus::OnHold).unwrap(), "\"on-hold\"");
        let s: GoalStatus = serde_json::from_str("\"in-progress\"").unwrap();
        assert_eq!(s, GoalStatus::InProgress);
        assert_eq!(GoalStatus::Completed.to_string(), "completed");
    }

    #[test]
    fn overdue_ignores_completed_goals() {
        let mut goal = Goal::new("g1", "Revenue", date(2024, 3, 1), Counter::new(0.0, 100.0));
        assert!(goal.is_overdue(date(2024, 3, 2)));
        assert!(!goal.is_overdue(date(2024, 3, 1)));
        goal.status = GoalStatus::Completed;
        assert!(!goal.is_overdue(date(2024, 3, 2)));
    }

    #[test]
    fn parses_fixture_goal() {
        let json = r#"{
            "id": "g1",
            "title": "Sign new clients",
            "description": "Quarterly target",
            "status": "on-hold",
            "deadline": "2024-12-31",
            "current": 0,
            "target": 10,
            "subtasks": [
                {"id": "t1", "title": "Calls", "current": 20, "target": 40},
                {"id": "t2", "title": "Demos", "current": 0, "target": 5,
                 "subtasks": [{"id": "t3", "title": "Book room", "current": 1, "target": 1}]}
            ]
        }"#;
        let goal: Goal = serde_json::from_str(json).unwrap();
        assert_eq!(goal.status, GoalStatus::OnHold);
        assert_eq!(goal.subtasks.len(), 2);
        assert_eq!(goal.subtasks[1].subtasks[0].id, GoalId::from("t3"));
    }

    #[test]
    fn parses_bundled_fixtures() {
        let goals: Vec<Goal> =
            serde_json::from_str(include_str!("../../../fixtures/goals.json")).unwrap();
        assert_eq!(goals.len(), 2);
        assert_eq!(goals[0].subtasks[1].subtasks.len(), 2);
        assert!(goals[1].subtasks.is_empty());
        assert_eq!(goals[1].counter, Counter::new(3.0, 12.0));
    }

    #[test]
    fn with_subtasks_preserves_header() {
        let goal = Goal::new("g1", "Revenue", date(2024, 3, 1), Counter::new(5.0, 10.0))
            .with_description("desc")
            .with_subtask(Task::with_id("t1", "A", 0.0, 1.0));
        let copy = goal.with_subtasks(Vec::new());
        assert_eq!(copy.id, goal.id);
        assert_eq!(copy.description, "desc");
        assert_eq!(copy.counter, goal.counter);
        assert!(copy.subtasks.is_empty());
        assert_eq!(goal.subtasks.len(), 1);
    }
}
