//! Progress tracking service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use goalboard_core::{Goal, GoalId, GoalProgress, TaskId};

use crate::engine::{find_task, summarize, task_progress};

/// Where goals come from.
///
/// Injected into the tracker instead of reaching for a global cache of
/// preloaded data.
#[async_trait]
pub trait GoalSource: Send + Sync {
    /// Load a goal by ID.
    async fn load_goal(&self, id: &GoalId) -> Option<Goal>;

    /// List all goals.
    async fn list_goals(&self) -> Vec<Goal>;
}

/// Fixed set of goals, typically loaded from fixture data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGoalSource {
    goals: Vec<Goal>,
}

impl InMemoryGoalSource {
    /// Wrap a list of goals.
    pub fn new(goals: Vec<Goal>) -> Self {
        Self { goals }
    }
}

#[async_trait]
impl GoalSource for InMemoryGoalSource {
    async fn load_goal(&self, id: &GoalId) -> Option<Goal> {
        self.goals.iter().find(|g| g.id == *id).cloned()
    }

    async fn list_goals(&self) -> Vec<Goal> {
        self.goals.clone()
    }
}

/// Progress tracking service.
#[async_trait]
pub trait ProgressTracker: Send + Sync {
    /// Get goal progress.
    async fn get_goal_progress(&self, goal_id: &GoalId) -> Option<GoalProgress>;

    /// Get progress of a task anywhere in any goal.
    async fn get_task_progress(&self, task_id: &TaskId) -> Option<f64>;

    /// Take a progress snapshot.
    async fn snapshot(&self) -> ProgressSnapshot;
}

/// A snapshot of progress at a point in time.
#[derive(Debug, Clone)]
pub struct ProgressSnapshot {
    /// When snapshot was taken
    pub timestamp: DateTime<Utc>,

    /// Goal progress, in source order
    pub goal_progress: Vec<GoalProgress>,
}

impl ProgressSnapshot {
    /// Mean percentage across all goals, or 0 when there are none.
    pub fn overall(&self) -> f64 {
        if self.goal_progress.is_empty() {
            return 0.0;
        }
        let total: f64 = self.goal_progress.iter().map(|p| p.percentage).sum();
        total / self.goal_progress.len() as f64
    }
}

/// Basic progress tracker implementation.
pub struct BasicProgressTracker<S: GoalSource> {
    source: Arc<S>,
    reference_date: Option<NaiveDate>,
}

impl<S: GoalSource> BasicProgressTracker<S> {
    /// Create a new progress tracker.
    pub fn new(source: S) -> Self {
        Self::from_shared(Arc::new(source))
    }

    /// Create a tracker over a source that is also used elsewhere.
    pub fn from_shared(source: Arc<S>) -> Self {
        Self {
            source,
            reference_date: None,
        }
    }

    /// Judge deadlines against a fixed date instead of today.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    fn today(&self) -> NaiveDate {
        self.reference_date.unwrap_or_else(|| Utc::now().date_naive())
    }
}

#[async_trait]
impl<S: GoalSource + 'static> ProgressTracker for BasicProgressTracker<S> {
    async fn get_goal_progress(&self, goal_id: &GoalId) -> Option<GoalProgress> {
        let goal = self.source.load_goal(goal_id).await?;
        Some(summarize(&goal, self.today()))
    }

    async fn get_task_progress(&self, task_id: &TaskId) -> Option<f64> {
        self.source
            .list_goals()
            .await
            .iter()
            .find_map(|goal| find_task(goal, task_id).map(task_progress))
    }

    async fn snapshot(&self) -> ProgressSnapshot {
        let today = self.today();
        let goal_progress = self
            .source
            .list_goals()
            .await
            .iter()
            .map(|goal| summarize(goal, today))
            .collect();

        ProgressSnapshot {
            timestamp: Utc::now(),
            goal_progress,
        }
    }
}
