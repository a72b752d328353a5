//! Canonical goal state.
//!
//! The board owns the current list of goals. Edits build a new tree with the
//! engine and then replace the stored goal; whoever commits last wins. Each
//! commit keeps the previous list so it can be restored with [`GoalBoard::undo`].

use std::collections::VecDeque;

use async_trait::async_trait;
use goalboard_core::{Goal, GoalId, NodeId};
use tokio::sync::RwLock;
use tracing::debug;

use crate::engine::try_add_subtask;
use crate::error::{ProgressError, Result};
use crate::tracker::GoalSource;
use crate::validation::NewTask;

/// Board configuration.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// How many previous states to keep for undo
    pub history_limit: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self { history_limit: 32 }
    }
}

#[derive(Debug, Default)]
struct BoardState {
    goals: Vec<Goal>,
    history: VecDeque<Vec<Goal>>,
}

/// Owner of the canonical goal list.
#[derive(Debug)]
pub struct GoalBoard {
    state: RwLock<BoardState>,
    config: BoardConfig,
}

impl GoalBoard {
    /// Create a board holding `goals`.
    pub fn new(goals: Vec<Goal>) -> Self {
        Self {
            state: RwLock::new(BoardState {
                goals,
                history: VecDeque::new(),
            }),
            config: BoardConfig::default(),
        }
    }

    /// Set the board configuration.
    pub fn with_config(mut self, config: BoardConfig) -> Self {
        self.config = config;
        self
    }

    /// Current goals. The returned list stays valid after later commits.
    pub async fn goals(&self) -> Vec<Goal> {
        self.state.read().await.goals.clone()
    }

    /// Current version of one goal.
    pub async fn goal(&self, id: &GoalId) -> Option<Goal> {
        self.state.read().await.goals.iter().find(|g| g.id == *id).cloned()
    }

    /// Number of states available to undo.
    pub async fn history_len(&self) -> usize {
        self.state.read().await.history.len()
    }

    /// Add a new goal at the end of the list.
    pub async fn add_goal(&self, goal: Goal) {
        let mut state = self.state.write().await;
        debug!(goal = %goal.id, "Adding goal");
        let previous = state.goals.clone();
        state.goals.push(goal);
        self.remember(&mut state, previous);
    }

    /// Validate `draft` and attach it under `parent_id` in goal `goal_id`.
    ///
    /// Returns the committed goal.
    pub async fn add_subtask(
        &self,
        goal_id: &GoalId,
        parent_id: &NodeId,
        draft: NewTask,
    ) -> Result<Goal> {
        let task = draft.into_task()?;

        let mut state = self.state.write().await;
        let index = Self::position(&state, goal_id)?;
        let updated = try_add_subtask(&state.goals[index], parent_id, task)?;

        let previous = state.goals.clone();
        state.goals[index] = updated.clone();
        self.remember(&mut state, previous);
        debug!(goal = %goal_id, parent = %parent_id, "Committed new subtask");
        Ok(updated)
    }

    /// Replace the stored goal that has the same id as `goal`.
    ///
    /// No merge is attempted: a tree built from an older snapshot overwrites
    /// whatever was committed since.
    pub async fn commit(&self, goal: Goal) -> Result<()> {
        let mut state = self.state.write().await;
        let index = Self::position(&state, &goal.id)?;
        debug!(goal = %goal.id, "Committing goal");
        let previous = state.goals.clone();
        state.goals[index] = goal;
        self.remember(&mut state, previous);
        Ok(())
    }

    /// Restore the goal list as it was before the last commit.
    pub async fn undo(&self) -> Result<()> {
        let mut state = self.state.write().await;
        let previous = state.history.pop_back().ok_or(ProgressError::NothingToUndo)?;
        state.goals = previous;
        debug!(remaining = state.history.len(), "Undid last commit");
        Ok(())
    }

    fn position(state: &BoardState, goal_id: &GoalId) -> Result<usize> {
        state
            .goals
            .iter()
            .position(|g| g.id == *goal_id)
            .ok_or_else(|| ProgressError::GoalNotFound(goal_id.clone()))
    }

    fn remember(&self, state: &mut BoardState, previous: Vec<Goal>) {
        if self.config.history_limit == 0 {
            return;
        }
        state.history.push_back(previous);
        while state.history.len() > self.config.history_limit {
            state.history.pop_front();
        }
    }
}

#[async_trait]
impl GoalSource for GoalBoard {
    async fn load_goal(&self, id: &GoalId) -> Option<Goal> {
        self.goal(id).await
    }

    async fn list_goals(&self) -> Vec<Goal> {
        self.goals().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{add_subtask, goal_progress};
    use crate::tracker::{BasicProgressTracker, ProgressTracker};
    use chrono::NaiveDate;
    use goalboard_core::{Counter, Task};
    use std::sync::Arc;

    fn board() -> GoalBoard {
        let deadline = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        GoalBoard::new(vec![
            Goal::new("g1", "Revenue", deadline, Counter::new(0.0, 100.0))
                .with_subtask(Task::with_id("t1", "Invoices", 5.0, 10.0)),
            Goal::new("g2", "Hiring", deadline, Counter::new(1.0, 4.0)),
        ])
    }

    #[tokio::test]
    async fn add_subtask_commits_new_tree() {
        let board = board();
        let before = board.goals().await;

        let updated = board
            .add_subtask(
                &GoalId::from("g1"),
                &NodeId::from("t1"),
                NewTask::new("Send reminders", 2.0),
            )
            .await
            .unwrap();

        assert_eq!(updated.subtasks[0].subtasks.len(), 1);
        assert_eq!(board.goal(&GoalId::from("g1")).await.unwrap(), updated);
        // The snapshot taken before the commit is untouched.
        assert!(before[0].subtasks[0].subtasks.is_empty());
        assert_eq!(goal_progress(&before[0]), 50.0);
        assert_eq!(goal_progress(&updated), 0.0);
    }

    #[tokio::test]
    async fn add_subtask_rejects_invalid_draft_and_unknown_ids() {
        let board = board();
        let g1 = GoalId::from("g1");

        let err = board
            .add_subtask(&g1, &NodeId::from("t1"), NewTask::new("", 1.0))
            .await
            .unwrap_err();
        assert!(matches!(err, ProgressError::InvalidTask(_)));

        let err = board
            .add_subtask(&g1, &NodeId::from("zz"), NewTask::new("x", 1.0))
            .await
            .unwrap_err();
        assert!(matches!(err, ProgressError::NotFound(_)));

        let err = board
            .add_subtask(&GoalId::from("g9"), &NodeId::from("t1"), NewTask::new("x", 1.0))
            .await
            .unwrap_err();
        assert!(matches!(err, ProgressError::GoalNotFound(_)));

        assert_eq!(board.history_len().await, 0);
    }

    #[tokio::test]
    async fn last_commit_wins() {
        let board = board();
        let base = board.goal(&GoalId::from("g1")).await.unwrap();
        let root = NodeId::from("g1");

        let first = add_subtask(&base, &root, Task::with_id("a", "A", 0.0, 1.0));
        let second = add_subtask(&base, &root, Task::with_id("b", "B", 0.0, 1.0));

        board.commit(first).await.unwrap();
        board.commit(second).await.unwrap();

        let current = board.goal(&GoalId::from("g1")).await.unwrap();
        let ids: Vec<_> = current.subtasks.iter().map(|t| t.id.as_str().to_string()).collect();
        assert_eq!(ids, ["t1", "b"]);
        assert!(Arc::ptr_eq(&current.subtasks[0], &base.subtasks[0]));
    }

    #[tokio::test]
    async fn undo_restores_previous_state() {
        let board = board();
        let g1 = GoalId::from("g1");
        board.add_subtask(&g1, &NodeId::from("g1"), NewTask::new("Follow up", 3.0)).await.unwrap();
        assert_eq!(board.goal(&g1).await.unwrap().subtasks.len(), 2);

        board.undo().await.unwrap();
        assert_eq!(board.goal(&g1).await.unwrap().subtasks.len(), 1);
        assert!(matches!(board.undo().await, Err(ProgressError::NothingToUndo)));
    }

    #[tokio::test]
    async fn history_is_bounded() {
        let board = board().with_config(BoardConfig { history_limit: 2 });
        let g2 = GoalId::from("g2");
        for i in 0..5 {
            board.add_subtask(&g2, &g2, NewTask::new(format!("step {i}"), 1.0)).await.unwrap();
        }
        assert_eq!(board.history_len().await, 2);

        board.undo().await.unwrap();
        board.undo().await.unwrap();
        assert_eq!(board.goal(&g2).await.unwrap().subtasks.len(), 3);
    }

    #[tokio::test]
    async fn add_goal_appends_and_is_undoable() {
        let board = board();
        let deadline = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        board.add_goal(Goal::new("g3", "Office move", deadline, Counter::new(0.0, 1.0))).await;
        assert_eq!(board.goals().await.len(), 3);

        board.undo().await.unwrap();
        assert_eq!(board.goals().await.len(), 2);
    }

    #[tokio::test]
    async fn board_feeds_tracker() {
        let board = Arc::new(board());
        let tracker = BasicProgressTracker::from_shared(Arc::clone(&board))
            .with_reference_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

        let g2 = GoalId::from("g2");
        assert_eq!(tracker.get_goal_progress(&g2).await.unwrap().percentage, 25.0);

        board.add_subtask(&g2, &g2, NewTask::new("Post job", 2.0).with_current(2.0)).await.unwrap();
        assert_eq!(tracker.get_goal_progress(&g2).await.unwrap().percentage, 100.0);
    }
}
