//! Goal progress engine.
//!
//! Progress of a leaf is `current / target` as a percentage capped at 100.
//! Progress of an aggregate is the plain mean of its direct children, so
//! every subtask counts the same no matter how large its target is.
//!
//! Edits never touch the input tree. `add_subtask` copies the nodes on the
//! path from the root to the edited node and shares every other subtree.

use std::sync::Arc;

use chrono::NaiveDate;
use goalboard_core::{Counter, Goal, GoalProgress, NodeId, NodeKind, ProgressNode, Task};
use tracing::{debug, warn};

use crate::error::{ProgressError, Result};

/// Completion percentage of a task or goal, in `[0, 100]`.
pub fn task_progress<N: ProgressNode>(node: &N) -> f64 {
    match node.kind() {
        NodeKind::Aggregate(children) => {
            let total: f64 = children.iter().map(|child| task_progress(child.as_ref())).sum();
            total / children.len() as f64
        }
        NodeKind::Leaf(counter) => leaf_progress(counter),
    }
}

/// Completion percentage of a goal. Same rule as [`task_progress`].
pub fn goal_progress(goal: &Goal) -> f64 {
    task_progress(goal)
}

fn leaf_progress(counter: &Counter) -> f64 {
    if counter.target.is_nan() || counter.target <= 0.0 {
        return 0.0;
    }

    let percent = (counter.current / counter.target) * 100.0;
    if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    }
}

/// Append `task` under the node with id `target`.
///
/// The root itself may be the target. Returns a new root; the input is left
/// as it was. When no node matches, the returned root is a shallow copy
/// equal to the input, sharing all of its child `Arc`s.
pub fn add_subtask<N: ProgressNode>(root: &N, target: &NodeId, task: Task) -> N {
    match path_to(root, target) {
        Some(path) => rebuild(root, &path, task),
        None => {
            warn!(root = %root.id(), %target, "subtask target not found, tree unchanged");
            root.clone()
        }
    }
}

/// Like [`add_subtask`], but reports a missing target instead of ignoring it.
pub fn try_add_subtask<N: ProgressNode>(root: &N, target: &NodeId, task: Task) -> Result<N> {
    let path = path_to(root, target).ok_or_else(|| ProgressError::NotFound(target.clone()))?;
    debug!(root = %root.id(), %target, depth = path.len(), "Attaching subtask");
    Ok(rebuild(root, &path, task))
}

/// A node found in a goal tree: the root goal or a task beneath it.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    /// The goal at the root
    Goal(&'a Goal),
    /// A task at any depth
    Task(&'a Task),
}

impl NodeRef<'_> {
    /// Id of the referenced node.
    pub fn id(&self) -> &NodeId {
        match self {
            NodeRef::Goal(goal) => &goal.id,
            NodeRef::Task(task) => &task.id,
        }
    }

    /// Completion percentage of the referenced node.
    pub fn progress(&self) -> f64 {
        match self {
            NodeRef::Goal(goal) => goal_progress(goal),
            NodeRef::Task(task) => task_progress(*task),
        }
    }
}

/// Find the node with `id` in a goal tree, checking the goal itself first.
pub fn find_node<'a>(root: &'a Goal, id: &NodeId) -> Option<NodeRef<'a>> {
    if root.id == *id {
        return Some(NodeRef::Goal(root));
    }
    find_task(root, id).map(NodeRef::Task)
}

/// Find a task anywhere below `root` (the root itself is not considered).
pub fn find_task<'a, N: ProgressNode>(root: &'a N, id: &NodeId) -> Option<&'a Task> {
    root.subtasks().iter().find_map(|child| {
        if child.id == *id {
            Some(child.as_ref())
        } else {
            find_task(child.as_ref(), id)
        }
    })
}

/// Number of leaves under `node` and how many of them are at 100%.
///
/// A node without subtasks counts as one leaf itself.
pub fn leaf_stats<N: ProgressNode>(node: &N) -> (usize, usize) {
    match node.kind() {
        NodeKind::Leaf(counter) => (1, usize::from(leaf_progress(counter) >= 100.0)),
        NodeKind::Aggregate(children) => children
            .iter()
            .map(|child| leaf_stats(child.as_ref()))
            .fold((0, 0), |(leaves, done), (l, d)| (leaves + l, done + d)),
    }
}

/// Summarize a goal as of `today`.
pub fn summarize(goal: &Goal, today: NaiveDate) -> GoalProgress {
    let (leaf_count, completed_leaves) = leaf_stats(goal);
    GoalProgress {
        goal_id: goal.id.clone(),
        percentage: goal_progress(goal),
        leaf_count,
        completed_leaves,
        status: goal.status,
        overdue: goal.is_overdue(today),
    }
}

// Child indices from `node` down to the node with id `target`, depth-first,
// first match wins.
fn path_to<N: ProgressNode>(node: &N, target: &NodeId) -> Option<Vec<usize>> {
    fn walk<N: ProgressNode>(node: &N, target: &NodeId, path: &mut Vec<usize>) -> bool {
        if node.id() == target {
            return true;
        }
        for (index, child) in node.subtasks().iter().enumerate() {
            path.push(index);
            if walk(child.as_ref(), target, path) {
                return true;
            }
            path.pop();
        }
        false
    }

    let mut path = Vec::new();
    walk(node, target, &mut path).then_some(path)
}

fn rebuild<N: ProgressNode>(node: &N, path: &[usize], task: Task) -> N {
    let mut children = node.subtasks().to_vec();
    match path.split_first() {
        None => children.push(Arc::new(task)),
        Some((&index, rest)) => {
            let updated = rebuild(node.subtasks()[index].as_ref(), rest, task);
            children[index] = Arc::new(updated);
        }
    }
    node.with_subtasks(children)
}
