//! GoalBoard CLI - goal trees and their progress.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use goalboard_core::{Goal, GoalId, NodeId, ProgressNode, Task};
use goalboard_progress::{
    find_node, task_progress, BasicProgressTracker, GoalBoard, NewTask, NodeRef, ProgressTracker,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "goalboard")]
#[command(about = "Goal trees and their progress", long_about = None)]
struct Cli {
    /// Goals file (JSON array of goals)
    #[arg(long, global = true, default_value = "goals.json")]
    file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show goal trees with progress
    Show {
        /// Only this goal or task
        #[arg(long)]
        node: Option<String>,
    },
    /// Add a subtask under a goal or task
    Add {
        /// Goal that owns the tree
        #[arg(long)]
        goal: String,
        /// Goal or task to attach to (defaults to the goal itself)
        #[arg(long)]
        parent: Option<String>,
        /// Task title
        #[arg(long)]
        title: String,
        /// Target value
        #[arg(long)]
        target: f64,
        /// Starting progress
        #[arg(long, default_value = "0")]
        current: f64,
    },
    /// One line per goal
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Show { node } => {
            let goals = load_goals(&cli.file).await?;
            let Some(id) = node else {
                for goal in &goals {
                    print_goal(goal);
                }
                return Ok(());
            };

            let id = NodeId::from(id);
            match goals.iter().find_map(|goal| find_node(goal, &id)) {
                Some(NodeRef::Goal(goal)) => print_goal(goal),
                Some(NodeRef::Task(task)) => print_task(task, 0),
                None => println!("Node not found: {}", id),
            }
        }
        Commands::Add { goal, parent, title, target, current } => {
            let goal_id = GoalId::from(goal);
            let parent_id = parent.map(NodeId::from).unwrap_or_else(|| goal_id.clone());
            let draft = NewTask::new(title, target).with_current(current);

            let updated = add_and_save(&cli.file, &goal_id, &parent_id, draft).await?;
            print_goal(&updated);
        }
        Commands::Status => {
            let board = GoalBoard::new(load_goals(&cli.file).await?);
            let tracker = BasicProgressTracker::new(board);
            let snapshot = tracker.snapshot().await;

            println!(
                "GoalBoard Status ({} goals, {:.1}% overall)",
                snapshot.goal_progress.len(),
                snapshot.overall()
            );
            for progress in &snapshot.goal_progress {
                println!(
                    "  {} | {:>6.1}% | {}/{} leaves | {}{}",
                    progress.goal_id,
                    progress.percentage,
                    progress.completed_leaves,
                    progress.leaf_count,
                    progress.status,
                    if progress.overdue { " | OVERDUE" } else { "" },
                );
            }
        }
    }

    Ok(())
}

async fn load_goals(path: &Path) -> Result<Vec<Goal>> {
    let data = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    let goals: Vec<Goal> =
        serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
    debug!(count = goals.len(), "Loaded goals");
    Ok(goals)
}

// Load the file, attach the draft, and write the result back.
async fn add_and_save(
    path: &Path,
    goal_id: &GoalId,
    parent_id: &NodeId,
    draft: NewTask,
) -> Result<Goal> {
    let board = GoalBoard::new(load_goals(path).await?);
    let updated = board
        .add_subtask(goal_id, parent_id, draft)
        .await
        .with_context(|| format!("adding subtask to {}", parent_id))?;

    save_goals(path, &board.goals().await).await?;
    info!("Saved {}", path.display());
    Ok(updated)
}

async fn save_goals(path: &Path, goals: &[Goal]) -> Result<()> {
    let data = serde_json::to_string_pretty(goals)?;
    tokio::fs::write(path, data)
        .await
        .with_context(|| format!("writing {}", path.display()))
}

fn print_goal(goal: &Goal) {
    println!(
        "Goal: {} - {} [{}] due {}",
        goal.id, goal.title, goal.status, goal.deadline
    );
    if !goal.description.is_empty() {
        println!("  {}", goal.description);
    }
    println!("  Progress: {:.1}%", task_progress(goal));
    for task in goal.subtasks() {
        print_task(task, 2);
    }
}

fn print_task(task: &Task, indent: usize) {
    let detail = if task.is_leaf() {
        format!(" ({}/{})", task.counter.current, task.counter.target)
    } else {
        String::new()
    };
    println!(
        "{:indent$}- {} {} {:.1}%{}",
        "",
        task.id,
        task.title,
        task_progress(task),
        detail,
        indent = indent,
    );
    for child in task.subtasks() {
        print_task(child, indent + 2);
    }
}
