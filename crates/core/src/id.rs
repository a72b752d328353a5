//! Identifiers for goals and tasks.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unique identifier for a goal or task.
///
/// Goals and tasks share one namespace so a subtask can be attached to
/// either by id. Fixture data uses short hand-written ids (`"g1"`), freshly
/// created nodes get a ULID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Generate a new NodeId
    pub fn new() -> Self {
        Self(Ulid::new().to_string())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::str::FromStr for NodeId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

/// Identifier of a goal (the root of a task tree).
pub type GoalId = NodeId;

/// Identifier of a task at any depth.
pub type TaskId = NodeId;
