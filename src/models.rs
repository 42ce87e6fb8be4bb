//! Frontend Models
//!
//! Data structures matching the task API payloads.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned task identifier.
///
/// Always carried as text. Backends that emit numeric ids are normalized to
/// the decimal form on decode, so both API variants share one id type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawTaskId", into = "String")]
pub struct TaskId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTaskId {
    Text(String),
    Number(i64),
}

impl From<RawTaskId> for TaskId {
    fn from(raw: RawTaskId) -> Self {
        match raw {
            RawTaskId::Text(text) => TaskId(text),
            RawTaskId::Number(n) => TaskId(n.to_string()),
        }
    }
}

impl From<TaskId> for String {
    fn from(id: TaskId) -> Self {
        id.0
    }
}

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        TaskId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Task data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    /// Completion flag, absent when the backend does not track completion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
}

/// Create request body
#[derive(Debug, Serialize)]
pub struct NewTask<'a> {
    pub title: &'a str,
}

/// "1 task" / "N tasks"
pub fn task_count_label(count: usize) -> String {
    if count == 1 {
        "1 task".to_string()
    } else {
        format!("{} tasks", count)
    }
}
