//! Task model as served by the remote task API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::TaskError;
use super::ids::{TaskId, UserId};

/// Non-empty, trimmed task title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskTitle(String);

impl TaskTitle {
    pub fn new(s: impl Into<String>) -> Result<Self, TaskError> {
        let s = s.into();
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(TaskError::EmptyTitle);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TaskTitle {
    type Error = TaskError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskTitle> for String {
    fn from(title: TaskTitle) -> Self {
        title.0
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A daily task.
///
/// Identity is immutable; `done` is the only field the triage engine changes
/// (and only remotely, through the recorder).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub user_id: UserId,
    pub title: TaskTitle,
    pub done: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a fresh, not-done task.
    pub fn new(id: TaskId, user_id: UserId, title: TaskTitle, now: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id,
            title,
            done: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Return a copy with `patch` applied.
    pub fn patched(&self, patch: &TaskPatch, now: DateTime<Utc>) -> Self {
        let mut task = self.clone();
        if let Some(done) = patch.done {
            task.done = done;
        }
        if let Some(title) = &patch.title {
            task.title = title.clone();
        }
        task.updated_at = now;
        task
    }
}

/// Partial update body for `PATCH /api/tasks/{id}`.
///
/// Absent fields are left untouched server-side, so they are not serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<TaskTitle>,
}

impl TaskPatch {
    pub fn done(done: bool) -> Self {
        Self {
            done: Some(done),
            title: None,
        }
    }
}

/// Caller-side filter for a triage batch: tasks that are not done yet, in
/// their original order.
pub fn pending_tasks(tasks: &[Task]) -> Vec<Task> {
    tasks.iter().filter(|t| !t.done).cloned().collect()
}
