use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A task as stored in the database and returned by the API.
#[derive(Debug, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Auto-incremented row id.
    pub id: i64,
    /// Task title. Required at the store level.
    pub title: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Completion flag, defaulted to false on creation. Nullable because an
    /// update can overwrite it with null.
    pub completed: Option<bool>,
    /// Priority label, defaulted to "medium" on creation.
    pub priority: Option<String>,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Id of the project this task belongs to.
    pub project_id: i64,
    /// Timestamp of when the task was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update to the task.
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or updating a task.
///
/// Same overwrite semantics as projects: updates replace every mutable
/// column, absent fields included, so a missing `title` or `projectId`
/// fails at the store's NOT NULL constraint rather than being merged
/// around.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub project_id: Option<i64>,
}

impl TaskInput {
    /// Completion flag to store on creation: the supplied value, or false.
    pub fn completed_or_default(&self) -> bool {
        self.completed.unwrap_or(false)
    }

    /// Priority to store on creation: the supplied value, or "medium".
    pub fn priority_or_default(&self) -> String {
        self.priority.clone().unwrap_or_else(|| "medium".to_string())
    }
}
