use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A project as stored in the database and returned by the API.
///
/// Serialized with camelCase keys (`dueDate`, `userId`, `createdAt`,
/// `updatedAt`) to match the wire format clients already speak.
#[derive(Debug, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Auto-incremented row id.
    pub id: i64,
    /// Display name. Required at the store level.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Lifecycle label, defaulted to "active" on creation. Nullable because
    /// an update can overwrite it with null.
    pub status: Option<String>,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Id of the owning user. Set from the session, never from the body.
    pub user_id: i64,
    /// Timestamp of when the project was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update to the project.
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or updating a project.
///
/// Every field is optional at the type level. Updates overwrite all four
/// columns with whatever is here, so an absent field clears the stored
/// value; there is no partial merge. A create or update missing `name`
/// fails at the store's NOT NULL constraint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}

impl ProjectInput {
    /// Status to store on creation: the supplied value, or "active".
    pub fn status_or_default(&self) -> String {
        self.status.clone().unwrap_or_else(|| "active".to_string())
    }
}
