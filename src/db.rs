//! SQLite pool construction and schema setup.
//!
//! Referential integrity (foreign keys, cascade deletes) is enforced by the
//! store itself: every connection runs with `PRAGMA foreign_keys = ON`, so
//! deleting a user removes its projects and deleting a project removes its
//! tasks without any handler involvement.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Opens a connection pool for the given `sqlite:` URL, creating the
/// database file if it does not exist yet.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

/// Drops and recreates all tables. Destructive: any existing rows are lost.
///
/// Invoked by the `setup` binary (and by the integration tests against
/// in-memory databases); the server itself never touches the schema.
pub async fn setup_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // Children first so the drops do not trip over foreign keys.
    sqlx::query("DROP TABLE IF EXISTS tasks").execute(pool).await?;
    sqlx::query("DROP TABLE IF EXISTS projects")
        .execute(pool)
        .await?;
    sqlx::query("DROP TABLE IF EXISTS users").execute(pool).await?;

    sqlx::query(
        "CREATE TABLE users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            password TEXT NOT NULL,
            created_at DATETIME NOT NULL,
            updated_at DATETIME NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE projects (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT,
            status TEXT DEFAULT 'active',
            due_date DATETIME,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            created_at DATETIME NOT NULL,
            updated_at DATETIME NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT,
            completed BOOLEAN DEFAULT 0,
            priority TEXT DEFAULT 'medium',
            due_date DATETIME,
            project_id INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
            created_at DATETIME NOT NULL,
            updated_at DATETIME NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}
