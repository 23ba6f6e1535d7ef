use crate::{
    auth::AccessPolicy,
    error::AppError,
    models::{Task, TaskInput},
};
use actix_web::{get, post, put, web, HttpResponse, Responder};
use chrono::Utc;
use sqlx::SqlitePool;

/// Tasks are open: no session gate, no ownership scoping. Any caller may
/// list, fetch, create or update any task regardless of which project (and
/// therefore which user) it belongs to. Deletion is not exposed at all;
/// tasks only disappear when their project is deleted and the store
/// cascades.
pub const ACCESS_POLICY: AccessPolicy = AccessPolicy::Open;

/// Retrieves every task in the store.
///
/// ## Responses:
/// - `200 OK`: Returns a JSON array of `Task` objects, possibly empty.
/// - `500 Internal Server Error`: For database errors.
#[get("")]
pub async fn get_tasks(pool: web::Data<SqlitePool>) -> Result<impl Responder, AppError> {
    let tasks = sqlx::query_as::<_, Task>(
        "SELECT id, title, description, completed, priority, due_date, project_id, created_at, updated_at
         FROM tasks",
    )
    .fetch_all(&**pool)
    .await
    .map_err(|e| AppError::database("Failed to fetch tasks", e))?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Retrieves a single task by id.
///
/// ## Path Parameters:
/// - `id`: The integer id of the task to retrieve.
///
/// ## Responses:
/// - `200 OK`: Returns the `Task` object as JSON.
/// - `404 Not Found`: If no task has that id.
/// - `500 Internal Server Error`: For database errors.
#[get("/{id}")]
pub async fn get_task(
    pool: web::Data<SqlitePool>,
    task_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let task = sqlx::query_as::<_, Task>(
        "SELECT id, title, description, completed, priority, due_date, project_id, created_at, updated_at
         FROM tasks WHERE id = ?",
    )
    .bind(task_id.into_inner())
    .fetch_optional(&**pool)
    .await
    .map_err(|e| AppError::database("Failed to fetch task", e))?;

    match task {
        Some(task) => Ok(HttpResponse::Ok().json(task)),
        None => Err(AppError::NotFound("Task not found".into())),
    }
}

/// Creates a new task.
///
/// The handler performs no check that `projectId` names an existing
/// project; the store's foreign key is the actual boundary, and a dangling
/// `projectId` surfaces as a 500. Missing `completed` defaults to false,
/// missing `priority` to "medium".
///
/// ## Request Body:
/// A JSON object with `title` and `projectId`, and optionally
/// `description`, `completed`, `priority` and `dueDate` (RFC 3339).
///
/// ## Responses:
/// - `201 Created`: Returns the newly created `Task` object as JSON.
/// - `500 Internal Server Error`: For constraint violations and database errors.
#[post("")]
pub async fn create_task(
    pool: web::Data<SqlitePool>,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    let input = task_data.into_inner();
    let completed = input.completed_or_default();
    let priority = input.priority_or_default();
    let now = Utc::now();

    let task = sqlx::query_as::<_, Task>(
        "INSERT INTO tasks (title, description, completed, priority, due_date, project_id, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)
         RETURNING id, title, description, completed, priority, due_date, project_id, created_at, updated_at",
    )
    .bind(input.title)
    .bind(input.description)
    .bind(completed)
    .bind(priority)
    .bind(input.due_date)
    .bind(input.project_id)
    .bind(now)
    .bind(now)
    .fetch_one(&**pool)
    .await
    .map_err(|e| AppError::database("Failed to create task", e))?;

    Ok(HttpResponse::Created().json(task))
}

/// Updates a task by id.
///
/// Overwrite semantics, like project updates: every mutable column is set
/// from the body, absent fields included, so leaving out `title` or
/// `projectId` trips the store's NOT NULL constraint. After a successful
/// update the row is re-read and returned.
///
/// ## Path Parameters:
/// - `id`: The integer id of the task to update.
///
/// ## Request Body:
/// Same shape as create.
///
/// ## Responses:
/// - `200 OK`: Returns the updated `Task` object as JSON.
/// - `404 Not Found`: If no task has that id.
/// - `500 Internal Server Error`: For constraint violations and database errors.
#[put("/{id}")]
pub async fn update_task(
    pool: web::Data<SqlitePool>,
    task_id: web::Path<i64>,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    let id = task_id.into_inner();
    let input = task_data.into_inner();

    let result = sqlx::query(
        "UPDATE tasks
         SET title = ?, description = ?, completed = ?, priority = ?, due_date = ?, project_id = ?, updated_at = ?
         WHERE id = ?",
    )
    .bind(input.title)
    .bind(input.description)
    .bind(input.completed)
    .bind(input.priority)
    .bind(input.due_date)
    .bind(input.project_id)
    .bind(Utc::now())
    .bind(id)
    .execute(&**pool)
    .await
    .map_err(|e| AppError::database("Failed to update task", e))?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Task not found".into()));
    }

    let task = sqlx::query_as::<_, Task>(
        "SELECT id, title, description, completed, priority, due_date, project_id, created_at, updated_at
         FROM tasks WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&**pool)
    .await
    .map_err(|e| AppError::database("Failed to update task", e))?
    .ok_or_else(|| AppError::NotFound("Task not found".into()))?;

    Ok(HttpResponse::Ok().json(task))
}
