use crate::{
    auth::{AccessPolicy, AuthenticatedUserId},
    error::AppError,
    models::{Project, ProjectInput},
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;
use sqlx::SqlitePool;

/// Projects are owner-scoped: every route sits behind the session gate and
/// every query filters by the caller's user id.
pub const ACCESS_POLICY: AccessPolicy = AccessPolicy::OwnerScoped;

/// Retrieves all projects owned by the authenticated user.
///
/// ## Responses:
/// - `200 OK`: Returns a JSON array of `Project` objects, possibly empty.
/// - `401 Unauthorized`: If the request carries no live session cookie.
/// - `500 Internal Server Error`: For database errors.
#[get("")]
pub async fn get_projects(
    pool: web::Data<SqlitePool>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let projects = sqlx::query_as::<_, Project>(
        "SELECT id, name, description, status, due_date, user_id, created_at, updated_at
         FROM projects WHERE user_id = ?",
    )
    .bind(user.0)
    .fetch_all(&**pool)
    .await
    .map_err(|e| AppError::database("Failed to fetch projects", e))?;

    Ok(HttpResponse::Ok().json(projects))
}

/// Retrieves a single project by id, scoped to the authenticated owner.
///
/// A project that does not exist and a project owned by someone else get
/// the same 404 body, so the endpoint leaks nothing about which ids exist.
///
/// ## Path Parameters:
/// - `id`: The integer id of the project to retrieve.
///
/// ## Responses:
/// - `200 OK`: Returns the `Project` object as JSON.
/// - `401 Unauthorized`: If the request carries no live session cookie.
/// - `404 Not Found`: If no project with that id is owned by the caller.
/// - `500 Internal Server Error`: For database errors.
#[get("/{id}")]
pub async fn get_project(
    pool: web::Data<SqlitePool>,
    project_id: web::Path<i64>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let project = sqlx::query_as::<_, Project>(
        "SELECT id, name, description, status, due_date, user_id, created_at, updated_at
         FROM projects WHERE id = ? AND user_id = ?",
    )
    .bind(project_id.into_inner())
    .bind(user.0)
    .fetch_optional(&**pool)
    .await
    .map_err(|e| AppError::database("Failed to fetch project", e))?;

    match project {
        Some(project) => Ok(HttpResponse::Ok().json(project)),
        None => Err(AppError::NotFound(
            "Project not found or access denied".into(),
        )),
    }
}

/// Creates a new project owned by the authenticated user.
///
/// The owner is always the session's user; a `userId` supplied in the body
/// is ignored. A missing `status` defaults to "active". A missing `name`
/// fails at the store's NOT NULL constraint.
///
/// ## Request Body:
/// A JSON object with `name`, and optionally `description`, `status` and
/// `dueDate` (RFC 3339).
///
/// ## Responses:
/// - `201 Created`: Returns the newly created `Project` object as JSON.
/// - `401 Unauthorized`: If the request carries no live session cookie.
/// - `500 Internal Server Error`: For constraint violations and database errors.
#[post("")]
pub async fn create_project(
    pool: web::Data<SqlitePool>,
    project_data: web::Json<ProjectInput>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let input = project_data.into_inner();
    let status = input.status_or_default();
    let now = Utc::now();

    let project = sqlx::query_as::<_, Project>(
        "INSERT INTO projects (name, description, status, due_date, user_id, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)
         RETURNING id, name, description, status, due_date, user_id, created_at, updated_at",
    )
    .bind(input.name)
    .bind(input.description)
    .bind(status)
    .bind(input.due_date)
    .bind(user.0)
    .bind(now)
    .bind(now)
    .fetch_one(&**pool)
    .await
    .map_err(|e| AppError::database("Failed to create project", e))?;

    Ok(HttpResponse::Created().json(project))
}

/// Updates a project owned by the authenticated user.
///
/// Overwrite semantics: all four mutable columns are set from the body, so
/// a field left out of the request clears the stored value. There is no
/// partial merge. The existence check and the update are two separate
/// statements with no transaction around them; two concurrent updates race
/// with last-write-wins.
///
/// ## Path Parameters:
/// - `id`: The integer id of the project to update.
///
/// ## Request Body:
/// Same shape as create.
///
/// ## Responses:
/// - `200 OK`: Returns the updated `Project` object as JSON.
/// - `401 Unauthorized`: If the request carries no live session cookie.
/// - `404 Not Found`: If no project with that id is owned by the caller.
/// - `500 Internal Server Error`: For constraint violations and database errors.
#[put("/{id}")]
pub async fn update_project(
    pool: web::Data<SqlitePool>,
    project_id: web::Path<i64>,
    project_data: web::Json<ProjectInput>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let id = project_id.into_inner();

    let existing: Option<i64> =
        sqlx::query_scalar("SELECT id FROM projects WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user.0)
            .fetch_optional(&**pool)
            .await
            .map_err(|e| AppError::database("Failed to update project", e))?;

    if existing.is_none() {
        return Err(AppError::NotFound(
            "Project not found or access denied".into(),
        ));
    }

    let input = project_data.into_inner();
    let project = sqlx::query_as::<_, Project>(
        "UPDATE projects
         SET name = ?, description = ?, status = ?, due_date = ?, updated_at = ?
         WHERE id = ? AND user_id = ?
         RETURNING id, name, description, status, due_date, user_id, created_at, updated_at",
    )
    .bind(input.name)
    .bind(input.description)
    .bind(input.status)
    .bind(input.due_date)
    .bind(Utc::now())
    .bind(id)
    .bind(user.0)
    .fetch_optional(&**pool)
    .await
    .map_err(|e| AppError::database("Failed to update project", e))?
    .ok_or_else(|| AppError::NotFound("Project not found or access denied".into()))?;

    Ok(HttpResponse::Ok().json(project))
}

/// Deletes a project owned by the authenticated user.
///
/// Owner-scoped like the rest of this module. The store cascades the
/// delete to the project's tasks.
///
/// ## Path Parameters:
/// - `id`: The integer id of the project to delete.
///
/// ## Responses:
/// - `200 OK`: Returns `{"message": "Project deleted successfully"}`.
/// - `401 Unauthorized`: If the request carries no live session cookie.
/// - `404 Not Found`: If no project with that id is owned by the caller.
/// - `500 Internal Server Error`: For database errors.
#[delete("/{id}")]
pub async fn delete_project(
    pool: web::Data<SqlitePool>,
    project_id: web::Path<i64>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let result = sqlx::query("DELETE FROM projects WHERE id = ? AND user_id = ?")
        .bind(project_id.into_inner())
        .bind(user.0)
        .execute(&**pool)
        .await
        .map_err(|e| AppError::database("Failed to delete project", e))?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(
            "Project not found or access denied".into(),
        ));
    }

    Ok(HttpResponse::Ok().json(json!({ "message": "Project deleted successfully" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::tasks;

    // The asymmetry between the two resources is a deliberate policy choice,
    // pinned here so a change to either side shows up as a test failure.
    #[test]
    fn test_projects_are_scoped_and_tasks_are_open() {
        assert_eq!(ACCESS_POLICY, AccessPolicy::OwnerScoped);
        assert_eq!(tasks::ACCESS_POLICY, AccessPolicy::Open);
        assert!(ACCESS_POLICY.requires_session());
        assert!(!tasks::ACCESS_POLICY.requires_session());
    }
}
