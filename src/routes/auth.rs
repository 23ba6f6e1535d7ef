use crate::{
    auth::{hash_password, verify_password, LoginRequest, RegisterRequest},
    error::AppError,
    session::{SessionStore, SESSION_COOKIE},
};
use actix_web::cookie::{time::Duration as CookieDuration, Cookie};
use actix_web::{post, web, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;
use sqlx::SqlitePool;

/// Register a new user
///
/// Creates a new user account. The password is stored as a bcrypt hash;
/// neither the plaintext nor the hash ever appears in a response or a log.
#[post("/register")]
pub async fn register(
    pool: web::Data<SqlitePool>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    let (username, email, password) = register_data
        .into_inner()
        .into_fields()
        .ok_or_else(|| AppError::Validation("All fields are required".into()))?;

    // Check if email already exists
    let existing_user: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE email = ?")
        .bind(&email)
        .fetch_optional(&**pool)
        .await
        .map_err(|e| AppError::database("Failed to register user", e))?;

    if existing_user.is_some() {
        return Err(AppError::DuplicateEmail("Email is already registered".into()));
    }

    let password_hash = hash_password(&password)?;

    let now = Utc::now();
    let user_id: i64 = sqlx::query_scalar(
        "INSERT INTO users (username, email, password, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?)
         RETURNING id",
    )
    .bind(&username)
    .bind(&email)
    .bind(&password_hash)
    .bind(now)
    .bind(now)
    .fetch_one(&**pool)
    .await
    .map_err(|e| AppError::database("Failed to register user", e))?;

    Ok(HttpResponse::Created().json(json!({
        "message": "User registered successfully",
        "userId": user_id
    })))
}

/// Login user
///
/// Verifies the credentials, creates a server-side session and sets the
/// session cookie. An unknown email and a wrong password are answered
/// identically so a caller cannot probe which part was wrong.
#[post("/login")]
pub async fn login(
    pool: web::Data<SqlitePool>,
    store: web::Data<SessionStore>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let (email, password) = login_data
        .into_inner()
        .into_fields()
        .ok_or_else(|| AppError::Validation("Email and password are required".into()))?;

    let user: Option<(i64, String)> =
        sqlx::query_as("SELECT id, password FROM users WHERE email = ?")
            .bind(&email)
            .fetch_optional(&**pool)
            .await
            .map_err(|e| AppError::database("Failed to log in", e))?;

    let (user_id, password_hash) = match user {
        Some(row) => row,
        None => return Err(invalid_credentials()),
    };

    if !verify_password(&password, &password_hash)? {
        return Err(invalid_credentials());
    }

    let session_id = store.create(user_id)?;
    let cookie = Cookie::build(SESSION_COOKIE, session_id)
        .path("/")
        .http_only(true)
        .secure(false)
        .max_age(CookieDuration::seconds(store.ttl().num_seconds()))
        .finish();

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(json!({ "message": "Login successful" })))
}

fn invalid_credentials() -> AppError {
    AppError::InvalidCredentials("Invalid email or password".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use chrono::Duration;
    use serde_json::json;
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
    use std::str::FromStr;

    use crate::db;

    // Single connection: an in-memory database is private to its connection.
    async fn test_pool() -> SqlitePool {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .unwrap()
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .unwrap();
        db::setup_schema(&pool).await.unwrap();
        pool
    }

    #[actix_web::test]
    async fn test_register_rejects_missing_fields() {
        let pool = test_pool().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(pool))
                .service(register),
        )
        .await;

        let cases = [
            json!({ "email": "a@x.com", "password": "pw123" }),
            json!({ "username": "alice", "password": "pw123" }),
            json!({ "username": "alice", "email": "a@x.com" }),
            json!({ "username": "", "email": "a@x.com", "password": "pw123" }),
        ];

        for payload in cases {
            let req = test::TestRequest::post()
                .uri("/register")
                .set_json(&payload)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), 400, "payload: {}", payload);

            let body: serde_json::Value = test::read_body_json(resp).await;
            assert_eq!(body["error"], "All fields are required");
        }
    }

    #[actix_web::test]
    async fn test_login_rejects_missing_fields() {
        let pool = test_pool().await;
        let store = SessionStore::new(Duration::hours(1));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(pool))
                .app_data(web::Data::new(store))
                .service(login),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(json!({ "email": "a@x.com" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Email and password are required");
    }
}
