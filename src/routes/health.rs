use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;
use sqlx::SqlitePool;

/// Health check endpoint
///
/// Reports API liveness and whether the database answers a trivial query.
#[get("/health")]
pub async fn health(pool: web::Data<SqlitePool>) -> impl Responder {
    let database = match sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(&**pool)
        .await
    {
        Ok(_) => "connected",
        Err(e) => {
            log::error!("Health check database probe failed: {}", e);
            "unavailable"
        }
    };

    HttpResponse::Ok().json(json!({
        "status": "ok",
        "database": database,
        "timestamp": Utc::now()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
    use std::str::FromStr;

    #[actix_web::test]
    async fn test_health_endpoint() {
        let options = SqliteConnectOptions::from_str("sqlite::memory:").unwrap();
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .unwrap();

        let app = test::init_service(
            actix_web::App::new()
                .app_data(web::Data::new(pool))
                .service(health),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());

        let body = test::read_body(resp).await;
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["status"], "ok");
        assert_eq!(json["database"], "connected");
        assert!(json["timestamp"].is_string());
    }
}
