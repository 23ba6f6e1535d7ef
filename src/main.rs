use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use chrono::Duration;

use taskboard::config::Config;
use taskboard::db;
use taskboard::routes::{self, health};
use taskboard::session::SessionStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let pool = db::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    // One session store shared across all workers; sessions live for an hour
    // and do not survive a restart.
    let store = SessionStore::new(Duration::hours(1));

    println!("Server running on port {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(store.clone()))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(health::health)
            .service(web::scope("/api").configure(|cfg| routes::config(cfg, &store)))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
