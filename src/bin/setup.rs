use taskboard::config::Config;
use taskboard::db;

/// Drops and recreates the database tables. Destructive: any existing rows
/// are lost. Run it once before first start, or whenever a clean slate is
/// wanted.
#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let pool = match db::connect(&config.database_url).await {
        Ok(pool) => {
            println!("Connection to database established successfully.");
            pool
        }
        Err(e) => {
            eprintln!("Unable to connect to the database: {}", e);
            std::process::exit(1);
        }
    };

    match db::setup_schema(&pool).await {
        Ok(()) => println!("Database and tables created successfully."),
        Err(e) => {
            eprintln!("Unable to set up the database schema: {}", e);
            std::process::exit(1);
        }
    }

    pool.close().await;
}
