use anyhow::{Context, Result};
use product::{config::myconfig::Config, handler::AppRouter, state::AppState};
use shared::{
    config::ConnectionManager,
    utils::{Telemetry, init_logger},
};
use sqlx::{Pool, Postgres};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let is_dev = std::env::var("DEV_MODE")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);
    let is_enable_file = std::env::var("ENABLE_FILE_LOG")
        .map(|v| v == "true")
        .unwrap_or(false);

    let config = Config::init().context("Failed to load configuration")?;

    let telemetry = match &config.otel_endpoint {
        Some(endpoint) => Some(
            Telemetry::init("product-service", endpoint)
                .context("Failed to initialize telemetry")?,
        ),
        None => None,
    };

    init_logger(
        telemetry.as_ref().map(Telemetry::logger_provider),
        "product-service",
        is_dev,
        is_enable_file,
    );

    info!("🚀 Starting Product Service initialization...");

    let db_pool =
        ConnectionManager::new_pool(&config.database_url, config.db_min_conn, config.db_max_conn)
            .await
            .context("Failed to initialize database pool")?;

    if config.run_migrations {
        run_migrations(&db_pool)
            .await
            .context("Failed to run database migrations")?;
        info!("✅ Database migrations applied");
    }

    let state = AppState::new(db_pool, &config)
        .await
        .context("Failed to create AppState")?;

    info!("✅ Application setup completed successfully.");

    let result = AppRouter::serve(config.port, state).await;

    if let Some(telemetry) = telemetry
        && let Err(e) = telemetry.shutdown()
    {
        error!("Failed to shutdown telemetry: {}", e);
    }

    info!("✅ Product Service shutdown complete.");

    result
}

pub async fn run_migrations(pool: &Pool<Postgres>) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
