use anyhow::{Context, Result};
use order::{
    config::myconfig::{Config, StoreBackend},
    di::OrderStore,
    handler::AppRouter,
    repository::order::InMemoryOrderRepository,
    state::AppState,
};
use shared::{
    config::{ConnectionManager, ConnectionPool},
    utils::{Telemetry, init_logger},
};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let mut telemetry = Telemetry::new("order-service", config.otel_endpoint.clone());
    let logger_provider = telemetry
        .init_logger()
        .context("Failed to initialize OTLP logger")?;
    telemetry
        .init_meter()
        .context("Failed to initialize OTLP meter")?;
    telemetry
        .init_tracer()
        .context("Failed to initialize OTLP tracer")?;

    let _guard = init_logger(
        &logger_provider,
        "order-service",
        config.is_dev,
        config.enable_file_log,
    );

    let store = open_store(&config).await?;

    let state = AppState::new(store)
        .await
        .context("Failed to create AppState")?;

    info!("✅ Application setup completed successfully.");

    let served = AppRouter::serve(config.port, state).await;
    if let Err(e) = &served {
        error!("❌ HTTP server failed: {e:?}");
    }

    info!("🛑 Shutting down...");

    if let Err(e) = telemetry.shutdown().await {
        warn!("Failed to shutdown telemetry: {}", e);
    }

    info!("✅ Order service shutdown complete.");

    served
}

async fn open_store(config: &Config) -> Result<OrderStore> {
    match config.store_backend {
        StoreBackend::Memory => {
            info!("🧠 Using in-memory order store");
            Ok(OrderStore::Memory(InMemoryOrderRepository::new()))
        }
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("Missing environment variable: DATABASE_URL")?;

            let db_pool =
                ConnectionManager::new_pool(database_url, config.db_min_conn, config.db_max_conn)
                    .await
                    .context("Failed to initialize database pool")?;

            if config.run_migrations {
                run_migrations(&db_pool)
                    .await
                    .context("failed to migration database")?;
            }

            Ok(OrderStore::Postgres(db_pool))
        }
    }
}

async fn run_migrations(pool: &ConnectionPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;

    info!("📦 Migrations applied");
    Ok(())
}
