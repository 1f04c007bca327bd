mod classifier;
mod config;
mod db;
mod http;
mod models;
mod mqtt;
mod processor;

use std::sync::Arc;

use classifier::{CrashDetector, ImpactThresholdModel};
use config::AppConfig;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load config
    let config = AppConfig::load()?;

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(config.log_level.as_str())
        .init();

    info!("Starting Crashwatch Service...");

    // Init DB
    let pool = db::init_pool(&config.database_url).await?;
    db::init_schema(&pool).await?;
    info!("Connected to database");

    let detector = Arc::new(CrashDetector::new(Box::new(ImpactThresholdModel::default())));

    // Serve HTTP and consume telemetry until either side fails
    tokio::try_join!(
        http::serve(config.http_listen_addr.clone(), pool.clone()),
        mqtt::start_mqtt_client(&config, pool, detector),
    )?;

    Ok(())
}
