use axum::routing::{get, post};
use axum::Router;
use tracing::info;

use crate::db::DbPool;

mod alerts;
mod dashboard;
mod error;
mod vehicles;

pub use error::{ApiError, ApiResult};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
}

pub fn router(pool: DbPool) -> Router {
    Router::new()
        .route("/vehicles", get(vehicles::list).post(vehicles::create))
        .route(
            "/vehicles/{vehicle_id}",
            get(vehicles::get_one)
                .put(vehicles::update)
                .delete(vehicles::remove),
        )
        .route("/alerts", get(alerts::list))
        .route("/alerts/stats", get(alerts::stats))
        .route("/alerts/{alert_id}/resolve", post(alerts::resolve))
        .route("/dashboard/map", get(dashboard::map_view))
        .with_state(AppState { pool })
}

pub async fn serve(addr: String, pool: DbPool) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("HTTP API listening on {}", addr);
    axum::serve(listener, router(pool)).await?;
    Ok(())
}
