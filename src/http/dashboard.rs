use axum::extract::State;
use axum::Json;

use super::{ApiResult, AppState};
use crate::db;
use crate::models::telemetry::MapEntry;

pub async fn map_view(State(state): State<AppState>) -> ApiResult<Json<Vec<MapEntry>>> {
    Ok(Json(db::telemetry::map_entries(&state.pool).await?))
}
