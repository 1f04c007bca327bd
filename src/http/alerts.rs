use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{ApiError, ApiResult, AppState};
use crate::db;
use crate::models::alert::{AlertStats, AlertWithVehicle};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub active_only: bool,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<AlertWithVehicle>>> {
    Ok(Json(
        db::alerts::list_with_vehicles(&state.pool, params.active_only).await?,
    ))
}

pub async fn resolve(
    State(state): State<AppState>,
    Path(alert_id): Path<i64>,
) -> ApiResult<Json<Value>> {
    match db::alerts::resolve(&state.pool, alert_id, Utc::now()).await? {
        Some(_) => Ok(Json(json!({ "detail": "Alert resolved successfully" }))),
        None => Err(ApiError::not_found("Alert")),
    }
}

pub async fn stats(State(state): State<AppState>) -> ApiResult<Json<AlertStats>> {
    Ok(Json(db::alerts::stats(&state.pool).await?))
}
