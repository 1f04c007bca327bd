use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};
use tracing::error;

use super::{ApiError, ApiResult, AppState};
use crate::db;
use crate::models::vehicle::{NewVehicle, Vehicle, VehicleUpdate};

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Vehicle>>> {
    Ok(Json(db::vehicles::list_all(&state.pool).await?))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(vehicle_id): Path<i64>,
) -> ApiResult<Json<Vehicle>> {
    db::vehicles::find_by_id(&state.pool, vehicle_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Vehicle"))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<NewVehicle>,
) -> ApiResult<Json<Vehicle>> {
    Ok(Json(db::vehicles::create(&state.pool, &body).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(vehicle_id): Path<i64>,
    Json(body): Json<VehicleUpdate>,
) -> ApiResult<Json<Vehicle>> {
    db::vehicles::update(&state.pool, vehicle_id, &body)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Vehicle"))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(vehicle_id): Path<i64>,
) -> ApiResult<Json<Value>> {
    match db::vehicles::delete_cascade(&state.pool, vehicle_id).await {
        Ok(Some(summary)) => Ok(Json(json!({
            "detail": "Vehicle and all related data deleted successfully",
            "deleted_vehicle": summary.vehicle.vehicle_name,
            "deleted_telemetry_count": summary.telemetry_deleted,
            "deleted_alert_count": summary.alerts_deleted,
        }))),
        Ok(None) => Err(ApiError::not_found("Vehicle")),
        Err(e) => {
            error!("Error deleting vehicle {}: {}", vehicle_id, e);
            Err(ApiError::internal(format!("Error deleting vehicle: {}", e)))
        }
    }
}
