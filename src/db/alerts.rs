use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use sqlx::types::Json;
use sqlx::PgConnection;
use std::collections::BTreeMap;

use super::{queries, DbPool};
use crate::models::alert::{Alert, AlertStats, AlertType, AlertWithVehicle, SensorSnapshot, Severity};
use crate::models::message::MotionPayload;
use crate::models::vehicle::Vehicle;

/// Window during which a second alert of the same type for the same device
/// is suppressed.
pub const DEDUP_WINDOW_SECS: i64 = 120;

/// True when an active alert of the given type for the device was created
/// within the dedup window ending at `now`.
pub async fn has_recent_active(
    conn: &mut PgConnection,
    device_id: &str,
    alert_type: AlertType,
    now: DateTime<Utc>,
) -> Result<bool> {
    let cutoff = now - Duration::seconds(DEDUP_WINDOW_SECS);
    let exists: bool = sqlx::query_scalar(queries::SELECT_RECENT_ACTIVE_ALERT_EXISTS)
        .bind(device_id)
        .bind(alert_type.as_str())
        .bind(cutoff)
        .fetch_one(conn)
        .await?;
    Ok(exists)
}

/// Atomic dedup-check-then-create for an accident classification. The
/// vehicle row is locked for the duration of the transaction, so two
/// concurrent readings for the same device cannot both pass the check.
/// Returns `None` when the alert was suppressed or the device is no longer
/// registered.
pub async fn create_accident_if_no_recent(
    pool: &DbPool,
    payload: &MotionPayload,
    confidence: f64,
    now: DateTime<Utc>,
) -> Result<Option<Alert>> {
    let mut tx = pool.begin().await?;

    let vehicle = sqlx::query_as::<_, Vehicle>(queries::SELECT_VEHICLE_BY_DEVICE_FOR_UPDATE)
        .bind(&payload.device)
        .fetch_optional(&mut *tx)
        .await?;
    let Some(vehicle) = vehicle else {
        return Ok(None);
    };

    if has_recent_active(&mut tx, &payload.device, AlertType::Accident, now).await? {
        return Ok(None);
    }

    let severity = Severity::from_confidence(confidence);
    let message = format!(
        "Accident detected for {} with {:.1}% confidence",
        vehicle.vehicle_name,
        confidence * 100.0
    );
    let snapshot = SensorSnapshot::from_payload(payload, confidence);

    let alert = sqlx::query_as::<_, Alert>(queries::INSERT_ALERT)
        .bind(&payload.device)
        .bind(AlertType::Accident.as_str())
        .bind(severity.as_str())
        .bind(&message)
        .bind(payload.lat)
        .bind(payload.lon)
        .bind(Json(snapshot))
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(Some(alert))
}

/// Marks the alert resolved, stamping `resolved_at` at most once. Resolving
/// an already-resolved alert returns the stored row untouched; an unknown id
/// returns `None`.
pub async fn resolve(pool: &DbPool, alert_id: i64, now: DateTime<Utc>) -> Result<Option<Alert>> {
    let resolved = sqlx::query_as::<_, Alert>(queries::RESOLVE_ALERT)
        .bind(alert_id)
        .bind(now)
        .fetch_optional(pool)
        .await?;
    if resolved.is_some() {
        return Ok(resolved);
    }

    let existing = sqlx::query_as::<_, Alert>(queries::SELECT_ALERT_BY_ID)
        .bind(alert_id)
        .fetch_optional(pool)
        .await?;
    Ok(existing)
}

/// Alerts joined with vehicle name/plate, most recent first.
pub async fn list_with_vehicles(pool: &DbPool, only_active: bool) -> Result<Vec<AlertWithVehicle>> {
    let alerts = sqlx::query_as::<_, AlertWithVehicle>(queries::SELECT_ALERTS_WITH_VEHICLE)
        .bind(only_active)
        .fetch_all(pool)
        .await?;
    Ok(alerts)
}

pub async fn stats(pool: &DbPool) -> Result<AlertStats> {
    let total_alerts: i64 = sqlx::query_scalar(queries::COUNT_ALERTS)
        .fetch_one(pool)
        .await?;
    let active_alerts: i64 = sqlx::query_scalar(queries::COUNT_ACTIVE_ALERTS)
        .fetch_one(pool)
        .await?;
    let by_type: BTreeMap<String, i64> = sqlx::query_as::<_, (String, i64)>(queries::COUNT_ALERTS_BY_TYPE)
        .fetch_all(pool)
        .await?
        .into_iter()
        .collect();

    Ok(AlertStats {
        total_alerts,
        active_alerts,
        by_type,
    })
}
