use anyhow::Result;
use chrono::{DateTime, Utc};

use super::{queries, DbPool};
use crate::models::message::MotionPayload;
use crate::models::telemetry::{round1, MapEntry};

/// Minimum interval between accepted telemetry updates per device.
pub const THROTTLE_WINDOW_SECS: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Applied,
    Throttled,
}

/// Last-writer-wins upsert limited to one accepted write per device per
/// throttle window. The window check and the write are a single statement,
/// so concurrent writers cannot both pass the check; a throttled update is
/// discarded, never buffered.
pub async fn upsert_reading(
    pool: &DbPool,
    payload: &MotionPayload,
    now: DateTime<Utc>,
) -> Result<UpsertOutcome> {
    let result = sqlx::query(queries::UPSERT_TELEMETRY)
        .bind(&payload.device)
        .bind(payload.timestamp)
        .bind(payload.count)
        .bind(payload.lat)
        .bind(payload.lon)
        .bind(payload.speed)
        .bind(payload.ax)
        .bind(payload.ay)
        .bind(payload.az)
        .bind(payload.gx)
        .bind(payload.gy)
        .bind(payload.gz)
        .bind(payload.pitch)
        .bind(payload.roll)
        .bind(payload.moving)
        .bind(payload.total_g)
        .bind(now)
        .bind(THROTTLE_WINDOW_SECS)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        Ok(UpsertOutcome::Throttled)
    } else {
        Ok(UpsertOutcome::Applied)
    }
}

/// One latest-position entry per vehicle with a stored reading.
pub async fn map_entries(pool: &DbPool) -> Result<Vec<MapEntry>> {
    let mut entries = sqlx::query_as::<_, MapEntry>(queries::SELECT_MAP_ENTRIES)
        .fetch_all(pool)
        .await?;
    for entry in &mut entries {
        entry.speed = round1(entry.speed);
    }
    Ok(entries)
}
