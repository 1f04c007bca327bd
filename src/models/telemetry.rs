use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Latest reading for one device. The `telemetry` table holds at most one
/// row per `device_id`; writes go through the throttled upsert only.
#[derive(Debug, FromRow)]
#[allow(dead_code)]
pub struct TelemetryReading {
    pub id: i64,
    pub device_id: String,
    pub timestamp: i64,
    pub count: i32,
    pub lat: f64,
    pub lon: f64,
    pub speed: f64,
    pub ax: f64,
    pub ay: f64,
    pub az: f64,
    pub gx: f64,
    pub gy: f64,
    pub gz: f64,
    pub pitch: f64,
    pub roll: f64,
    pub moving: bool,
    pub total_g: f64,
    pub updated_at: DateTime<Utc>,
}

/// One map marker per vehicle with a stored reading.
#[derive(Debug, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapEntry {
    pub id: i64,
    pub device_id: String,
    pub name: String,
    pub number_plate: String,
    pub speed: f64,
    pub lat: f64,
    pub lon: f64,
}

/// Speeds are reported to the map with one decimal.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round1() {
        assert_eq!(round1(54.349), 54.3);
        assert_eq!(round1(54.37), 54.4);
        assert_eq!(round1(0.0), 0.0);
        assert_eq!(round1(-12.34), -12.3);
    }
}
