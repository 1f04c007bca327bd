use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use std::collections::BTreeMap;

use super::message::MotionPayload;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertType {
    Accident,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::Accident => "accident",
        }
    }
}

/// Ordered severity scale; derived from classifier confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Thresholds are inclusive toward the higher tier.
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 0.9 {
            Severity::Critical
        } else if confidence >= 0.8 {
            Severity::High
        } else if confidence >= 0.7 {
            Severity::Medium
        } else {
            Severity::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

/// Sensor state captured at alert creation, stored embedded in the alert row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    pub ax: f64,
    pub ay: f64,
    pub az: f64,
    pub gx: f64,
    pub gy: f64,
    pub gz: f64,
    pub total_g: f64,
    pub confidence: f64,
}

impl SensorSnapshot {
    pub fn from_payload(payload: &MotionPayload, confidence: f64) -> Self {
        Self {
            ax: payload.ax,
            ay: payload.ay,
            az: payload.az,
            gx: payload.gx,
            gy: payload.gy,
            gz: payload.gz,
            total_g: payload.total_g,
            confidence,
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Alert {
    pub id: i64,
    pub device_id: String,
    pub alert_type: String,
    pub severity: String,
    pub message: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub sensor_data: Option<Json<SensorSnapshot>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Alert list row joined with the owning vehicle's name and plate.
#[derive(Debug, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertWithVehicle {
    pub id: i64,
    pub device_id: String,
    pub vehicle_name: String,
    pub number_plate: String,
    pub alert_type: String,
    pub severity: String,
    pub message: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub sensor_data: Option<Json<SensorSnapshot>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertStats {
    pub total_alerts: i64,
    pub active_alerts: i64,
    pub by_type: BTreeMap<String, i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_from_confidence() {
        assert_eq!(Severity::from_confidence(0.95), Severity::Critical);
        assert_eq!(Severity::from_confidence(0.85), Severity::High);
        assert_eq!(Severity::from_confidence(0.75), Severity::Medium);
        assert_eq!(Severity::from_confidence(0.5), Severity::Low);
        assert_eq!(Severity::from_confidence(0.0), Severity::Low);
    }

    #[test]
    fn test_severity_boundaries_map_to_higher_tier() {
        assert_eq!(Severity::from_confidence(0.9), Severity::Critical);
        assert_eq!(Severity::from_confidence(0.8), Severity::High);
        assert_eq!(Severity::from_confidence(0.7), Severity::Medium);
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn test_snapshot_preserves_confidence() {
        let payload: MotionPayload = serde_json::from_str(
            r#"{
                "device": "TRACKER_1F8A3C", "timestamp": 1754553600, "count": 7,
                "lat": -7.94, "lon": 112.61, "speed": 12.0,
                "ax": -21.4, "ay": 18.2, "az": 24.9,
                "gx": 410.0, "gy": -380.5, "gz": 120.0,
                "pitch": 30.1, "roll": -12.7, "moving": false, "total_g": 28.4
            }"#,
        )
        .unwrap();

        let confidence = 0.873214;
        let snapshot = SensorSnapshot::from_payload(&payload, confidence);
        let round_tripped: SensorSnapshot =
            serde_json::from_str(&serde_json::to_string(&snapshot).unwrap()).unwrap();
        assert_eq!(round_tripped, snapshot);
        assert_eq!(round_tripped.confidence, confidence);
    }
}
