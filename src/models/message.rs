use serde::Deserialize;

/// Telemetry payload published by a tracker unit. Every field is required;
/// a message missing any of them is dropped during parsing.
#[derive(Debug, Clone, Deserialize)]
pub struct MotionPayload {
    pub device: String,
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsing_tracker_payload() {
        let payload = r#"
        {
            "device": "TRACKER_1F8A3C",
            "timestamp": 1754553600,
            "count": 42,
            "lat": -7.941610,
            "lon": 112.614300,
            "speed": 54.3,
            "ax": 0.12,
            "ay": -0.40,
            "az": 9.81,
            "gx": 2.5,
            "gy": -1.0,
            "gz": 0.3,
            "pitch": 1.2,
            "roll": -0.8,
            "moving": true,
            "total_g": 9.85
        }
        "#;

        let msg: MotionPayload = serde_json::from_str(payload).unwrap();
        assert_eq!(msg.device, "TRACKER_1F8A3C");
        assert_eq!(msg.timestamp, 1754553600);
        assert_eq!(msg.count, 42);
        assert_eq!(msg.lat, -7.941610);
        assert_eq!(msg.lon, 112.614300);
        assert_eq!(msg.az, 9.81);
        assert!(msg.moving);
        assert_eq!(msg.total_g, 9.85);
    }

    #[test]
    fn test_missing_field_is_rejected() {
        // No "device" field.
        let payload = r#"
        {
            "timestamp": 1754553600,
            "count": 1,
            "lat": 0.0, "lon": 0.0, "speed": 0.0,
            "ax": 0.0, "ay": 0.0, "az": 9.8,
            "gx": 0.0, "gy": 0.0, "gz": 0.0,
            "pitch": 0.0, "roll": 0.0,
            "moving": false, "total_g": 9.8
        }
        "#;

        assert!(serde_json::from_str::<MotionPayload>(payload).is_err());
    }

    #[test]
    fn test_mistyped_field_is_rejected() {
        let payload = r#"
        {
            "device": "TRACKER_1F8A3C",
            "timestamp": "not-a-number",
            "count": 1,
            "lat": 0.0, "lon": 0.0, "speed": 0.0,
            "ax": 0.0, "ay": 0.0, "az": 9.8,
            "gx": 0.0, "gy": 0.0, "gz": 0.0,
            "pitch": 0.0, "roll": 0.0,
            "moving": false, "total_g": 9.8
        }
        "#;

        assert!(serde_json::from_str::<MotionPayload>(payload).is_err());
    }
}
