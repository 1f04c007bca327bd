//! Demo traffic publisher for exercising the service end to end. Replays the
//! movement of two registered trackers: mostly normal driving, with a forced
//! impact scenario every `SIM_CRASH_INTERVAL` messages, followed by a
//! stopped-vehicle phase. All generator state is owned by the
//! `TrafficGenerator` instance.

use anyhow::Result;
use rand::Rng;
use rumqttc::{AsyncClient, MqttOptions, QoS};
use serde_json::{json, Value};
use std::env;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{error, info};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Normal,
    /// Remaining impact messages before the vehicle comes to rest.
    Impact(u32),
    Stopped,
}

#[derive(Debug)]
struct DeviceState {
    device_id: &'static str,
    lat: f64,
    lon: f64,
    phase: Phase,
}

#[derive(Debug)]
struct TrafficGenerator {
    devices: Vec<DeviceState>,
    messages_sent: u64,
    crash_interval: u64,
}

impl TrafficGenerator {
    fn new(crash_interval: u64) -> Self {
        Self {
            devices: vec![
                DeviceState {
                    device_id: "TRACKER_1F8A3C",
                    lat: -7.941610,
                    lon: 112.614300,
                    phase: Phase::Normal,
                },
                DeviceState {
                    device_id: "TRACKER_7B2D5E",
                    lat: -7.941100,
                    lon: 112.611000,
                    phase: Phase::Normal,
                },
            ],
            messages_sent: 0,
            crash_interval,
        }
    }

    fn device_count(&self) -> usize {
        self.devices.len()
    }

    fn next_payload(&mut self, index: usize) -> Value {
        let force_crash = self.crash_interval > 0
            && self.messages_sent > 0
            && self.messages_sent % self.crash_interval == 0
            && self.devices.iter().all(|d| d.phase == Phase::Normal);
        self.messages_sent += 1;

        let device = &mut self.devices[index];
        if force_crash {
            info!("Forcing impact scenario for {}", device.device_id);
            device.phase = Phase::Impact(3);
        }

        match device.phase {
            Phase::Normal => normal_payload(device),
            Phase::Impact(remaining) => {
                device.phase = if remaining > 1 {
                    Phase::Impact(remaining - 1)
                } else {
                    Phase::Stopped
                };
                impact_payload(device)
            }
            Phase::Stopped => stopped_payload(device),
        }
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

fn normal_payload(device: &mut DeviceState) -> Value {
    let mut rng = rand::rng();

    // Drift the position by roughly a meter per message.
    device.lat += rng.random_range(-0.00001..=0.00001);
    device.lon += rng.random_range(-0.00001..=0.00001);

    json!({
        "device": device.device_id,
        "timestamp": unix_now(),
        "count": rng.random_range(0..=100),
        "lat": device.lat,
        "lon": device.lon,
        "speed": rng.random_range(30.0..80.0),
        "ax": rng.random_range(-1.0..=1.0),
        "ay": rng.random_range(-1.0..=1.0),
        "az": rng.random_range(8.8..=10.2),
        "gx": rng.random_range(-10.0..=10.0),
        "gy": rng.random_range(-10.0..=10.0),
        "gz": rng.random_range(-10.0..=10.0),
        "pitch": rng.random_range(-5.0..=5.0),
        "roll": rng.random_range(-5.0..=5.0),
        "moving": true,
        "total_g": rng.random_range(9.5..=10.5),
    })
}

fn impact_payload(device: &mut DeviceState) -> Value {
    let mut rng = rand::rng();

    json!({
        "device": device.device_id,
        "timestamp": unix_now(),
        "count": rng.random_range(0..=100),
        "lat": device.lat,
        "lon": device.lon,
        "speed": rng.random_range(0.0..20.0),
        "ax": rng.random_range(-25.0..=25.0),
        "ay": rng.random_range(-25.0..=25.0),
        "az": rng.random_range(15.0..=30.0),
        "gx": rng.random_range(-500.0..=500.0),
        "gy": rng.random_range(-500.0..=500.0),
        "gz": rng.random_range(-500.0..=500.0),
        "pitch": rng.random_range(-45.0..=45.0),
        "roll": rng.random_range(-45.0..=45.0),
        "moving": false,
        "total_g": rng.random_range(20.0..=35.0),
    })
}

fn stopped_payload(device: &mut DeviceState) -> Value {
    let mut rng = rand::rng();

    json!({
        "device": device.device_id,
        "timestamp": unix_now(),
        "count": rng.random_range(0..=100),
        "lat": device.lat,
        "lon": device.lon,
        "speed": 0.0,
        "ax": rng.random_range(-0.5..=0.5),
        "ay": rng.random_range(-0.5..=0.5),
        "az": rng.random_range(9.0..=10.0),
        "gx": rng.random_range(-5.0..=5.0),
        "gy": rng.random_range(-5.0..=5.0),
        "gz": rng.random_range(-5.0..=5.0),
        "pitch": rng.random_range(-2.0..=2.0),
        "roll": rng.random_range(-2.0..=2.0),
        "moving": false,
        "total_g": rng.random_range(9.5..=10.2),
    })
}

fn status_label(payload: &Value) -> &'static str {
    if payload["total_g"].as_f64().unwrap_or(0.0) > 15.0 {
        "IMPACT"
    } else if payload["moving"].as_bool().unwrap_or(false) {
        "DRIVING"
    } else {
        "STOPPED"
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(log_level.as_str())
        .init();

    let broker = env::var("MQTT_BROKER").unwrap_or_else(|_| "broker.hivemq.com".to_string());
    let port: u16 = env::var("MQTT_PORT")
        .unwrap_or_else(|_| "1883".to_string())
        .parse()
        .unwrap_or(1883);
    let topic = env::var("MQTT_TOPIC").unwrap_or_else(|_| "esp32/tracker/data".to_string());
    let crash_interval: u64 = env::var("SIM_CRASH_INTERVAL")
        .unwrap_or_else(|_| "50".to_string())
        .parse()
        .unwrap_or(50);
    let publish_delay = Duration::from_secs(
        env::var("SIM_PUBLISH_INTERVAL_SECS")
            .unwrap_or_else(|_| "2".to_string())
            .parse()
            .unwrap_or(2),
    );

    let client_id = format!("crashwatch-sim-{}", Uuid::new_v4());
    let mut mqttoptions = MqttOptions::new(client_id, &broker, port);
    mqttoptions.set_keep_alive(Duration::from_secs(60));

    let (client, mut eventloop) = AsyncClient::new(mqttoptions, 10);

    // The event loop must keep turning for publishes to go out.
    tokio::spawn(async move {
        loop {
            if let Err(e) = eventloop.poll().await {
                error!("MQTT Connection error: {}", e);
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
        }
    });

    let mut generator = TrafficGenerator::new(crash_interval);
    info!(
        "Publishing simulated telemetry to {} (impact every {} messages)",
        topic, crash_interval
    );

    loop {
        for index in 0..generator.device_count() {
            let payload = generator.next_payload(index);
            client
                .publish(&topic, QoS::AtLeastOnce, false, payload.to_string())
                .await?;
            info!(
                "{} | {} | Speed: {:.1} km/h | G: {:.1}g",
                status_label(&payload),
                payload["device"].as_str().unwrap_or("?"),
                payload["speed"].as_f64().unwrap_or(0.0),
                payload["total_g"].as_f64().unwrap_or(0.0),
            );
            tokio::time::sleep(publish_delay).await;
        }
    }
}
