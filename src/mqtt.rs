use crate::classifier::CrashDetector;
use crate::config::AppConfig;
use crate::db::DbPool;
use crate::processor::message_processor;
use anyhow::bail;
use rumqttc::{AsyncClient, Event, MqttOptions, Packet, QoS};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info};
use uuid::Uuid;

/// Depth of the bounded queue between the broker event loop and the
/// consumer. The event loop blocks on a full queue, which pushes
/// backpressure onto the broker session instead of growing memory.
const INGEST_QUEUE_DEPTH: usize = 100;

/// Subscribes to the telemetry topic and feeds every publish through a
/// bounded channel into a single consumer task. Messages are processed one
/// at a time, in arrival order; there is no concurrent processing of two
/// messages.
pub async fn start_mqtt_client(
    config: &AppConfig,
    pool: DbPool,
    detector: Arc<CrashDetector>,
) -> anyhow::Result<()> {
    let client_id = format!("crashwatch-{}", Uuid::new_v4());
    let mut mqttoptions = MqttOptions::new(client_id, &config.mqtt_broker, config.mqtt_port);
    mqttoptions.set_keep_alive(Duration::from_secs(60));
    if !config.mqtt_username.is_empty() {
        mqttoptions.set_credentials(&config.mqtt_username, &config.mqtt_password);
    }

    let (client, mut eventloop) = AsyncClient::new(mqttoptions, 100);

    client.subscribe(&config.mqtt_topic, QoS::AtLeastOnce).await?;
    info!("Subscribed to {}", config.mqtt_topic);

    let (tx, mut rx) = mpsc::channel::<Vec<u8>>(INGEST_QUEUE_DEPTH);

    tokio::spawn(async move {
        while let Some(payload) = rx.recv().await {
            if let Err(e) = message_processor::process_message(&pool, &detector, &payload).await {
                error!("Error processing message: {}", e);
            }
        }
    });

    loop {
        match eventloop.poll().await {
            Ok(notification) => match notification {
                Event::Incoming(Packet::Publish(publish)) => {
                    if tx.send(publish.payload.to_vec()).await.is_err() {
                        bail!("Ingest consumer task stopped");
                    }
                }
                Event::Incoming(Packet::ConnAck(_)) => {
                    info!("MQTT Connected!");
                }
                Event::Incoming(Packet::SubAck(_)) => {
                    info!("Subscription confirmed!");
                }
                _ => {}
            },
            Err(e) => {
                error!("MQTT Connection error: {}", e);
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
        }
    }
}
