use chrono::Utc;
use tracing::{error, info, warn};

use crate::classifier::{ClassifierStatus, CrashDetector, MotionFeatures};
use crate::db::telemetry::{UpsertOutcome, THROTTLE_WINDOW_SECS};
use crate::db::{alerts, telemetry, vehicles, DbPool};
use crate::models::message::MotionPayload;

/// Terminal outcome of one inbound message. Processing never retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Payload did not match the telemetry schema.
    DroppedInvalid,
    /// Device is not in the registry.
    DroppedUnregistered,
    /// Pipeline ran to completion; alert gate and state update were each
    /// attempted.
    Handled,
}

/// Runs the full ingestion pipeline for one message: parse, authorize,
/// classify, alert gate, throttled state update. The alert gate and the
/// state update are independent: a failure in either is logged and does not
/// block the other, and the message still counts as handled.
pub async fn process_message(
    pool: &DbPool,
    detector: &CrashDetector,
    payload: &[u8],
) -> anyhow::Result<Outcome> {
    // 1. Parse
    let message: MotionPayload = match serde_json::from_slice(payload) {
        Ok(m) => m,
        Err(e) => {
            warn!("Failed to parse telemetry payload: {}", e);
            return Ok(Outcome::DroppedInvalid);
        }
    };

    // 2. Authorize: unregistered devices are dropped, never auto-registered
    if vehicles::find_by_device(pool, &message.device).await?.is_none() {
        info!("Device {} not registered - message ignored", message.device);
        return Ok(Outcome::DroppedUnregistered);
    }

    let now = Utc::now();

    // 3. Classify (fail-soft: never an error)
    let classification = detector.classify(&MotionFeatures::from_payload(&message));
    if classification.status != ClassifierStatus::Scored {
        warn!(
            "Classifier skipped for {}: {}",
            message.device,
            classification.status.as_str()
        );
    }

    // 4. Alert gate
    if classification.is_accident {
        match alerts::create_accident_if_no_recent(pool, &message, classification.confidence, now)
            .await
        {
            Ok(Some(alert)) => {
                info!(
                    "Accident alert {} ({}) created for {}",
                    alert.id, alert.severity, message.device
                );
            }
            Ok(None) => {
                info!(
                    "Accident alert suppressed for {} (recent active alert)",
                    message.device
                );
            }
            Err(e) => {
                error!("Failed to create accident alert for {}: {}", message.device, e);
            }
        }
    }

    // 5. State update, attempted regardless of the alert gate
    match telemetry::upsert_reading(pool, &message, now).await {
        Ok(UpsertOutcome::Applied) => {
            info!("Telemetry updated for {}", message.device);
        }
        Ok(UpsertOutcome::Throttled) => {
            info!(
                "{} | Update skipped (<{}s)",
                message.device, THROTTLE_WINDOW_SECS
            );
        }
        Err(e) => {
            error!("Failed to store telemetry for {}: {}", message.device, e);
        }
    }

    Ok(Outcome::Handled)
}
