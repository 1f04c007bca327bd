use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Vehicle {
    pub id: i64,
    pub device_id: String,
    pub vehicle_name: String,
    pub number_plate: String,
    pub driver_name: String,
    pub contact_number: String,
}

#[derive(Debug, Deserialize)]
pub struct NewVehicle {
    pub device_id: String,
    pub vehicle_name: String,
    pub number_plate: String,
    pub driver_name: String,
    pub contact_number: String,
}

/// Full replace of the descriptive fields. `device_id` is the correlation
/// key for telemetry and alerts and cannot be changed after registration.
#[derive(Debug, Deserialize)]
pub struct VehicleUpdate {
    pub vehicle_name: String,
    pub number_plate: String,
    pub driver_name: String,
    pub contact_number: String,
}
