use anyhow::Result;

use super::{queries, DbPool};
use crate::models::vehicle::{NewVehicle, Vehicle, VehicleUpdate};

/// Registry lookup for inbound telemetry: `None` means the device is not
/// registered and the message must be dropped.
pub async fn find_by_device(pool: &DbPool, device_id: &str) -> Result<Option<Vehicle>> {
    let vehicle = sqlx::query_as::<_, Vehicle>(queries::SELECT_VEHICLE_BY_DEVICE)
        .bind(device_id)
        .fetch_optional(pool)
        .await?;
    Ok(vehicle)
}

pub async fn find_by_id(pool: &DbPool, vehicle_id: i64) -> Result<Option<Vehicle>> {
    let vehicle = sqlx::query_as::<_, Vehicle>(queries::SELECT_VEHICLE_BY_ID)
        .bind(vehicle_id)
        .fetch_optional(pool)
        .await?;
    Ok(vehicle)
}

pub async fn list_all(pool: &DbPool) -> Result<Vec<Vehicle>> {
    let vehicles = sqlx::query_as::<_, Vehicle>(queries::SELECT_ALL_VEHICLES)
        .fetch_all(pool)
        .await?;
    Ok(vehicles)
}

pub async fn create(pool: &DbPool, new: &NewVehicle) -> Result<Vehicle> {
    let vehicle = sqlx::query_as::<_, Vehicle>(queries::INSERT_VEHICLE)
        .bind(&new.device_id)
        .bind(&new.vehicle_name)
        .bind(&new.number_plate)
        .bind(&new.driver_name)
        .bind(&new.contact_number)
        .fetch_one(pool)
        .await?;
    Ok(vehicle)
}

pub async fn update(
    pool: &DbPool,
    vehicle_id: i64,
    fields: &VehicleUpdate,
) -> Result<Option<Vehicle>> {
    let vehicle = sqlx::query_as::<_, Vehicle>(queries::UPDATE_VEHICLE)
        .bind(vehicle_id)
        .bind(&fields.vehicle_name)
        .bind(&fields.number_plate)
        .bind(&fields.driver_name)
        .bind(&fields.contact_number)
        .fetch_optional(pool)
        .await?;
    Ok(vehicle)
}

#[derive(Debug)]
pub struct CascadeDelete {
    pub vehicle: Vehicle,
    pub telemetry_deleted: u64,
    pub alerts_deleted: u64,
}

/// Removes a vehicle together with its telemetry row and alerts in one
/// transaction; a failure anywhere rolls the whole cascade back. The vehicle
/// row is locked first so the ingestion pipeline cannot insert dependent
/// rows mid-cascade.
pub async fn delete_cascade(pool: &DbPool, vehicle_id: i64) -> Result<Option<CascadeDelete>> {
    let mut tx = pool.begin().await?;

    let vehicle = sqlx::query_as::<_, Vehicle>(queries::SELECT_VEHICLE_BY_ID_FOR_UPDATE)
        .bind(vehicle_id)
        .fetch_optional(&mut *tx)
        .await?;
    let Some(vehicle) = vehicle else {
        return Ok(None);
    };

    let telemetry_deleted = sqlx::query(queries::DELETE_TELEMETRY_BY_DEVICE)
        .bind(&vehicle.device_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let alerts_deleted = sqlx::query(queries::DELETE_ALERTS_BY_DEVICE)
        .bind(&vehicle.device_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    sqlx::query(queries::DELETE_VEHICLE_BY_ID)
        .bind(vehicle_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(Some(CascadeDelete {
        vehicle,
        telemetry_deleted,
        alerts_deleted,
    }))
}
