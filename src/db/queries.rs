pub const CREATE_VEHICLES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS vehicles (
    id BIGSERIAL PRIMARY KEY,
    device_id TEXT NOT NULL UNIQUE,
    vehicle_name TEXT NOT NULL,
    number_plate TEXT NOT NULL,
    driver_name TEXT NOT NULL,
    contact_number TEXT NOT NULL
);
"#;

pub const CREATE_TELEMETRY_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS telemetry (
    id BIGSERIAL PRIMARY KEY,
    device_id TEXT NOT NULL UNIQUE REFERENCES vehicles (device_id),
    timestamp BIGINT NOT NULL,
    count INT NOT NULL,
    lat DOUBLE PRECISION NOT NULL,
    lon DOUBLE PRECISION NOT NULL,
    speed DOUBLE PRECISION NOT NULL,
    ax DOUBLE PRECISION NOT NULL,
    ay DOUBLE PRECISION NOT NULL,
    az DOUBLE PRECISION NOT NULL,
    gx DOUBLE PRECISION NOT NULL,
    gy DOUBLE PRECISION NOT NULL,
    gz DOUBLE PRECISION NOT NULL,
    pitch DOUBLE PRECISION NOT NULL,
    roll DOUBLE PRECISION NOT NULL,
    moving BOOLEAN NOT NULL,
    total_g DOUBLE PRECISION NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);
"#;

pub const CREATE_ALERTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS alerts (
    id BIGSERIAL PRIMARY KEY,
    device_id TEXT NOT NULL REFERENCES vehicles (device_id),
    alert_type TEXT NOT NULL,
    severity TEXT NOT NULL,
    message TEXT NOT NULL,
    lat DOUBLE PRECISION,
    lon DOUBLE PRECISION,
    sensor_data JSONB,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL,
    resolved_at TIMESTAMPTZ
);
"#;

pub const SELECT_ALL_VEHICLES: &str = r#"
SELECT id, device_id, vehicle_name, number_plate, driver_name, contact_number
FROM vehicles ORDER BY id;
"#;

pub const SELECT_VEHICLE_BY_ID: &str = r#"
SELECT id, device_id, vehicle_name, number_plate, driver_name, contact_number
FROM vehicles WHERE id = $1;
"#;

pub const SELECT_VEHICLE_BY_ID_FOR_UPDATE: &str = r#"
SELECT id, device_id, vehicle_name, number_plate, driver_name, contact_number
FROM vehicles WHERE id = $1 FOR UPDATE;
"#;

pub const SELECT_VEHICLE_BY_DEVICE: &str = r#"
SELECT id, device_id, vehicle_name, number_plate, driver_name, contact_number
FROM vehicles WHERE device_id = $1;
"#;

pub const SELECT_VEHICLE_BY_DEVICE_FOR_UPDATE: &str = r#"
SELECT id, device_id, vehicle_name, number_plate, driver_name, contact_number
FROM vehicles WHERE device_id = $1 FOR UPDATE;
"#;

pub const INSERT_VEHICLE: &str = r#"
INSERT INTO vehicles (device_id, vehicle_name, number_plate, driver_name, contact_number)
VALUES ($1, $2, $3, $4, $5)
RETURNING id, device_id, vehicle_name, number_plate, driver_name, contact_number;
"#;

pub const UPDATE_VEHICLE: &str = r#"
UPDATE vehicles
SET vehicle_name = $2,
    number_plate = $3,
    driver_name = $4,
    contact_number = $5
WHERE id = $1
RETURNING id, device_id, vehicle_name, number_plate, driver_name, contact_number;
"#;

pub const DELETE_TELEMETRY_BY_DEVICE: &str = r#"
DELETE FROM telemetry WHERE device_id = $1;
"#;

pub const DELETE_ALERTS_BY_DEVICE: &str = r#"
DELETE FROM alerts WHERE device_id = $1;
"#;

pub const DELETE_VEHICLE_BY_ID: &str = r#"
DELETE FROM vehicles WHERE id = $1;
"#;

/// Insert, or overwrite the device's row only when the stored reading is at
/// least the throttle window old. Zero rows affected means the update was
/// throttled.
pub const UPSERT_TELEMETRY: &str = r#"
INSERT INTO telemetry (
    device_id, timestamp, count, lat, lon, speed,
    ax, ay, az, gx, gy, gz, pitch, roll, moving, total_g, updated_at
) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
ON CONFLICT (device_id) DO UPDATE
SET timestamp = EXCLUDED.timestamp,
    count = EXCLUDED.count,
    lat = EXCLUDED.lat,
    lon = EXCLUDED.lon,
    speed = EXCLUDED.speed,
    ax = EXCLUDED.ax,
    ay = EXCLUDED.ay,
    az = EXCLUDED.az,
    gx = EXCLUDED.gx,
    gy = EXCLUDED.gy,
    gz = EXCLUDED.gz,
    pitch = EXCLUDED.pitch,
    roll = EXCLUDED.roll,
    moving = EXCLUDED.moving,
    total_g = EXCLUDED.total_g,
    updated_at = EXCLUDED.updated_at
WHERE telemetry.updated_at <= EXCLUDED.updated_at - make_interval(secs => $18);
"#;

pub const SELECT_MAP_ENTRIES: &str = r#"
SELECT v.id, v.device_id, v.vehicle_name AS name, v.number_plate,
       t.speed, t.lat, t.lon
FROM vehicles v
JOIN telemetry t ON t.device_id = v.device_id
ORDER BY v.id;
"#;

pub const SELECT_RECENT_ACTIVE_ALERT_EXISTS: &str = r#"
SELECT EXISTS (
    SELECT 1 FROM alerts
    WHERE device_id = $1 AND alert_type = $2 AND is_active AND created_at >= $3
);
"#;

pub const INSERT_ALERT: &str = r#"
INSERT INTO alerts (device_id, alert_type, severity, message, lat, lon, sensor_data, is_active, created_at)
VALUES ($1, $2, $3, $4, $5, $6, $7, TRUE, $8)
RETURNING id, device_id, alert_type, severity, message, lat, lon, sensor_data,
          is_active, created_at, resolved_at;
"#;

pub const SELECT_ALERT_BY_ID: &str = r#"
SELECT id, device_id, alert_type, severity, message, lat, lon, sensor_data,
       is_active, created_at, resolved_at
FROM alerts WHERE id = $1;
"#;

/// Resolution happens at most once; an already-resolved alert matches no rows.
pub const RESOLVE_ALERT: &str = r#"
UPDATE alerts
SET is_active = FALSE,
    resolved_at = $2
WHERE id = $1 AND resolved_at IS NULL
RETURNING id, device_id, alert_type, severity, message, lat, lon, sensor_data,
          is_active, created_at, resolved_at;
"#;

pub const SELECT_ALERTS_WITH_VEHICLE: &str = r#"
SELECT a.id, a.device_id,
       COALESCE(v.vehicle_name, 'Unknown') AS vehicle_name,
       COALESCE(v.number_plate, 'Unknown') AS number_plate,
       a.alert_type, a.severity, a.message, a.lat, a.lon,
       a.is_active, a.created_at, a.sensor_data
FROM alerts a
LEFT JOIN vehicles v ON v.device_id = a.device_id
WHERE ($1 = FALSE OR a.is_active)
ORDER BY a.created_at DESC;
"#;

pub const COUNT_ALERTS: &str = r#"
SELECT COUNT(*) FROM alerts;
"#;

pub const COUNT_ACTIVE_ALERTS: &str = r#"
SELECT COUNT(*) FROM alerts WHERE is_active;
"#;

pub const COUNT_ALERTS_BY_TYPE: &str = r#"
SELECT alert_type, COUNT(*) FROM alerts GROUP BY alert_type;
"#;
