pub mod alert;
pub mod message;
pub mod telemetry;
pub mod vehicle;
