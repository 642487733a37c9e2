
#[path = "sensors/sensors.rs"]
pub mod sensors;
