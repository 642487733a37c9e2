//! Sensors available to an interceptor.

pub use http_client_sensor::{
    CallOutcome, ClientSensor, HttpClientSensor, MethodInfo, RegisteredSensorConfig,
    SensorOptions,
};

/// Builds the HTTP client sensor from a JSON options document.
pub fn http_client_sensor_from_json(
    json: &str,
) -> Result<HttpClientSensor, http_client_sensor::SensorError> {
    SensorOptions::from_json(json).map(HttpClientSensor::new)
}
