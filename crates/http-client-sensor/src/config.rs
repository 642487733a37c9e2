//! Sensor configuration.
//!
//! Two kinds of settings reach the sensor:
//!
//! * [`SensorConfig`] is supplied per call by the interceptor and names the method
//!   being intercepted on the connection
//! * [`SensorOptions`] is fixed when the sensor is built and holds the name of the
//!   response-consuming method and the trace propagation header
//!
//! Option defaults can be overridden with environment variables:
//!
//! | Variable                      | Option            | Default          |
//! |-------------------------------|-------------------|------------------|
//! | `HTTP_SENSOR_RESPONSE_METHOD` | `response_method` | `getInputStream` |
//! | `HTTP_SENSOR_TRACE_HEADER`    | `trace_header`    | `traceparent`    |
//!
//! Unset or blank variables leave the default in place.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SensorError;

pub const DEFAULT_RESPONSE_METHOD: &str = "getInputStream";
pub const DEFAULT_TRACE_HEADER: &str = "traceparent";

const RESPONSE_METHOD_ENV: &str = "HTTP_SENSOR_RESPONSE_METHOD";
const TRACE_HEADER_ENV: &str = "HTTP_SENSOR_TRACE_HEADER";

/// Read-only view of the configuration registered for an intercepted method.
pub trait SensorConfig {
    /// Name of the method currently intercepted on the target.
    fn target_method_name(&self) -> &str;
}

/// Owned [`SensorConfig`] as kept by a method registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredSensorConfig {
    pub target_class_name: String,
    pub target_method_name: String,
}

impl RegisteredSensorConfig {
    pub fn new(target_class_name: impl Into<String>, target_method_name: impl Into<String>) -> Self {
        Self {
            target_class_name: target_class_name.into(),
            target_method_name: target_method_name.into(),
        }
    }
}

impl SensorConfig for RegisteredSensorConfig {
    fn target_method_name(&self) -> &str {
        &self.target_method_name
    }
}

/// Description of the method being invoked on the target.
///
/// The HTTP sensor does not consult it; it is part of the sensor contract so that
/// other sensors can.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodInfo {
    pub class_name: String,
    pub method_name: String,
}

impl MethodInfo {
    pub fn new(class_name: impl Into<String>, method_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            method_name: method_name.into(),
        }
    }
}

impl fmt::Display for MethodInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.class_name, self.method_name)
    }
}

/// Options of an [`HttpClientSensor`](crate::HttpClientSensor).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SensorOptions {
    /// Intercepted method whose invocation means the response body is consumed.
    /// Response tags are only produced for this method.
    pub response_method: String,
    /// Request header carrying trace context. A connection that already has a
    /// value for it does not get a second client span.
    pub trace_header: String,
}

impl Default for SensorOptions {
    fn default() -> Self {
        Self {
            response_method: env_or(RESPONSE_METHOD_ENV, DEFAULT_RESPONSE_METHOD),
            trace_header: env_or(TRACE_HEADER_ENV, DEFAULT_TRACE_HEADER),
        }
    }
}

/// Blank values fall back to `default` so that the defaults always validate
fn env_or(var: &str, default: &str) -> String {
    std::env::var(var)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl SensorOptions {
    /// Loads options from a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, SensorError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), SensorError> {
        if self.response_method.trim().is_empty() {
            return Err(SensorError::Config(
                "response method must not be empty".to_string(),
            ));
        }
        if self.trace_header.trim().is_empty() {
            return Err(SensorError::Config(
                "trace header must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_defaults() {
        temp_env::with_vars_unset([RESPONSE_METHOD_ENV, TRACE_HEADER_ENV], || {
            let options = SensorOptions::default();
            assert_eq!(options.response_method, DEFAULT_RESPONSE_METHOD);
            assert_eq!(options.trace_header, DEFAULT_TRACE_HEADER);
        });
    }

    #[test]
    #[serial]
    fn test_defaults_from_env() {
        temp_env::with_vars(
            [
                (RESPONSE_METHOD_ENV, Some("body")),
                (TRACE_HEADER_ENV, Some("x-trace-id")),
            ],
            || {
                let options = SensorOptions::default();
                assert_eq!(options.response_method, "body");
                assert_eq!(options.trace_header, "x-trace-id");
            },
        );
    }

    #[test]
    #[serial]
    fn test_defaults_ignore_blank_env() {
        temp_env::with_vars(
            [(RESPONSE_METHOD_ENV, Some("")), (TRACE_HEADER_ENV, Some("  "))],
            || {
                let options = SensorOptions::default();
                assert_eq!(options.response_method, DEFAULT_RESPONSE_METHOD);
                assert_eq!(options.trace_header, DEFAULT_TRACE_HEADER);
                assert!(options.validate().is_ok());

                let options = SensorOptions::from_json("{}").unwrap();
                assert_eq!(options.trace_header, DEFAULT_TRACE_HEADER);
            },
        );
    }

    #[test]
    #[serial]
    fn test_from_json_partial() {
        temp_env::with_vars_unset([RESPONSE_METHOD_ENV, TRACE_HEADER_ENV], || {
            let options = SensorOptions::from_json(r#"{"traceHeader": "x-b3-traceid"}"#).unwrap();
            assert_eq!(options.response_method, DEFAULT_RESPONSE_METHOD);
            assert_eq!(options.trace_header, "x-b3-traceid");
        });
    }

    #[test]
    fn test_from_json_rejects_empty_header() {
        let result = SensorOptions::from_json(r#"{"traceHeader": " "}"#);
        assert!(matches!(result, Err(SensorError::Config(_))));
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        let result = SensorOptions::from_json("{responseMethod:");
        assert!(matches!(result, Err(SensorError::Parse(_))));
    }

    #[test]
    fn test_registered_config() {
        let config: RegisteredSensorConfig = serde_json::from_str(
            r#"{"targetClassName": "ReqwestConnection", "targetMethodName": "connect"}"#,
        )
        .unwrap();
        assert_eq!(config.target_method_name(), "connect");
        assert_eq!(
            MethodInfo::new("ReqwestConnection", "connect").to_string(),
            "ReqwestConnection#connect"
        );
    }
}
