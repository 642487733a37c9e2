//! # HTTP Client Sensor
//!
//! Tracing sensor for outgoing HTTP client connections.
//!
//! The sensor is invoked by an external interceptor around calls on a live
//! connection object. It never owns the connection, the span or the tracer:
//!
//! * before the call, [`ClientSensor::client_request_adapter`] yields an
//!   [`HttpRequestAdapter`] that decides whether a client span should start,
//!   describes the request and exposes a write-through header carrier
//! * after the call, [`ClientSensor::client_response_adapter`] yields an
//!   [`HttpResponseAdapter`] that describes the response status and any error
//!   raised by the call
//!
//! Either operation reports [`Applicability::NotApplicable`] when the target is not
//! an HTTP connection, or (response side) when the intercepted method is not the one
//! that consumes the response body.
//!
//! ## Example
//!
//! ```rust,no_run
//! use http_client_sensor::{
//!     Applicability, CallOutcome, ClientRequestAdapter, ClientSensor, HttpClientSensor,
//!     MethodInfo, RegisteredSensorConfig, ReqwestConnection, ResponseAdapter,
//! };
//!
//! #[tokio::main]
//! async fn main() {
//!     let sensor = HttpClientSensor::default();
//!     let url = "http://localhost:8080/orders".parse().unwrap();
//!     let mut connection = ReqwestConnection::new(reqwest::Client::new(), url);
//!
//!     let connect = RegisteredSensorConfig::new("ReqwestConnection", "connect");
//!     let method = MethodInfo::new("ReqwestConnection", "connect");
//!     if let Applicability::Applicable(mut adapter) =
//!         sensor.client_request_adapter(&mut connection, &method, &connect)
//!     {
//!         if adapter.start_client_span() {
//!             adapter.carrier().put("traceparent", "00-...-01");
//!         }
//!     }
//!
//!     let outcome = match connection.connect().await {
//!         Ok(()) => CallOutcome::success(),
//!         Err(error) => CallOutcome::failure(&error),
//!     };
//!
//!     let consume = RegisteredSensorConfig::new("ReqwestConnection", "getInputStream");
//!     let exception_occurred = !outcome.succeeded();
//!     if let Applicability::Applicable(adapter) = sensor.client_response_adapter(
//!         &mut connection,
//!         &method,
//!         &outcome,
//!         exception_occurred,
//!         &consume,
//!     ) {
//!         println!("{:?}", adapter.tags());
//!     }
//! }
//! ```

pub mod adapter;
pub mod config;
pub mod connection;
pub mod error;
mod outcome;
pub mod propagation;
pub mod sensor;
pub mod span;
pub mod tags;

pub use adapter::{ClientRequestAdapter, HttpRequestAdapter, HttpResponseAdapter, ResponseAdapter};
pub use config::{MethodInfo, RegisteredSensorConfig, SensorConfig, SensorOptions};
pub use connection::{HttpConnection, InterceptedTarget, ReqwestConnection};
pub use error::{ConnectionError, SensorError};
pub use outcome::{CallOutcome, ThrownValue};
pub use propagation::{
    Format, HTTP_CLIENT_PROPAGATION, HeaderCarrier, PropagationDescriptor, PropagationType,
    ReferenceType,
};
pub use sensor::{Applicability, ClientSensor, HttpClientSensor, NotApplicableReason};
pub use tags::TagSet;
