//! Request and response adapters handed to the tracer by a sensor.

mod request;
mod response;

pub use request::HttpRequestAdapter;
pub use response::HttpResponseAdapter;

use opentelemetry::propagation::Injector;

use crate::propagation::{Format, PropagationType, ReferenceType};
use crate::tags::TagSet;

/// Request side of an intercepted client call.
pub trait ClientRequestAdapter {
    /// Sink the tracer writes span context into
    type Carrier<'c>: Injector
    where
        Self: 'c;

    fn propagation_type(&self) -> PropagationType;

    fn reference_type(&self) -> ReferenceType;

    fn format(&self) -> Format;

    /// Whether a new client span should be started for this call.
    fn start_client_span(&mut self) -> bool;

    fn tags(&self) -> TagSet;

    fn carrier(&mut self) -> Self::Carrier<'_>;
}

/// Response side of an intercepted call.
pub trait ResponseAdapter {
    fn tags(&self) -> TagSet;
}
