//! Trace context propagation onto outgoing requests
//!
//! Provides the propagation descriptor of client HTTP spans and a carrier that
//! writes trace context straight into the connection's request headers.

use opentelemetry::Context;
use opentelemetry::propagation::Injector;
use serde::Serialize;
use tracing::{Span, debug};
use tracing_opentelemetry::OpenTelemetrySpanExt;

use crate::connection::HttpConnection;

/// Channel over which span context crosses the process boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum PropagationType {
    Http,
}

/// Relationship of a started span to the ambient one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceType {
    ChildOf,
    FollowsFrom,
}

/// Encoding of span context on the carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    TextMap,
    HttpHeaders,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PropagationDescriptor {
    pub propagation_type: PropagationType,
    pub reference_type: ReferenceType,
    pub format: Format,
}

/// Client HTTP calls are children of the ambient span and carry their context in
/// request headers.
pub const HTTP_CLIENT_PROPAGATION: PropagationDescriptor = PropagationDescriptor {
    propagation_type: PropagationType::Http,
    reference_type: ReferenceType::ChildOf,
    format: Format::HttpHeaders,
};

/// Write-through header sink over a borrowed connection.
///
/// Every [`HeaderCarrier::put`] is forwarded to the connection at once. Nothing is
/// buffered or deduplicated.
pub struct HeaderCarrier<'a> {
    connection: &'a mut dyn HttpConnection,
}

impl<'a> HeaderCarrier<'a> {
    pub fn new(connection: &'a mut dyn HttpConnection) -> Self {
        Self { connection }
    }

    /// Sets request header `key` to `value` on the connection.
    ///
    /// A rejected write (e.g. the request is already sent) is logged and dropped.
    pub fn put(&mut self, key: &str, value: &str) {
        if let Err(error) = self.connection.set_request_header(key, value) {
            debug!(header = key, %error, "Failed to write propagation header");
        }
    }
}

impl Injector for HeaderCarrier<'_> {
    fn set(&mut self, key: &str, value: String) {
        self.put(key, &value);
    }
}

/// Inject OpenTelemetry context through the carrier using the global propagator
pub fn inject_context(context: &Context, carrier: &mut HeaderCarrier<'_>) {
    opentelemetry::global::get_text_map_propagator(|propagator| {
        propagator.inject_context(context, carrier);
    });
}

/// Inject the context of a specific tracing span through the carrier
pub fn inject_span_context(span: &Span, carrier: &mut HeaderCarrier<'_>) {
    let context = span.context();
    inject_context(&context, carrier);
}
