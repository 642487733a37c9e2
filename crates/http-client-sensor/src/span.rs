//! Span creation utilities for client HTTP calls

use opentelemetry::trace::SpanKind;
use tracing::Span;

use crate::tags::{TagSet, keys};

/// Create a client span with an empty field for every tag key
#[must_use]
pub fn make_http_client_span() -> Span {
    tracing::trace_span!(
        "http.client",
        otel.kind = ?SpanKind::Client,
        { keys::HTTP_URL } = tracing::field::Empty,
        { keys::HTTP_METHOD } = tracing::field::Empty,
        { keys::HTTP_STATUS } = tracing::field::Empty,
        { keys::ERROR } = tracing::field::Empty,
        { keys::THROWABLE_TYPE } = tracing::field::Empty,
    )
}

/// Record a tag set on a span created by [`make_http_client_span`]
///
/// `http.status` is recorded as an integer when it parses as a status code.
pub fn record_tags(span: &Span, tags: &TagSet) {
    for (key, value) in tags.iter() {
        match value.parse::<u16>() {
            Ok(status) if key == keys::HTTP_STATUS => {
                span.record(key, status);
            }
            _ => {
                span.record(key, value);
            }
        }
    }
}
