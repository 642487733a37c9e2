use std::fmt;

use tracing::debug;

use super::ClientRequestAdapter;
use crate::connection::HttpConnection;
use crate::error::ConnectionError;
use crate::propagation::{
    Format, HTTP_CLIENT_PROPAGATION, HeaderCarrier, PropagationType, ReferenceType,
};
use crate::tags::{TagSet, keys};

/// Request adapter bound to one call on one connection.
pub struct HttpRequestAdapter<'a> {
    connection: &'a mut dyn HttpConnection,
    trace_header: &'a str,
}

impl<'a> HttpRequestAdapter<'a> {
    pub fn new(connection: &'a mut dyn HttpConnection, trace_header: &'a str) -> Self {
        Self {
            connection,
            trace_header,
        }
    }
}

impl fmt::Debug for HttpRequestAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpRequestAdapter")
            .field("trace_header", &self.trace_header)
            .finish_non_exhaustive()
    }
}

impl ClientRequestAdapter for HttpRequestAdapter<'_> {
    type Carrier<'c>
        = HeaderCarrier<'c>
    where
        Self: 'c;

    fn propagation_type(&self) -> PropagationType {
        HTTP_CLIENT_PROPAGATION.propagation_type
    }

    fn reference_type(&self) -> ReferenceType {
        HTTP_CLIENT_PROPAGATION.reference_type
    }

    fn format(&self) -> Format {
        HTTP_CLIENT_PROPAGATION.format
    }

    /// Returns `false` when the request already carries trace context or has
    /// already been sent.
    ///
    /// The sent state is detected by writing the request method back unchanged; a
    /// connection that rejects the write is past the point where headers can be
    /// added. When no method can be read, nothing is written and the connection is
    /// treated as open.
    fn start_client_span(&mut self) -> bool {
        if let Some(value) = self.connection.request_header(self.trace_header)
            && !value.is_empty()
        {
            debug!(
                header = self.trace_header,
                "Trace context already present, not starting client span"
            );
            return false;
        }

        let Some(method) = self.connection.request_method() else {
            debug!("Request method unreadable, leaving it untouched");
            return true;
        };

        match self.connection.set_request_method(&method) {
            Ok(()) => true,
            Err(ConnectionError::AlreadyConnected) => {
                debug!("Connection already established, not starting client span");
                false
            }
            Err(error) => {
                debug!(%error, "Request method rewrite failed, not starting client span");
                false
            }
        }
    }

    fn tags(&self) -> TagSet {
        let mut tags = TagSet::new();
        if let Some(url) = self.connection.url() {
            tags.insert(keys::HTTP_URL, url.to_string());
        }
        if let Some(method) = self.connection.request_method() {
            tags.insert(keys::HTTP_METHOD, method);
        }
        tags
    }

    fn carrier(&mut self) -> HeaderCarrier<'_> {
        HeaderCarrier::new(&mut *self.connection)
    }
}
