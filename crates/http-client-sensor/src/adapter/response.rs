use std::fmt;

use tracing::debug;

use super::ResponseAdapter;
use crate::connection::HttpConnection;
use crate::outcome::CallOutcome;
use crate::tags::{TagSet, keys};

/// Response adapter bound to one finished call on one connection.
pub struct HttpResponseAdapter<'a> {
    connection: &'a dyn HttpConnection,
    outcome: &'a CallOutcome,
    exception_occurred: bool,
}

impl<'a> HttpResponseAdapter<'a> {
    pub fn new(
        connection: &'a dyn HttpConnection,
        outcome: &'a CallOutcome,
        exception_occurred: bool,
    ) -> Self {
        Self {
            connection,
            outcome,
            exception_occurred,
        }
    }
}

impl fmt::Debug for HttpResponseAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponseAdapter")
            .field("outcome", self.outcome)
            .field("exception_occurred", &self.exception_occurred)
            .finish_non_exhaustive()
    }
}

impl ResponseAdapter for HttpResponseAdapter<'_> {
    /// Status and error tags are filled independently: a failed status read only
    /// drops `http.status`.
    fn tags(&self) -> TagSet {
        let mut tags = TagSet::new();

        match self.connection.response_code() {
            Ok(status) => tags.insert(keys::HTTP_STATUS, status.to_string()),
            Err(error) => {
                debug!(%error, "Response status unavailable, omitting status tag");
            }
        }

        if self.exception_occurred {
            tags.insert(keys::ERROR, "true");
            if let Some(thrown) = self.outcome.thrown_value() {
                tags.insert(keys::THROWABLE_TYPE, thrown.type_name());
            }
        }

        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::MockHttpConnection;
    use crate::error::ConnectionError;
    use crate::outcome::ThrownValue;
    use test_log::test;

    struct NullPointerException;

    #[test]
    fn test_status() {
        let mut connection = MockHttpConnection::new();
        connection.expect_response_code().returning(|| Ok(200));
        let outcome = CallOutcome::success();

        let tags = HttpResponseAdapter::new(&connection, &outcome, false).tags();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags.get(keys::HTTP_STATUS), Some("200"));
    }

    #[test]
    fn test_status_io_error() {
        let mut connection = MockHttpConnection::new();
        connection
            .expect_response_code()
            .returning(|| Err(std::io::Error::other("connection reset").into()));
        let outcome = CallOutcome::success();

        let tags = HttpResponseAdapter::new(&connection, &outcome, false).tags();
        assert!(tags.is_empty());
    }

    #[test]
    fn test_exception() {
        let mut connection = MockHttpConnection::new();
        connection.expect_response_code().returning(|| Ok(200));
        let outcome = CallOutcome::failure(&NullPointerException);

        let tags = HttpResponseAdapter::new(&connection, &outcome, true).tags();
        assert_eq!(tags.len(), 3);
        assert_eq!(tags.get(keys::HTTP_STATUS), Some("200"));
        assert_eq!(tags.get(keys::ERROR), Some("true"));
        assert_eq!(tags.get(keys::THROWABLE_TYPE), Some("NullPointerException"));
    }

    #[test]
    fn test_exception_without_status() {
        let mut connection = MockHttpConnection::new();
        connection
            .expect_response_code()
            .returning(|| Err(ConnectionError::NotConnected));
        let outcome = CallOutcome::thrown(ThrownValue::named("TimeoutError"));

        let tags = HttpResponseAdapter::new(&connection, &outcome, true).tags();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags.get(keys::ERROR), Some("true"));
        assert_eq!(tags.get(keys::THROWABLE_TYPE), Some("TimeoutError"));
        assert!(!tags.contains_key(keys::HTTP_STATUS));
    }

    #[test]
    fn test_exception_flag_without_value() {
        let mut connection = MockHttpConnection::new();
        connection.expect_response_code().returning(|| Ok(502));
        let outcome = CallOutcome::success();

        let tags = HttpResponseAdapter::new(&connection, &outcome, true).tags();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags.get(keys::HTTP_STATUS), Some("502"));
        assert_eq!(tags.get(keys::ERROR), Some("true"));
    }
}
