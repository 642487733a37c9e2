//! Connection capability consumed by the sensor

mod client;

pub use client::ReqwestConnection;

use url::Url;

use crate::error::ConnectionError;

/// Capabilities of a client-side HTTP connection.
///
/// Setters return [`ConnectionError::AlreadyConnected`] once the request has been
/// sent. [`HttpConnection::response_code`] fails until a response is available.
#[cfg_attr(test, mockall::automock)]
pub trait HttpConnection {
    /// Target URL of the request
    fn url(&self) -> Option<Url>;

    fn request_method(&self) -> Option<String>;

    fn set_request_method(&mut self, method: &str) -> Result<(), ConnectionError>;

    fn request_header(&self, name: &str) -> Option<String>;

    fn set_request_header(&mut self, name: &str, value: &str) -> Result<(), ConnectionError>;

    fn response_code(&self) -> Result<u16, ConnectionError>;
}

/// Object handed to the sensor by the interceptor.
///
/// Only targets that return a connection from
/// [`InterceptedTarget::as_http_connection`] are instrumented.
pub trait InterceptedTarget {
    fn as_http_connection(&mut self) -> Option<&mut dyn HttpConnection> {
        None
    }
}

#[cfg(test)]
impl InterceptedTarget for MockHttpConnection {
    fn as_http_connection(&mut self) -> Option<&mut dyn HttpConnection> {
        Some(self)
    }
}
