//! [`HttpConnection`] over a staged `reqwest` request.

use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{Client, Method, Request, Response};
use tracing::{debug, instrument};
use url::Url;

use super::{HttpConnection, InterceptedTarget};
use crate::error::ConnectionError;

/// Connection that stages a request until [`ReqwestConnection::connect`] sends it.
///
/// Method and headers can be changed while staged. After `connect` they are frozen
/// and the received status is readable through [`HttpConnection::response_code`].
#[derive(Debug)]
pub struct ReqwestConnection {
    client: Client,
    request: Request,
    response: Option<Response>,
}

impl ReqwestConnection {
    pub fn new(client: Client, url: Url) -> Self {
        Self {
            client,
            request: Request::new(Method::GET, url),
            response: None,
        }
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.response.is_some()
    }

    /// Sends the staged request. Calling it again once connected does nothing.
    #[instrument(skip(self), fields(url = %self.request.url()))]
    pub async fn connect(&mut self) -> Result<(), ConnectionError> {
        if self.is_connected() {
            return Ok(());
        }

        let mut request = Request::new(self.request.method().clone(), self.request.url().clone());
        *request.headers_mut() = self.request.headers().clone();

        let response = self.client.execute(request).await?;
        debug!(status = response.status().as_u16(), "Received response");
        self.response = Some(response);
        Ok(())
    }

    /// Hands over the response for body consumption.
    pub fn into_response(self) -> Result<Response, ConnectionError> {
        self.response.ok_or(ConnectionError::NotConnected)
    }
}

impl HttpConnection for ReqwestConnection {
    fn url(&self) -> Option<Url> {
        Some(self.request.url().clone())
    }

    fn request_method(&self) -> Option<String> {
        Some(self.request.method().as_str().to_string())
    }

    fn set_request_method(&mut self, method: &str) -> Result<(), ConnectionError> {
        if self.is_connected() {
            return Err(ConnectionError::AlreadyConnected);
        }
        let method = Method::from_bytes(method.as_bytes())
            .map_err(|_| ConnectionError::InvalidMethod(method.to_string()))?;
        *self.request.method_mut() = method;
        Ok(())
    }

    fn request_header(&self, name: &str) -> Option<String> {
        self.request
            .headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(String::from)
    }

    fn set_request_header(&mut self, name: &str, value: &str) -> Result<(), ConnectionError> {
        if self.is_connected() {
            return Err(ConnectionError::AlreadyConnected);
        }
        let header_name = HeaderName::try_from(name)
            .map_err(|e| ConnectionError::InvalidHeader(format!("{}: {}", name, e)))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|e| ConnectionError::InvalidHeader(format!("{}: {}", name, e)))?;
        self.request.headers_mut().insert(header_name, header_value);
        Ok(())
    }

    fn response_code(&self) -> Result<u16, ConnectionError> {
        self.response
            .as_ref()
            .map(|response| response.status().as_u16())
            .ok_or(ConnectionError::NotConnected)
    }
}

impl InterceptedTarget for ReqwestConnection {
    fn as_http_connection(&mut self) -> Option<&mut dyn HttpConnection> {
        Some(self)
    }
}
