use thiserror::Error;

/// Failures reported by an [`HttpConnection`](crate::HttpConnection).
///
/// The adapters never surface these; they map them to a `false` span decision or
/// to a missing tag.
#[derive(Error, Debug)]
pub enum ConnectionError {
    #[error("Connection already established")]
    AlreadyConnected,
    #[error("Connection not established")]
    NotConnected,
    #[error("Invalid request method: {0}")]
    InvalidMethod(String),
    #[error("Invalid request header: {0}")]
    InvalidHeader(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Error, Debug)]
pub enum SensorError {
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
