//! Error types for the smoke-test runner
//!
//! Errors raised inside a case are caught by the driver and recorded as a
//! failed result; only setup errors (config, report file) reach `main`.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the smoke-test runner
#[derive(Error, Debug)]
pub enum Error {
    // === Transport Errors ===
    #[error("{}", describe_http(.0))]
    Http(#[from] reqwest::Error),

    #[error("Invalid base URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    // === Response Errors ===
    #[error("Invalid response body from {endpoint}: {reason}")]
    InvalidBody { endpoint: String, reason: String },

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    #[error("Failed to write file '{path}': {error}")]
    FileWrite { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid body error for an endpoint
    pub fn invalid_body(endpoint: &str, reason: impl std::fmt::Display) -> Self {
        Self::InvalidBody {
            endpoint: endpoint.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an invalid URL error
    pub fn invalid_url(url: &str, reason: impl std::fmt::Display) -> Self {
        Self::InvalidUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// reqwest's `Display` stops at the outermost error; append the cause chain
/// so a refused connection and a timeout read differently.
fn describe_http(err: &reqwest::Error) -> String {
    let mut message = if err.is_timeout() {
        format!("request timed out: {}", err)
    } else if err.is_connect() {
        format!("connection failed: {}", err)
    } else {
        err.to_string()
    };

    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
