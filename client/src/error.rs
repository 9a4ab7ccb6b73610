//! Error types of the API client.

use thiserror::Error;

/// Failure of a single API request.
///
/// None of these are retried; the caller decides what to show.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure: DNS, connect, TLS, reading the body.
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The server answered, but not with a usable success response.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Single-record lookup with no match.
    #[error("{resource} not found: {id}")]
    NotFound {
        /// Kind of record that was looked up.
        resource: &'static str,
        /// Id that was requested.
        id: String,
    },
}

/// Ways a response can violate the envelope contract.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Non-2xx HTTP status.
    #[error("HTTP error! status: {0}")]
    HttpStatus(u16),

    /// 2xx response whose envelope `code` is not 0.
    #[error("{message} (code {code})")]
    Envelope {
        /// Envelope code.
        code: i64,
        /// Server message, or a per-endpoint fallback when it was blank.
        message: String,
    },

    /// Body is not the expected JSON.
    #[error("Parse error: {0}")]
    Body(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status carried by the error, if the server answered with one.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            ApiError::Protocol(ProtocolError::HttpStatus(status)) => Some(*status),
            _ => None,
        }
    }

    /// True for [`ApiError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}

/// Invalid client configuration, reported once at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {name}: {value}")]
    InvalidUrl {
        name: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid proxy url: {value}")]
    InvalidProxy {
        value: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build http client")]
    HttpClient(#[source] reqwest::Error),
}
