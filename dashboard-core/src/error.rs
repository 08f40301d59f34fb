use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::query::Query;

/// Why an outbound fetch did not produce a usable payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Request could not be sent, the connection dropped, or it timed out.
    #[error("network failure: {0}")]
    Network(String),

    #[error("request failed with status {status}: {body}")]
    BadResponse { status: u16, body: String },

    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Network(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("query must not be empty")]
    Empty,
}

/// One entry of the session's append-only error log.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorRecord {
    pub query: Query,
    pub error: FetchError,
    pub at: DateTime<Utc>,
}

impl ErrorRecord {
    pub fn new(query: Query, error: FetchError) -> Self {
        Self { query, error, at: Utc::now() }
    }
}

impl std::fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] '{}': {}", self.at.format("%H:%M:%S"), self.query.value(), self.error)
    }
}
