use std::fmt;

use async_trait::async_trait;

use crate::EntryType;

/// Errors that can occur talking to the Well service.
/// Variants carry the raw status and body so failures can be diagnosed.
#[derive(Debug)]
pub enum ApiError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The request could not be built, usually a malformed key or base URL.
    Request(String),
    /// The server rejected the credential (401 or 403).
    Auth { status: u16, body: String },
    /// Any other non-success response.
    Remote { status: u16, body: String },
}

impl ApiError {
    /// Sorts a non-success status into `Auth` or `Remote`.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => ApiError::Auth { status, body },
            _ => ApiError::Remote { status, body },
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Request(msg) => write!(
                f,
                "invalid request, check WELL_API_KEY and WELL_BASE_URL: {msg}"
            ),
            ApiError::Auth { status, body } => {
                write!(f, "credential rejected (HTTP {status}): {body}")
            }
            ApiError::Remote { status, body } => {
                write!(f, "server error (HTTP {status}): {body}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// A successful write, as acknowledged by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub status: u16,
    /// Whatever the server said back, possibly empty.
    pub body: String,
}

/// The three remote operations, one resource per `EntryType`.
///
/// Each call completes before returning; nothing is retried.
#[async_trait]
pub trait EntryApi: Send + Sync {
    /// Full stored text for `entry_type`. Empty if nothing was ever written.
    async fn fetch_all(&self, entry_type: EntryType) -> Result<String, ApiError>;

    /// Adds `text` as one new entry, leaving existing entries alone.
    async fn append(&self, entry_type: EntryType, text: &str) -> Result<Receipt, ApiError>;

    /// Overwrites everything stored for `entry_type` with `text`.
    async fn replace_all(&self, entry_type: EntryType, text: &str) -> Result<Receipt, ApiError>;
}
