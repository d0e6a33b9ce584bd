//! Error types for data access
//!
//! `RemoteError` is produced at the remote client boundary and already carries
//! its classification. `DataError` is what callers of the data manager see; it
//! is `Clone` so one failed request can be handed to every caller waiting on it.

use thiserror::Error;

/// Result type for data manager operations
pub type DataResult<T> = Result<T, DataError>;

/// SQLSTATE / response codes that never succeed on retry
const PERMANENT_CODES: &[&str] = &["42501", "PGRST116", "PGRST301", "401", "403", "404"];

/// Classification of a remote failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteErrorKind {
    /// Credentials missing, expired or rejected
    Auth,
    /// Authenticated but not allowed to touch the table or row
    Permission,
    /// Unique, foreign key, not-null or check constraint violated
    Constraint,
    /// Table or row does not exist
    NotFound,
    /// Request the client refused to send (bad identifier, empty update, ...)
    InvalidRequest,
    /// Network, pool or server-side failure that may succeed later
    Transient,
    /// The client could not classify the error; decided from message and code
    Unclassified,
}

/// Error reported by a remote client
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct RemoteError {
    pub kind: RemoteErrorKind,
    pub message: String,
    pub code: Option<String>,
}

impl RemoteError {
    pub fn new(kind: RemoteErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn transient(message: impl Into<String>) -> Self {
        Self::new(RemoteErrorKind::Transient, message)
    }

    pub fn unclassified(message: impl Into<String>) -> Self {
        Self::new(RemoteErrorKind::Unclassified, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(RemoteErrorKind::InvalidRequest, message)
    }

    /// Whether another attempt may succeed
    pub fn is_retryable(&self) -> bool {
        match self.kind {
            RemoteErrorKind::Transient => true,
            RemoteErrorKind::Unclassified => !self.looks_permanent(),
            RemoteErrorKind::Auth
            | RemoteErrorKind::Permission
            | RemoteErrorKind::Constraint
            | RemoteErrorKind::NotFound
            | RemoteErrorKind::InvalidRequest => false,
        }
    }

    /// Fallback classification for clients that only report text and a code
    fn looks_permanent(&self) -> bool {
        if let Some(code) = &self.code {
            if PERMANENT_CODES.contains(&code.as_str()) {
                return true;
            }
        }

        let message = self.message.to_lowercase();
        message.contains("permission") || message.contains("constraint") || mentions_auth(&message)
    }
}

/// Matches authentication wording as whole words, so "author" does not count
fn mentions_auth(message: &str) -> bool {
    message
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| {
            word == "auth"
                || word == "jwt"
                || word.contains("authenticat")
                || word.contains("authoriz")
                || word.contains("authoris")
        })
}

/// Errors returned by the data manager
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error("No database connection available")]
    NoConnection,

    #[error("Validierungsfehler: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("ID ist erforderlich für {operation}")]
    MissingId { operation: &'static str },

    #[error("Database error: {0}")]
    Remote(#[from] RemoteError),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),
}

impl DataError {
    /// The remote error behind this failure, if any
    pub fn remote(&self) -> Option<&RemoteError> {
        match self {
            DataError::Remote(e) => Some(e),
            _ => None,
        }
    }
}

impl From<crate::validation::ValidationError> for DataError {
    fn from(err: crate::validation::ValidationError) -> Self {
        DataError::InvalidIdentifier(err.to_string())
    }
}

impl From<cache_system::CacheError> for DataError {
    fn from(err: cache_system::CacheError) -> Self {
        DataError::Serialization(err.to_string())
    }
}
