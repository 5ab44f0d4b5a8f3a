use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Service error code reported when an object is missing or the caller lacks privileges on it.
pub const NOT_EXIST_OR_AUTHORIZED_CODE: &str = "002003";

static NOT_EXIST_OR_AUTHORIZED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)does not exist or (is )?not authorized").expect("static regex")
});

#[derive(Debug, Error)]
pub enum Error {
    /// Mutually exclusive option groups were supplied together. Detected locally.
    #[error("Conflicting options: {0}")]
    ConflictingOptions(String),

    /// Options are individually malformed (empty group, value out of range). Detected locally.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// The service could not find the object, or the caller may not see it.
    /// The service does not distinguish the two cases and neither does this error.
    #[error("Object does not exist or not authorized: {0}")]
    ObjectNotExistOrAuthorized(String),

    /// A lookup expecting exactly one record found zero or several.
    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Service error{}: {message}", .code.as_deref().map(|c| format!(" {c}")).unwrap_or_default())]
    Service {
        code: Option<String>,
        message: String,
    },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The call context was cancelled before anything was sent.
    #[error("Context cancelled before the statement was sent")]
    Cancelled,

    /// The call context was cancelled (or timed out) while the statement was in flight.
    /// The server-side effect of the statement is unknown.
    #[error("Outcome unknown for statement: {0}")]
    UnknownOutcome(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build a service error from a code and message as reported by a session.
    pub fn service(code: Option<&str>, message: impl Into<String>) -> Self {
        Error::Service {
            code: code.map(str::to_string),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_not_exist_or_authorized(&self) -> bool {
        matches!(self, Error::ObjectNotExistOrAuthorized(_))
    }

    /// True for errors raised before any statement reached the session.
    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Error::ConflictingOptions(_)
                | Error::InvalidOptions(_)
                | Error::InvalidIdentifier(_)
                | Error::Cancelled
                | Error::ConfigError(_)
        )
    }

    /// Map the service's not-exist/not-authorized report onto its dedicated variant.
    /// Every other error passes through unchanged.
    #[must_use]
    pub(crate) fn classify(self) -> Self {
        match self {
            Error::Service { code, message }
                if code.as_deref() == Some(NOT_EXIST_OR_AUTHORIZED_CODE)
                    || NOT_EXIST_OR_AUTHORIZED.is_match(&message) =>
            {
                Error::ObjectNotExistOrAuthorized(message)
            }
            other => other,
        }
    }
}
