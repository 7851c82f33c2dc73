//! Search error taxonomy

use serde::{Deserialize, Serialize};

/// Everything that can stop a search from producing rows
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The search term was empty after trimming
    #[error("{0}")]
    Validation(String),

    /// Token or relay URL missing, or the configuration is otherwise unusable
    #[error("{0}")]
    Configuration(String),

    /// The request never produced an HTTP response (connect, TLS, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// The provider or relay answered, but not with a usable result
    #[error("HTTP {status}: {reason}")]
    Remote { status: u16, reason: String },
}

impl SearchError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn remote(status: u16, reason: impl Into<String>) -> Self {
        Self::Remote {
            status,
            reason: reason.into(),
        }
    }

    /// Flat classification of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Network(_) => ErrorKind::Network,
            Self::Remote { .. } => ErrorKind::Remote,
        }
    }

    /// HTTP status captured from the far side, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Network(format!("request timed out: {}", err))
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Error classification without the payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Configuration,
    Network,
    Remote,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Configuration => "configuration",
            Self::Network => "network",
            Self::Remote => "remote",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
