//! Shared error type across statsink crates.

use thiserror::Error;

/// Stable error codes (used in HTTP bodies and logs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Configuration value missing or out of range.
    BadConfig,
    /// Sink transport could not be reached.
    SinkUnavailable,
    /// Stats snapshot retention is disabled.
    NotTracked,
    /// Caller-supplied deadline elapsed.
    TimedOut,
    /// Aggregator no longer accepts requests.
    Closed,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::BadConfig => "BAD_CONFIG",
            ErrorCode::SinkUnavailable => "SINK_UNAVAILABLE",
            ErrorCode::NotTracked => "NOT_TRACKED",
            ErrorCode::TimedOut => "TIMED_OUT",
            ErrorCode::Closed => "CLOSED",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, StatsError>;

/// Unified error type used by core and agent.
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("address config value is empty")]
    EmptyAddress,
    #[error("sink connect failed: {0}")]
    Connect(#[source] std::io::Error),
    #[error("sink is absent")]
    SinkMissing,
    #[error("internal stats not being tracked")]
    NotTracked,
    #[error("timed out")]
    TimedOut,
    #[error("stats closed")]
    Closed,
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl StatsError {
    /// Map an error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            StatsError::EmptyAddress | StatsError::BadConfig(_) | StatsError::SinkMissing => {
                ErrorCode::BadConfig
            }
            StatsError::Connect(_) => ErrorCode::SinkUnavailable,
            StatsError::NotTracked => ErrorCode::NotTracked,
            StatsError::TimedOut => ErrorCode::TimedOut,
            StatsError::Closed => ErrorCode::Closed,
            StatsError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            StatsError::Internal(_) => ErrorCode::Internal,
        }
    }
}
