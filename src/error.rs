use thiserror::Error;

use crate::registry::ActivityType;

/// Errors raised while configuring the tracker or processing one page event.
///
/// A handler that returns an error leaves the tracker state exactly as it
/// was before the event arrived.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// A structural element the extractor relies on is missing.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("unknown {activity} location {id}")]
    UnknownLocation { activity: ActivityType, id: u32 },

    #[error("invalid url pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("url pattern {pattern:?} overlaps with {existing:?}")]
    OverlappingPattern { pattern: String, existing: String },

    #[error("click namespace {0:?} is already registered")]
    DuplicateClickNamespace(String),

    #[error("catalog error: {0}")]
    Catalog(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl TrackerError {
    pub fn malformed(message: impl Into<String>) -> Self {
        TrackerError::MalformedResponse(message.into())
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
