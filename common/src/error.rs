use thiserror::Error;

/// Configuration failures that abort a sweep before any network activity.
///
/// Per-address outcomes (refused, timed out, unreachable) are never
/// errors; they only shrink the result set.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SweepError {
    #[error("could not parse range '{range}': {reason}")]
    InvalidRange { range: String, reason: String },

    #[error("batch size must be positive or -1 for the default, got {0}")]
    InvalidBatchSize(i64),
}
