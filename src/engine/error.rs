use chrono::NaiveDateTime;
use thiserror::Error;

/// Failure to interpret a stored clock-time/period pair as a civil time.
///
/// These never escape to report callers: a shift record that cannot be parsed
/// degrades to the `Invalid Shift Data` verdict instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CivilTimeError {
    #[error("invalid clock time or period: {0:?}")]
    InvalidTimeFormat(String),
    #[error("local time {0} does not exist in the device timezone")]
    NonexistentLocalTime(NaiveDateTime),
}

/// Failures that abort a whole report request.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("store query failed: {0}")]
    Store(#[from] sqlx::Error),
    #[error("shift window could not be resolved: {0}")]
    Window(#[from] CivilTimeError),
}
