//! Attendance computation engine.
//!
//! Everything in here is driven by an explicit [`EngineConfig`] handed in by
//! the caller; the engine keeps no ambient state and never writes to the
//! stores. Reports are recomputed from raw punch events on every query.

pub mod aggregate;
pub mod civil;
pub mod error;
pub mod monthly;
pub mod resolve;
pub mod window;
pub mod work_date;

pub use error::{CivilTimeError, EngineError};

use chrono::NaiveTime;
use chrono_tz::Tz;

/// Event types that count as a successful access grant. Denials and device
/// errors never participate in attendance computation.
pub const PASS_TYPES: [&str; 5] = [
    "FacePass",
    "CardPass",
    "FpPass",
    "ValidOpenDoor",
    "AccessGranted",
];

/// Read-only knobs for the attendance computation, resolved once at startup.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// IANA timezone of the access-control device.
    pub device_tz: Tz,
    /// Wall-clock start of the nightly shift window on the work-date.
    pub night_shift_start: NaiveTime,
    /// Wall-clock end of the nightly shift window on the day after the work-date.
    pub night_shift_end: NaiveTime,
    /// Minutes after scheduled shift start during which a check-in is still on time.
    pub late_grace_minutes: i64,
    /// Raw events before this local hour belong to the previous work-date.
    pub night_cutoff_hour: u32,
}

#[cfg(test)]
pub(crate) fn test_config() -> EngineConfig {
    EngineConfig {
        device_tz: chrono_tz::Asia::Karachi,
        night_shift_start: NaiveTime::from_hms_opt(21, 0, 0).unwrap(),
        night_shift_end: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
        late_grace_minutes: 15,
        night_cutoff_hour: 2,
    }
}
