//! Civil-time parsing for shift records.
//!
//! Shift rows store wall-clock strings plus an AM/PM period, but the two are
//! not always consistent: rows written by the device UI carry a 24-hour string
//! (e.g. "21:00") next to a meaningless period value, while hand-entered rows
//! use genuine 12-hour times. The hour alone decides which reading applies.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;

use super::error::CivilTimeError;

/// AM/PM marker attached to a stored clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockPeriod {
    Am,
    Pm,
}

impl ClockPeriod {
    pub fn parse(s: &str) -> Result<Self, CivilTimeError> {
        match s {
            "AM" => Ok(ClockPeriod::Am),
            "PM" => Ok(ClockPeriod::Pm),
            other => Err(CivilTimeError::InvalidTimeFormat(other.to_string())),
        }
    }
}

/// How a stored `HH:MM` string must be interpreted, keyed on its hour value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStrategy {
    /// Hour 13..=23: already a 24-hour time, the stored period is ignored.
    Raw24Hour,
    /// Hour 0: the device wrote "00:MM" for what a 12-hour clock calls 12:MM AM.
    Midnight,
    /// Hour 1..=12: a genuine 12-hour time, combined with the period.
    TwelveHour,
}

pub fn strategy_for(hour: u32) -> ParseStrategy {
    if hour > 12 {
        ParseStrategy::Raw24Hour
    } else if hour == 0 {
        ParseStrategy::Midnight
    } else {
        ParseStrategy::TwelveHour
    }
}

/// Parse `H:MM` / `HH:MM` into (hour, minute), hours 0-23.
pub fn parse_clock(time_str: &str) -> Result<(u32, u32), CivilTimeError> {
    let err = || CivilTimeError::InvalidTimeFormat(time_str.to_string());
    let (h, m) = time_str.split_once(':').ok_or_else(err)?;
    if h.is_empty() || h.len() > 2 || m.len() != 2 {
        return Err(err());
    }
    if !h.bytes().all(|b| b.is_ascii_digit()) || !m.bytes().all(|b| b.is_ascii_digit()) {
        return Err(err());
    }
    let hour: u32 = h.parse().map_err(|_| err())?;
    let minute: u32 = m.parse().map_err(|_| err())?;
    if hour > 23 || minute > 59 {
        return Err(err());
    }
    Ok((hour, minute))
}

/// Resolve a (date, clock-time, period) triple to an absolute instant in `tz`.
///
/// The period is validated even when the strategy ignores it, so a shift row
/// with a corrupt period field is always rejected as a whole.
pub fn parse_civil_time(
    date: NaiveDate,
    time_str: &str,
    period: &str,
    tz: Tz,
) -> Result<DateTime<Tz>, CivilTimeError> {
    let (hour, minute) = parse_clock(time_str)?;
    let period = ClockPeriod::parse(period)?;

    let hour24 = match strategy_for(hour) {
        ParseStrategy::Raw24Hour => hour,
        ParseStrategy::Midnight => 0,
        ParseStrategy::TwelveHour => match (hour, period) {
            (12, ClockPeriod::Am) => 0,
            (12, ClockPeriod::Pm) => 12,
            (h, ClockPeriod::Am) => h,
            (h, ClockPeriod::Pm) => h + 12,
        },
    };

    // parse_clock bounds hour/minute, so from_hms_opt cannot fail here
    let time = NaiveTime::from_hms_opt(hour24, minute, 0)
        .ok_or_else(|| CivilTimeError::InvalidTimeFormat(time_str.to_string()))?;
    local_instant(date, time, tz)
}

/// Anchor a civil date+time in `tz`, taking the earliest instant when a DST
/// fold makes the wall time ambiguous.
pub fn local_instant(date: NaiveDate, time: NaiveTime, tz: Tz) -> Result<DateTime<Tz>, CivilTimeError> {
    let naive = date.and_time(time);
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => Err(CivilTimeError::NonexistentLocalTime(naive)),
    }
}
