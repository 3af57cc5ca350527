//! Shift window resolution.
//!
//! A work-date's shift runs from the configured night start on that date to
//! the configured night end on the following calendar day. Check-in and
//! check-out candidates are picked from two narrower sub-windows:
//!
//! ```text
//!   shift start ──── 23:59 ┆ dead zone ┆ 00:00 ──── shift end
//!        [ check-in side ]               [ check-out side ]
//! ```
//!
//! The minute between the inbound cutoff and the outbound floor belongs to
//! neither side. A punch in that gap can never be misread as the primary
//! check-out of the evening, nor as a check-in for the next work-date.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use super::civil::local_instant;
use super::error::CivilTimeError;
use super::EngineConfig;

/// Absolute bounds of one work-date's shift, normalized to UTC instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftWindow {
    /// Night shift start on the work-date.
    pub start: DateTime<Utc>,
    /// Night shift end on the day after the work-date.
    pub end: DateTime<Utc>,
    /// 23:59 on the work-date; later punches are not check-ins for this date.
    pub inbound_cutoff: DateTime<Utc>,
    /// Midnight after the work-date; earlier punches are not check-outs.
    pub outbound_floor: DateTime<Utc>,
}

pub fn window_for(work_date: NaiveDate, cfg: &EngineConfig) -> Result<ShiftWindow, CivilTimeError> {
    let tz = cfg.device_tz;
    let next_day = work_date + Duration::days(1);
    // 23:59 always exists; only the NaiveTime constructor bound is unwrapped
    let inbound_cutoff_time = NaiveTime::from_hms_opt(23, 59, 0).unwrap();

    Ok(ShiftWindow {
        start: local_instant(work_date, cfg.night_shift_start, tz)?.with_timezone(&Utc),
        end: local_instant(next_day, cfg.night_shift_end, tz)?.with_timezone(&Utc),
        inbound_cutoff: local_instant(work_date, inbound_cutoff_time, tz)?.with_timezone(&Utc),
        outbound_floor: local_instant(next_day, NaiveTime::MIN, tz)?.with_timezone(&Utc),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_config;
    use chrono::Timelike;

    #[test]
    fn window_spans_into_next_day() {
        let cfg = test_config();
        let date = NaiveDate::from_ymd_opt(2025, 9, 3).unwrap();
        let w = window_for(date, &cfg).unwrap();

        let start = w.start.with_timezone(&cfg.device_tz);
        assert_eq!(start.date_naive(), date);
        assert_eq!((start.hour(), start.minute()), (21, 0));

        let end = w.end.with_timezone(&cfg.device_tz);
        assert_eq!(end.date_naive(), date + Duration::days(1));
        assert_eq!((end.hour(), end.minute()), (6, 0));

        assert!(w.start < w.inbound_cutoff);
        assert!(w.outbound_floor < w.end);
    }

    #[test]
    fn dead_zone_sits_between_sub_windows() {
        let cfg = test_config();
        let date = NaiveDate::from_ymd_opt(2025, 9, 3).unwrap();
        let w = window_for(date, &cfg).unwrap();

        let cutoff = w.inbound_cutoff.with_timezone(&cfg.device_tz);
        assert_eq!(cutoff.date_naive(), date);
        assert_eq!((cutoff.hour(), cutoff.minute()), (23, 59));

        let floor = w.outbound_floor.with_timezone(&cfg.device_tz);
        assert_eq!(floor.date_naive(), date + Duration::days(1));
        assert_eq!((floor.hour(), floor.minute()), (0, 0));

        // the gap is exactly one minute, excluded from both sides
        assert_eq!(w.outbound_floor - w.inbound_cutoff, Duration::minutes(1));
    }
}
