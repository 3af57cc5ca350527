//! Per-day attendance resolution and the date-range driver.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use futures::future::try_join_all;
use sqlx::MySqlPool;
use tracing::debug;

use super::aggregate::{aggregate_by_employee, DayPunches};
use super::civil::parse_civil_time;
use super::error::EngineError;
use super::window::window_for;
use super::{EngineConfig, PASS_TYPES};
use crate::model::attendance::{AttendanceRecord, LateStatus};
use crate::model::employee::EmployeeWithShift;
use crate::model::shift::Shift;
use crate::store;

/// Join aggregated punches with the registry and compute verdicts for one
/// work-date. Pure; the caller supplies everything already fetched.
pub fn resolve_day(
    work_date: NaiveDate,
    punches: &BTreeMap<String, DayPunches>,
    registry: &HashMap<String, EmployeeWithShift>,
    cfg: &EngineConfig,
) -> Vec<AttendanceRecord> {
    punches
        .iter()
        .map(|(employee_no, p)| {
            let registered = registry.get(employee_no);
            // unregistered identifiers fall back to the device-reported name
            // and carry no shift
            let person_name = registered
                .map(|e| e.name.clone())
                .or_else(|| p.person_name.clone());
            let shift = registered.and_then(|e| e.shift.as_ref());

            let mut late_status = LateStatus::NoShiftAssigned;
            if let (Some(check_in), Some(shift)) = (p.check_in, shift) {
                late_status = classify_check_in(work_date, check_in, shift, cfg);
            }

            let total_minutes = match (p.check_in, p.check_out) {
                (Some(check_in), Some(check_out)) => Some(whole_minutes(check_in, check_out)),
                _ => None,
            };

            AttendanceRecord {
                work_date,
                employee_no: employee_no.clone(),
                person_name,
                card_no: p.card_no.clone(),
                check_in: p.check_in.map(|t| local_clock(t, cfg)),
                check_out: p.check_out.map(|t| local_clock(t, cfg)),
                total_minutes,
                late_status,
            }
        })
        .collect()
}

/// Late/on-time verdict for a single check-in against a shift's scheduled
/// start. A shift record that fails to parse degrades to `InvalidShiftData`
/// rather than failing the report.
fn classify_check_in(
    work_date: NaiveDate,
    check_in: DateTime<Utc>,
    shift: &Shift,
    cfg: &EngineConfig,
) -> LateStatus {
    match parse_civil_time(work_date, &shift.start_time, &shift.start_period, cfg.device_tz) {
        Ok(shift_start) => {
            let grace_deadline = shift_start + Duration::minutes(cfg.late_grace_minutes);
            // exactly at the deadline is still on time
            if check_in > grace_deadline {
                LateStatus::Late
            } else {
                LateStatus::OnTime
            }
        }
        Err(err) => {
            debug!(shift_id = shift.id, error = %err, "shift record failed to parse");
            LateStatus::InvalidShiftData
        }
    }
}

fn whole_minutes(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> i64 {
    ((check_out - check_in).num_seconds() as f64 / 60.0).round() as i64
}

fn local_clock(t: DateTime<Utc>, cfg: &EngineConfig) -> String {
    t.with_timezone(&cfg.device_tz).format("%H:%M").to_string()
}

/// Compute the attendance records of one work-date from the stores.
pub async fn compute_attendance(
    pool: &MySqlPool,
    cfg: &EngineConfig,
    work_date: NaiveDate,
) -> Result<Vec<AttendanceRecord>, EngineError> {
    let window = window_for(work_date, cfg)?;
    let events = store::events::find_in_range(pool, window.start, window.end, &PASS_TYPES).await?;
    let punches = aggregate_by_employee(&events, &window);

    let employee_nos: Vec<String> = punches.keys().cloned().collect();
    let registry = store::employees::find_by_nos(pool, &employee_nos).await?;

    Ok(resolve_day(work_date, &punches, &registry, cfg))
}

/// Every calendar date in `[start, end]` inclusive, ascending; empty when the
/// range is inverted.
pub fn dates_in_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| *d <= end).collect()
}

/// Compute attendance for every date in `[start, end]` inclusive. Days are
/// independent and evaluated concurrently; the result keeps date order.
pub async fn compute_attendance_range(
    pool: &MySqlPool,
    cfg: &EngineConfig,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<AttendanceRecord>, EngineError> {
    let dates = dates_in_range(start, end);
    let per_day = try_join_all(dates.into_iter().map(|d| compute_attendance(pool, cfg, d))).await?;
    Ok(per_day.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_config;
    use chrono::TimeZone;

    fn karachi(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        chrono_tz::Asia::Karachi
            .with_ymd_and_hms(y, mo, d, h, mi, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn work_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 3).unwrap()
    }

    fn night_shift(start_time: &str, start_period: &str) -> Shift {
        Shift {
            id: 1,
            start_time: start_time.to_string(),
            start_period: start_period.to_string(),
            end_time: "06:00".to_string(),
            end_period: "AM".to_string(),
        }
    }

    fn registry_with(shift: Option<Shift>) -> HashMap<String, EmployeeWithShift> {
        HashMap::from([(
            "101".to_string(),
            EmployeeWithShift {
                employee_no: "101".to_string(),
                name: "John Doe".to_string(),
                shift,
            },
        )])
    }

    fn punches_at(check_in: Option<DateTime<Utc>>, check_out: Option<DateTime<Utc>>) -> BTreeMap<String, DayPunches> {
        BTreeMap::from([(
            "101".to_string(),
            DayPunches {
                check_in,
                check_out,
                person_name: Some("JOHN D".to_string()),
                card_no: Some("0004123".to_string()),
            },
        )])
    }

    #[test]
    fn grace_period_boundaries() {
        let cfg = test_config();
        let shift = night_shift("21:00", "PM");
        let cases = [
            (karachi(2025, 9, 3, 21, 13), LateStatus::OnTime),
            (karachi(2025, 9, 3, 21, 15), LateStatus::OnTime),
            (karachi(2025, 9, 3, 21, 16), LateStatus::Late),
            (karachi(2025, 9, 3, 21, 17), LateStatus::Late),
            (karachi(2025, 9, 3, 21, 19), LateStatus::Late),
        ];
        for (check_in, expected) in cases {
            assert_eq!(
                classify_check_in(work_date(), check_in, &shift, &cfg),
                expected,
                "check-in at {check_in}"
            );
        }
    }

    #[test]
    fn twenty_four_hour_shift_start_ignores_stored_period() {
        let cfg = test_config();
        // "21:00 AM" is the device's broken encoding of 9 PM
        let shift = night_shift("21:00", "AM");
        assert_eq!(
            classify_check_in(work_date(), karachi(2025, 9, 3, 21, 10), &shift, &cfg),
            LateStatus::OnTime
        );
    }

    #[test]
    fn invalid_shift_degrades_instead_of_failing() {
        let cfg = test_config();
        for shift in [night_shift("25:00", "PM"), night_shift("21:00", "XX")] {
            let records = resolve_day(
                work_date(),
                &punches_at(Some(karachi(2025, 9, 3, 21, 5)), None),
                &registry_with(Some(shift)),
                &cfg,
            );
            assert_eq!(records[0].late_status, LateStatus::InvalidShiftData);
        }
    }

    #[test]
    fn no_shift_on_file_wins_regardless_of_check_in() {
        let cfg = test_config();
        let records = resolve_day(
            work_date(),
            &punches_at(Some(karachi(2025, 9, 3, 20, 0)), None),
            &registry_with(None),
            &cfg,
        );
        assert_eq!(records[0].late_status, LateStatus::NoShiftAssigned);
        // registered name wins over the device-reported one
        assert_eq!(records[0].person_name.as_deref(), Some("John Doe"));
    }

    #[test]
    fn missing_check_in_never_runs_shift_logic() {
        let cfg = test_config();
        let records = resolve_day(
            work_date(),
            &punches_at(None, Some(karachi(2025, 9, 4, 6, 0))),
            &registry_with(Some(night_shift("21:00", "PM"))),
            &cfg,
        );
        assert_eq!(records[0].late_status, LateStatus::NoShiftAssigned);
        assert_eq!(records[0].check_in, None);
        assert_eq!(records[0].total_minutes, None);
    }

    #[test]
    fn unregistered_employee_uses_device_name() {
        let cfg = test_config();
        let records = resolve_day(
            work_date(),
            &punches_at(Some(karachi(2025, 9, 3, 21, 13)), None),
            &HashMap::new(),
            &cfg,
        );
        assert_eq!(records[0].person_name.as_deref(), Some("JOHN D"));
        assert_eq!(records[0].late_status, LateStatus::NoShiftAssigned);
    }

    #[test]
    fn worked_minutes_need_both_sides() {
        let cfg = test_config();
        let records = resolve_day(
            work_date(),
            &punches_at(
                Some(karachi(2025, 9, 3, 21, 0)),
                Some(karachi(2025, 9, 4, 6, 2)),
            ),
            &registry_with(Some(night_shift("21:00", "PM"))),
            &cfg,
        );
        assert_eq!(records[0].total_minutes, Some(542));
        assert_eq!(records[0].check_in.as_deref(), Some("21:00"));
        assert_eq!(records[0].check_out.as_deref(), Some("06:02"));

        let one_sided = resolve_day(
            work_date(),
            &punches_at(Some(karachi(2025, 9, 3, 21, 0)), None),
            &registry_with(Some(night_shift("21:00", "PM"))),
            &cfg,
        );
        assert_eq!(one_sided[0].total_minutes, None);
    }

    #[test]
    fn range_dates_are_inclusive_and_ordered() {
        let start = NaiveDate::from_ymd_opt(2025, 9, 29).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 10, 2).unwrap();
        assert_eq!(
            dates_in_range(start, end),
            vec![
                NaiveDate::from_ymd_opt(2025, 9, 29).unwrap(),
                NaiveDate::from_ymd_opt(2025, 9, 30).unwrap(),
                NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 10, 2).unwrap(),
            ]
        );
    }

    #[test]
    fn single_day_range_is_that_day() {
        let day = NaiveDate::from_ymd_opt(2025, 9, 3).unwrap();
        assert_eq!(dates_in_range(day, day), vec![day]);
    }

    #[test]
    fn inverted_range_is_empty() {
        let start = NaiveDate::from_ymd_opt(2025, 9, 4).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 9, 3).unwrap();
        assert!(dates_in_range(start, end).is_empty());
    }

    #[test]
    fn rows_come_out_keyed_and_dated() {
        let cfg = test_config();
        let records = resolve_day(
            work_date(),
            &punches_at(Some(karachi(2025, 9, 3, 21, 13)), None),
            &registry_with(Some(night_shift("21:00", "PM"))),
            &cfg,
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].work_date, work_date());
        assert_eq!(records[0].employee_no, "101");
        assert_eq!(records[0].card_no.as_deref(), Some("0004123"));
    }
}
