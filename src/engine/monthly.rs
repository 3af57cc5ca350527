//! Month composition: pivots a month of per-day attendance records into a
//! date×employee grid plus per-employee summary counters for the dashboard.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use sqlx::MySqlPool;
use tracing::debug;
use utoipa::ToSchema;

use super::error::EngineError;
use super::resolve::compute_attendance_range;
use super::EngineConfig;
use crate::model::attendance::{AttendanceRecord, LateStatus};

/// One cell of the date×employee grid. Degraded verdicts appear here even
/// though their employees are excluded from the summaries.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
pub struct DayCell {
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub total_minutes: Option<i64>,
    pub late_status: LateStatus,
}

/// One day of an employee's monthly breakdown.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
pub struct DailyTime {
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub status: LateStatus,
    pub total_minutes: Option<i64>,
    /// 0 = Sunday .. 6 = Saturday.
    pub day_of_week: u32,
}

/// Monthly counters for one employee with at least one late/on-time day.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
pub struct EmployeeMonthlySummary {
    #[schema(example = "101")]
    pub employee_no: String,
    #[schema(example = "John Doe")]
    pub person_name: String,
    pub late_count: u32,
    pub early_count: u32,
    /// late_count + early_count.
    pub total_days: u32,
    pub saturday_count: u32,
    pub sunday_count: u32,
    /// Percentage of counted days that were late, one decimal place.
    #[schema(example = 33.3)]
    pub late_percentage: f64,
    pub daily_times: Vec<DailyTime>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MonthlyAttendance {
    /// Every calendar date of the month, including days with no data.
    #[schema(value_type = Vec<String>)]
    pub dates: Vec<NaiveDate>,
    /// Sorted numerically ascending by employee identifier.
    pub employees: Vec<EmployeeMonthlySummary>,
    /// `attendance[date][employee_no]`, dense lookup for the dashboard.
    #[schema(value_type = Object)]
    pub attendance: BTreeMap<NaiveDate, BTreeMap<String, DayCell>>,
}

/// Every calendar date of the month containing `first`.
pub fn month_dates(first: NaiveDate) -> Vec<NaiveDate> {
    let month = first.month();
    first
        .iter_days()
        .take_while(|d| d.month() == month)
        .collect()
}

/// Fold a month's flat record sequence into the grid and summaries. Pure.
pub fn compose_month(dates: Vec<NaiveDate>, flat: &[AttendanceRecord]) -> MonthlyAttendance {
    let mut summaries: BTreeMap<String, EmployeeMonthlySummary> = BTreeMap::new();
    let mut attendance: BTreeMap<NaiveDate, BTreeMap<String, DayCell>> = BTreeMap::new();

    for record in flat {
        attendance.entry(record.work_date).or_default().insert(
            record.employee_no.clone(),
            DayCell {
                check_in: record.check_in.clone(),
                check_out: record.check_out.clone(),
                total_minutes: record.total_minutes,
                late_status: record.late_status,
            },
        );

        // only late/on-time verdicts feed the summaries
        let is_late = match record.late_status {
            LateStatus::Late => true,
            LateStatus::OnTime => false,
            LateStatus::InvalidShiftData | LateStatus::NoShiftAssigned => continue,
        };

        let summary = summaries
            .entry(record.employee_no.clone())
            .or_insert_with(|| EmployeeMonthlySummary {
                employee_no: record.employee_no.clone(),
                person_name: record
                    .person_name
                    .clone()
                    .unwrap_or_else(|| "Unknown".to_string()),
                late_count: 0,
                early_count: 0,
                total_days: 0,
                saturday_count: 0,
                sunday_count: 0,
                late_percentage: 0.0,
                daily_times: Vec::new(),
            });

        summary.total_days += 1;
        let day_of_week = record.work_date.weekday().num_days_from_sunday();
        match day_of_week {
            6 => summary.saturday_count += 1,
            0 => summary.sunday_count += 1,
            _ => {}
        }
        if is_late {
            summary.late_count += 1;
        } else {
            summary.early_count += 1;
        }
        summary.daily_times.push(DailyTime {
            date: record.work_date,
            check_in: record.check_in.clone(),
            check_out: record.check_out.clone(),
            status: record.late_status,
            total_minutes: record.total_minutes,
            day_of_week,
        });
    }

    let mut employees: Vec<EmployeeMonthlySummary> = summaries.into_values().collect();
    employees.sort_by_key(|s| s.employee_no.parse::<u64>().unwrap_or(u64::MAX));
    for summary in &mut employees {
        summary.daily_times.sort_by_key(|d| d.date);
        summary.late_percentage = round1(summary.late_count, summary.total_days);
        debug!(
            employee_no = %summary.employee_no,
            person_name = %summary.person_name,
            late = summary.late_count,
            on_time = summary.early_count,
            saturdays = summary.saturday_count,
            sundays = summary.sunday_count,
            total = summary.total_days,
            late_rate = summary.late_percentage,
            "monthly attendance summary"
        );
    }

    MonthlyAttendance {
        dates,
        employees,
        attendance,
    }
}

fn round1(late: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (f64::from(late) / f64::from(total) * 1000.0).round() / 10.0
}

/// Compute the month report for the month containing `day`.
pub async fn compute_monthly(
    pool: &MySqlPool,
    cfg: &EngineConfig,
    day: NaiveDate,
) -> Result<MonthlyAttendance, EngineError> {
    // day 1 of any valid date's month exists
    let first = day.with_day(1).unwrap_or(day);
    let dates = month_dates(first);
    let last = dates.last().copied().unwrap_or(first);

    let flat = compute_attendance_range(pool, cfg, first, last).await?;
    Ok(compose_month(dates, &flat))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        date: (i32, u32, u32),
        employee_no: &str,
        status: LateStatus,
    ) -> AttendanceRecord {
        AttendanceRecord {
            work_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            employee_no: employee_no.to_string(),
            person_name: Some(format!("Employee {employee_no}")),
            card_no: None,
            check_in: Some("21:05".to_string()),
            check_out: Some("06:00".to_string()),
            total_minutes: Some(535),
            late_status: status,
        }
    }

    #[test]
    fn month_dates_cover_whole_month() {
        let dates = month_dates(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
        assert_eq!(dates.len(), 30);
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
        assert_eq!(dates[29], NaiveDate::from_ymd_opt(2025, 9, 30).unwrap());

        let feb = month_dates(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(feb.len(), 29);
    }

    #[test]
    fn summary_counts_match_grid_verdicts() {
        let flat = vec![
            record((2025, 9, 1), "101", LateStatus::OnTime),
            record((2025, 9, 2), "101", LateStatus::Late),
            record((2025, 9, 2), "102", LateStatus::OnTime),
            record((2025, 9, 3), "103", LateStatus::NoShiftAssigned),
            record((2025, 9, 4), "104", LateStatus::InvalidShiftData),
        ];
        let month = compose_month(month_dates(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()), &flat);

        let counted: u32 = month
            .employees
            .iter()
            .map(|e| e.late_count + e.early_count)
            .sum();
        let grid_counted = month
            .attendance
            .values()
            .flat_map(|cells| cells.values())
            .filter(|c| c.late_status.counts_for_summary())
            .count() as u32;
        assert_eq!(counted, grid_counted);
        assert_eq!(counted, 3);

        // degraded verdicts are still visible in the grid
        let d3 = NaiveDate::from_ymd_opt(2025, 9, 3).unwrap();
        assert_eq!(
            month.attendance[&d3]["103"].late_status,
            LateStatus::NoShiftAssigned
        );
        assert!(month.employees.iter().all(|e| e.employee_no != "103"));
    }

    #[test]
    fn month_of_only_degraded_verdicts_has_no_summaries() {
        let flat = vec![
            record((2025, 9, 1), "101", LateStatus::NoShiftAssigned),
            record((2025, 9, 2), "101", LateStatus::InvalidShiftData),
            record((2025, 9, 3), "102", LateStatus::NoShiftAssigned),
        ];
        let month = compose_month(month_dates(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()), &flat);
        assert!(month.employees.is_empty());
        assert_eq!(month.attendance.len(), 3);
    }

    #[test]
    fn employees_sort_numerically_not_lexically() {
        let flat = vec![
            record((2025, 9, 1), "10", LateStatus::OnTime),
            record((2025, 9, 1), "9", LateStatus::OnTime),
            record((2025, 9, 1), "101", LateStatus::OnTime),
        ];
        let month = compose_month(month_dates(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()), &flat);
        let order: Vec<&str> = month.employees.iter().map(|e| e.employee_no.as_str()).collect();
        assert_eq!(order, ["9", "10", "101"]);
    }

    #[test]
    fn weekend_days_are_tallied() {
        // 2025-09-06 is a Saturday, 2025-09-07 a Sunday
        let flat = vec![
            record((2025, 9, 5), "101", LateStatus::OnTime),
            record((2025, 9, 6), "101", LateStatus::OnTime),
            record((2025, 9, 7), "101", LateStatus::Late),
        ];
        let month = compose_month(month_dates(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()), &flat);
        let emp = &month.employees[0];
        assert_eq!(emp.saturday_count, 1);
        assert_eq!(emp.sunday_count, 1);
        assert_eq!(emp.daily_times[1].day_of_week, 6);
        assert_eq!(emp.daily_times[2].day_of_week, 0);
    }

    #[test]
    fn late_percentage_rounds_to_one_decimal() {
        let flat = vec![
            record((2025, 9, 1), "101", LateStatus::Late),
            record((2025, 9, 2), "101", LateStatus::OnTime),
            record((2025, 9, 3), "101", LateStatus::OnTime),
        ];
        let month = compose_month(month_dates(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()), &flat);
        assert_eq!(month.employees[0].late_percentage, 33.3);
        assert_eq!(month.employees[0].total_days, 3);
    }

    #[test]
    fn daily_times_are_date_ordered() {
        let flat = vec![
            record((2025, 9, 3), "101", LateStatus::OnTime),
            record((2025, 9, 1), "101", LateStatus::OnTime),
            record((2025, 9, 2), "101", LateStatus::Late),
        ];
        let month = compose_month(month_dates(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()), &flat);
        let days: Vec<u32> = month.employees[0].daily_times.iter().map(|d| d.date.day()).collect();
        assert_eq!(days, [1, 2, 3]);
    }
}
