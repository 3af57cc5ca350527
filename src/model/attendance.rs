use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use utoipa::ToSchema;

/// Late/on-time verdict for one (employee, work-date) pair.
///
/// `InvalidShiftData` and `NoShiftAssigned` are terminal verdicts, not errors:
/// a malformed or missing shift record degrades the row instead of failing the
/// report it appears in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, ToSchema)]
pub enum LateStatus {
    #[serde(rename = "On Time")]
    #[strum(serialize = "On Time")]
    OnTime,
    Late,
    #[serde(rename = "Invalid Shift Data")]
    #[strum(serialize = "Invalid Shift Data")]
    InvalidShiftData,
    #[serde(rename = "No Shift Assigned")]
    #[strum(serialize = "No Shift Assigned")]
    NoShiftAssigned,
}

impl LateStatus {
    /// Whether this verdict counts toward monthly late/on-time statistics.
    pub fn counts_for_summary(self) -> bool {
        matches!(self, LateStatus::OnTime | LateStatus::Late)
    }
}

/// Computed attendance row for one employee on one work-date. Derived fresh on
/// every query, never persisted. Holds at most one check-in and one check-out.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[schema(
    example = json!({
        "work_date": "2025-09-03",
        "employee_no": "101",
        "person_name": "John Doe",
        "card_no": "0004123",
        "check_in": "21:13",
        "check_out": "06:02",
        "total_minutes": 529,
        "late_status": "On Time"
    })
)]
pub struct AttendanceRecord {
    #[schema(value_type = String, format = "date", example = "2025-09-03")]
    pub work_date: NaiveDate,
    #[schema(example = "101")]
    pub employee_no: String,
    pub person_name: Option<String>,
    pub card_no: Option<String>,
    /// Device-local time of day, `HH:MM`.
    #[schema(example = "21:13", nullable = true)]
    pub check_in: Option<String>,
    #[schema(example = "06:02", nullable = true)]
    pub check_out: Option<String>,
    /// Whole minutes between check-in and check-out, present only when both
    /// sides resolved.
    pub total_minutes: Option<i64>,
    pub late_status: LateStatus,
}
