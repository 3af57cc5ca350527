use actix_web::{HttpResponse, Responder, web};
use chrono::{Duration, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::error;
use utoipa::{IntoParams, ToSchema};

use super::{parse_date_param, resolve_date_range, DateRangeQuery};
use crate::config::Config;
use crate::engine::{monthly, resolve};
use crate::model::attendance::{AttendanceRecord, LateStatus};

/// Health check
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is up", body = Object, example = json!({"ok": true}))
    ),
    tag = "Attendance"
)]
pub async fn get_health() -> impl Responder {
    HttpResponse::Ok().json(json!({ "ok": true }))
}

/// Attendance records for a day, a range, or the whole observed span
#[utoipa::path(
    get,
    path = "/api/attendance",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Flat attendance record list", body = Vec<AttendanceRecord>),
        (status = 400, description = "Malformed date parameter"),
        (status = 500, description = "Store failure")
    ),
    tag = "Attendance"
)]
pub async fn get_attendance(
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    query: web::Query<DateRangeQuery>,
) -> actix_web::Result<impl Responder> {
    let Some((start, end)) = resolve_date_range(pool.get_ref(), &config.engine, &query).await?
    else {
        return Ok(HttpResponse::Ok().json(Vec::<AttendanceRecord>::new()));
    };

    let records = resolve::compute_attendance_range(pool.get_ref(), &config.engine, start, end)
        .await
        .map_err(|e| {
            error!(error = %e, %start, %end, "Failed to compute attendance");
            actix_web::error::ErrorInternalServerError(json!({"error": "fetch_failed"}))
        })?;

    Ok(HttpResponse::Ok().json(records))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PresentEmployee {
    #[schema(example = "101")]
    pub employee_no: String,
    pub person_name: Option<String>,
    #[schema(example = "21:13", nullable = true)]
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub late_status: LateStatus,
}

/// Who is on the current shift
#[utoipa::path(
    get,
    path = "/api/present-employees",
    responses(
        (status = 200, description = "Attendance of the shift in progress", body = Vec<PresentEmployee>),
        (status = 500, description = "Store failure")
    ),
    tag = "Attendance"
)]
pub async fn get_present_employees(
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> actix_web::Result<impl Responder> {
    let now = Utc::now().with_timezone(&config.engine.device_tz);
    // until mid-afternoon the running shift is still yesterday's work-date
    let work_date = if now.hour() < 14 {
        now.date_naive() - Duration::days(1)
    } else {
        now.date_naive()
    };

    let records = resolve::compute_attendance(pool.get_ref(), &config.engine, work_date)
        .await
        .map_err(|e| {
            error!(error = %e, %work_date, "Failed to compute present employees");
            actix_web::error::ErrorInternalServerError(json!({"error": "fetch_failed"}))
        })?;

    let present: Vec<PresentEmployee> = records
        .into_iter()
        .map(|r| PresentEmployee {
            employee_no: r.employee_no,
            person_name: r.person_name,
            check_in: r.check_in,
            check_out: r.check_out,
            late_status: r.late_status,
        })
        .collect();

    Ok(HttpResponse::Ok().json(present))
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MonthQuery {
    /// Month to report, `YYYY-MM`; defaults to the current device-local month.
    pub month: Option<String>,
}

/// Month grid and per-employee summaries
#[utoipa::path(
    get,
    path = "/api/monthly-attendance",
    params(MonthQuery),
    responses(
        (status = 200, description = "Month report", body = monthly::MonthlyAttendance),
        (status = 400, description = "Malformed month parameter"),
        (status = 500, description = "Store failure")
    ),
    tag = "Attendance"
)]
pub async fn get_monthly_attendance(
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    query: web::Query<MonthQuery>,
) -> actix_web::Result<impl Responder> {
    let month = match query.month.as_deref().filter(|s| !s.is_empty()) {
        Some(m) => m.to_string(),
        None => Utc::now()
            .with_timezone(&config.engine.device_tz)
            .format("%Y-%m")
            .to_string(),
    };

    let first = parse_month(&month).ok_or_else(|| {
        actix_web::error::ErrorBadRequest(json!({"error": "Invalid month format, use YYYY-MM"}))
    })?;

    let report = monthly::compute_monthly(pool.get_ref(), &config.engine, first)
        .await
        .map_err(|e| {
            error!(error = %e, month = %month, "Failed to compute monthly attendance");
            actix_web::error::ErrorInternalServerError(json!({"error": "fetch_failed"}))
        })?;

    Ok(HttpResponse::Ok().json(report))
}

fn parse_month(month: &str) -> Option<NaiveDate> {
    if month.len() != 7 {
        return None;
    }
    NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_parsing_is_strict() {
        assert_eq!(
            parse_month("2025-09"),
            Some(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap())
        );
        assert_eq!(parse_month("2025-9"), None);
        assert_eq!(parse_month("2025-13"), None);
        assert_eq!(parse_month("september"), None);
    }

    #[test]
    fn date_params_are_strict_but_tolerate_datetime_suffixes() {
        assert!(parse_date_param("2025-09-03").is_ok());
        assert!(parse_date_param("2025-09-03T21:00:00Z").is_ok());
        assert!(parse_date_param("2025-9-3").is_err());
        assert!(parse_date_param("03-09-2025").is_err());
        assert!(parse_date_param("").is_err());
    }
}
