pub mod attendance;
pub mod console;
pub mod employee;
pub mod events;
pub mod shift;

use actix_web::error::ErrorBadRequest;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;
use tracing::error;
use utoipa::IntoParams;

use crate::engine::EngineConfig;
use crate::store;

/// Date selection shared by the attendance and raw-events listings: a single
/// `date`, a `startDate`/`endDate` pair, or nothing (whole observed span).
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DateRangeQuery {
    /// Single day, `YYYY-MM-DD`.
    pub date: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
}

/// Strict `YYYY-MM-DD`; anything past the first ten characters is ignored so
/// datetime strings pasted by dashboard clients still work.
pub(crate) fn parse_date_param(raw: &str) -> Result<NaiveDate, actix_web::Error> {
    let s = raw.get(..10).unwrap_or(raw);
    if s.len() == 10 && s.as_bytes()[4] == b'-' && s.as_bytes()[7] == b'-' {
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(date);
        }
    }
    Err(ErrorBadRequest(json!({
        "error": "Invalid date format, use YYYY-MM-DD"
    })))
}

/// Resolve the requested date range. `None` means there is nothing to report:
/// no explicit dates were given and no events have ever been observed.
pub(crate) async fn resolve_date_range(
    pool: &MySqlPool,
    cfg: &EngineConfig,
    query: &DateRangeQuery,
) -> Result<Option<(NaiveDate, NaiveDate)>, actix_web::Error> {
    if let Some(date) = query.date.as_deref().filter(|s| !s.is_empty()) {
        let d = parse_date_param(date)?;
        return Ok(Some((d, d)));
    }

    if let (Some(start), Some(end)) = (
        query.start_date.as_deref().filter(|s| !s.is_empty()),
        query.end_date.as_deref().filter(|s| !s.is_empty()),
    ) {
        return Ok(Some((parse_date_param(start)?, parse_date_param(end)?)));
    }

    let span = store::events::time_span(pool).await.map_err(|e| {
        error!(error = %e, "Failed to query event time span");
        actix_web::error::ErrorInternalServerError(json!({"error": "fetch_failed"}))
    })?;

    Ok(span.map(|(min, max)| {
        (
            min.with_timezone(&cfg.device_tz).date_naive(),
            max.with_timezone(&cfg.device_tz).date_naive(),
        )
    }))
}
