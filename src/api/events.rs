use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveTime;
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;
use tracing::error;

use super::{resolve_date_range, DateRangeQuery};
use crate::config::Config;
use crate::engine::civil::local_instant;
use crate::engine::work_date::{tag_events, WorkDatedEvent};
use crate::engine::PASS_TYPES;
use crate::model::event::NewPunchEvent;
use crate::store;

/// The device pushes either a single event object or a batch array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum EventsPayload {
    Many(Vec<NewPunchEvent>),
    One(NewPunchEvent),
}

/// Ingest punch events
#[utoipa::path(
    post,
    path = "/api/events",
    request_body = Vec<NewPunchEvent>,
    responses(
        (status = 200, description = "Events stored", body = Object, example = json!({"inserted": 2})),
        (status = 500, description = "Store failure", body = Object, example = json!({"error": "insert_failed"}))
    ),
    tag = "Events"
)]
pub async fn create_events(
    pool: web::Data<MySqlPool>,
    payload: web::Json<EventsPayload>,
) -> actix_web::Result<impl Responder> {
    let events = match payload.into_inner() {
        EventsPayload::Many(events) => events,
        EventsPayload::One(event) => vec![event],
    };

    match store::events::insert_many(pool.get_ref(), &events).await {
        Ok(_) => Ok(HttpResponse::Ok().json(json!({ "inserted": events.len() }))),
        Err(e) => {
            error!(error = %e, count = events.len(), "Failed to insert events");
            Ok(HttpResponse::InternalServerError().json(json!({"error": "insert_failed"})))
        }
    }
}

/// Raw qualifying events with device-local times and work-dates
#[utoipa::path(
    get,
    path = "/api/events",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Work-dated event list", body = Vec<WorkDatedEvent>),
        (status = 400, description = "Malformed date parameter"),
        (status = 500, description = "Store failure")
    ),
    tag = "Events"
)]
pub async fn get_events(
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    query: web::Query<DateRangeQuery>,
) -> actix_web::Result<impl Responder> {
    let cfg = &config.engine;
    let Some((start, end)) = resolve_date_range(pool.get_ref(), cfg, &query).await? else {
        return Ok(HttpResponse::Ok().json(Vec::<WorkDatedEvent>::new()));
    };

    // whole local days, start-of-day to 23:59:59
    let day_end = NaiveTime::from_hms_opt(23, 59, 59).unwrap();
    let (from, to) = local_instant(start, NaiveTime::MIN, cfg.device_tz)
        .and_then(|f| Ok((f, local_instant(end, day_end, cfg.device_tz)?)))
        .map_err(|e| {
            error!(error = %e, %start, %end, "Failed to resolve local day bounds");
            actix_web::error::ErrorInternalServerError(json!({"error": "fetch_failed"}))
        })?;

    let events = store::events::find_in_range(
        pool.get_ref(),
        from.with_timezone(&chrono::Utc),
        to.with_timezone(&chrono::Utc),
        &PASS_TYPES,
    )
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to fetch events");
        actix_web::error::ErrorInternalServerError(json!({"error": "fetch_failed"}))
    })?;

    Ok(HttpResponse::Ok().json(tag_events(events, cfg)))
}
