use actix_web::{HttpResponse, Responder, web};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::error;

use crate::engine::civil::{parse_clock, ClockPeriod};
use crate::model::shift::{NewShift, Shift};
use crate::store;

/// List all shifts
#[utoipa::path(
    get,
    path = "/api/shifts",
    responses(
        (status = 200, description = "All shift definitions", body = Vec<Shift>),
        (status = 500, description = "Store failure")
    ),
    tag = "Shift"
)]
pub async fn list_shifts(pool: web::Data<MySqlPool>) -> actix_web::Result<impl Responder> {
    let shifts = store::shifts::find_all(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, "Failed to fetch shifts");
        actix_web::error::ErrorInternalServerError(json!({"message": "Server error"}))
    })?;
    Ok(HttpResponse::Ok().json(shifts))
}

/// Create a shift
#[utoipa::path(
    post,
    path = "/api/shifts",
    request_body = NewShift,
    responses(
        (status = 201, description = "Created", body = Shift),
        (status = 400, description = "Malformed clock time or period"),
        (status = 500, description = "Store failure")
    ),
    tag = "Shift"
)]
pub async fn create_shift(
    pool: web::Data<MySqlPool>,
    payload: web::Json<NewShift>,
) -> actix_web::Result<impl Responder> {
    let new = payload.into_inner();

    if parse_clock(&new.start_time).is_err() || parse_clock(&new.end_time).is_err() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "Invalid time format. Use HH:MM"
        })));
    }
    if ClockPeriod::parse(&new.start_period).is_err() || ClockPeriod::parse(&new.end_period).is_err()
    {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "Period must be AM or PM"
        })));
    }

    let shift = store::shifts::create(pool.get_ref(), &new).await.map_err(|e| {
        error!(error = %e, "Failed to create shift");
        actix_web::error::ErrorInternalServerError(json!({"message": "Server error"}))
    })?;

    Ok(HttpResponse::Created().json(shift))
}

/// Delete a shift, clearing it from every employee that referenced it
#[utoipa::path(
    delete,
    path = "/api/shifts/{id}",
    params(("id", Path, description = "Shift ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Shift not found"),
        (status = 500, description = "Store failure")
    ),
    tag = "Shift"
)]
pub async fn delete_shift(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();

    let affected = store::shifts::delete(pool.get_ref(), id).await.map_err(|e| {
        error!(error = %e, shift_id = id, "Failed to delete shift");
        actix_web::error::ErrorInternalServerError(json!({"message": "Server error"}))
    })?;

    if affected == 0 {
        return Ok(HttpResponse::NotFound().json(json!({"message": "Shift not found"})));
    }
    Ok(HttpResponse::Ok().json(json!({"message": "Shift deleted successfully"})))
}
