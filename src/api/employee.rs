use std::collections::HashMap;

use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;
use tracing::error;
use utoipa::ToSchema;

use crate::model::employee::{DirectoryEntry, Employee};
use crate::store;

fn store_error(context: &'static str) -> impl Fn(sqlx::Error) -> actix_web::Error {
    move |e| {
        error!(error = %e, context, "Employee store query failed");
        actix_web::error::ErrorInternalServerError(json!({"message": "Server error"}))
    }
}

/// Employee directory: everyone seen in events, with registry details merged in
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "Directory entries", body = Vec<DirectoryEntry>),
        (status = 500, description = "Store failure")
    ),
    tag = "Employee"
)]
pub async fn list_employees(pool: web::Data<MySqlPool>) -> actix_web::Result<impl Responder> {
    let observed = store::events::distinct_employee_nos(pool.get_ref())
        .await
        .map_err(store_error("list"))?;
    let registry: HashMap<String, Employee> = store::employees::find_all(pool.get_ref())
        .await
        .map_err(store_error("list"))?
        .into_iter()
        .map(|e| (e.employee_no.clone(), e))
        .collect();

    let entries: Vec<DirectoryEntry> = observed
        .into_iter()
        .map(|employee_no| {
            let details = registry.get(&employee_no);
            DirectoryEntry {
                name: details.map(|e| e.name.clone()),
                shift_id: details.and_then(|e| e.shift_id),
                has_details: details.is_some_and(|e| e.shift_id.is_some()),
                employee_no,
            }
        })
        .collect();

    Ok(HttpResponse::Ok().json(entries))
}

/// Directory entry for one employee
#[utoipa::path(
    get,
    path = "/api/employees/{employee_no}",
    params(("employee_no", Path, description = "Device employee identifier")),
    responses(
        (status = 200, description = "Directory entry", body = DirectoryEntry),
        (status = 404, description = "Identifier never seen"),
        (status = 500, description = "Store failure")
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let employee_no = path.into_inner();

    if let Some(employee) = store::employees::find_one(pool.get_ref(), &employee_no)
        .await
        .map_err(store_error("get"))?
    {
        return Ok(HttpResponse::Ok().json(DirectoryEntry {
            employee_no,
            name: Some(employee.name),
            shift_id: employee.shift_id,
            has_details: employee.shift_id.is_some(),
        }));
    }

    // not registered yet, but maybe the device has seen the identifier
    if store::events::exists_for_employee(pool.get_ref(), &employee_no)
        .await
        .map_err(store_error("get"))?
    {
        return Ok(HttpResponse::Ok().json(DirectoryEntry {
            employee_no,
            name: None,
            shift_id: None,
            has_details: false,
        }));
    }

    Ok(HttpResponse::NotFound().json(json!({"message": "Employee not found"})))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SaveEmployee {
    #[schema(example = "101")]
    pub employee_no: String,
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = 1)]
    pub shift_id: u64,
}

/// Register or update an employee's name and shift
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = SaveEmployee,
    responses(
        (status = 200, description = "Saved", body = DirectoryEntry),
        (status = 400, description = "Missing fields"),
        (status = 404, description = "Identifier never seen in events, or shift missing"),
        (status = 500, description = "Store failure")
    ),
    tag = "Employee"
)]
pub async fn save_employee(
    pool: web::Data<MySqlPool>,
    payload: web::Json<SaveEmployee>,
) -> actix_web::Result<impl Responder> {
    let SaveEmployee {
        employee_no,
        name,
        shift_id,
    } = payload.into_inner();

    if employee_no.trim().is_empty() || name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "Employee number, name, and shift ID are required"
        })));
    }

    // only identifiers the device has actually reported can be registered
    if !store::events::exists_for_employee(pool.get_ref(), &employee_no)
        .await
        .map_err(store_error("save"))?
    {
        return Ok(HttpResponse::NotFound().json(json!({"message": "Employee not found in events"})));
    }

    if store::shifts::find_by_id(pool.get_ref(), shift_id)
        .await
        .map_err(store_error("save"))?
        .is_none()
    {
        return Ok(HttpResponse::NotFound().json(json!({"message": "Shift not found"})));
    }

    store::employees::upsert(pool.get_ref(), &employee_no, &name, shift_id)
        .await
        .map_err(store_error("save"))?;

    Ok(HttpResponse::Ok().json(DirectoryEntry {
        employee_no,
        name: Some(name),
        shift_id: Some(shift_id),
        has_details: true,
    }))
}

/// Remove an employee's registry details
#[utoipa::path(
    delete,
    path = "/api/employees/{employee_no}",
    params(("employee_no", Path, description = "Device employee identifier")),
    responses(
        (status = 200, description = "Removed"),
        (status = 404, description = "Not registered"),
        (status = 500, description = "Store failure")
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let employee_no = path.into_inner();

    let affected = store::employees::delete(pool.get_ref(), &employee_no)
        .await
        .map_err(store_error("delete"))?;

    if affected == 0 {
        return Ok(HttpResponse::NotFound().json(json!({"message": "Employee not found"})));
    }
    Ok(HttpResponse::Ok().json(json!({"message": "Employee details removed successfully"})))
}
