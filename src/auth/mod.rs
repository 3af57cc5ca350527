//! HTTP Basic authentication for the diagnostics console.

use actix_web::body::BoxBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Next;
use actix_web::web::Data;
use actix_web::{Error, HttpResponse};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::json;

use crate::config::Config;

pub async fn console_auth(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let (want_user, want_pass) = {
        let config = req
            .app_data::<Data<Config>>()
            .ok_or_else(|| actix_web::error::ErrorInternalServerError("App config missing"))?;
        (config.console_username.clone(), config.console_password.clone())
    };

    let header_value = match req.headers().get("Authorization") {
        Some(h) => h.to_str().unwrap_or_default().to_string(),
        None => {
            let resp = HttpResponse::Unauthorized()
                .json(json!({"error": "Authorization header is required"}));
            return Ok(req.into_response(resp.map_into_boxed_body()));
        }
    };

    let Some(encoded) = header_value.strip_prefix("Basic ") else {
        let resp =
            HttpResponse::Unauthorized().json(json!({"error": "Basic authentication is required"}));
        return Ok(req.into_response(resp.map_into_boxed_body()));
    };

    let credentials = STANDARD
        .decode(encoded.trim())
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok());

    let authorized = credentials
        .as_deref()
        .and_then(|c| c.split_once(':'))
        .is_some_and(|(user, pass)| user == want_user && pass == want_pass);

    if !authorized {
        let resp = HttpResponse::Unauthorized().json(json!({"error": "Invalid credentials"}));
        return Ok(req.into_response(resp.map_into_boxed_body()));
    }

    next.call(req).await
}
