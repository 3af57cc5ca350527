//! Diagnostics console: a small authenticated window into the running server
//! for the dashboard's admin page.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use actix_web::{HttpResponse, Responder, web};
use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;
use utoipa::IntoParams;

static STARTED: Lazy<Instant> = Lazy::new(Instant::now);

/// Pin the process start instant; called once from `main` before serving.
pub fn mark_started() {
    Lazy::force(&STARTED);
}

/// Process and host facts
#[utoipa::path(
    get,
    path = "/api/console/system-info",
    responses((status = 200, description = "System information"), (status = 401, description = "Bad credentials")),
    security(("basic_auth" = [])),
    tag = "Console"
)]
pub async fn get_system_info() -> impl Responder {
    let uptime = STARTED.elapsed().as_secs();
    HttpResponse::Ok().json(json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "platform": std::env::consts::OS,
        "architecture": std::env::consts::ARCH,
        "cpus": std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1),
        "uptime": format!("{} hours {} minutes", uptime / 3600, (uptime % 3600) / 60),
        "process_id": std::process::id(),
    }))
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LogsQuery {
    /// How many trailing lines to return.
    pub lines: Option<usize>,
}

/// Tail of the rolling server log
#[utoipa::path(
    get,
    path = "/api/console/logs",
    params(LogsQuery),
    responses((status = 200, description = "Trailing log lines"), (status = 401, description = "Bad credentials")),
    security(("basic_auth" = [])),
    tag = "Console"
)]
pub async fn get_logs(query: web::Query<LogsQuery>) -> impl Responder {
    let lines = query.lines.unwrap_or(100).max(1);
    // file read happens off the reactor; log files grow without bound
    match web::block(move || read_log_tail(lines)).await {
        Ok(Ok(tail)) => HttpResponse::Ok().json(json!({ "logs": tail })),
        _ => HttpResponse::Ok().json(json!({ "logs": ["Unable to read log file"] })),
    }
}

/// Newest rolling file under `logs/` (tracing-appender names them
/// `app.log.YYYY-MM-DD`, so lexicographic max is the current one).
fn current_log_file() -> std::io::Result<PathBuf> {
    fs::read_dir("logs")?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("app.log"))
        })
        .max()
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "no log files"))
}

fn read_log_tail(lines: usize) -> std::io::Result<Vec<String>> {
    let content = fs::read_to_string(current_log_file()?)?;
    Ok(tail_lines(&content, lines))
}

/// Last `lines` non-blank lines of `content`, oldest first.
fn tail_lines(content: &str, lines: usize) -> Vec<String> {
    let all: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = all.len().saturating_sub(lines);
    all[start..].iter().map(|s| s.to_string()).collect()
}

/// Database pool statistics
#[utoipa::path(
    get,
    path = "/api/console/connections",
    responses((status = 200, description = "Pool statistics"), (status = 401, description = "Bad credentials")),
    security(("basic_auth" = [])),
    tag = "Console"
)]
pub async fn get_connections(pool: web::Data<MySqlPool>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "connections": pool.size(),
        "idle": pool.num_idle(),
        "closed": pool.is_closed(),
    }))
}
