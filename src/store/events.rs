use chrono::{DateTime, Utc};
use sqlx::MySqlPool;

use super::placeholders;
use crate::model::event::{NewPunchEvent, PunchEvent};

const EVENT_COLUMNS: &str =
    "id, employee_no, card_no, person_name, event_type, event_time, door_no, reader_no, device_ip";

/// All events of the given types inside `[from, to]`, in time order.
pub async fn find_in_range(
    pool: &MySqlPool,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    types: &[&str],
) -> Result<Vec<PunchEvent>, sqlx::Error> {
    let sql = format!(
        "SELECT {EVENT_COLUMNS} FROM attendance_events \
         WHERE event_time >= ? AND event_time <= ? AND event_type IN ({}) \
         ORDER BY event_time",
        placeholders(types.len())
    );

    let mut query = sqlx::query_as::<_, PunchEvent>(&sql).bind(from).bind(to);
    for t in types {
        query = query.bind(*t);
    }
    query.fetch_all(pool).await
}

pub async fn insert_many(pool: &MySqlPool, events: &[NewPunchEvent]) -> Result<u64, sqlx::Error> {
    if events.is_empty() {
        return Ok(0);
    }

    let rows = vec!["(?, ?, ?, ?, ?, ?, ?, ?)"; events.len()].join(", ");
    let sql = format!(
        "INSERT INTO attendance_events \
         (employee_no, card_no, person_name, event_type, event_time, door_no, reader_no, device_ip) \
         VALUES {rows}"
    );

    let mut query = sqlx::query(&sql);
    for e in events {
        query = query
            .bind(&e.employee_no)
            .bind(&e.card_no)
            .bind(&e.person_name)
            .bind(&e.event_type)
            .bind(e.event_time)
            .bind(e.door_no)
            .bind(e.reader_no)
            .bind(&e.device_ip);
    }
    Ok(query.execute(pool).await?.rows_affected())
}

/// Earliest and latest observed event instants, if any events exist.
pub async fn time_span(
    pool: &MySqlPool,
) -> Result<Option<(DateTime<Utc>, DateTime<Utc>)>, sqlx::Error> {
    let row: (Option<DateTime<Utc>>, Option<DateTime<Utc>>) =
        sqlx::query_as("SELECT MIN(event_time), MAX(event_time) FROM attendance_events")
            .fetch_one(pool)
            .await?;
    Ok(row.0.zip(row.1))
}

/// Every employee identifier ever seen in a punch event.
pub async fn distinct_employee_nos(pool: &MySqlPool) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT DISTINCT employee_no FROM attendance_events \
         WHERE employee_no IS NOT NULL AND employee_no <> '' \
         ORDER BY employee_no",
    )
    .fetch_all(pool)
    .await
}

pub async fn exists_for_employee(pool: &MySqlPool, employee_no: &str) -> Result<bool, sqlx::Error> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM attendance_events WHERE employee_no = ?")
            .bind(employee_no)
            .fetch_one(pool)
            .await?;
    Ok(count > 0)
}
