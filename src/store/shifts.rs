use sqlx::MySqlPool;

use crate::model::shift::{NewShift, Shift};

const SHIFT_COLUMNS: &str = "id, start_time, start_period, end_time, end_period";

pub async fn find_all(pool: &MySqlPool) -> Result<Vec<Shift>, sqlx::Error> {
    sqlx::query_as(&format!("SELECT {SHIFT_COLUMNS} FROM shifts ORDER BY id"))
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(pool: &MySqlPool, id: u64) -> Result<Option<Shift>, sqlx::Error> {
    sqlx::query_as(&format!("SELECT {SHIFT_COLUMNS} FROM shifts WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create(pool: &MySqlPool, new: &NewShift) -> Result<Shift, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO shifts (start_time, start_period, end_time, end_period) VALUES (?, ?, ?, ?)",
    )
    .bind(&new.start_time)
    .bind(&new.start_period)
    .bind(&new.end_time)
    .bind(&new.end_period)
    .execute(pool)
    .await?;

    Ok(Shift {
        id: result.last_insert_id(),
        start_time: new.start_time.clone(),
        start_period: new.start_period.clone(),
        end_time: new.end_time.clone(),
        end_period: new.end_period.clone(),
    })
}

/// Delete a shift and null out every employee that referenced it, in one
/// transaction. Returns the number of shifts removed (0 or 1).
pub async fn delete(pool: &MySqlPool, id: u64) -> Result<u64, sqlx::Error> {
    let mut tx = pool.begin().await?;

    // references must be cleared before the row can go
    sqlx::query("UPDATE employees SET shift_id = NULL WHERE shift_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    let affected = sqlx::query("DELETE FROM shifts WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;
    Ok(affected)
}
