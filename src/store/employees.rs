use std::collections::HashMap;

use sqlx::MySqlPool;

use super::placeholders;
use crate::model::employee::{Employee, EmployeeWithShift};
use crate::model::shift::Shift;

#[derive(sqlx::FromRow)]
struct EmployeeShiftRow {
    employee_no: String,
    name: String,
    shift_id: Option<u64>,
    start_time: Option<String>,
    start_period: Option<String>,
    end_time: Option<String>,
    end_period: Option<String>,
}

impl EmployeeShiftRow {
    fn into_employee(self) -> EmployeeWithShift {
        let shift = match (
            self.shift_id,
            self.start_time,
            self.start_period,
            self.end_time,
            self.end_period,
        ) {
            (Some(id), Some(start_time), Some(start_period), Some(end_time), Some(end_period)) => {
                Some(Shift {
                    id,
                    start_time,
                    start_period,
                    end_time,
                    end_period,
                })
            }
            _ => None,
        };
        EmployeeWithShift {
            employee_no: self.employee_no,
            name: self.name,
            shift,
        }
    }
}

/// Registry rows for the given identifiers, shifts resolved, keyed by
/// identifier. Identifiers without a registry row are simply absent.
pub async fn find_by_nos(
    pool: &MySqlPool,
    employee_nos: &[String],
) -> Result<HashMap<String, EmployeeWithShift>, sqlx::Error> {
    if employee_nos.is_empty() {
        return Ok(HashMap::new());
    }

    let sql = format!(
        "SELECT e.employee_no, e.name, e.shift_id, \
                s.start_time, s.start_period, s.end_time, s.end_period \
         FROM employees e \
         LEFT JOIN shifts s ON s.id = e.shift_id \
         WHERE e.employee_no IN ({})",
        placeholders(employee_nos.len())
    );

    let mut query = sqlx::query_as::<_, EmployeeShiftRow>(&sql);
    for no in employee_nos {
        query = query.bind(no);
    }
    let rows = query.fetch_all(pool).await?;

    Ok(rows
        .into_iter()
        .map(|r| (r.employee_no.clone(), r.into_employee()))
        .collect())
}

pub async fn find_all(pool: &MySqlPool) -> Result<Vec<Employee>, sqlx::Error> {
    sqlx::query_as("SELECT employee_no, name, shift_id FROM employees ORDER BY employee_no")
        .fetch_all(pool)
        .await
}

pub async fn find_one(
    pool: &MySqlPool,
    employee_no: &str,
) -> Result<Option<Employee>, sqlx::Error> {
    sqlx::query_as("SELECT employee_no, name, shift_id FROM employees WHERE employee_no = ?")
        .bind(employee_no)
        .fetch_optional(pool)
        .await
}

pub async fn upsert(
    pool: &MySqlPool,
    employee_no: &str,
    name: &str,
    shift_id: u64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO employees (employee_no, name, shift_id) VALUES (?, ?, ?) \
         ON DUPLICATE KEY UPDATE name = VALUES(name), shift_id = VALUES(shift_id)",
    )
    .bind(employee_no)
    .bind(name)
    .bind(shift_id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn delete(pool: &MySqlPool, employee_no: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM employees WHERE employee_no = ?")
        .bind(employee_no)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
