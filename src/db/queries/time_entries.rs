use super::{date_to_sql, get_date};
use crate::errors::AppResult;
use crate::models::time_entry::{PayrollLine, TimeEntry};
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, Row, named_params, params};

fn map_row(row: &Row) -> rusqlite::Result<TimeEntry> {
    Ok(TimeEntry {
        id: row.get("id")?,
        organization_id: row.get("organization_id")?,
        employee_id: row.get("employee_id")?,
        job_id: row.get("job_id")?,
        date: get_date(row, "date")?,
        hours: row.get("hours")?,
        hourly_rate: row.get("hourly_rate")?,
        notes: row.get("notes")?,
    })
}

/// Keyed by (org, employee, job, date): a retried submit overwrites the
/// same row instead of adding a second one.
pub fn upsert_time_entry(conn: &Connection, e: &TimeEntry) -> AppResult<i64> {
    let now = Local::now().to_rfc3339();
    conn.execute(
        "INSERT INTO time_entries (
            organization_id, employee_id, job_id, date, hours, hourly_rate, notes,
            created_at, updated_at
         ) VALUES (:org, :employee, :job, :date, :hours, :rate, :notes, :now, :now)
         ON CONFLICT(organization_id, employee_id, job_id, date) DO UPDATE SET
            hours       = excluded.hours,
            hourly_rate = excluded.hourly_rate,
            notes       = excluded.notes,
            updated_at  = excluded.updated_at",
        named_params! {
            ":org": e.organization_id,
            ":employee": e.employee_id,
            ":job": e.job_id,
            ":date": date_to_sql(&e.date),
            ":hours": e.hours,
            ":rate": e.hourly_rate,
            ":notes": e.notes,
            ":now": now,
        },
    )?;

    let id = conn.query_row(
        "SELECT id FROM time_entries
         WHERE organization_id = ?1 AND employee_id = ?2 AND job_id = ?3 AND date = ?4",
        params![e.organization_id, e.employee_id, e.job_id, date_to_sql(&e.date)],
        |row| row.get(0),
    )?;
    Ok(id)
}

pub fn load_entries_between(
    conn: &Connection,
    org: &str,
    from: &NaiveDate,
    to: &NaiveDate,
) -> AppResult<Vec<TimeEntry>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM time_entries
         WHERE organization_id = ?1 AND date BETWEEN ?2 AND ?3
         ORDER BY date ASC, employee_id ASC, job_id ASC",
    )?;
    let rows = stmt.query_map(params![org, date_to_sql(from), date_to_sql(to)], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn payroll_between(
    conn: &Connection,
    org: &str,
    from: &NaiveDate,
    to: &NaiveDate,
) -> AppResult<Vec<PayrollLine>> {
    let mut stmt = conn.prepare(
        "SELECT employee_id, COUNT(*), SUM(hours), SUM(hours * hourly_rate)
         FROM time_entries
         WHERE organization_id = ?1 AND date BETWEEN ?2 AND ?3
         GROUP BY employee_id
         ORDER BY employee_id ASC",
    )?;
    let rows = stmt.query_map(params![org, date_to_sql(from), date_to_sql(to)], |row| {
        Ok(PayrollLine {
            employee_id: row.get(0)?,
            entries: row.get(1)?,
            hours: row.get(2)?,
            amount: row.get(3)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
