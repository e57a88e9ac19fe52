use crate::core::job::JobLogic;
use crate::core::validate;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::time_entries::{load_entries_between, payroll_between, upsert_time_entry};
use crate::errors::{AppError, AppResult};
use crate::models::time_entry::{PayrollLine, TimeEntry};
use chrono::NaiveDate;
use rusqlite::Connection;

/// Crew hours per job and day, and the payroll built from them.
pub struct TimeEntryLogic;

impl TimeEntryLogic {
    /// Record hours for (employee, job, date). Logging the same key again
    /// replaces the previous hours instead of adding a second row.
    pub fn log(pool: &mut DbPool, mut entry: TimeEntry) -> AppResult<TimeEntry> {
        if entry.employee_id.trim().is_empty() {
            return Err(AppError::Validation("employee id cannot be empty".into()));
        }
        validate::non_negative("hours", entry.hours)?;
        validate::non_negative("hourly_rate", entry.hourly_rate)?;
        if entry.hours > 24.0 {
            return Err(AppError::Validation(format!(
                "hours must not exceed 24 per day (got {})",
                entry.hours
            )));
        }

        pool.immediate(|tx| {
            // unknown jobs surface as NotFound before anything is written
            JobLogic::get(tx, &entry.organization_id, entry.job_id)?;

            entry.employee_id = entry.employee_id.trim().to_string();
            entry.id = upsert_time_entry(tx, &entry)?;

            ttlog(
                tx,
                "time",
                &format!("{}/job#{}", entry.organization_id, entry.job_id),
                &format!("{} {} {:.2}h", entry.employee_id, entry.date, entry.hours),
            )?;
            Ok(entry)
        })
    }

    pub fn entries(conn: &Connection, org: &str, from: NaiveDate, to: NaiveDate) -> AppResult<Vec<TimeEntry>> {
        load_entries_between(conn, org, &from, &to)
    }

    pub fn payroll(conn: &Connection, org: &str, from: NaiveDate, to: NaiveDate) -> AppResult<Vec<PayrollLine>> {
        if to < from {
            return Err(AppError::InvalidDate(format!("range end {to} is before start {from}")));
        }
        payroll_between(conn, org, &from, &to)
    }
}
