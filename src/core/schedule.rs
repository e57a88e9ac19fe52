use crate::core::calculator::calendar::JobFilter;
use crate::db::queries::jobs::load_jobs_between;
use crate::errors::{AppError, AppResult};
use crate::models::job::Job;
use crate::utils::date::{last_day_of_month, week_end, week_start};
use chrono::NaiveDate;
use rusqlite::Connection;

/// Loads the jobs a calendar view needs. Bucketing itself happens in
/// `calculator::calendar`, on the returned slice.
pub struct ScheduleLogic;

impl ScheduleLogic {
    /// First and last day of the Sunday-start grid covering the month.
    pub fn month_window(year: i32, month: u32) -> AppResult<(NaiveDate, NaiveDate)> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| AppError::InvalidDate(format!("{year}-{month:02}")))?;
        let last = last_day_of_month(year, month)
            .ok_or_else(|| AppError::InvalidDate(format!("{year}-{month:02}")))?;
        Ok((week_start(first), week_end(last)))
    }

    pub fn week_window(date: NaiveDate) -> (NaiveDate, NaiveDate) {
        (week_start(date), week_end(date))
    }

    /// Scheduled jobs touching `[from, to]` that pass the status and
    /// subcontractor filters. The filter's period is ignored here: the
    /// window already bounds the result.
    pub fn jobs_in_window(
        conn: &Connection,
        org: &str,
        from: NaiveDate,
        to: NaiveDate,
        filter: &JobFilter,
    ) -> AppResult<Vec<Job>> {
        let unbounded = JobFilter {
            period: Default::default(),
            ..filter.clone()
        };
        Ok(load_jobs_between(conn, org, &from, &to)?
            .into_iter()
            // the period is All, so `today` plays no part
            .filter(|j| unbounded.matches(j, from))
            .collect())
    }
}
