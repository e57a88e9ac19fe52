use crate::core::calculator::calendar::{JobFilter, filter_jobs};
use crate::core::settings::SettingsLogic;
use crate::core::validate;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::jobs::{insert_job, load_job, load_jobs, update_job};
use crate::errors::{AppError, AppResult};
use crate::models::job::{Job, JobPatch};
use chrono::{Local, NaiveDate};
use rusqlite::Connection;

/// Job lifecycle: every write path recomputes the derived money fields
/// against the organization's current settings.
pub struct JobLogic;

impl JobLogic {
    pub fn create(pool: &mut DbPool, org: &str, customer_name: &str, patch: &JobPatch) -> AppResult<Job> {
        if customer_name.trim().is_empty() {
            return Err(AppError::Validation("customer name cannot be empty".into()));
        }
        validate::job_patch(patch)?;

        pool.immediate(|tx| {
            let settings = SettingsLogic::load(tx, org)?;

            let mut job = Job::new(org, customer_name.trim());
            job.apply_patch(patch);
            validate::job_schedule(&job)?;
            job.recompute(&settings);

            job.id = insert_job(tx, &job)?;

            ttlog(
                tx,
                "job_add",
                &format!("{org}/job#{}", job.id),
                &format!("{} ({:.2})", job.customer_name, job.job_value),
            )?;
            Ok(job)
        })
    }

    pub fn update(pool: &mut DbPool, org: &str, id: i64, patch: &JobPatch) -> AppResult<Job> {
        validate::job_patch(patch)?;
        if let Some(name) = &patch.customer_name
            && name.trim().is_empty()
        {
            return Err(AppError::Validation("customer name cannot be empty".into()));
        }

        pool.immediate(|tx| {
            let mut job = Self::get(tx, org, id)?;
            let settings = SettingsLogic::load(tx, org)?;

            job.apply_patch(patch);
            validate::job_schedule(&job)?;
            job.recompute(&settings);
            job.updated_at = Local::now().to_rfc3339();

            update_job(tx, &job)?;

            ttlog(
                tx,
                "job_edit",
                &format!("{org}/job#{id}"),
                &format!(
                    "{} {} ({:.2}, {})",
                    job.customer_name,
                    job.status.to_db_str(),
                    job.job_value,
                    job.profit_flag.as_str()
                ),
            )?;
            Ok(job)
        })
    }

    pub fn get(conn: &Connection, org: &str, id: i64) -> AppResult<Job> {
        load_job(conn, org, id)?.ok_or_else(|| AppError::NotFound(format!("job #{id}")))
    }

    pub fn list(conn: &Connection, org: &str, filter: &JobFilter, today: NaiveDate) -> AppResult<Vec<Job>> {
        let jobs = load_jobs(conn, org)?;
        Ok(filter_jobs(&jobs, filter, today).into_iter().cloned().collect())
    }
}
