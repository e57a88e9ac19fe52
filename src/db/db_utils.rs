use crate::db::pool::DbPool;
use crate::db::queries::jobs::{load_jobs, update_job};
use crate::db::queries::settings::load_settings;
use crate::errors::AppResult;
use chrono::Local;

/// Recompute the derived money fields of every job of `org` against the
/// current settings. Used after a settings change (`db --recalc`).
pub fn recalc_all_jobs(pool: &mut DbPool, org: &str) -> AppResult<usize> {
    pool.immediate(|tx| {
        let settings = load_settings(tx, org)?.unwrap_or_default();
        let now = Local::now().to_rfc3339();

        let mut changed = 0;
        for mut job in load_jobs(tx, org)? {
            let before = job.clone();
            job.recompute(&settings);
            if job != before {
                job.updated_at = now.clone();
                update_job(tx, &job)?;
                changed += 1;
            }
        }
        Ok(changed)
    })
}
