pub mod backup;
pub mod config;
pub mod db;
pub mod export;
pub mod init;
pub mod job;
pub mod log;
pub mod scenario;
pub mod settings;
pub mod targets;
pub mod time;

use crate::config::Config;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::utils::date::parse_date;
use chrono::NaiveDate;

/// Open the configured database, bringing its schema up to date first.
pub(crate) fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    run_pending_migrations(&pool.conn)?;
    Ok(pool)
}

pub(crate) fn date_arg(raw: &str) -> AppResult<NaiveDate> {
    parse_date(raw).ok_or_else(|| AppError::InvalidDate(format!("'{raw}' (expected YYYY-MM-DD)")))
}

pub(crate) fn opt_date_arg(raw: &Option<String>) -> AppResult<Option<NaiveDate>> {
    raw.as_deref().map(date_arg).transpose()
}
