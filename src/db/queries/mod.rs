//! Row mapping and SQL for every table. Dates live in TEXT columns as
//! `YYYY-MM-DD`.

pub mod jobs;
pub mod scenarios;
pub mod settings;
pub mod targets;
pub mod time_entries;

use crate::errors::AppError;
use chrono::NaiveDate;
use rusqlite::Row;

pub(crate) fn date_to_sql(d: &NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

pub(crate) fn opt_date_to_sql(d: &Option<NaiveDate>) -> Option<String> {
    d.as_ref().map(date_to_sql)
}

fn conversion_error(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

pub(crate) fn parse_sql_date(raw: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| conversion_error(0, AppError::InvalidDate(raw.to_string())))
}

pub(crate) fn get_date(row: &Row, col: &str) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(col)?;
    parse_sql_date(&raw)
}

pub(crate) fn get_opt_date(row: &Row, col: &str) -> rusqlite::Result<Option<NaiveDate>> {
    let raw: Option<String> = row.get(col)?;
    raw.as_deref().map(parse_sql_date).transpose()
}

pub(crate) fn invalid_text(col: &str, value: &str) -> rusqlite::Error {
    conversion_error(0, AppError::Other(format!("invalid {col}: {value}")))
}
