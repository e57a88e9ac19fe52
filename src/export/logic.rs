use crate::db::pool::DbPool;
use crate::db::queries::jobs::{load_jobs, load_jobs_between};
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::JobExport;
use crate::export::range::parse_range;
use crate::export::xlsx::export_xlsx;
use crate::ui::messages::warning;
use chrono::NaiveDate;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export the jobs of `org`.
    ///
    /// `range` (`None` or `"all"` for everything) keeps the jobs whose
    /// schedule touches the interval; unscheduled jobs only appear in a
    /// full export. Returns the number of exported jobs.
    pub fn export(
        pool: &mut DbPool,
        org: &str,
        format: ExportFormat,
        file: &str,
        range: Option<&str>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let bounds: Option<(NaiveDate, NaiveDate)> = match range {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(parse_range(r)?),
        };

        let jobs = match bounds {
            None => load_jobs(&pool.conn, org)?,
            Some((from, to)) => load_jobs_between(&pool.conn, org, &from, &to)?,
        };

        if jobs.is_empty() {
            warning("No jobs found for the selected range.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        let rows: Vec<JobExport> = jobs.iter().map(JobExport::from).collect();
        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
            ExportFormat::Xlsx => export_xlsx(&rows, path)?,
        }

        crate::db::log::ttlog(
            &pool.conn,
            "export",
            &path.to_string_lossy(),
            &format!("{} job(s) as {}", rows.len(), format.as_str()),
        )?;

        Ok(rows.len())
    }
}
