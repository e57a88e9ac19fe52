//! `--range` expressions shared by export, payroll and rollups.
//!
//! Accepted forms: `YYYY`, `YYYY-MM`, `YYYY-MM-DD` and the same forms
//! joined by `:` for an explicit interval (both sides in the same form).

use crate::errors::{AppError, AppResult};
use crate::utils::date::last_day_of_month;
use chrono::NaiveDate;

fn invalid(what: &str, raw: &str) -> AppError {
    AppError::InvalidDate(format!("{what}: '{raw}'"))
}

/// First and last day covered by a single range token.
fn bounds_of(token: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    match token.len() {
        4 => {
            let y: i32 = token.parse().map_err(|_| invalid("invalid year", token))?;
            let first = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(|| invalid("invalid year", token))?;
            let last = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(|| invalid("invalid year", token))?;
            Ok((first, last))
        }
        7 => {
            let (y, m) = token
                .split_once('-')
                .ok_or_else(|| invalid("invalid month", token))?;
            let y: i32 = y.parse().map_err(|_| invalid("invalid year", token))?;
            let m: u32 = m.parse().map_err(|_| invalid("invalid month", token))?;
            let first = NaiveDate::from_ymd_opt(y, m, 1).ok_or_else(|| invalid("invalid month", token))?;
            let last = last_day_of_month(y, m).ok_or_else(|| invalid("invalid month", token))?;
            Ok((first, last))
        }
        10 => {
            let d = NaiveDate::parse_from_str(token, "%Y-%m-%d").map_err(|_| invalid("invalid date", token))?;
            Ok((d, d))
        }
        _ => Err(invalid("unsupported range format", token)),
    }
}

pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let r = r.trim();

    let Some((start_raw, end_raw)) = r.split_once(':') else {
        return bounds_of(r);
    };

    let (start, end) = (start_raw.trim(), end_raw.trim());
    if start.len() != end.len() {
        return Err(AppError::InvalidDate(format!(
            "start and end must have the same format: '{r}'"
        )));
    }

    let (from, _) = bounds_of(start)?;
    let (_, to) = bounds_of(end)?;
    if to < from {
        return Err(AppError::InvalidDate(format!("range end is before start: '{r}'")));
    }
    Ok((from, to))
}
