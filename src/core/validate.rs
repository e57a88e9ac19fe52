//! Input checks shared by every write path. Negative or non-finite money,
//! counts and percentages are rejected before any calculator runs.

use crate::errors::{AppError, AppResult};
use crate::models::job::{Job, JobPatch};
use crate::models::scenario::ScenarioPatch;
use crate::models::settings::SettingsPatch;

pub fn non_negative(name: &str, value: f64) -> AppResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::Validation(format!(
            "{name} must be a non-negative number (got {value})"
        )));
    }
    Ok(value)
}

/// 0..=100 percentage.
pub fn percentage(name: &str, value: f64) -> AppResult<f64> {
    let v = non_negative(name, value)?;
    if v > 100.0 {
        return Err(AppError::Validation(format!(
            "{name} must be between 0 and 100 (got {value})"
        )));
    }
    Ok(v)
}

/// 0..=1 fraction.
pub fn rate(name: &str, value: f64) -> AppResult<f64> {
    let v = non_negative(name, value)?;
    if v > 1.0 {
        return Err(AppError::Validation(format!(
            "{name} must be a fraction between 0 and 1 (got {value})"
        )));
    }
    Ok(v)
}

fn check<F>(name: &str, value: Option<f64>, f: F) -> AppResult<()>
where
    F: Fn(&str, f64) -> AppResult<f64>,
{
    if let Some(v) = value {
        f(name, v)?;
    }
    Ok(())
}

pub fn job_patch(p: &JobPatch) -> AppResult<()> {
    check("job_value", p.job_value, non_negative)?;
    check("sales_commission_pct", p.sales_commission_pct, percentage)?;
    check("pm_commission_pct", p.pm_commission_pct, percentage)?;

    if let Some(Some(lat)) = p.latitude
        && !(-90.0..=90.0).contains(&lat)
    {
        return Err(AppError::Validation(format!("latitude out of range: {lat}")));
    }
    if let Some(Some(lng)) = p.longitude
        && !(-180.0..=180.0).contains(&lng)
    {
        return Err(AppError::Validation(format!("longitude out of range: {lng}")));
    }
    Ok(())
}

/// Checked on the merged record, since start and end may come from
/// different writes.
pub fn job_schedule(job: &Job) -> AppResult<()> {
    if let (Some(start), Some(end)) = (job.scheduled_start_date, job.scheduled_end_date)
        && end < start
    {
        return Err(AppError::Validation(format!(
            "scheduled end {end} is before scheduled start {start}"
        )));
    }
    Ok(())
}

pub fn settings_patch(p: &SettingsPatch) -> AppResult<()> {
    check("sub_materials_pct", p.sub_materials_pct, percentage)?;
    check("sub_labor_pct", p.sub_labor_pct, percentage)?;
    check("sub_payout_pct", p.sub_payout_pct, percentage)?;
    check("min_gross_profit_per_job", p.min_gross_profit_per_job, non_negative)?;
    check("target_gross_margin_pct", p.target_gross_margin_pct, percentage)?;
    check("default_deposit_pct", p.default_deposit_pct, percentage)?;
    Ok(())
}

pub fn scenario_patch(p: &ScenarioPatch) -> AppResult<()> {
    for (name, value) in p.rates() {
        check(name, value, rate)?;
    }
    for (name, value) in p.amounts() {
        check(name, value, non_negative)?;
    }
    if let Some(name) = &p.name
        && name.trim().is_empty()
    {
        return Err(AppError::Validation("scenario name cannot be empty".into()));
    }
    Ok(())
}
