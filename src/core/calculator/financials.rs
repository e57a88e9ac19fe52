use super::{finite, safe_div};
use crate::models::profit_flag::ProfitFlag;
use crate::models::settings::BusinessSettings;
use serde::Serialize;

/// Money fields derived from a job value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct FinancialBreakdown {
    pub sub_materials: f64,
    pub sub_labor: f64,
    pub sub_total: f64,
    pub gross_profit: f64,
    pub gross_margin_pct: f64,
    pub deposit_required: f64,
    pub subcontractor_price: f64,
    pub balance_due: f64,
    pub meets_min_gp: bool,
    pub meets_target_gm: bool,
    pub profit_flag: ProfitFlag,
}

fn pct_of(value: f64, pct: f64) -> f64 {
    value * finite(pct) / 100.0
}

/// Subcontractor split, gross profit/margin, deposit/balance and the
/// profit flag of a job.
pub fn calculate_job_financials(job_value: f64, settings: &BusinessSettings) -> FinancialBreakdown {
    let job_value = finite(job_value);

    let sub_materials = pct_of(job_value, settings.sub_materials_pct);
    let sub_labor = pct_of(job_value, settings.sub_labor_pct);
    let sub_total = sub_materials + sub_labor;
    let gross_profit = job_value - sub_total;
    let gross_margin_pct = safe_div(gross_profit, job_value) * 100.0;

    let deposit_required = pct_of(job_value, settings.default_deposit_pct);
    let subcontractor_price = pct_of(job_value, settings.sub_payout_pct);
    let balance_due = job_value - deposit_required;

    let min_gp = finite(settings.min_gross_profit_per_job);
    let target_gm = finite(settings.target_gross_margin_pct);

    let meets_min_gp = gross_profit >= min_gp;
    let meets_target_gm = gross_margin_pct >= target_gm;

    FinancialBreakdown {
        sub_materials,
        sub_labor,
        sub_total,
        gross_profit,
        gross_margin_pct,
        deposit_required,
        subcontractor_price,
        balance_due,
        meets_min_gp,
        meets_target_gm,
        profit_flag: profit_flag(meets_min_gp, meets_target_gm),
    }
}

/// First failing check wins: minimum gross profit, then target margin.
pub fn profit_flag(meets_min_gp: bool, meets_target_gm: bool) -> ProfitFlag {
    if !meets_min_gp {
        ProfitFlag::RaisePrice
    } else if !meets_target_gm {
        ProfitFlag::FixScope
    } else {
        ProfitFlag::Ok
    }
}
