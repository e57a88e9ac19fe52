use super::{finite, round_half_up, safe_div};
use crate::models::scenario::{ScenarioComparison, ScenarioInputs, ScenarioResults};

/// Project a what-if scenario.
///
/// Appointments and sales are rounded to whole numbers before revenue is
/// derived from them, so revenue always reflects whole jobs sold.
pub fn calculate_scenario_results(s: &ScenarioInputs) -> ScenarioResults {
    let leads = finite(s.leads_count);
    let marketing = finite(s.marketing_spend);
    let owner_salary = finite(s.owner_salary);

    let appointments = round_half_up(leads * finite(s.issue_rate));
    let sales = round_half_up(appointments * finite(s.closing_rate));
    let revenue = sales * finite(s.average_sale);

    let cogs_labor = revenue * finite(s.cogs_labor_pct);
    let cogs_materials = revenue * finite(s.cogs_materials_pct);
    let cogs_other = revenue * finite(s.cogs_other_pct);
    let total_cogs = cogs_labor + cogs_materials + cogs_other;

    let gross_profit = revenue - total_cogs;
    let gross_margin_pct = safe_div(gross_profit, revenue) * 100.0;

    let sales_commission = revenue * finite(s.sales_commission_pct);
    let pm_commission = revenue * finite(s.pm_commission_pct);
    let total_commissions = sales_commission + pm_commission;

    let contribution_profit = gross_profit - total_commissions;

    let total_overhead = owner_salary
        + finite(s.production_salary)
        + finite(s.sales_salary)
        + finite(s.admin_salary)
        + finite(s.other_overhead);

    let total_expenses = total_commissions + marketing + total_overhead;

    let net_profit = gross_profit - total_expenses;
    let net_margin_pct = safe_div(net_profit, revenue) * 100.0;

    ScenarioResults {
        appointments,
        sales,
        revenue,
        cogs_labor,
        cogs_materials,
        cogs_other,
        total_cogs,
        gross_profit,
        gross_margin_pct,
        sales_commission,
        pm_commission,
        total_commissions,
        contribution_profit,
        total_overhead,
        total_expenses,
        net_profit,
        net_margin_pct,
        cpl: safe_div(marketing, leads),
        roi: safe_div(revenue, marketing),
        owner_take_home: net_profit + owner_salary,
        nsli: safe_div(revenue, leads),
    }
}

/// Percent change against a baseline value; 0 unless the baseline is positive.
fn pct_delta(delta: f64, baseline: f64) -> f64 {
    if baseline > 0.0 {
        safe_div(delta, baseline) * 100.0
    } else {
        0.0
    }
}

pub fn compare_scenarios(baseline: &ScenarioResults, candidate: &ScenarioResults) -> ScenarioComparison {
    let revenue = candidate.revenue - baseline.revenue;
    let gross_profit = candidate.gross_profit - baseline.gross_profit;
    let net_profit = candidate.net_profit - baseline.net_profit;
    let owner_take_home = candidate.owner_take_home - baseline.owner_take_home;

    ScenarioComparison {
        revenue,
        revenue_pct: pct_delta(revenue, baseline.revenue),
        gross_profit,
        gross_profit_pct: pct_delta(gross_profit, baseline.gross_profit),
        net_profit,
        net_profit_pct: pct_delta(net_profit, baseline.net_profit),
        owner_take_home,
        owner_take_home_pct: pct_delta(owner_take_home, baseline.owner_take_home),
        cpl: candidate.cpl - baseline.cpl,
        roi: candidate.roi - baseline.roi,
    }
}
