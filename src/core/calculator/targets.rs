//! Monthly goal distribution and cumulative rollups.

use super::{finite, round_half_up};
use crate::models::target::{AnnualGoals, CurveMetric, PeriodTotals, SeasonalCurve, TargetCounters};
use serde::Serialize;

/// Weight used for a metric/month pair with no curve row.
pub const FALLBACK_WEIGHT: f64 = 1.0 / 12.0;

/// Goals of one generated month, before they are upserted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeneratedMonth {
    pub month: u32,
    pub year: i32,
    pub quarter: u32,
    pub goal: TargetCounters,
}

pub fn quarter_of(month: u32) -> u32 {
    month.div_ceil(3)
}

pub fn curve_weight(curves: &[SeasonalCurve], metric: CurveMetric, month: u32) -> f64 {
    curves
        .iter()
        .find(|c| c.metric == metric && c.month == month)
        .map(|c| finite(c.weight))
        .unwrap_or(FALLBACK_WEIGHT)
}

/// Spread annual goals over the twelve months of `year`.
///
/// Gross profit follows the revenue curve and reviews the sales curve;
/// marketing spend is always split evenly.
pub fn generate_monthly_targets(
    year: i32,
    goals: &AnnualGoals,
    curves: &[SeasonalCurve],
) -> Vec<GeneratedMonth> {
    (1..=12)
        .map(|month| {
            let leads_w = curve_weight(curves, CurveMetric::Leads, month);
            let sales_w = curve_weight(curves, CurveMetric::Sales, month);
            let revenue_w = curve_weight(curves, CurveMetric::Revenue, month);

            GeneratedMonth {
                month,
                year,
                quarter: quarter_of(month),
                goal: TargetCounters {
                    leads: round_half_up(finite(goals.leads) * leads_w),
                    appointments: 0.0,
                    sales: round_half_up(finite(goals.sales) * sales_w),
                    revenue: round_half_up(finite(goals.revenue) * revenue_w),
                    gross_profit: round_half_up(finite(goals.gross_profit) * revenue_w),
                    reviews: round_half_up(finite(goals.reviews) * sales_w),
                    marketing_spend: round_half_up(finite(goals.marketing_spend) / 12.0),
                },
            }
        })
        .collect()
}

/// Running totals, left to right: entry `i` holds the sum of periods `0..=i`.
pub fn cumulative_rollup(periods: &[PeriodTotals]) -> Vec<PeriodTotals> {
    let mut goal = TargetCounters::default();
    let mut actual = TargetCounters::default();

    periods
        .iter()
        .map(|p| {
            goal += p.goal;
            actual += p.actual;
            PeriodTotals {
                period: p.period.clone(),
                goal,
                actual,
            }
        })
        .collect()
}

/// Sum of every period (goal, actual).
pub fn aggregate(periods: &[PeriodTotals]) -> (TargetCounters, TargetCounters) {
    periods.iter().fold(
        (TargetCounters::default(), TargetCounters::default()),
        |(mut goal, mut actual), p| {
            goal += p.goal;
            actual += p.actual;
            (goal, actual)
        },
    )
}
