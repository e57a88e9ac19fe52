use chrono::NaiveDate;
use paintledger::core::calculator::calendar::{
    JobFilter, SchedulePeriod, filter_jobs, jobs_on_date, mappable_jobs, month_cells, week_cells,
};
use paintledger::core::calculator::commission::{calculate_commissions, days_to_collect};
use paintledger::core::calculator::financials::calculate_job_financials;
use paintledger::core::calculator::scenario::{calculate_scenario_results, compare_scenarios};
use paintledger::core::calculator::targets::{
    FALLBACK_WEIGHT, cumulative_rollup, generate_monthly_targets, quarter_of,
};
use paintledger::core::calculator::{round_half_up, safe_div};
use paintledger::models::job::Job;
use paintledger::models::job_status::JobStatus;
use paintledger::models::profit_flag::ProfitFlag;
use paintledger::models::scenario::{ScenarioInputs, ScenarioResults};
use paintledger::models::settings::BusinessSettings;
use paintledger::models::target::{AnnualGoals, CurveMetric, PeriodTotals, SeasonalCurve, TargetCounters};

mod common;
use common::approx;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn scheduled(id: i64, start: &str, end: Option<&str>) -> Job {
    let mut job = Job::new("acme", &format!("customer {id}"));
    job.id = id;
    job.status = JobStatus::Scheduled;
    job.scheduled_start_date = Some(d(start));
    job.scheduled_end_date = end.map(d);
    job
}

// ---------------------------
// Financials
// ---------------------------

#[test]
fn job_financials_match_reference_example() {
    let f = calculate_job_financials(10000.0, &BusinessSettings::default());

    assert!(approx(f.sub_materials, 1500.0));
    assert!(approx(f.sub_labor, 4500.0));
    assert!(approx(f.sub_total, 6000.0));
    assert!(approx(f.gross_profit, 4000.0));
    assert!(approx(f.gross_margin_pct, 40.0));
    assert!(approx(f.deposit_required, 3000.0));
    assert!(approx(f.balance_due, 7000.0));
    assert!(approx(f.subcontractor_price, 6000.0));
    assert!(f.meets_min_gp);
    assert!(f.meets_target_gm);
    assert_eq!(f.profit_flag, ProfitFlag::Ok);
}

#[test]
fn job_financials_parts_add_up() {
    let settings = BusinessSettings::default();
    for value in [0.0, 1.0, 99.99, 1234.56, 10000.0, 87654.32] {
        let f = calculate_job_financials(value, &settings);
        assert!(approx(f.sub_materials + f.sub_labor, f.sub_total));
        assert!(approx(f.sub_total + f.gross_profit, value));
    }
}

#[test]
fn zero_job_value_has_zero_margin() {
    let f = calculate_job_financials(0.0, &BusinessSettings::default());
    assert_eq!(f.gross_margin_pct, 0.0);
    assert!(!f.gross_margin_pct.is_nan());
    assert_eq!(f.profit_flag, ProfitFlag::RaisePrice);
}

#[test]
fn non_finite_job_value_counts_as_zero() {
    let f = calculate_job_financials(f64::NAN, &BusinessSettings::default());
    assert_eq!(f.sub_total, 0.0);
    assert_eq!(f.gross_margin_pct, 0.0);
}

#[test]
fn profit_flag_follows_priority_order() {
    let mut settings = BusinessSettings::default();

    // gross profit 1600 >= 900, margin 40 >= 40
    assert_eq!(calculate_job_financials(4000.0, &settings).profit_flag, ProfitFlag::Ok);

    // gross profit 800 < 900 wins over everything else
    assert_eq!(calculate_job_financials(2000.0, &settings).profit_flag, ProfitFlag::RaisePrice);

    // margin 40 < 45 while gross profit is fine
    settings.target_gross_margin_pct = 45.0;
    assert_eq!(calculate_job_financials(4000.0, &settings).profit_flag, ProfitFlag::FixScope);

    // both failing: raise price first
    assert_eq!(calculate_job_financials(1000.0, &settings).profit_flag, ProfitFlag::RaisePrice);
}

#[test]
fn min_gross_profit_threshold_is_inclusive() {
    // 2250 * 40% = 900 exactly
    let f = calculate_job_financials(2250.0, &BusinessSettings::default());
    assert!(approx(f.gross_profit, 900.0));
    assert!(f.meets_min_gp);
    assert_eq!(f.profit_flag, ProfitFlag::Ok);
}

// ---------------------------
// Commissions
// ---------------------------

#[test]
fn commissions_are_independent() {
    let c = calculate_commissions(10000.0, 10.0, 0.0);
    assert!(approx(c.sales_commission_amount, 1000.0));
    assert_eq!(c.pm_commission_amount, 0.0);

    let c = calculate_commissions(12000.0, 10.0, 5.0);
    assert!(approx(c.sales_commission_amount, 1200.0));
    assert!(approx(c.pm_commission_amount, 600.0));
}

#[test]
fn days_to_collect_counts_whole_days() {
    assert_eq!(days_to_collect(d("2025-06-01"), d("2025-06-15")), 14);
    assert_eq!(days_to_collect(d("2025-06-15"), d("2025-06-15")), 0);
    assert_eq!(days_to_collect(d("2025-06-15"), d("2025-06-10")), -5);
}

#[test]
fn job_recompute_refreshes_commission_from_stored_pct() {
    let mut job = Job::new("acme", "Smith");
    job.job_value = 10000.0;
    job.sales_commission_pct = 10.0;
    job.recompute(&BusinessSettings::default());
    assert!(approx(job.sales_commission_amount, 1000.0));

    job.job_value = 12000.0;
    job.recompute(&BusinessSettings::default());
    assert!(approx(job.sales_commission_amount, 1200.0));
}

// ---------------------------
// Scenario engine
// ---------------------------

fn sample_inputs() -> ScenarioInputs {
    ScenarioInputs {
        leads_count: 500.0,
        issue_rate: 0.5,
        closing_rate: 0.3,
        average_sale: 8000.0,
        cogs_labor_pct: 0.3,
        cogs_materials_pct: 0.15,
        cogs_other_pct: 0.05,
        sales_commission_pct: 0.08,
        pm_commission_pct: 0.02,
        marketing_spend: 50000.0,
        owner_salary: 80000.0,
        production_salary: 40000.0,
        sales_salary: 30000.0,
        admin_salary: 20000.0,
        other_overhead: 10000.0,
    }
}

#[test]
fn scenario_pipeline_projects_results() {
    let r = calculate_scenario_results(&sample_inputs());

    assert_eq!(r.appointments, 250.0);
    assert_eq!(r.sales, 75.0);
    assert!(approx(r.revenue, 600000.0));
    assert!(approx(r.total_cogs, 300000.0));
    assert!(approx(r.gross_profit, 300000.0));
    assert!(approx(r.gross_margin_pct, 50.0));
    assert!(approx(r.total_commissions, 60000.0));
    assert!(approx(r.contribution_profit, 240000.0));
    assert!(approx(r.total_overhead, 180000.0));
    assert!(approx(r.total_expenses, 290000.0));
    assert!(approx(r.net_profit, 10000.0));
    assert!(approx(r.cpl, 100.0));
    assert!(approx(r.roi, 12.0));
    assert!(approx(r.owner_take_home, 90000.0));
    assert!(approx(r.nsli, 1200.0));
}

#[test]
fn scenario_rounds_counts_before_revenue() {
    let inputs = ScenarioInputs {
        leads_count: 5.0,
        issue_rate: 0.5,   // 2.5 -> 3 appointments
        closing_rate: 0.5, // 1.5 -> 2 sales
        average_sale: 1000.0,
        ..Default::default()
    };
    let r = calculate_scenario_results(&inputs);
    assert_eq!(r.appointments, 3.0);
    assert_eq!(r.sales, 2.0);
    assert!(approx(r.revenue, 2000.0));
}

#[test]
fn empty_scenario_yields_zeros_not_nan() {
    let r = calculate_scenario_results(&ScenarioInputs::default());
    assert_eq!(r.gross_margin_pct, 0.0);
    assert_eq!(r.net_margin_pct, 0.0);
    assert_eq!(r.cpl, 0.0);
    assert_eq!(r.roi, 0.0);
    assert_eq!(r.nsli, 0.0);
}

#[test]
fn comparison_reports_absolute_and_percent_deltas() {
    let baseline = ScenarioResults {
        revenue: 100000.0,
        ..Default::default()
    };
    let candidate = ScenarioResults {
        revenue: 120000.0,
        ..Default::default()
    };

    let diff = compare_scenarios(&baseline, &candidate);
    assert!(approx(diff.revenue, 20000.0));
    assert!(approx(diff.revenue_pct, 20.0));
}

#[test]
fn comparison_percent_is_zero_for_non_positive_baseline() {
    let baseline = ScenarioResults {
        net_profit: -5000.0,
        gross_profit: 0.0,
        ..Default::default()
    };
    let candidate = ScenarioResults {
        net_profit: 5000.0,
        gross_profit: 1000.0,
        cpl: 50.0,
        ..Default::default()
    };

    let diff = compare_scenarios(&baseline, &candidate);
    assert!(approx(diff.net_profit, 10000.0));
    assert_eq!(diff.net_profit_pct, 0.0);
    assert_eq!(diff.gross_profit_pct, 0.0);
    assert!(approx(diff.cpl, 50.0));
}

// ---------------------------
// Targets
// ---------------------------

#[test]
fn quarters_follow_months() {
    assert_eq!(quarter_of(1), 1);
    assert_eq!(quarter_of(3), 1);
    assert_eq!(quarter_of(4), 2);
    assert_eq!(quarter_of(12), 4);
}

#[test]
fn generated_months_use_curves_and_fallback() {
    let curves = vec![
        SeasonalCurve {
            metric: CurveMetric::Revenue,
            month: 6,
            weight: 0.2,
        },
        SeasonalCurve {
            metric: CurveMetric::Sales,
            month: 6,
            weight: 0.25,
        },
    ];
    let goals = AnnualGoals {
        leads: 1200.0,
        sales: 100.0,
        revenue: 1_000_000.0,
        gross_profit: 400_000.0,
        reviews: 40.0,
        marketing_spend: 60000.0,
    };

    let months = generate_monthly_targets(2025, &goals, &curves);
    assert_eq!(months.len(), 12);

    let june = &months[5];
    assert_eq!(june.month, 6);
    assert_eq!(june.quarter, 2);
    assert_eq!(june.goal.revenue, 200_000.0);
    // gross profit follows the revenue curve, reviews the sales curve
    assert_eq!(june.goal.gross_profit, 80_000.0);
    assert_eq!(june.goal.sales, 25.0);
    assert_eq!(june.goal.reviews, 10.0);
    assert_eq!(june.goal.leads, round_half_up(1200.0 * FALLBACK_WEIGHT));
    assert_eq!(june.goal.marketing_spend, 5000.0);
    assert_eq!(june.goal.appointments, 0.0);

    let january = &months[0];
    assert_eq!(january.goal.revenue, round_half_up(1_000_000.0 / 12.0));
}

#[test]
fn cumulative_rollup_runs_left_to_right() {
    let period = |p: &str, goal: f64, actual: f64| PeriodTotals {
        period: p.to_string(),
        goal: TargetCounters {
            leads: goal,
            ..Default::default()
        },
        actual: TargetCounters {
            leads: actual,
            ..Default::default()
        },
    };

    let rolled = cumulative_rollup(&[
        period("2025-01", 10.0, 8.0),
        period("2025-02", 20.0, 25.0),
        period("2025-03", 30.0, 0.0),
    ]);

    let goals: Vec<f64> = rolled.iter().map(|p| p.goal.leads).collect();
    let actuals: Vec<f64> = rolled.iter().map(|p| p.actual.leads).collect();
    assert_eq!(goals, vec![10.0, 30.0, 60.0]);
    assert_eq!(actuals, vec![8.0, 33.0, 33.0]);
    assert_eq!(rolled[2].period, "2025-03");
}

#[test]
fn safe_div_never_returns_nan() {
    assert_eq!(safe_div(1.0, 0.0), 0.0);
    assert_eq!(safe_div(0.0, 0.0), 0.0);
    assert_eq!(safe_div(1.0, f64::INFINITY), 0.0);
    assert!(approx(safe_div(1.0, 4.0), 0.25));
}

#[test]
fn round_half_up_rounds_halves_up_only() {
    assert_eq!(round_half_up(2.5), 3.0);
    assert_eq!(round_half_up(2.4999), 2.0);
    assert_eq!(round_half_up(-2.5), -2.0);
    assert_eq!(round_half_up(0.49999999999999994), 0.0);
    assert_eq!(round_half_up(f64::NAN), 0.0);
}

// ---------------------------
// Calendar
// ---------------------------

#[test]
fn multi_day_job_occupies_every_day_of_its_span() {
    let jobs = vec![scheduled(1, "2025-06-10", Some("2025-06-12"))];

    for day in ["2025-06-10", "2025-06-11", "2025-06-12"] {
        assert_eq!(jobs_on_date(&jobs, d(day)).len(), 1, "{day}");
    }
    for day in ["2025-06-09", "2025-06-13"] {
        assert!(jobs_on_date(&jobs, d(day)).is_empty(), "{day}");
    }
}

#[test]
fn single_day_job_without_end_date() {
    let jobs = vec![scheduled(1, "2025-06-10", None)];
    assert_eq!(jobs_on_date(&jobs, d("2025-06-10")).len(), 1);
    assert!(jobs_on_date(&jobs, d("2025-06-11")).is_empty());
}

#[test]
fn month_grid_is_whole_sunday_weeks() {
    let jobs = vec![scheduled(1, "2025-06-10", Some("2025-06-12"))];
    let cells = month_cells(&jobs, 2025, 6);

    // June 2025 starts on a Sunday and ends on a Monday
    assert_eq!(cells.len() % 7, 0);
    assert_eq!(cells[0].date, d("2025-06-01"));
    assert_eq!(cells.last().map(|c| c.date), Some(d("2025-07-05")));
    assert!(!cells.last().map(|c| c.in_month).unwrap_or(true));

    let busy: Vec<NaiveDate> = cells.iter().filter(|c| !c.jobs.is_empty()).map(|c| c.date).collect();
    assert_eq!(busy, vec![d("2025-06-10"), d("2025-06-11"), d("2025-06-12")]);
}

#[test]
fn week_cells_cover_sunday_to_saturday() {
    let cells = week_cells(&[], d("2025-06-11"));
    assert_eq!(cells.len(), 7);
    assert_eq!(cells[0].date, d("2025-06-08"));
    assert_eq!(cells[6].date, d("2025-06-14"));
}

#[test]
fn filters_by_status_subcontractor_and_period() {
    let today = d("2025-06-11");

    let mut a = scheduled(1, "2025-06-12", None);
    a.subcontractor_id = Some("crew-a".into());
    let mut b = scheduled(2, "2025-07-03", None);
    b.status = JobStatus::Completed;
    let mut c = Job::new("acme", "no date");
    c.id = 3;

    let jobs = vec![a, b, c];

    let this_week = JobFilter {
        period: SchedulePeriod::ThisWeek,
        ..Default::default()
    };
    let ids: Vec<i64> = filter_jobs(&jobs, &this_week, today).iter().map(|j| j.id).collect();
    assert_eq!(ids, vec![1, 3]);

    let next_month = JobFilter {
        period: SchedulePeriod::NextMonth,
        ..Default::default()
    };
    let ids: Vec<i64> = filter_jobs(&jobs, &next_month, today).iter().map(|j| j.id).collect();
    assert_eq!(ids, vec![2, 3]);

    let completed = JobFilter {
        statuses: Some(vec![JobStatus::Completed]),
        ..Default::default()
    };
    let ids: Vec<i64> = filter_jobs(&jobs, &completed, today).iter().map(|j| j.id).collect();
    assert_eq!(ids, vec![2]);

    let crew = JobFilter {
        subcontractor_id: Some("crew-a".into()),
        ..Default::default()
    };
    let ids: Vec<i64> = filter_jobs(&jobs, &crew, today).iter().map(|j| j.id).collect();
    assert_eq!(ids, vec![1]);
}

#[test]
fn period_windows_start_today() {
    let today = d("2025-06-11");
    let jobs = vec![
        scheduled(1, "2025-06-09", None),
        scheduled(2, "2025-06-14", None),
        scheduled(3, "2025-06-30", None),
        scheduled(4, "2025-07-01", None),
    ];

    let ids_for = |period: SchedulePeriod| -> Vec<i64> {
        let filter = JobFilter {
            period,
            ..Default::default()
        };
        filter_jobs(&jobs, &filter, today).iter().map(|j| j.id).collect()
    };

    // earlier days of the current week are already past
    assert_eq!(ids_for(SchedulePeriod::ThisWeek), vec![2]);
    assert_eq!(ids_for(SchedulePeriod::ThisMonth), vec![2, 3]);
    assert_eq!(ids_for(SchedulePeriod::NextMonth), vec![4]);
    assert_eq!(ids_for(SchedulePeriod::All), vec![1, 2, 3, 4]);
}

#[test]
fn map_needs_coordinates_and_start_date() {
    let mut pinned = scheduled(1, "2025-06-12", None);
    pinned.latitude = Some(40.7);
    pinned.longitude = Some(-74.0);
    let mut no_date = Job::new("acme", "no date");
    no_date.latitude = Some(40.7);
    no_date.longitude = Some(-74.0);
    let no_coords = scheduled(3, "2025-06-12", None);

    let jobs = [&pinned, &no_date, &no_coords];
    let pins = mappable_jobs(&jobs);
    assert_eq!(pins.len(), 1);
    assert_eq!(pins[0].id, 1);
}
