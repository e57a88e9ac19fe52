use chrono::NaiveDate;
use paintledger::core::calculator::calendar::JobFilter;
use paintledger::core::job::JobLogic;
use paintledger::core::scenario::ScenarioLogic;
use paintledger::core::schedule::ScheduleLogic;
use paintledger::core::settings::SettingsLogic;
use paintledger::core::targets::TargetLogic;
use paintledger::core::time_entry::TimeEntryLogic;
use paintledger::db::queries::scenarios::count_baselines;
use paintledger::db::queries::targets::count_monthly;
use paintledger::errors::AppError;
use paintledger::models::job::JobPatch;
use paintledger::models::job_status::JobStatus;
use paintledger::models::profit_flag::ProfitFlag;
use paintledger::models::scenario::ScenarioPatch;
use paintledger::models::settings::SettingsPatch;
use paintledger::models::target::{AnnualGoals, CounterField, CurveMetric};
use paintledger::models::time_entry::TimeEntry;

mod common;
use common::{ORG, approx, memory_pool};

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn valued(value: f64) -> JobPatch {
    JobPatch {
        job_value: Some(value),
        ..Default::default()
    }
}

fn named(name: &str, leads: f64) -> ScenarioPatch {
    ScenarioPatch {
        name: Some(name.to_string()),
        leads_count: Some(leads),
        issue_rate: Some(0.5),
        closing_rate: Some(0.3),
        average_sale: Some(8000.0),
        ..Default::default()
    }
}

fn entry(employee: &str, job_id: i64, date: &str, hours: f64) -> TimeEntry {
    TimeEntry {
        id: 0,
        organization_id: ORG.to_string(),
        employee_id: employee.to_string(),
        job_id,
        date: d(date),
        hours,
        hourly_rate: 25.0,
        notes: String::new(),
    }
}

// ---------------------------
// Jobs
// ---------------------------

#[test]
fn created_job_is_persisted_with_derived_fields() {
    let mut pool = memory_pool();
    let job = JobLogic::create(&mut pool, ORG, "Smith", &valued(10000.0)).unwrap();

    let stored = JobLogic::get(&pool.conn, ORG, job.id).unwrap();
    assert_eq!(stored.customer_name, "Smith");
    assert_eq!(stored.status, JobStatus::Lead);
    assert!(approx(stored.gross_profit, 4000.0));
    assert!(approx(stored.deposit_required, 3000.0));
    assert_eq!(stored.profit_flag, ProfitFlag::Ok);
}

#[test]
fn job_update_recomputes_commissions_and_flags() {
    let mut pool = memory_pool();
    let patch = JobPatch {
        job_value: Some(10000.0),
        sales_commission_pct: Some(10.0),
        ..Default::default()
    };
    let job = JobLogic::create(&mut pool, ORG, "Smith", &patch).unwrap();
    assert!(approx(job.sales_commission_amount, 1000.0));

    let updated = JobLogic::update(&mut pool, ORG, job.id, &valued(12000.0)).unwrap();
    assert!(approx(updated.sales_commission_amount, 1200.0));
    assert!(approx(updated.sales_commission_pct, 10.0));

    let small = JobLogic::update(&mut pool, ORG, job.id, &valued(1000.0)).unwrap();
    assert_eq!(small.profit_flag, ProfitFlag::RaisePrice);
}

#[test]
fn payment_date_sets_days_to_collect() {
    let mut pool = memory_pool();
    let job = JobLogic::create(&mut pool, ORG, "Smith", &valued(5000.0)).unwrap();

    let invoiced = JobPatch {
        invoice_date: Some(Some(d("2025-06-01"))),
        ..Default::default()
    };
    let job = JobLogic::update(&mut pool, ORG, job.id, &invoiced).unwrap();
    assert_eq!(job.days_to_collect, None);

    let paid = JobPatch {
        payment_received_date: Some(d("2025-06-15")),
        job_paid: Some(true),
        ..Default::default()
    };
    let job = JobLogic::update(&mut pool, ORG, job.id, &paid).unwrap();
    assert_eq!(job.days_to_collect, Some(14));
    assert!(job.job_paid);
}

#[test]
fn update_can_clear_nullable_fields() {
    let mut pool = memory_pool();
    let placed = JobPatch {
        job_value: Some(5000.0),
        scheduled_start_date: Some(d("2025-06-10")),
        scheduled_end_date: Some(Some(d("2025-06-12"))),
        subcontractor_id: Some(Some("crew-a".into())),
        latitude: Some(Some(40.7)),
        longitude: Some(Some(-74.0)),
        invoice_date: Some(Some(d("2025-06-01"))),
        payment_received_date: Some(d("2025-06-15")),
        ..Default::default()
    };
    let job = JobLogic::create(&mut pool, ORG, "Smith", &placed).unwrap();
    assert_eq!(job.days_to_collect, Some(14));

    let unassigned = JobPatch {
        scheduled_end_date: Some(None),
        subcontractor_id: Some(None),
        latitude: Some(None),
        longitude: Some(None),
        invoice_date: Some(None),
        ..Default::default()
    };
    JobLogic::update(&mut pool, ORG, job.id, &unassigned).unwrap();

    let job = JobLogic::get(&pool.conn, ORG, job.id).unwrap();
    assert_eq!(job.scheduled_start_date, Some(d("2025-06-10")));
    assert_eq!(job.scheduled_end_date, None);
    assert_eq!(job.subcontractor_id, None);
    assert_eq!((job.latitude, job.longitude), (None, None));
    assert_eq!(job.invoice_date, None);
    assert_eq!(job.days_to_collect, None);
    assert!(approx(job.job_value, 5000.0));

    let crew = JobFilter {
        subcontractor_id: Some("crew-a".into()),
        ..Default::default()
    };
    assert!(JobLogic::list(&pool.conn, ORG, &crew, d("2025-06-01")).unwrap().is_empty());
}

#[test]
fn invalid_job_input_is_rejected_and_nothing_is_written() {
    let mut pool = memory_pool();

    let err = JobLogic::create(&mut pool, ORG, "Smith", &valued(-1.0)).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = JobLogic::create(&mut pool, ORG, "   ", &valued(100.0)).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let backwards = JobPatch {
        scheduled_start_date: Some(d("2025-06-12")),
        scheduled_end_date: Some(Some(d("2025-06-10"))),
        ..Default::default()
    };
    let err = JobLogic::create(&mut pool, ORG, "Smith", &backwards).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let jobs = JobLogic::list(&pool.conn, ORG, &JobFilter::default(), d("2025-06-01")).unwrap();
    assert!(jobs.is_empty());
}

#[test]
fn missing_job_is_not_found() {
    let mut pool = memory_pool();
    assert!(matches!(JobLogic::get(&pool.conn, ORG, 42), Err(AppError::NotFound(_))));
    assert!(matches!(
        JobLogic::update(&mut pool, ORG, 42, &valued(1.0)),
        Err(AppError::NotFound(_))
    ));
}

#[test]
fn jobs_are_scoped_by_organization() {
    let mut pool = memory_pool();
    let job = JobLogic::create(&mut pool, ORG, "Smith", &valued(1000.0)).unwrap();

    assert!(matches!(JobLogic::get(&pool.conn, "other", job.id), Err(AppError::NotFound(_))));
    let other = JobLogic::list(&pool.conn, "other", &JobFilter::default(), d("2025-06-01")).unwrap();
    assert!(other.is_empty());
}

#[test]
fn schedule_window_returns_overlapping_jobs() {
    let mut pool = memory_pool();
    let june = JobPatch {
        scheduled_start_date: Some(d("2025-05-30")),
        scheduled_end_date: Some(Some(d("2025-06-02"))),
        ..Default::default()
    };
    let july = JobPatch {
        scheduled_start_date: Some(d("2025-07-10")),
        ..Default::default()
    };
    JobLogic::create(&mut pool, ORG, "Spans months", &june).unwrap();
    JobLogic::create(&mut pool, ORG, "Later", &july).unwrap();

    let (from, to) = ScheduleLogic::month_window(2025, 6).unwrap();
    let jobs = ScheduleLogic::jobs_in_window(&pool.conn, ORG, from, to, &JobFilter::default()).unwrap();
    let names: Vec<&str> = jobs.iter().map(|j| j.customer_name.as_str()).collect();
    assert_eq!(names, vec!["Spans months"]);

    assert!(ScheduleLogic::month_window(2025, 13).is_err());
}

// ---------------------------
// Settings
// ---------------------------

#[test]
fn settings_default_until_updated() {
    let mut pool = memory_pool();
    let s = SettingsLogic::load(&pool.conn, ORG).unwrap();
    assert!(approx(s.sub_payout_pct, 60.0));
    assert!(approx(s.min_gross_profit_per_job, 900.0));

    let patch = SettingsPatch {
        min_gross_profit_per_job: Some(5000.0),
        ..Default::default()
    };
    let s = SettingsLogic::update(&mut pool, ORG, &patch).unwrap();
    assert!(approx(s.min_gross_profit_per_job, 5000.0));
    assert!(approx(s.target_gross_margin_pct, 40.0));

    // new jobs are priced against the stored settings
    let job = JobLogic::create(&mut pool, ORG, "Smith", &valued(10000.0)).unwrap();
    assert_eq!(job.profit_flag, ProfitFlag::RaisePrice);

    // other organizations keep the defaults
    let other = SettingsLogic::load(&pool.conn, "other").unwrap();
    assert!(approx(other.min_gross_profit_per_job, 900.0));
}

#[test]
fn settings_reject_out_of_range_percentages() {
    let mut pool = memory_pool();
    let patch = SettingsPatch {
        default_deposit_pct: Some(150.0),
        ..Default::default()
    };
    assert!(matches!(
        SettingsLogic::update(&mut pool, ORG, &patch),
        Err(AppError::Validation(_))
    ));
}

// ---------------------------
// Scenarios
// ---------------------------

#[test]
fn at_most_one_baseline_per_organization() {
    let mut pool = memory_pool();

    let mut first = named("Current", 500.0);
    first.is_baseline = Some(true);
    let a = ScenarioLogic::create(&mut pool, ORG, &first).unwrap();

    let mut second = named("Growth", 700.0);
    second.is_baseline = Some(true);
    let b = ScenarioLogic::create(&mut pool, ORG, &second).unwrap();

    assert_eq!(count_baselines(&pool.conn, ORG).unwrap(), 1);
    assert!(!ScenarioLogic::get(&pool.conn, ORG, a.id).unwrap().is_baseline);
    assert!(ScenarioLogic::get(&pool.conn, ORG, b.id).unwrap().is_baseline);

    let flip = ScenarioPatch {
        is_baseline: Some(true),
        ..Default::default()
    };
    ScenarioLogic::update(&mut pool, ORG, a.id, &flip).unwrap();
    assert_eq!(count_baselines(&pool.conn, ORG).unwrap(), 1);
    assert!(ScenarioLogic::get(&pool.conn, ORG, a.id).unwrap().is_baseline);
}

#[test]
fn scenario_update_bumps_version_and_results() {
    let mut pool = memory_pool();
    let s = ScenarioLogic::create(&mut pool, ORG, &named("Current", 500.0)).unwrap();
    assert_eq!(s.version, 1);
    assert!(approx(s.results.revenue, 600000.0));

    let more_leads = ScenarioPatch {
        leads_count: Some(1000.0),
        ..Default::default()
    };
    let s = ScenarioLogic::update(&mut pool, ORG, s.id, &more_leads).unwrap();
    assert_eq!(s.version, 2);
    assert!(approx(s.results.revenue, 1_200_000.0));

    let stored = ScenarioLogic::get(&pool.conn, ORG, s.id).unwrap();
    assert_eq!(stored.version, 2);
    assert!(approx(stored.results.revenue, 1_200_000.0));
}

#[test]
fn compare_against_current_baseline() {
    let mut pool = memory_pool();
    let mut base = named("Current", 500.0);
    base.is_baseline = Some(true);
    let base = ScenarioLogic::create(&mut pool, ORG, &base).unwrap();
    let candidate = ScenarioLogic::create(&mut pool, ORG, &named("Growth", 600.0)).unwrap();

    let report = ScenarioLogic::compare(&pool.conn, ORG, None, candidate.id).unwrap();
    assert_eq!(report.baseline.id, base.id);
    // 300 appts -> 90 sales vs 250 -> 75
    assert!(approx(report.differences.revenue, 120000.0));
    assert!(approx(report.differences.revenue_pct, 20.0));
}

#[test]
fn compare_without_baseline_is_not_found() {
    let mut pool = memory_pool();
    let s = ScenarioLogic::create(&mut pool, ORG, &named("Only", 100.0)).unwrap();
    assert!(matches!(
        ScenarioLogic::compare(&pool.conn, ORG, None, s.id),
        Err(AppError::NotFound(_))
    ));
}

#[test]
fn scenario_validation_and_delete() {
    let mut pool = memory_pool();

    let mut bad = named("Bad", 100.0);
    bad.closing_rate = Some(1.5);
    assert!(matches!(
        ScenarioLogic::create(&mut pool, ORG, &bad),
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        ScenarioLogic::create(&mut pool, ORG, &ScenarioPatch::default()),
        Err(AppError::Validation(_))
    ));

    let s = ScenarioLogic::create(&mut pool, ORG, &named("Temp", 100.0)).unwrap();
    ScenarioLogic::delete(&mut pool, ORG, s.id).unwrap();
    assert!(matches!(ScenarioLogic::get(&pool.conn, ORG, s.id), Err(AppError::NotFound(_))));
    assert!(matches!(
        ScenarioLogic::delete(&mut pool, ORG, s.id),
        Err(AppError::NotFound(_))
    ));
}

// ---------------------------
// Targets
// ---------------------------

fn goals() -> AnnualGoals {
    AnnualGoals {
        leads: 1200.0,
        sales: 120.0,
        revenue: 1_200_000.0,
        gross_profit: 480_000.0,
        reviews: 60.0,
        marketing_spend: 60000.0,
    }
}

#[test]
fn generate_requires_curves() {
    let mut pool = memory_pool();
    assert!(matches!(
        TargetLogic::generate(&mut pool, ORG, 2025, &goals()),
        Err(AppError::NotFound(_))
    ));
    assert_eq!(count_monthly(&pool.conn, ORG, 2025).unwrap(), 0);
}

#[test]
fn generate_is_idempotent_and_keeps_actuals() {
    let mut pool = memory_pool();
    TargetLogic::set_curve(&mut pool, ORG, CurveMetric::Revenue, &[(6, 0.2), (7, 0.2)]).unwrap();

    TargetLogic::generate(&mut pool, ORG, 2025, &goals()).unwrap();
    TargetLogic::record_actual(&mut pool, ORG, 2025, 6, CounterField::Revenue, 150_000.0).unwrap();
    TargetLogic::generate(&mut pool, ORG, 2025, &goals()).unwrap();

    assert_eq!(count_monthly(&pool.conn, ORG, 2025).unwrap(), 12);

    let months = TargetLogic::year(&pool.conn, ORG, 2025).unwrap();
    assert_eq!(months.len(), 12);
    let june = months.iter().find(|m| m.month == 6).unwrap();
    assert!(approx(june.goal.revenue, 240_000.0));
    assert!(approx(june.actual.revenue, 150_000.0));
    assert_eq!(june.quarter, 2);

    let (goal, actual) = TargetLogic::yearly_aggregate(&pool.conn, ORG, 2025).unwrap();
    assert!(approx(actual.revenue, 150_000.0));
    assert!(goal.marketing_spend > 0.0);
}

#[test]
fn curve_rejects_bad_month_and_weight() {
    let mut pool = memory_pool();
    assert!(matches!(
        TargetLogic::set_curve(&mut pool, ORG, CurveMetric::Leads, &[(13, 0.1)]),
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        TargetLogic::set_curve(&mut pool, ORG, CurveMetric::Leads, &[(1, -0.1)]),
        Err(AppError::Validation(_))
    ));
    assert!(TargetLogic::curves(&pool.conn, ORG).unwrap().is_empty());
}

#[test]
fn daily_rollup_accumulates() {
    let mut pool = memory_pool();
    TargetLogic::set_daily(&mut pool, ORG, d("2025-06-01"), CounterField::Leads, false, 5.0).unwrap();
    TargetLogic::set_daily(&mut pool, ORG, d("2025-06-01"), CounterField::Leads, true, 4.0).unwrap();
    TargetLogic::set_daily(&mut pool, ORG, d("2025-06-02"), CounterField::Leads, false, 5.0).unwrap();
    TargetLogic::set_daily(&mut pool, ORG, d("2025-06-02"), CounterField::Leads, true, 7.0).unwrap();

    let rolled = TargetLogic::daily_rollup(&pool.conn, ORG, d("2025-06-01"), d("2025-06-30")).unwrap();
    assert_eq!(rolled.len(), 2);
    assert!(approx(rolled[1].goal.leads, 10.0));
    assert!(approx(rolled[1].actual.leads, 11.0));

    assert!(matches!(
        TargetLogic::daily_rollup(&pool.conn, ORG, d("2025-06-30"), d("2025-06-01")),
        Err(AppError::InvalidDate(_))
    ));
}

// ---------------------------
// Time entries
// ---------------------------

#[test]
fn time_entry_same_key_replaces_hours() {
    let mut pool = memory_pool();
    let job = JobLogic::create(&mut pool, ORG, "Smith", &valued(10000.0)).unwrap();

    let first = TimeEntryLogic::log(&mut pool, entry("maria", job.id, "2025-06-10", 6.0)).unwrap();
    let second = TimeEntryLogic::log(&mut pool, entry("maria", job.id, "2025-06-10", 8.0)).unwrap();
    assert_eq!(first.id, second.id);

    TimeEntryLogic::log(&mut pool, entry("maria", job.id, "2025-06-11", 4.0)).unwrap();
    TimeEntryLogic::log(&mut pool, entry("li", job.id, "2025-06-11", 5.0)).unwrap();

    let entries = TimeEntryLogic::entries(&pool.conn, ORG, d("2025-06-10"), d("2025-06-10")).unwrap();
    assert_eq!(entries.len(), 1);
    assert!(approx(entries[0].hours, 8.0));

    let payroll = TimeEntryLogic::payroll(&pool.conn, ORG, d("2025-06-01"), d("2025-06-30")).unwrap();
    let maria = payroll.iter().find(|l| l.employee_id == "maria").unwrap();
    assert_eq!(maria.entries, 2);
    assert!(approx(maria.hours, 12.0));
    assert!(approx(maria.amount, 300.0));
    assert_eq!(payroll.len(), 2);
}

#[test]
fn time_entry_for_unknown_job_is_not_found() {
    let mut pool = memory_pool();
    assert!(matches!(
        TimeEntryLogic::log(&mut pool, entry("maria", 99, "2025-06-10", 6.0)),
        Err(AppError::NotFound(_))
    ));
}

#[test]
fn time_entry_rejects_impossible_hours() {
    let mut pool = memory_pool();
    let job = JobLogic::create(&mut pool, ORG, "Smith", &valued(10000.0)).unwrap();
    assert!(matches!(
        TimeEntryLogic::log(&mut pool, entry("maria", job.id, "2025-06-10", 25.0)),
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        TimeEntryLogic::log(&mut pool, entry("", job.id, "2025-06-10", 2.0)),
        Err(AppError::Validation(_))
    ));
}
