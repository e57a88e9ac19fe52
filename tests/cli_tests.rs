use predicates::prelude::*;
use predicates::str::contains;
use std::fs;

mod common;
use common::{init_db_with_jobs, pl, pl_db, setup_test_db, temp_out};

// ---------------------------
// init / jobs
// ---------------------------

#[test]
fn test_init_creates_database() {
    let db = setup_test_db("cli_init");

    pl_db(&db)
        .arg("init")
        .assert()
        .success()
        .stdout(contains("Database initialized at"))
        .stdout(contains("initialization completed"));

    assert!(std::path::Path::new(&db).exists());
}

#[test]
fn test_job_add_reports_profit_flag() {
    let db = setup_test_db("cli_job_add");
    pl_db(&db).arg("init").assert().success();

    pl_db(&db)
        .args(["job", "add", "Smith", "--value", "10000"])
        .assert()
        .success()
        .stdout(contains("Job #1 created for Smith ($10,000.00, OK)"));

    pl_db(&db)
        .args(["job", "add", "Jones", "--value", "1500"])
        .assert()
        .success()
        .stdout(contains("RAISE_PRICE"));
}

#[test]
fn test_job_add_rejects_negative_value() {
    let db = setup_test_db("cli_job_negative");
    pl_db(&db).arg("init").assert().success();

    pl_db(&db)
        .args(["job", "add", "Smith", "--value", "-10"])
        .assert()
        .failure()
        .stderr(contains("Invalid value"));
}

#[test]
fn test_job_add_rejects_unknown_status() {
    let db = setup_test_db("cli_job_status");
    pl_db(&db).arg("init").assert().success();

    pl_db(&db)
        .args(["job", "add", "Smith", "--value", "100", "--status", "paused"])
        .assert()
        .failure()
        .stderr(contains("invalid status"));
}

#[test]
fn test_job_show_details_and_json() {
    let db = setup_test_db("cli_job_show");
    init_db_with_jobs(&db);

    pl_db(&db)
        .args(["job", "show", "1"])
        .assert()
        .success()
        .stdout(contains("Job #1: Smith"))
        .stdout(contains("$4,000.00"))
        .stdout(contains("$3,000.00"))
        .stdout(contains("$7,000.00"));

    let out = pl_db(&db)
        .args(["job", "show", "1", "--json"])
        .output()
        .expect("run job show --json");
    assert!(out.status.success());

    let v: serde_json::Value = serde_json::from_slice(&out.stdout).expect("valid json");
    assert_eq!(v["customer_name"], "Smith");
    assert_eq!(v["job_value"].as_f64(), Some(10000.0));
    assert_eq!(v["subcontractor_price"].as_f64(), Some(6000.0));
    assert_eq!(v["profit_flag"], "OK");
}

#[test]
fn test_job_show_missing_fails() {
    let db = setup_test_db("cli_job_missing");
    pl_db(&db).arg("init").assert().success();

    pl_db(&db)
        .args(["job", "show", "99"])
        .assert()
        .failure()
        .stderr(contains("Not found"));
}

#[test]
fn test_job_update_recomputes_commission() {
    let db = setup_test_db("cli_job_update");
    pl_db(&db).arg("init").assert().success();
    pl_db(&db)
        .args(["job", "add", "Smith", "--value", "10000", "--sales-pct", "10"])
        .assert()
        .success();

    pl_db(&db)
        .args(["job", "update", "1", "--value", "12000", "--status", "completed"])
        .assert()
        .success()
        .stdout(contains("Job #1 updated: completed"));

    pl_db(&db)
        .args(["job", "show", "1"])
        .assert()
        .success()
        .stdout(contains("$1,200.00 (10.0%)"));
}

#[test]
fn test_job_list_filters_by_status() {
    let db = setup_test_db("cli_job_list");
    init_db_with_jobs(&db);

    pl_db(&db)
        .args(["job", "list"])
        .assert()
        .success()
        .stdout(contains("Smith"))
        .stdout(contains("Jones"))
        .stdout(contains("Brown"))
        .stdout(contains("3 job(s)"));

    pl_db(&db)
        .args(["job", "list", "--status", "scheduled,completed"])
        .assert()
        .success()
        .stdout(contains("Smith"))
        .stdout(contains("Jones").not());
}

#[test]
fn test_job_calendar_month_spans_days() {
    let db = setup_test_db("cli_calendar");
    init_db_with_jobs(&db);

    pl_db(&db)
        .args(["job", "calendar", "--month", "2025-06"])
        .assert()
        .success()
        .stdout(contains("June 2025"))
        .stdout(contains("2025-06-10  #1 Smith"))
        .stdout(contains("2025-06-11  #1 Smith"))
        .stdout(contains("2025-06-12  #1 Smith"))
        .stdout(contains("2025-06-13  #1").not())
        .stdout(contains("Jones").not());

    pl_db(&db)
        .args(["job", "calendar", "--week", "2025-07-02"])
        .assert()
        .success()
        .stdout(contains("Week 2025-06-29"))
        .stdout(contains("2025-07-02  #2 Jones"));
}

#[test]
fn test_job_calendar_rejects_bad_month() {
    let db = setup_test_db("cli_calendar_bad");
    pl_db(&db).arg("init").assert().success();

    pl_db(&db)
        .args(["job", "calendar", "--month", "2025-13"])
        .assert()
        .failure()
        .stderr(contains("Invalid date"));
}

#[test]
fn test_job_map_lists_only_pinned_jobs() {
    let db = setup_test_db("cli_map");
    init_db_with_jobs(&db);

    pl_db(&db)
        .args(["job", "map", "--sub", "crew-a"])
        .assert()
        .success()
        .stdout(contains("Smith"))
        .stdout(contains("40.71280"))
        .stdout(contains("Brown").not());
}

#[test]
fn test_job_update_clear_unassigns_crew() {
    let db = setup_test_db("cli_job_clear");
    init_db_with_jobs(&db);

    pl_db(&db)
        .args(["job", "update", "1", "--clear", "sub,location"])
        .assert()
        .success();

    pl_db(&db)
        .args(["job", "map", "--sub", "crew-a"])
        .assert()
        .success()
        .stdout(contains("Smith").not());

    pl_db(&db)
        .args(["job", "update", "1", "--clear", "sub", "--sub", "crew-b"])
        .assert()
        .failure()
        .stderr(contains("both set and cleared"));

    pl_db(&db)
        .args(["job", "update", "1", "--clear", "price"])
        .assert()
        .failure()
        .stderr(contains("cannot clear 'price'"));
}

// ---------------------------
// settings
// ---------------------------

#[test]
fn test_settings_show_and_update() {
    let db = setup_test_db("cli_settings");
    pl_db(&db).arg("init").assert().success();

    pl_db(&db)
        .args(["settings", "--show"])
        .assert()
        .success()
        .stdout(contains("60.0%"))
        .stdout(contains("$900.00"));

    pl_db(&db)
        .args(["settings", "--min-gross-profit", "5000"])
        .assert()
        .success()
        .stdout(contains("Settings updated."))
        .stdout(contains("$5,000.00"));

    pl_db(&db)
        .args(["job", "add", "Smith", "--value", "10000"])
        .assert()
        .success()
        .stdout(contains("RAISE_PRICE"));

    pl_db(&db)
        .args(["settings", "--deposit-pct", "120"])
        .assert()
        .failure();
}

#[test]
fn test_db_recalc_applies_new_settings() {
    let db = setup_test_db("cli_recalc");
    init_db_with_jobs(&db);

    pl_db(&db)
        .args(["settings", "--target-margin-pct", "50"])
        .assert()
        .success();

    pl_db(&db)
        .args(["db", "--recalc"])
        .assert()
        .success()
        .stdout(contains("3 job(s) updated"));

    pl_db(&db)
        .args(["job", "show", "1"])
        .assert()
        .success()
        .stdout(contains("FIX_SCOPE"));
}

#[test]
fn test_db_info_and_check() {
    let db = setup_test_db("cli_db_info");
    init_db_with_jobs(&db);

    pl_db(&db)
        .args(["db", "--info", "--check"])
        .assert()
        .success()
        .stdout(contains("Jobs:"))
        .stdout(contains("2025-06-10"))
        .stdout(contains("Integrity check passed"));
}

// ---------------------------
// scenarios
// ---------------------------

fn add_scenario(db: &str, name: &str, leads: &str, baseline: bool) {
    let mut cmd = pl_db(db);
    cmd.args([
        "scenario",
        "add",
        name,
        "--leads",
        leads,
        "--issue-rate",
        "0.5",
        "--closing-rate",
        "0.3",
        "--average-sale",
        "8000",
    ]);
    if baseline {
        cmd.arg("--baseline");
    }
    cmd.assert().success();
}

#[test]
fn test_scenario_compare_against_baseline() {
    let db = setup_test_db("cli_scenario");
    pl_db(&db).arg("init").assert().success();

    add_scenario(&db, "Current", "500", true);
    add_scenario(&db, "Growth", "600", false);

    pl_db(&db)
        .args(["scenario", "list"])
        .assert()
        .success()
        .stdout(contains("Current"))
        .stdout(contains("Growth"));

    pl_db(&db)
        .args(["scenario", "compare", "2"])
        .assert()
        .success()
        .stdout(contains("'Growth' vs baseline 'Current'"))
        .stdout(contains("+120,000.00 (+20.0%)"));
}

#[test]
fn test_scenario_baseline_moves_on_update() {
    let db = setup_test_db("cli_scenario_baseline");
    pl_db(&db).arg("init").assert().success();

    add_scenario(&db, "Current", "500", true);
    add_scenario(&db, "Growth", "600", false);

    pl_db(&db)
        .args(["scenario", "update", "2", "--baseline", "true"])
        .assert()
        .success()
        .stdout(contains("updated to v2"));

    pl_db(&db)
        .args(["scenario", "show", "2"])
        .assert()
        .success()
        .stdout(contains("[baseline]"));

    pl_db(&db)
        .args(["scenario", "show", "1"])
        .assert()
        .success()
        .stdout(contains("[baseline]").not());
}

#[test]
fn test_scenario_delete() {
    let db = setup_test_db("cli_scenario_delete");
    pl_db(&db).arg("init").assert().success();
    add_scenario(&db, "Temp", "100", false);

    pl_db(&db)
        .args(["scenario", "delete", "1"])
        .assert()
        .success()
        .stdout(contains("Scenario #1 deleted."));

    pl_db(&db)
        .args(["scenario", "delete", "1"])
        .assert()
        .failure()
        .stderr(contains("Not found"));
}

#[test]
fn test_scenario_rejects_rate_above_one() {
    let db = setup_test_db("cli_scenario_rate");
    pl_db(&db).arg("init").assert().success();

    pl_db(&db)
        .args(["scenario", "add", "Bad", "--closing-rate", "30"])
        .assert()
        .failure()
        .stderr(contains("closing_rate"));
}

// ---------------------------
// targets
// ---------------------------

#[test]
fn test_targets_generate_and_year() {
    let db = setup_test_db("cli_targets");
    pl_db(&db).arg("init").assert().success();

    pl_db(&db)
        .args(["targets", "generate", "2025", "--revenue", "1200000"])
        .assert()
        .failure()
        .stderr(contains("seasonal curves"));

    pl_db(&db)
        .args(["targets", "curve", "revenue", "--month", "6", "--weight", "0.2"])
        .assert()
        .success()
        .stdout(contains("1 weight(s) stored for revenue"))
        .stdout(contains("June"));

    pl_db(&db)
        .args(["targets", "generate", "2025", "--revenue", "1200000", "--leads", "1200"])
        .assert()
        .success()
        .stdout(contains("Monthly targets generated for 2025"))
        .stdout(contains("$240,000.00"))
        .stdout(contains("$100,000.00"));

    pl_db(&db)
        .args(["targets", "actual", "2025", "6", "revenue", "150000"])
        .assert()
        .success();

    pl_db(&db)
        .args(["targets", "year", "2025"])
        .assert()
        .success()
        .stdout(contains("Q2 June"))
        .stdout(contains("Total"))
        .stdout(contains("$150,000.00"));
}

#[test]
fn test_targets_curve_needs_twelve_weights() {
    let db = setup_test_db("cli_targets_curve");
    pl_db(&db).arg("init").assert().success();

    pl_db(&db)
        .args(["targets", "curve", "leads", "--weights", "0.5,0.5"])
        .assert()
        .failure()
        .stderr(contains("12 values"));
}

#[test]
fn test_targets_daily_rollup() {
    let db = setup_test_db("cli_targets_daily");
    pl_db(&db).arg("init").assert().success();

    pl_db(&db)
        .args(["targets", "daily", "2025-06-01", "leads", "5", "--goal"])
        .assert()
        .success();
    pl_db(&db)
        .args(["targets", "daily", "2025-06-01", "leads", "4"])
        .assert()
        .success()
        .stdout(contains("leads actual set to 4"));

    pl_db(&db)
        .args(["targets", "rollup", "--range", "2025-06"])
        .assert()
        .success()
        .stdout(contains("Daily cumulative 2025-06-01"));
}

// ---------------------------
// time entries
// ---------------------------

#[test]
fn test_time_log_and_payroll() {
    let db = setup_test_db("cli_time");
    init_db_with_jobs(&db);

    pl_db(&db)
        .args(["time", "log", "maria", "1", "--hours", "6", "--rate", "25", "--date", "2025-06-10"])
        .assert()
        .success()
        .stdout(contains("maria logged 6.00h on job #1 for 2025-06-10 ($150.00)"));

    // same employee, job and day replaces the hours
    pl_db(&db)
        .args(["time", "log", "maria", "1", "--hours", "8", "--rate", "25", "--date", "2025-06-10"])
        .assert()
        .success();

    pl_db(&db)
        .args(["time", "payroll", "--range", "2025-06", "--details"])
        .assert()
        .success()
        .stdout(contains("maria"))
        .stdout(contains("8.00"))
        .stdout(contains("$200.00"))
        .stdout(contains("$150.00").not());

    pl_db(&db)
        .args(["time", "log", "maria", "99", "--hours", "1", "--date", "2025-06-10"])
        .assert()
        .failure()
        .stderr(contains("job #99"));
}

// ---------------------------
// export / backup / log
// ---------------------------

#[test]
fn test_export_csv_json_xlsx() {
    let db = setup_test_db("cli_export");
    init_db_with_jobs(&db);

    let csv = temp_out("cli_export_jobs", "csv");
    pl_db(&db)
        .args(["export", "--format", "csv", "--file", &csv, "--force"])
        .assert()
        .success()
        .stdout(contains("CSV export completed (3 job(s))"));
    let content = fs::read_to_string(&csv).expect("read csv");
    assert!(content.starts_with("id,customer_name"));
    assert!(content.contains("Smith"));

    let json = temp_out("cli_export_jobs", "json");
    pl_db(&db)
        .args(["export", "--format", "json", "--file", &json, "--range", "2025-06", "--force"])
        .assert()
        .success();
    let v: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json).expect("read json")).expect("valid json");
    let rows = v.as_array().expect("array of jobs");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["customer_name"], "Smith");

    let xlsx = temp_out("cli_export_jobs", "xlsx");
    pl_db(&db)
        .args(["export", "--format", "xlsx", "--file", &xlsx, "--force"])
        .assert()
        .success();
    assert!(fs::metadata(&xlsx).map(|m| m.len() > 0).unwrap_or(false));
}

#[test]
fn test_export_requires_absolute_path() {
    let db = setup_test_db("cli_export_relative");
    init_db_with_jobs(&db);

    pl_db(&db)
        .args(["export", "--format", "csv", "--file", "jobs.csv"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn test_backup_and_log() {
    let db = setup_test_db("cli_backup");
    init_db_with_jobs(&db);

    let dest = temp_out("cli_backup_copy", "sqlite");
    pl_db(&db)
        .args(["backup", "--file", &dest, "--force"])
        .assert()
        .success()
        .stdout(contains("Backup created"));
    assert!(std::path::Path::new(&dest).exists());

    pl_db(&db)
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("init"))
        .stdout(contains("job_add"))
        .stdout(contains("backup"));

    pl_db(&db)
        .args(["log", "--print", "--op", "job"])
        .assert()
        .success()
        .stdout(contains("job_add"))
        .stdout(contains("backup").not());
}

#[test]
fn test_version_flag() {
    pl().arg("--version").assert().success().stdout(contains("paintledger"));
}
