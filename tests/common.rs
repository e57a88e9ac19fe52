#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use paintledger::db::migrate::run_pending_migrations;
use paintledger::db::pool::DbPool;
use std::env;
use std::fs;
use std::path::PathBuf;

pub const ORG: &str = "acme";

pub fn pl() -> Command {
    cargo_bin_cmd!("paintledger")
}

/// `paintledger --db <db> --test ...`, never touching the user's config.
pub fn pl_db(db_path: &str) -> Command {
    let mut cmd = pl();
    cmd.args(["--db", db_path, "--test"]);
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{name}_paintledger.sqlite"));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{name}_out.{ext}"));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// In-memory database with the full schema, for library-level tests.
pub fn memory_pool() -> DbPool {
    let pool = DbPool::in_memory().expect("open in-memory db");
    run_pending_migrations(&pool.conn).expect("migrate");
    pool
}

/// Initialize a DB file and add a small job dataset through the CLI
pub fn init_db_with_jobs(db_path: &str) {
    pl_db(db_path).arg("init").assert().success();

    pl_db(db_path)
        .args([
            "job", "add", "Smith", "--value", "10000", "--status", "scheduled", "--start",
            "2025-06-10", "--end", "2025-06-12", "--sub", "crew-a", "--lat", "40.7128", "--lng",
            "-74.0060",
        ])
        .assert()
        .success();

    pl_db(db_path)
        .args([
            "job", "add", "Jones", "--value", "1500", "--status", "got_the_job", "--start",
            "2025-07-02",
        ])
        .assert()
        .success();

    pl_db(db_path)
        .args(["job", "add", "Brown", "--value", "4000"])
        .assert()
        .success();
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}
