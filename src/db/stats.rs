use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::formatting::money;
use rusqlite::OptionalExtension;
use std::fs;

fn count(pool: &DbPool, sql: &str, org: &str) -> AppResult<i64> {
    Ok(pool.conn.query_row(sql, [org], |row| row.get(0))?)
}

pub fn print_db_info(pool: &mut DbPool, db_path: &str, org: &str, currency: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);
    println!("{}• Organization:{} {}", CYAN, RESET, org);

    //
    // 2) ROW COUNTS
    //
    let jobs = count(pool, "SELECT COUNT(*) FROM jobs WHERE organization_id = ?1", org)?;
    let scenarios = count(pool, "SELECT COUNT(*) FROM scenarios WHERE organization_id = ?1", org)?;
    let targets = count(
        pool,
        "SELECT COUNT(*) FROM monthly_targets WHERE organization_id = ?1",
        org,
    )?;

    println!("{}• Jobs:{} {}{}{}", CYAN, RESET, GREEN, jobs, RESET);
    println!("{}• Scenarios:{} {}", CYAN, RESET, scenarios);
    println!("{}• Monthly targets:{} {}", CYAN, RESET, targets);

    //
    // 3) PIPELINE VALUE
    //
    let pipeline: f64 = pool.conn.query_row(
        "SELECT COALESCE(SUM(job_value), 0) FROM jobs
         WHERE organization_id = ?1 AND status <> 'lead'",
        [org],
        |row| row.get(0),
    )?;
    println!("{}• Sold value:{} {}", CYAN, RESET, money(pipeline, currency));

    //
    // 4) SCHEDULE RANGE
    //
    let first: Option<String> = pool
        .conn
        .query_row(
            "SELECT MIN(scheduled_start_date) FROM jobs WHERE organization_id = ?1",
            [org],
            |row| row.get(0),
        )
        .optional()?
        .flatten();
    let last: Option<String> = pool
        .conn
        .query_row(
            "SELECT MAX(COALESCE(scheduled_end_date, scheduled_start_date)) FROM jobs
             WHERE organization_id = ?1",
            [org],
            |row| row.get(0),
        )
        .optional()?
        .flatten();

    println!("{}• Schedule range:{}", CYAN, RESET);
    println!(
        "    from: {}",
        first.unwrap_or_else(|| format!("{GREY}--{RESET}"))
    );
    println!(
        "    to:   {}",
        last.unwrap_or_else(|| format!("{GREY}--{RESET}"))
    );

    println!();
    Ok(())
}
