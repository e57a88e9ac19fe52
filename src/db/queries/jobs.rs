use super::{get_opt_date, invalid_text, opt_date_to_sql};
use crate::errors::{AppError, AppResult};
use crate::models::job::Job;
use crate::models::job_status::JobStatus;
use crate::models::profit_flag::ProfitFlag;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, named_params};

pub fn map_row(row: &Row) -> rusqlite::Result<Job> {
    let status_str: String = row.get("status")?;
    let status =
        JobStatus::from_db_str(&status_str).ok_or_else(|| invalid_text("status", &status_str))?;

    let flag_str: String = row.get("profit_flag")?;
    let profit_flag =
        ProfitFlag::from_db_str(&flag_str).ok_or_else(|| invalid_text("profit_flag", &flag_str))?;

    Ok(Job {
        id: row.get("id")?,
        organization_id: row.get("organization_id")?,
        customer_name: row.get("customer_name")?,
        address: row.get("address")?,
        job_value: row.get("job_value")?,
        status,
        scheduled_start_date: get_opt_date(row, "scheduled_start_date")?,
        scheduled_end_date: get_opt_date(row, "scheduled_end_date")?,
        subcontractor_id: row.get("subcontractor_id")?,
        latitude: row.get("latitude")?,
        longitude: row.get("longitude")?,
        sub_materials: row.get("sub_materials")?,
        sub_labor: row.get("sub_labor")?,
        sub_total: row.get("sub_total")?,
        gross_profit: row.get("gross_profit")?,
        gross_margin_pct: row.get("gross_margin_pct")?,
        deposit_required: row.get("deposit_required")?,
        subcontractor_price: row.get("subcontractor_price")?,
        balance_due: row.get("balance_due")?,
        meets_min_gp: row.get("meets_min_gp")?,
        meets_target_gm: row.get("meets_target_gm")?,
        profit_flag,
        sales_commission_pct: row.get("sales_commission_pct")?,
        sales_commission_amount: row.get("sales_commission_amount")?,
        pm_commission_pct: row.get("pm_commission_pct")?,
        pm_commission_amount: row.get("pm_commission_amount")?,
        invoice_date: get_opt_date(row, "invoice_date")?,
        payment_received_date: get_opt_date(row, "payment_received_date")?,
        days_to_collect: row.get("days_to_collect")?,
        deposit_paid: row.get("deposit_paid")?,
        job_paid: row.get("job_paid")?,
        sales_commission_paid: row.get("sales_commission_paid")?,
        pm_commission_paid: row.get("pm_commission_paid")?,
        subcontractor_paid: row.get("subcontractor_paid")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

pub fn insert_job(conn: &Connection, job: &Job) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO jobs (
            organization_id, customer_name, address, job_value, status,
            scheduled_start_date, scheduled_end_date, subcontractor_id, latitude, longitude,
            sub_materials, sub_labor, sub_total, gross_profit, gross_margin_pct,
            deposit_required, subcontractor_price, balance_due, meets_min_gp, meets_target_gm,
            profit_flag, sales_commission_pct, sales_commission_amount, pm_commission_pct,
            pm_commission_amount, invoice_date, payment_received_date, days_to_collect,
            deposit_paid, job_paid, sales_commission_paid, pm_commission_paid, subcontractor_paid,
            created_at, updated_at
         ) VALUES (
            :organization_id, :customer_name, :address, :job_value, :status,
            :scheduled_start_date, :scheduled_end_date, :subcontractor_id, :latitude, :longitude,
            :sub_materials, :sub_labor, :sub_total, :gross_profit, :gross_margin_pct,
            :deposit_required, :subcontractor_price, :balance_due, :meets_min_gp, :meets_target_gm,
            :profit_flag, :sales_commission_pct, :sales_commission_amount, :pm_commission_pct,
            :pm_commission_amount, :invoice_date, :payment_received_date, :days_to_collect,
            :deposit_paid, :job_paid, :sales_commission_paid, :pm_commission_paid, :subcontractor_paid,
            :created_at, :updated_at
         )",
        named_params! {
            ":organization_id": job.organization_id,
            ":customer_name": job.customer_name,
            ":address": job.address,
            ":job_value": job.job_value,
            ":status": job.status.to_db_str(),
            ":scheduled_start_date": opt_date_to_sql(&job.scheduled_start_date),
            ":scheduled_end_date": opt_date_to_sql(&job.scheduled_end_date),
            ":subcontractor_id": job.subcontractor_id,
            ":latitude": job.latitude,
            ":longitude": job.longitude,
            ":sub_materials": job.sub_materials,
            ":sub_labor": job.sub_labor,
            ":sub_total": job.sub_total,
            ":gross_profit": job.gross_profit,
            ":gross_margin_pct": job.gross_margin_pct,
            ":deposit_required": job.deposit_required,
            ":subcontractor_price": job.subcontractor_price,
            ":balance_due": job.balance_due,
            ":meets_min_gp": job.meets_min_gp,
            ":meets_target_gm": job.meets_target_gm,
            ":profit_flag": job.profit_flag.as_str(),
            ":sales_commission_pct": job.sales_commission_pct,
            ":sales_commission_amount": job.sales_commission_amount,
            ":pm_commission_pct": job.pm_commission_pct,
            ":pm_commission_amount": job.pm_commission_amount,
            ":invoice_date": opt_date_to_sql(&job.invoice_date),
            ":payment_received_date": opt_date_to_sql(&job.payment_received_date),
            ":days_to_collect": job.days_to_collect,
            ":deposit_paid": job.deposit_paid,
            ":job_paid": job.job_paid,
            ":sales_commission_paid": job.sales_commission_paid,
            ":pm_commission_paid": job.pm_commission_paid,
            ":subcontractor_paid": job.subcontractor_paid,
            ":created_at": job.created_at,
            ":updated_at": job.updated_at,
        },
    )?;
    Ok(conn.last_insert_rowid())
}

/// Whole-row update: every derived column is written together with its
/// source value.
pub fn update_job(conn: &Connection, job: &Job) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE jobs SET
            customer_name = :customer_name, address = :address, job_value = :job_value,
            status = :status, scheduled_start_date = :scheduled_start_date,
            scheduled_end_date = :scheduled_end_date, subcontractor_id = :subcontractor_id,
            latitude = :latitude, longitude = :longitude,
            sub_materials = :sub_materials, sub_labor = :sub_labor, sub_total = :sub_total,
            gross_profit = :gross_profit, gross_margin_pct = :gross_margin_pct,
            deposit_required = :deposit_required, subcontractor_price = :subcontractor_price,
            balance_due = :balance_due, meets_min_gp = :meets_min_gp,
            meets_target_gm = :meets_target_gm, profit_flag = :profit_flag,
            sales_commission_pct = :sales_commission_pct,
            sales_commission_amount = :sales_commission_amount,
            pm_commission_pct = :pm_commission_pct, pm_commission_amount = :pm_commission_amount,
            invoice_date = :invoice_date, payment_received_date = :payment_received_date,
            days_to_collect = :days_to_collect, deposit_paid = :deposit_paid,
            job_paid = :job_paid, sales_commission_paid = :sales_commission_paid,
            pm_commission_paid = :pm_commission_paid, subcontractor_paid = :subcontractor_paid,
            updated_at = :updated_at
         WHERE id = :id AND organization_id = :organization_id",
        named_params! {
            ":id": job.id,
            ":organization_id": job.organization_id,
            ":customer_name": job.customer_name,
            ":address": job.address,
            ":job_value": job.job_value,
            ":status": job.status.to_db_str(),
            ":scheduled_start_date": opt_date_to_sql(&job.scheduled_start_date),
            ":scheduled_end_date": opt_date_to_sql(&job.scheduled_end_date),
            ":subcontractor_id": job.subcontractor_id,
            ":latitude": job.latitude,
            ":longitude": job.longitude,
            ":sub_materials": job.sub_materials,
            ":sub_labor": job.sub_labor,
            ":sub_total": job.sub_total,
            ":gross_profit": job.gross_profit,
            ":gross_margin_pct": job.gross_margin_pct,
            ":deposit_required": job.deposit_required,
            ":subcontractor_price": job.subcontractor_price,
            ":balance_due": job.balance_due,
            ":meets_min_gp": job.meets_min_gp,
            ":meets_target_gm": job.meets_target_gm,
            ":profit_flag": job.profit_flag.as_str(),
            ":sales_commission_pct": job.sales_commission_pct,
            ":sales_commission_amount": job.sales_commission_amount,
            ":pm_commission_pct": job.pm_commission_pct,
            ":pm_commission_amount": job.pm_commission_amount,
            ":invoice_date": opt_date_to_sql(&job.invoice_date),
            ":payment_received_date": opt_date_to_sql(&job.payment_received_date),
            ":days_to_collect": job.days_to_collect,
            ":deposit_paid": job.deposit_paid,
            ":job_paid": job.job_paid,
            ":sales_commission_paid": job.sales_commission_paid,
            ":pm_commission_paid": job.pm_commission_paid,
            ":subcontractor_paid": job.subcontractor_paid,
            ":updated_at": job.updated_at,
        },
    )?;

    if changed == 0 {
        return Err(AppError::NotFound(format!("job #{}", job.id)));
    }
    Ok(())
}

pub fn load_job(conn: &Connection, org: &str, id: i64) -> AppResult<Option<Job>> {
    let mut stmt = conn.prepare("SELECT * FROM jobs WHERE id = ?1 AND organization_id = ?2")?;
    Ok(stmt
        .query_row(rusqlite::params![id, org], map_row)
        .optional()?)
}

pub fn load_jobs(conn: &Connection, org: &str) -> AppResult<Vec<Job>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM jobs
         WHERE organization_id = ?1
         ORDER BY scheduled_start_date IS NULL, scheduled_start_date ASC, id ASC",
    )?;

    let rows = stmt.query_map([org], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Jobs whose day interval touches `[from, to]`; unscheduled jobs are left out.
pub fn load_jobs_between(
    conn: &Connection,
    org: &str,
    from: &NaiveDate,
    to: &NaiveDate,
) -> AppResult<Vec<Job>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM jobs
         WHERE organization_id = ?1
           AND scheduled_start_date IS NOT NULL
           AND scheduled_start_date <= ?3
           AND COALESCE(scheduled_end_date, scheduled_start_date) >= ?2
         ORDER BY scheduled_start_date ASC, id ASC",
    )?;

    let rows = stmt.query_map(
        rusqlite::params![org, super::date_to_sql(from), super::date_to_sql(to)],
        map_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
