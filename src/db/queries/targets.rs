use super::{date_to_sql, get_date, invalid_text};
use crate::core::calculator::targets::GeneratedMonth;
use crate::errors::AppResult;
use crate::models::target::{
    CounterField, CurveMetric, DailyTarget, MonthlyTarget, SeasonalCurve, TargetCounters,
};
use chrono::NaiveDate;
use rusqlite::{Connection, Row, named_params, params};

fn counters(row: &Row, suffix: &str) -> rusqlite::Result<TargetCounters> {
    Ok(TargetCounters {
        leads: row.get(format!("leads_{suffix}").as_str())?,
        appointments: row.get(format!("appointments_{suffix}").as_str())?,
        sales: row.get(format!("sales_{suffix}").as_str())?,
        revenue: row.get(format!("revenue_{suffix}").as_str())?,
        gross_profit: row.get(format!("gross_profit_{suffix}").as_str())?,
        reviews: row.get(format!("reviews_{suffix}").as_str())?,
        marketing_spend: row.get(format!("marketing_spend_{suffix}").as_str())?,
    })
}

fn map_monthly(row: &Row) -> rusqlite::Result<MonthlyTarget> {
    Ok(MonthlyTarget {
        id: row.get("id")?,
        organization_id: row.get("organization_id")?,
        month: row.get("month")?,
        year: row.get("year")?,
        quarter: row.get("quarter")?,
        goal: counters(row, "goal")?,
        actual: counters(row, "actual")?,
    })
}

fn map_daily(row: &Row) -> rusqlite::Result<DailyTarget> {
    Ok(DailyTarget {
        id: row.get("id")?,
        organization_id: row.get("organization_id")?,
        date: get_date(row, "date")?,
        goal: counters(row, "goal")?,
        actual: counters(row, "actual")?,
    })
}

// ---------------------------
// Seasonal curves
// ---------------------------

pub fn upsert_curve(conn: &Connection, org: &str, curve: &SeasonalCurve) -> AppResult<()> {
    conn.execute(
        "INSERT INTO seasonal_curves (organization_id, metric, month, weight)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(organization_id, metric, month) DO UPDATE SET weight = excluded.weight",
        params![org, curve.metric.to_db_str(), curve.month, curve.weight],
    )?;
    Ok(())
}

pub fn load_curves(conn: &Connection, org: &str) -> AppResult<Vec<SeasonalCurve>> {
    let mut stmt = conn.prepare(
        "SELECT metric, month, weight FROM seasonal_curves
         WHERE organization_id = ?1
         ORDER BY metric ASC, month ASC",
    )?;

    let rows = stmt.query_map([org], |row| {
        let metric_str: String = row.get(0)?;
        let metric = CurveMetric::from_db_str(&metric_str)
            .ok_or_else(|| invalid_text("metric", &metric_str))?;
        Ok(SeasonalCurve {
            metric,
            month: row.get(1)?,
            weight: row.get(2)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------
// Monthly targets
// ---------------------------

/// Insert or overwrite the goals of (org, month, year). Actual counters of
/// an existing row are left untouched.
pub fn upsert_monthly_goals(conn: &Connection, org: &str, m: &GeneratedMonth) -> AppResult<()> {
    conn.execute(
        "INSERT INTO monthly_targets (
            organization_id, month, year, quarter,
            leads_goal, appointments_goal, sales_goal, revenue_goal,
            gross_profit_goal, reviews_goal, marketing_spend_goal
         ) VALUES (
            :org, :month, :year, :quarter,
            :leads, :appointments, :sales, :revenue, :gross_profit, :reviews, :marketing_spend
         )
         ON CONFLICT(organization_id, month, year) DO UPDATE SET
            quarter              = excluded.quarter,
            leads_goal           = excluded.leads_goal,
            appointments_goal    = excluded.appointments_goal,
            sales_goal           = excluded.sales_goal,
            revenue_goal         = excluded.revenue_goal,
            gross_profit_goal    = excluded.gross_profit_goal,
            reviews_goal         = excluded.reviews_goal,
            marketing_spend_goal = excluded.marketing_spend_goal",
        named_params! {
            ":org": org,
            ":month": m.month,
            ":year": m.year,
            ":quarter": m.quarter,
            ":leads": m.goal.leads,
            ":appointments": m.goal.appointments,
            ":sales": m.goal.sales,
            ":revenue": m.goal.revenue,
            ":gross_profit": m.goal.gross_profit,
            ":reviews": m.goal.reviews,
            ":marketing_spend": m.goal.marketing_spend,
        },
    )?;
    Ok(())
}

/// Set one actual counter of a month, creating the row when needed.
pub fn set_monthly_actual(
    conn: &Connection,
    org: &str,
    month: u32,
    year: i32,
    field: CounterField,
    value: f64,
) -> AppResult<()> {
    // column names come from a closed enum, never from user text
    let col = format!("{}_actual", field.column());
    let sql = format!(
        "INSERT INTO monthly_targets (organization_id, month, year, quarter, {col})
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(organization_id, month, year) DO UPDATE SET {col} = excluded.{col}"
    );
    conn.execute(
        &sql,
        params![
            org,
            month,
            year,
            crate::core::calculator::targets::quarter_of(month),
            value
        ],
    )?;
    Ok(())
}

pub fn load_monthly_for_year(conn: &Connection, org: &str, year: i32) -> AppResult<Vec<MonthlyTarget>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM monthly_targets
         WHERE organization_id = ?1 AND year = ?2
         ORDER BY month ASC",
    )?;
    let rows = stmt.query_map(params![org, year], map_monthly)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_monthly(conn: &Connection, org: &str, year: i32) -> AppResult<i64> {
    Ok(conn.query_row(
        "SELECT COUNT(*) FROM monthly_targets WHERE organization_id = ?1 AND year = ?2",
        params![org, year],
        |row| row.get(0),
    )?)
}

// ---------------------------
// Daily targets
// ---------------------------

/// Set one goal or actual counter of a day, creating the row when needed.
pub fn set_daily_counter(
    conn: &Connection,
    org: &str,
    date: &NaiveDate,
    field: CounterField,
    actual: bool,
    value: f64,
) -> AppResult<()> {
    let col = format!(
        "{}_{}",
        field.column(),
        if actual { "actual" } else { "goal" }
    );
    let sql = format!(
        "INSERT INTO daily_targets (organization_id, date, {col})
         VALUES (?1, ?2, ?3)
         ON CONFLICT(organization_id, date) DO UPDATE SET {col} = excluded.{col}"
    );
    conn.execute(&sql, params![org, date_to_sql(date), value])?;
    Ok(())
}

pub fn load_daily_between(
    conn: &Connection,
    org: &str,
    from: &NaiveDate,
    to: &NaiveDate,
) -> AppResult<Vec<DailyTarget>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM daily_targets
         WHERE organization_id = ?1 AND date BETWEEN ?2 AND ?3
         ORDER BY date ASC",
    )?;
    let rows = stmt.query_map(params![org, date_to_sql(from), date_to_sql(to)], map_daily)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
