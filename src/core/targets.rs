use crate::core::calculator::targets::{GeneratedMonth, aggregate, cumulative_rollup, generate_monthly_targets};
use crate::core::validate;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::targets::{
    load_curves, load_daily_between, load_monthly_for_year, set_daily_counter, set_monthly_actual,
    upsert_curve, upsert_monthly_goals,
};
use crate::errors::{AppError, AppResult};
use crate::models::target::{
    AnnualGoals, CounterField, CurveMetric, MonthlyTarget, PeriodTotals, SeasonalCurve, TargetCounters,
};
use chrono::NaiveDate;
use rusqlite::Connection;

pub struct TargetLogic;

fn check_month(month: u32) -> AppResult<()> {
    if !(1..=12).contains(&month) {
        return Err(AppError::Validation(format!("month must be 1..12 (got {month})")));
    }
    Ok(())
}

impl TargetLogic {
    /// Store the seasonal weights of one metric. Months not listed keep
    /// their previous weight (or the 1/12 fallback).
    pub fn set_curve(pool: &mut DbPool, org: &str, metric: CurveMetric, weights: &[(u32, f64)]) -> AppResult<usize> {
        for (month, weight) in weights {
            check_month(*month)?;
            validate::non_negative("weight", *weight)?;
        }

        pool.immediate(|tx| {
            for (month, weight) in weights {
                upsert_curve(
                    tx,
                    org,
                    &SeasonalCurve {
                        metric,
                        month: *month,
                        weight: *weight,
                    },
                )?;
            }
            ttlog(
                tx,
                "curve",
                &format!("{org}/{}", metric.to_db_str()),
                &format!("{} month weight(s) set", weights.len()),
            )?;
            Ok(weights.len())
        })
    }

    pub fn curves(conn: &Connection, org: &str) -> AppResult<Vec<SeasonalCurve>> {
        load_curves(conn, org)
    }

    /// Distribute `goals` over the months of `year` and upsert one row per
    /// month. Running it twice with the same inputs leaves the same twelve
    /// rows; recorded actuals survive.
    pub fn generate(pool: &mut DbPool, org: &str, year: i32, goals: &AnnualGoals) -> AppResult<Vec<GeneratedMonth>> {
        validate::non_negative("leads", goals.leads)?;
        validate::non_negative("sales", goals.sales)?;
        validate::non_negative("revenue", goals.revenue)?;
        validate::non_negative("gross_profit", goals.gross_profit)?;
        validate::non_negative("reviews", goals.reviews)?;
        validate::non_negative("marketing_spend", goals.marketing_spend)?;

        pool.immediate(|tx| {
            let curves = load_curves(tx, org)?;
            if curves.is_empty() {
                return Err(AppError::NotFound(format!(
                    "seasonal curves for '{org}' (set them with `targets curve`)"
                )));
            }

            let months = generate_monthly_targets(year, goals, &curves);
            for m in &months {
                upsert_monthly_goals(tx, org, m)?;
            }

            ttlog(
                tx,
                "targets",
                &format!("{org}/{year}"),
                &format!(
                    "generated: leads {} sales {} revenue {:.2}",
                    goals.leads, goals.sales, goals.revenue
                ),
            )?;
            Ok(months)
        })
    }

    pub fn record_actual(
        pool: &mut DbPool,
        org: &str,
        year: i32,
        month: u32,
        field: CounterField,
        value: f64,
    ) -> AppResult<()> {
        check_month(month)?;
        validate::non_negative(field.column(), value)?;

        pool.immediate(|tx| {
            set_monthly_actual(tx, org, month, year, field, value)?;
            ttlog(
                tx,
                "actual",
                &format!("{org}/{year}-{month:02}"),
                &format!("{} = {value}", field.column()),
            )?;
            Ok(())
        })
    }

    pub fn set_daily(
        pool: &mut DbPool,
        org: &str,
        date: NaiveDate,
        field: CounterField,
        actual: bool,
        value: f64,
    ) -> AppResult<()> {
        validate::non_negative(field.column(), value)?;

        pool.immediate(|tx| {
            set_daily_counter(tx, org, &date, field, actual, value)?;
            ttlog(
                tx,
                "daily",
                &format!("{org}/{date}"),
                &format!(
                    "{}_{} = {value}",
                    field.column(),
                    if actual { "actual" } else { "goal" }
                ),
            )?;
            Ok(())
        })
    }

    pub fn year(conn: &Connection, org: &str, year: i32) -> AppResult<Vec<MonthlyTarget>> {
        load_monthly_for_year(conn, org, year)
    }

    /// Running totals of the daily rows between `from` and `to`.
    pub fn daily_rollup(conn: &Connection, org: &str, from: NaiveDate, to: NaiveDate) -> AppResult<Vec<PeriodTotals>> {
        if to < from {
            return Err(AppError::InvalidDate(format!("range end {to} is before start {from}")));
        }
        let days: Vec<PeriodTotals> = load_daily_between(conn, org, &from, &to)?
            .iter()
            .map(PeriodTotals::from)
            .collect();
        Ok(cumulative_rollup(&days))
    }

    /// Year-to-date running totals, month by month.
    pub fn monthly_rollup(conn: &Connection, org: &str, year: i32) -> AppResult<Vec<PeriodTotals>> {
        let months: Vec<PeriodTotals> = load_monthly_for_year(conn, org, year)?
            .iter()
            .map(PeriodTotals::from)
            .collect();
        Ok(cumulative_rollup(&months))
    }

    /// Goal and actual totals of every month of `year`.
    pub fn yearly_aggregate(conn: &Connection, org: &str, year: i32) -> AppResult<(TargetCounters, TargetCounters)> {
        let months: Vec<PeriodTotals> = load_monthly_for_year(conn, org, year)?
            .iter()
            .map(PeriodTotals::from)
            .collect();
        Ok(aggregate(&months))
    }
}
