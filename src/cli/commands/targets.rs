use crate::cli::commands::{date_arg, open_pool};
use crate::cli::parser::{Commands, TargetsCommand};
use crate::config::Config;
use crate::core::targets::TargetLogic;
use crate::errors::{AppError, AppResult};
use crate::export::range::parse_range;
use crate::models::target::{AnnualGoals, CounterField, CurveMetric, PeriodTotals, TargetCounters};
use crate::ui::messages::{header, info, success};
use crate::utils::colors::{GREEN, RED, RESET};
use crate::utils::date::{month_name, today};
use crate::utils::formatting::{money, pct};
use crate::utils::table::{Column, Table};
use chrono::Datelike;

fn parse_metric(raw: &str) -> AppResult<CurveMetric> {
    CurveMetric::from_db_str(raw)
        .ok_or_else(|| AppError::Validation(format!("invalid metric '{raw}' (use leads, sales or revenue)")))
}

fn parse_field(raw: &str) -> AppResult<CounterField> {
    CounterField::from_code(raw).ok_or_else(|| {
        AppError::Validation(format!(
            "invalid counter '{raw}' (use leads, appointments, sales, revenue, gross_profit, reviews or marketing_spend)"
        ))
    })
}

/// `actual / goal`, coloured green once the goal is met.
fn progress(actual: f64, goal: f64, as_money: bool, cur: &str) -> String {
    let fmt = |v: f64| if as_money { money(v, cur) } else { format!("{v:.0}") };
    if goal <= 0.0 {
        return format!("{} / {}", fmt(actual), fmt(goal));
    }
    let color = if actual >= goal { GREEN } else { RED };
    format!(
        "{color}{}{RESET} / {} ({})",
        fmt(actual),
        fmt(goal),
        pct(actual / goal * 100.0)
    )
}

fn counters_row(label: String, goal: &TargetCounters, actual: &TargetCounters, cur: &str) -> Vec<String> {
    vec![
        label,
        progress(actual.leads, goal.leads, false, cur),
        progress(actual.appointments, goal.appointments, false, cur),
        progress(actual.sales, goal.sales, false, cur),
        progress(actual.revenue, goal.revenue, true, cur),
        progress(actual.gross_profit, goal.gross_profit, true, cur),
        progress(actual.reviews, goal.reviews, false, cur),
        progress(actual.marketing_spend, goal.marketing_spend, true, cur),
    ]
}

fn counters_table(first: &str) -> Table {
    Table::new(vec![
        Column::left(first),
        Column::right("Leads"),
        Column::right("Appts"),
        Column::right("Sales"),
        Column::right("Revenue"),
        Column::right("Gross profit"),
        Column::right("Reviews"),
        Column::right("Marketing"),
    ])
}

fn print_rollup(rows: &[PeriodTotals], title: String, cfg: &Config) {
    if rows.is_empty() {
        info("No targets recorded for this period.");
        return;
    }
    header(title, cfg.separator());
    let mut table = counters_table("Through");
    for r in rows {
        table.add_row(counters_row(r.period.clone(), &r.goal, &r.actual, &cfg.currency_symbol));
    }
    print!("{}", table.render(cfg.separator()));
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Targets { action } = cmd else {
        return Ok(());
    };
    let org = cfg.organization.as_str();
    let cur = cfg.currency_symbol.as_str();
    let mut pool = open_pool(cfg)?;

    match action {
        TargetsCommand::Curve {
            metric,
            weights,
            month,
            weight,
        } => {
            let mut updates: Vec<(u32, f64)> = Vec::new();
            if !weights.is_empty() {
                if weights.len() != 12 {
                    return Err(AppError::Validation(format!(
                        "--weights needs 12 values, got {}",
                        weights.len()
                    )));
                }
                updates.extend((1..=12).zip(weights.iter().copied()));
            }
            if let (Some(m), Some(w)) = (month, weight) {
                updates.push((*m, *w));
            }

            if !updates.is_empty() {
                let raw = metric
                    .as_deref()
                    .ok_or_else(|| AppError::Validation("a metric is required to set weights".into()))?;
                let metric = parse_metric(raw)?;
                let n = TargetLogic::set_curve(&mut pool, org, metric, &updates)?;
                success(format!("{n} weight(s) stored for {}", metric.to_db_str()));
            }

            let only = metric.as_deref().map(parse_metric).transpose()?;
            let curves: Vec<_> = TargetLogic::curves(&pool.conn, org)?
                .into_iter()
                .filter(|c| only.is_none_or(|m| m == c.metric))
                .collect();
            if curves.is_empty() {
                info("No seasonal curves defined (missing months use 1/12).");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::left("Metric"),
                Column::left("Month"),
                Column::right("Weight"),
            ]);
            for c in &curves {
                table.add_row(vec![
                    c.metric.to_db_str().to_string(),
                    month_name(c.month).to_string(),
                    format!("{:.4}", c.weight),
                ]);
            }
            print!("{}", table.render(cfg.separator()));
            for m in CurveMetric::ALL {
                let total: f64 = curves.iter().filter(|c| c.metric == m).map(|c| c.weight).sum();
                if curves.iter().any(|c| c.metric == m) {
                    println!("  {} total weight: {:.4}", m.to_db_str(), total);
                }
            }
        }

        TargetsCommand::Generate {
            year,
            leads,
            sales,
            revenue,
            gross_profit,
            reviews,
            marketing,
        } => {
            let goals = AnnualGoals {
                leads: *leads,
                sales: *sales,
                revenue: *revenue,
                gross_profit: *gross_profit,
                reviews: *reviews,
                marketing_spend: *marketing,
            };
            let months = TargetLogic::generate(&mut pool, org, *year, &goals)?;

            success(format!("Monthly targets generated for {year}"));
            let mut table = Table::new(vec![
                Column::left("Month"),
                Column::right("Q"),
                Column::right("Leads"),
                Column::right("Sales"),
                Column::right("Revenue"),
                Column::right("Gross profit"),
                Column::right("Reviews"),
                Column::right("Marketing"),
            ]);
            for m in &months {
                table.add_row(vec![
                    month_name(m.month).to_string(),
                    m.quarter.to_string(),
                    format!("{:.0}", m.goal.leads),
                    format!("{:.0}", m.goal.sales),
                    money(m.goal.revenue, cur),
                    money(m.goal.gross_profit, cur),
                    format!("{:.0}", m.goal.reviews),
                    money(m.goal.marketing_spend, cur),
                ]);
            }
            print!("{}", table.render(cfg.separator()));
        }

        TargetsCommand::Actual {
            year,
            month,
            field,
            value,
        } => {
            let f = parse_field(field)?;
            TargetLogic::record_actual(&mut pool, org, *year, *month, f, *value)?;
            success(format!("{year}-{month:02} {} actual set to {value}", f.column()));
        }

        TargetsCommand::Daily {
            date,
            field,
            value,
            goal,
        } => {
            let d = date_arg(date)?;
            let f = parse_field(field)?;
            TargetLogic::set_daily(&mut pool, org, d, f, !*goal, *value)?;
            success(format!(
                "{d} {} {} set to {value}",
                f.column(),
                if *goal { "goal" } else { "actual" }
            ));
        }

        TargetsCommand::Rollup { year, range } => match range {
            Some(r) => {
                let (from, to) = parse_range(r)?;
                let rows = TargetLogic::daily_rollup(&pool.conn, org, from, to)?;
                print_rollup(&rows, format!("Daily cumulative {from} → {to}"), cfg);
            }
            None => {
                let y = year.unwrap_or_else(|| today().year());
                let rows = TargetLogic::monthly_rollup(&pool.conn, org, y)?;
                print_rollup(&rows, format!("Year to date {y}"), cfg);
            }
        },

        TargetsCommand::Year { year } => {
            let months = TargetLogic::year(&pool.conn, org, *year)?;
            if months.is_empty() {
                info(format!("No monthly targets for {year}. Run `targets generate {year}` first."));
                return Ok(());
            }

            header(format!("Targets {year}"), cfg.separator());
            let mut table = counters_table("Month");
            for m in &months {
                table.add_row(counters_row(
                    format!("Q{} {}", m.quarter, month_name(m.month)),
                    &m.goal,
                    &m.actual,
                    cur,
                ));
            }
            let (goal, actual) = TargetLogic::yearly_aggregate(&pool.conn, org, *year)?;
            table.add_row(counters_row("Total".to_string(), &goal, &actual, cur));
            print!("{}", table.render(cfg.separator()));
        }
    }

    Ok(())
}
