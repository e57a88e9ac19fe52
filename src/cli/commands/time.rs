use crate::cli::commands::{open_pool, opt_date_arg};
use crate::cli::parser::{Commands, TimeCommand};
use crate::config::Config;
use crate::core::time_entry::TimeEntryLogic;
use crate::errors::{AppError, AppResult};
use crate::export::range::parse_range;
use crate::models::time_entry::TimeEntry;
use crate::ui::messages::{header, info, success};
use crate::utils::date::{last_day_of_month, today};
use crate::utils::formatting::money;
use crate::utils::table::{Column, Table};
use chrono::{Datelike, NaiveDate};

fn current_month() -> AppResult<(NaiveDate, NaiveDate)> {
    let t = today();
    let first = NaiveDate::from_ymd_opt(t.year(), t.month(), 1);
    let last = last_day_of_month(t.year(), t.month());
    first
        .zip(last)
        .ok_or_else(|| AppError::InvalidDate(format!("current month of {t}")))
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Time { action } = cmd else {
        return Ok(());
    };
    let org = cfg.organization.as_str();
    let cur = cfg.currency_symbol.as_str();
    let mut pool = open_pool(cfg)?;

    match action {
        TimeCommand::Log {
            employee,
            job,
            hours,
            rate,
            date,
            notes,
        } => {
            let entry = TimeEntry {
                id: 0,
                organization_id: org.to_string(),
                employee_id: employee.clone(),
                job_id: *job,
                date: opt_date_arg(date)?.unwrap_or_else(today),
                hours: *hours,
                hourly_rate: *rate,
                notes: notes.clone(),
            };
            let saved = TimeEntryLogic::log(&mut pool, entry)?;
            success(format!(
                "{} logged {:.2}h on job #{} for {} ({})",
                saved.employee_id,
                saved.hours,
                saved.job_id,
                saved.date,
                money(saved.amount(), cur)
            ));
        }

        TimeCommand::Payroll { range, details } => {
            let (from, to) = match range {
                Some(r) => parse_range(r)?,
                None => current_month()?,
            };

            let lines = TimeEntryLogic::payroll(&pool.conn, org, from, to)?;
            if lines.is_empty() {
                info(format!("No time entries between {from} and {to}."));
                return Ok(());
            }

            header(format!("Payroll {from} → {to}"), cfg.separator());
            let mut table = Table::new(vec![
                Column::left("Employee"),
                Column::right("Entries"),
                Column::right("Hours"),
                Column::right("Amount"),
            ]);
            for l in &lines {
                table.add_row(vec![
                    l.employee_id.clone(),
                    l.entries.to_string(),
                    format!("{:.2}", l.hours),
                    money(l.amount, cur),
                ]);
            }
            let total: f64 = lines.iter().map(|l| l.amount).sum();
            let hours: f64 = lines.iter().map(|l| l.hours).sum();
            table.add_row(vec![
                "Total".to_string(),
                String::new(),
                format!("{hours:.2}"),
                money(total, cur),
            ]);
            print!("{}", table.render(cfg.separator()));

            if *details {
                println!();
                let mut t = Table::new(vec![
                    Column::left("Date"),
                    Column::left("Employee"),
                    Column::right("Job"),
                    Column::right("Hours"),
                    Column::right("Rate"),
                    Column::left("Notes"),
                ]);
                for e in TimeEntryLogic::entries(&pool.conn, org, from, to)? {
                    t.add_row(vec![
                        e.date.to_string(),
                        e.employee_id.clone(),
                        format!("#{}", e.job_id),
                        format!("{:.2}", e.hours),
                        money(e.hourly_rate, cur),
                        e.notes.clone(),
                    ]);
                }
                print!("{}", t.render(cfg.separator()));
            }
        }
    }

    Ok(())
}
