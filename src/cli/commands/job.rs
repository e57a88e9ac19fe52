use crate::cli::commands::{date_arg, open_pool, opt_date_arg};
use crate::cli::parser::{Commands, JobCommand, JobFields, JobFilterArgs};
use crate::config::Config;
use crate::core::calculator::calendar::{
    CalendarDay, JobFilter, SchedulePeriod, mappable_jobs, month_cells, week_cells,
};
use crate::core::job::JobLogic;
use crate::core::schedule::ScheduleLogic;
use crate::errors::{AppError, AppResult};
use crate::models::job::{Job, JobPatch};
use crate::models::job_status::JobStatus;
use crate::ui::messages::{field, header, info, success};
use crate::utils::colors::{GREY, RESET, colorize_flag, colorize_optional};
use crate::utils::date::{format_opt_date, month_name, today};
use crate::utils::formatting::{money, pct, yes_no};
use crate::utils::table::{Column, Table};
use chrono::{Datelike, NaiveDate};

fn parse_status(raw: &str) -> AppResult<JobStatus> {
    JobStatus::from_code(raw).ok_or_else(|| {
        AppError::Validation(format!(
            "invalid status '{raw}' (use lead, got_the_job, scheduled or completed)"
        ))
    })
}

/// Fields `job update --clear` can unset.
#[derive(Default)]
struct Clears {
    end: bool,
    sub: bool,
    location: bool,
    invoice: bool,
}

fn parse_clears(raw: &[String]) -> AppResult<Clears> {
    let mut c = Clears::default();
    for name in raw {
        match name.trim().to_lowercase().as_str() {
            "end" => c.end = true,
            "sub" => c.sub = true,
            "location" => c.location = true,
            "invoice" => c.invoice = true,
            other => {
                return Err(AppError::Validation(format!(
                    "cannot clear '{other}' (use end, sub, location or invoice)"
                )));
            }
        }
    }
    Ok(c)
}

/// `Some(None)` when cleared, `Some(Some(v))` when given, `None` otherwise.
fn nullable<T>(name: &str, cleared: bool, value: Option<T>) -> AppResult<Option<Option<T>>> {
    match (cleared, value) {
        (true, Some(_)) => Err(AppError::Validation(format!(
            "'{name}' is both set and cleared"
        ))),
        (true, None) => Ok(Some(None)),
        (false, v) => Ok(v.map(Some)),
    }
}

fn build_patch(customer: Option<&String>, clear: &[String], f: &JobFields) -> AppResult<JobPatch> {
    let c = parse_clears(clear)?;
    Ok(JobPatch {
        customer_name: customer.cloned(),
        address: f.address.clone(),
        job_value: f.value,
        status: f.status.as_deref().map(parse_status).transpose()?,
        scheduled_start_date: opt_date_arg(&f.start)?,
        scheduled_end_date: nullable("end", c.end, opt_date_arg(&f.end)?)?,
        subcontractor_id: nullable("sub", c.sub, f.sub.clone())?,
        latitude: nullable("lat", c.location, f.lat)?,
        longitude: nullable("lng", c.location, f.lng)?,
        sales_commission_pct: f.sales_pct,
        pm_commission_pct: f.pm_pct,
        invoice_date: nullable("invoice", c.invoice, opt_date_arg(&f.invoice)?)?,
        payment_received_date: opt_date_arg(&f.paid_on)?,
        deposit_paid: f.deposit_paid,
        job_paid: f.job_paid,
        sales_commission_paid: f.sales_comm_paid,
        pm_commission_paid: f.pm_comm_paid,
        subcontractor_paid: f.sub_paid,
    })
}

fn build_filter(args: &JobFilterArgs, period: Option<&str>) -> AppResult<JobFilter> {
    let statuses = if args.status.is_empty() {
        None
    } else {
        Some(
            args.status
                .iter()
                .map(|s| parse_status(s))
                .collect::<AppResult<Vec<_>>>()?,
        )
    };

    let period = match period {
        Some(p) => SchedulePeriod::from_code(p).ok_or_else(|| {
            AppError::Validation(format!(
                "invalid period '{p}' (use all, this_week, this_month or next_month)"
            ))
        })?,
        None => SchedulePeriod::All,
    };

    Ok(JobFilter {
        statuses,
        subcontractor_id: args.sub.clone(),
        period,
    })
}

fn print_job(job: &Job, cfg: &Config) {
    let cur = cfg.currency_symbol.as_str();

    header(format!("Job #{}: {}", job.id, job.customer_name), cfg.separator());
    field("Address", colorize_optional(&job.address));
    field("Status", job.status.label());
    field("Scheduled", format!(
        "{} → {}",
        format_opt_date(&job.scheduled_start_date),
        format_opt_date(&job.scheduled_end_or_start())
    ));
    field("Subcontractor", colorize_optional(job.subcontractor_id.as_deref().unwrap_or("--")));

    println!();
    field("Job value", money(job.job_value, cur));
    field("Sub materials", money(job.sub_materials, cur));
    field("Sub labor", money(job.sub_labor, cur));
    field("Sub total", money(job.sub_total, cur));
    field("Subcontractor price", money(job.subcontractor_price, cur));
    field("Gross profit", money(job.gross_profit, cur));
    field("Gross margin", pct(job.gross_margin_pct));
    field("Deposit required", money(job.deposit_required, cur));
    field("Balance due", money(job.balance_due, cur));
    field("Profit flag", colorize_flag(job.profit_flag));

    println!();
    field(
        "Sales commission",
        format!("{} ({})", money(job.sales_commission_amount, cur), pct(job.sales_commission_pct)),
    );
    field(
        "PM commission",
        format!("{} ({})", money(job.pm_commission_amount, cur), pct(job.pm_commission_pct)),
    );
    field("Invoice date", format_opt_date(&job.invoice_date));
    field("Payment received", format_opt_date(&job.payment_received_date));
    field(
        "Days to collect",
        colorize_optional(&job.days_to_collect.map(|d| d.to_string()).unwrap_or_else(|| "--".into())),
    );

    println!();
    field("Deposit paid", yes_no(job.deposit_paid));
    field("Job paid", yes_no(job.job_paid));
    field("Sales commission paid", yes_no(job.sales_commission_paid));
    field("PM commission paid", yes_no(job.pm_commission_paid));
    field("Subcontractor paid", yes_no(job.subcontractor_paid));
}

fn print_job_table(jobs: &[Job], cfg: &Config) {
    let cur = cfg.currency_symbol.as_str();
    let mut table = Table::new(vec![
        Column::right("ID"),
        Column::left("Customer"),
        Column::left("Status"),
        Column::left("Start"),
        Column::left("End"),
        Column::right("Value"),
        Column::right("Gross profit"),
        Column::right("GM"),
        Column::left("Flag"),
    ]);

    for j in jobs {
        table.add_row(vec![
            j.id.to_string(),
            j.customer_name.clone(),
            j.status.to_db_str().to_string(),
            colorize_optional(&format_opt_date(&j.scheduled_start_date)),
            colorize_optional(&format_opt_date(&j.scheduled_end_date)),
            money(j.job_value, cur),
            money(j.gross_profit, cur),
            pct(j.gross_margin_pct),
            colorize_flag(j.profit_flag),
        ]);
    }
    print!("{}", table.render(cfg.separator()));

    let total_value: f64 = jobs.iter().map(|j| j.job_value).sum();
    let total_gp: f64 = jobs.iter().map(|j| j.gross_profit).sum();
    println!(
        "\n{} job(s), value {}, gross profit {}",
        jobs.len(),
        money(total_value, cur),
        money(total_gp, cur)
    );
}

fn job_labels(day: &CalendarDay) -> String {
    day.jobs
        .iter()
        .map(|j| format!("#{} {}", j.id, j.customer_name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_month(cells: &[CalendarDay], year: i32, month: u32, cfg: &Config) {
    header(format!("{} {year}", month_name(month)), cfg.separator());
    println!(" Sun  Mon  Tue  Wed  Thu  Fri  Sat");

    for week in cells.chunks(7) {
        let line: Vec<String> = week
            .iter()
            .map(|d| {
                let marker = if d.jobs.is_empty() {
                    " ".to_string()
                } else {
                    d.jobs.len().min(9).to_string()
                };
                if d.in_month {
                    format!(" {:>2}{marker}", d.date.day())
                } else {
                    format!(" {GREY}{:>2}{RESET} ", d.date.day())
                }
            })
            .collect();
        println!("{}", line.join(" "));
    }

    println!();
    for day in cells.iter().filter(|d| d.in_month && !d.jobs.is_empty()) {
        println!("  {}  {}", day.date.format("%a %Y-%m-%d"), job_labels(day));
    }
}

fn print_week(cells: &[CalendarDay], cfg: &Config) {
    if let (Some(first), Some(last)) = (cells.first(), cells.last()) {
        header(format!("Week {} → {}", first.date, last.date), cfg.separator());
    }
    for day in cells {
        let jobs = if day.jobs.is_empty() {
            format!("{GREY}--{RESET}")
        } else {
            job_labels(day)
        };
        println!("  {}  {}", day.date.format("%a %Y-%m-%d"), jobs);
    }
}

fn month_arg(raw: &str) -> AppResult<(i32, u32)> {
    let bad = || AppError::InvalidDate(format!("'{raw}' (expected YYYY-MM)"));
    let (y, m) = raw.trim().split_once('-').ok_or_else(bad)?;
    let y: i32 = y.parse().map_err(|_| bad())?;
    let m: u32 = m.parse().map_err(|_| bad())?;
    NaiveDate::from_ymd_opt(y, m, 1).ok_or_else(bad)?;
    Ok((y, m))
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Job { action } = cmd else {
        return Ok(());
    };
    let org = cfg.organization.as_str();
    let mut pool = open_pool(cfg)?;

    match action {
        JobCommand::Add { customer, fields } => {
            let patch = build_patch(None, &[], fields)?;
            let job = JobLogic::create(&mut pool, org, customer, &patch)?;
            success(format!(
                "Job #{} created for {} ({}, {})",
                job.id,
                job.customer_name,
                money(job.job_value, &cfg.currency_symbol),
                job.profit_flag.as_str()
            ));
        }

        JobCommand::Update {
            id,
            customer,
            clear,
            fields,
        } => {
            let patch = build_patch(customer.as_ref(), clear, fields)?;
            let job = JobLogic::update(&mut pool, org, *id, &patch)?;
            success(format!(
                "Job #{} updated: {} gross profit {} ({})",
                job.id,
                job.status.to_db_str(),
                money(job.gross_profit, &cfg.currency_symbol),
                job.profit_flag.as_str()
            ));
        }

        JobCommand::Show { id, json } => {
            let job = JobLogic::get(&pool.conn, org, *id)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&job)?);
            } else {
                print_job(&job, cfg);
            }
        }

        JobCommand::List { filter, period } => {
            let filter = build_filter(filter, Some(period))?;
            let jobs = JobLogic::list(&pool.conn, org, &filter, today())?;
            if jobs.is_empty() {
                info("No jobs found.");
            } else {
                print_job_table(&jobs, cfg);
            }
        }

        JobCommand::Calendar { month, week, filter } => {
            let filter = build_filter(filter, None)?;

            if let Some(raw) = week {
                let date = date_arg(raw)?;
                let (from, to) = ScheduleLogic::week_window(date);
                let jobs = ScheduleLogic::jobs_in_window(&pool.conn, org, from, to, &filter)?;
                print_week(&week_cells(&jobs, date), cfg);
            } else {
                let (year, month) = match month {
                    Some(raw) => month_arg(raw)?,
                    None => (today().year(), today().month()),
                };
                let (from, to) = ScheduleLogic::month_window(year, month)?;
                let jobs = ScheduleLogic::jobs_in_window(&pool.conn, org, from, to, &filter)?;
                print_month(&month_cells(&jobs, year, month), year, month, cfg);
            }
        }

        JobCommand::Map { filter, period } => {
            let filter = build_filter(filter, Some(period))?;
            let jobs = JobLogic::list(&pool.conn, org, &filter, today())?;
            let refs: Vec<&Job> = jobs.iter().collect();
            let pins = mappable_jobs(&refs);

            if pins.is_empty() {
                info("No jobs with coordinates and a start date.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::right("ID"),
                Column::left("Customer"),
                Column::left("Status"),
                Column::left("Start"),
                Column::right("Lat"),
                Column::right("Lng"),
                Column::left("Address"),
            ]);
            for j in pins {
                table.add_row(vec![
                    j.id.to_string(),
                    j.customer_name.clone(),
                    j.status.to_db_str().to_string(),
                    format_opt_date(&j.scheduled_start_date),
                    j.latitude.map(|v| format!("{v:.5}")).unwrap_or_default(),
                    j.longitude.map(|v| format!("{v:.5}")).unwrap_or_default(),
                    j.address.clone(),
                ]);
            }
            print!("{}", table.render(cfg.separator()));
        }
    }

    Ok(())
}
