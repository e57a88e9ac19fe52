use crate::cli::commands::open_pool;
use crate::cli::parser::{Commands, ScenarioCommand, ScenarioFields};
use crate::config::Config;
use crate::core::scenario::ScenarioLogic;
use crate::errors::AppResult;
use crate::models::scenario::{Scenario, ScenarioPatch};
use crate::ui::messages::{field, header, info, success};
use crate::utils::colors::{CYAN, RESET, color_for_delta};
use crate::utils::formatting::{delta, money, pct};
use crate::utils::table::{Column, Table};

fn build_patch(
    name: Option<&String>,
    description: Option<&String>,
    baseline: Option<bool>,
    f: &ScenarioFields,
) -> ScenarioPatch {
    ScenarioPatch {
        name: name.cloned(),
        description: description.cloned(),
        is_baseline: baseline,
        leads_count: f.leads,
        issue_rate: f.issue_rate,
        closing_rate: f.closing_rate,
        average_sale: f.average_sale,
        cogs_labor_pct: f.labor_pct,
        cogs_materials_pct: f.materials_pct,
        cogs_other_pct: f.other_pct,
        sales_commission_pct: f.sales_comm_pct,
        pm_commission_pct: f.pm_comm_pct,
        marketing_spend: f.marketing,
        owner_salary: f.owner_salary,
        production_salary: f.production_salary,
        sales_salary: f.sales_salary,
        admin_salary: f.admin_salary,
        other_overhead: f.overhead,
    }
}

/// Fractions are shown as percentages.
fn frac(x: f64) -> String {
    pct(x * 100.0)
}

fn print_scenario(s: &Scenario, cfg: &Config) {
    let cur = cfg.currency_symbol.as_str();
    let i = &s.inputs;
    let r = &s.results;

    header(
        format!(
            "Scenario #{}: {} (v{}){}",
            s.id,
            s.name,
            s.version,
            if s.is_baseline { " [baseline]" } else { "" }
        ),
        cfg.separator(),
    );
    if !s.description.is_empty() {
        println!("  {}", s.description);
    }

    println!("\n{CYAN}Assumptions{RESET}");
    field("Leads", i.leads_count);
    field("Issue rate", frac(i.issue_rate));
    field("Closing rate", frac(i.closing_rate));
    field("Average sale", money(i.average_sale, cur));
    field("COGS labor / materials / other", format!(
        "{} / {} / {}",
        frac(i.cogs_labor_pct),
        frac(i.cogs_materials_pct),
        frac(i.cogs_other_pct)
    ));
    field("Commissions sales / PM", format!(
        "{} / {}",
        frac(i.sales_commission_pct),
        frac(i.pm_commission_pct)
    ));
    field("Marketing spend", money(i.marketing_spend, cur));
    field("Owner salary", money(i.owner_salary, cur));
    field("Production salary", money(i.production_salary, cur));
    field("Sales salary", money(i.sales_salary, cur));
    field("Admin salary", money(i.admin_salary, cur));
    field("Other overhead", money(i.other_overhead, cur));

    println!("\n{CYAN}Projection{RESET}");
    field("Appointments", r.appointments);
    field("Sales", r.sales);
    field("Revenue", money(r.revenue, cur));
    field("Total COGS", money(r.total_cogs, cur));
    field("Gross profit", format!("{} ({})", money(r.gross_profit, cur), pct(r.gross_margin_pct)));
    field("Total commissions", money(r.total_commissions, cur));
    field("Contribution profit", money(r.contribution_profit, cur));
    field("Total overhead", money(r.total_overhead, cur));
    field("Net profit", format!("{} ({})", money(r.net_profit, cur), pct(r.net_margin_pct)));
    field("Cost per lead", money(r.cpl, cur));
    field("Marketing ROI", format!("{:.2}x", r.roi));
    field("Owner take home", money(r.owner_take_home, cur));
    field("Net sales per lead", money(r.nsli, cur));
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Scenario { action } = cmd else {
        return Ok(());
    };
    let org = cfg.organization.as_str();
    let cur = cfg.currency_symbol.as_str();
    let mut pool = open_pool(cfg)?;

    match action {
        ScenarioCommand::Add {
            name,
            description,
            baseline,
            fields,
        } => {
            let patch = build_patch(Some(name), description.as_ref(), baseline.then_some(true), fields);
            let s = ScenarioLogic::create(&mut pool, org, &patch)?;
            success(format!(
                "Scenario #{} '{}' created: revenue {}, net profit {}{}",
                s.id,
                s.name,
                money(s.results.revenue, cur),
                money(s.results.net_profit, cur),
                if s.is_baseline { " (baseline)" } else { "" }
            ));
        }

        ScenarioCommand::Update {
            id,
            name,
            description,
            baseline,
            fields,
        } => {
            let patch = build_patch(name.as_ref(), description.as_ref(), *baseline, fields);
            let s = ScenarioLogic::update(&mut pool, org, *id, &patch)?;
            success(format!(
                "Scenario #{} '{}' updated to v{}: net profit {}",
                s.id,
                s.name,
                s.version,
                money(s.results.net_profit, cur)
            ));
        }

        ScenarioCommand::Show { id, json } => {
            let s = ScenarioLogic::get(&pool.conn, org, *id)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&s)?);
            } else {
                print_scenario(&s, cfg);
            }
        }

        ScenarioCommand::List => {
            let all = ScenarioLogic::list(&pool.conn, org)?;
            if all.is_empty() {
                info("No scenarios found.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::right("ID"),
                Column::left("Name"),
                Column::right("Ver"),
                Column::left("Base"),
                Column::right("Revenue"),
                Column::right("Net profit"),
                Column::right("Take home"),
            ]);
            for s in &all {
                table.add_row(vec![
                    s.id.to_string(),
                    s.name.clone(),
                    s.version.to_string(),
                    if s.is_baseline { "*" } else { "" }.to_string(),
                    money(s.results.revenue, cur),
                    money(s.results.net_profit, cur),
                    money(s.results.owner_take_home, cur),
                ]);
            }
            print!("{}", table.render(cfg.separator()));
        }

        ScenarioCommand::Compare { candidate, baseline } => {
            let report = ScenarioLogic::compare(&pool.conn, org, *baseline, *candidate)?;
            let d = &report.differences;
            let (b, c) = (&report.baseline.results, &report.candidate.results);

            header(
                format!(
                    "'{}' vs baseline '{}'",
                    report.candidate.name, report.baseline.name
                ),
                cfg.separator(),
            );

            let mut table = Table::new(vec![
                Column::left("Metric"),
                Column::right("Baseline"),
                Column::right("Candidate"),
                Column::right("Difference"),
            ]);
            let rows = [
                ("Revenue", b.revenue, c.revenue, d.revenue, Some(d.revenue_pct)),
                ("Gross profit", b.gross_profit, c.gross_profit, d.gross_profit, Some(d.gross_profit_pct)),
                ("Net profit", b.net_profit, c.net_profit, d.net_profit, Some(d.net_profit_pct)),
                (
                    "Owner take home",
                    b.owner_take_home,
                    c.owner_take_home,
                    d.owner_take_home,
                    Some(d.owner_take_home_pct),
                ),
                ("Cost per lead", b.cpl, c.cpl, d.cpl, None),
            ];
            for (label, base, cand, diff, diff_pct) in rows {
                table.add_row(vec![
                    label.to_string(),
                    money(base, cur),
                    money(cand, cur),
                    format!("{}{}{RESET}", color_for_delta(diff), delta(diff, diff_pct)),
                ]);
            }
            table.add_row(vec![
                "Marketing ROI".to_string(),
                format!("{:.2}x", b.roi),
                format!("{:.2}x", c.roi),
                format!("{}{:+.2}x{RESET}", color_for_delta(d.roi), d.roi),
            ]);
            print!("{}", table.render(cfg.separator()));
        }

        ScenarioCommand::Delete { id } => {
            ScenarioLogic::delete(&mut pool, org, *id)?;
            success(format!("Scenario #{id} deleted."));
        }
    }

    Ok(())
}
