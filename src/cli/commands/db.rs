use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::db_utils::recalc_all_jobs;
use crate::db::log::ttlog;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RED, RESET};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info,
        recalc,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        if *migrate {
            println!("{CYAN}▶ Running migrations…{RESET}");
            let applied = run_pending_migrations(&pool.conn)?;
            println!("{GREEN}✔ Migration completed ({applied} applied).{RESET}\n");
        }

        if *recalc {
            println!("{CYAN}▶ Recomputing job financials…{RESET}");
            let changed = recalc_all_jobs(&mut pool, &cfg.organization)?;
            ttlog(
                &pool.conn,
                "recalc",
                &cfg.organization,
                &format!("{changed} job(s) updated"),
            )?;
            println!("{GREEN}✔ {changed} job(s) updated.{RESET}\n");
        }

        if *info {
            stats::print_db_info(&mut pool, &cfg.database, &cfg.organization, &cfg.currency_symbol)?;
        }

        if *check {
            println!("{CYAN}▶ Running integrity check…{RESET}");

            let integrity: String = pool
                .conn
                .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

            if integrity == "ok" {
                println!("{GREEN}✔ Integrity check passed.{RESET}\n");
            } else {
                println!("{RED}✘ Integrity check failed:{RESET} {integrity}\n");
            }
        }

        if *vacuum {
            println!("{CYAN}▶ Running VACUUM…{RESET}");
            pool.conn.execute_batch("VACUUM;")?;
            println!("{GREEN}✔ Vacuum completed.{RESET}\n");
        }
    }

    Ok(())
}
