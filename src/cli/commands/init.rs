use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::log;
use crate::db::migrate::init_db;
use crate::errors::AppResult;
use crate::ui::messages::warning;
use rusqlite::Connection;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the SQLite database with every migration applied
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.clone(), cli.org.clone(), cli.test)?;

    println!("⚙️  Initializing paintledger…");
    println!("🗄️  Database     : {}", cfg.database);
    println!("🏢 Organization : {}", cfg.organization);

    let conn = Connection::open(&cfg.database)?;
    init_db(&conn)?;

    println!("✅ Database initialized at {}", cfg.database);

    if let Err(e) = log::ttlog(
        &conn,
        "init",
        &cfg.organization,
        &format!("Database initialized at {}", cfg.database),
    ) {
        warning(format!("Failed to write internal log: {e}"));
    }

    println!("🎉 paintledger initialization completed!");
    Ok(())
}
