use crate::errors::AppResult;
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension};

/// Ensure that the `log` table exists. Applied migrations are recorded in it,
/// so it has to exist before anything else.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

const CORE_TABLES: &str = r#"
    CREATE TABLE IF NOT EXISTS business_settings (
        organization_id          TEXT PRIMARY KEY,
        sub_materials_pct        REAL NOT NULL,
        sub_labor_pct            REAL NOT NULL,
        sub_payout_pct           REAL NOT NULL,
        min_gross_profit_per_job REAL NOT NULL,
        target_gross_margin_pct  REAL NOT NULL,
        default_deposit_pct      REAL NOT NULL,
        updated_at               TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS jobs (
        id                      INTEGER PRIMARY KEY AUTOINCREMENT,
        organization_id         TEXT NOT NULL,
        customer_name           TEXT NOT NULL,
        address                 TEXT NOT NULL DEFAULT '',
        job_value               REAL NOT NULL DEFAULT 0,
        status                  TEXT NOT NULL DEFAULT 'lead'
                                CHECK(status IN ('lead','got_the_job','scheduled','completed')),
        scheduled_start_date    TEXT,
        scheduled_end_date      TEXT,
        subcontractor_id        TEXT,
        latitude                REAL,
        longitude               REAL,
        sub_materials           REAL NOT NULL DEFAULT 0,
        sub_labor               REAL NOT NULL DEFAULT 0,
        sub_total               REAL NOT NULL DEFAULT 0,
        gross_profit            REAL NOT NULL DEFAULT 0,
        gross_margin_pct        REAL NOT NULL DEFAULT 0,
        deposit_required        REAL NOT NULL DEFAULT 0,
        subcontractor_price     REAL NOT NULL DEFAULT 0,
        balance_due             REAL NOT NULL DEFAULT 0,
        meets_min_gp            INTEGER NOT NULL DEFAULT 0,
        meets_target_gm         INTEGER NOT NULL DEFAULT 0,
        profit_flag             TEXT NOT NULL DEFAULT 'OK'
                                CHECK(profit_flag IN ('OK','RAISE_PRICE','FIX_SCOPE')),
        sales_commission_pct    REAL NOT NULL DEFAULT 0,
        sales_commission_amount REAL NOT NULL DEFAULT 0,
        pm_commission_pct       REAL NOT NULL DEFAULT 0,
        pm_commission_amount    REAL NOT NULL DEFAULT 0,
        invoice_date            TEXT,
        payment_received_date   TEXT,
        days_to_collect         INTEGER,
        deposit_paid            INTEGER NOT NULL DEFAULT 0,
        job_paid                INTEGER NOT NULL DEFAULT 0,
        sales_commission_paid   INTEGER NOT NULL DEFAULT 0,
        pm_commission_paid      INTEGER NOT NULL DEFAULT 0,
        subcontractor_paid      INTEGER NOT NULL DEFAULT 0,
        created_at              TEXT NOT NULL,
        updated_at              TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_jobs_org_status ON jobs(organization_id, status);
    CREATE INDEX IF NOT EXISTS idx_jobs_org_start  ON jobs(organization_id, scheduled_start_date);
"#;

const SCENARIO_TABLES: &str = r#"
    CREATE TABLE IF NOT EXISTS scenarios (
        id              INTEGER PRIMARY KEY AUTOINCREMENT,
        organization_id TEXT NOT NULL,
        name            TEXT NOT NULL,
        description     TEXT NOT NULL DEFAULT '',
        version         INTEGER NOT NULL DEFAULT 1,
        is_baseline     INTEGER NOT NULL DEFAULT 0,
        assumptions     TEXT NOT NULL,
        results         TEXT NOT NULL,
        created_at      TEXT NOT NULL,
        updated_at      TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_scenarios_org ON scenarios(organization_id);

    -- at most one baseline per organization, enforced by the engine itself
    CREATE UNIQUE INDEX IF NOT EXISTS idx_scenarios_one_baseline
        ON scenarios(organization_id) WHERE is_baseline = 1;
"#;

const TARGET_TABLES: &str = r#"
    CREATE TABLE IF NOT EXISTS seasonal_curves (
        id              INTEGER PRIMARY KEY AUTOINCREMENT,
        organization_id TEXT NOT NULL,
        metric          TEXT NOT NULL CHECK(metric IN ('leads','sales','revenue')),
        month           INTEGER NOT NULL CHECK(month BETWEEN 1 AND 12),
        weight          REAL NOT NULL,
        UNIQUE(organization_id, metric, month)
    );

    CREATE TABLE IF NOT EXISTS monthly_targets (
        id                     INTEGER PRIMARY KEY AUTOINCREMENT,
        organization_id        TEXT NOT NULL,
        month                  INTEGER NOT NULL CHECK(month BETWEEN 1 AND 12),
        year                   INTEGER NOT NULL,
        quarter                INTEGER NOT NULL,
        leads_goal             REAL NOT NULL DEFAULT 0,
        appointments_goal      REAL NOT NULL DEFAULT 0,
        sales_goal             REAL NOT NULL DEFAULT 0,
        revenue_goal           REAL NOT NULL DEFAULT 0,
        gross_profit_goal      REAL NOT NULL DEFAULT 0,
        reviews_goal           REAL NOT NULL DEFAULT 0,
        marketing_spend_goal   REAL NOT NULL DEFAULT 0,
        leads_actual           REAL NOT NULL DEFAULT 0,
        appointments_actual    REAL NOT NULL DEFAULT 0,
        sales_actual           REAL NOT NULL DEFAULT 0,
        revenue_actual         REAL NOT NULL DEFAULT 0,
        gross_profit_actual    REAL NOT NULL DEFAULT 0,
        reviews_actual         REAL NOT NULL DEFAULT 0,
        marketing_spend_actual REAL NOT NULL DEFAULT 0,
        UNIQUE(organization_id, month, year)
    );

    CREATE TABLE IF NOT EXISTS daily_targets (
        id                     INTEGER PRIMARY KEY AUTOINCREMENT,
        organization_id        TEXT NOT NULL,
        date                   TEXT NOT NULL,
        leads_goal             REAL NOT NULL DEFAULT 0,
        appointments_goal      REAL NOT NULL DEFAULT 0,
        sales_goal             REAL NOT NULL DEFAULT 0,
        revenue_goal           REAL NOT NULL DEFAULT 0,
        gross_profit_goal      REAL NOT NULL DEFAULT 0,
        reviews_goal           REAL NOT NULL DEFAULT 0,
        marketing_spend_goal   REAL NOT NULL DEFAULT 0,
        leads_actual           REAL NOT NULL DEFAULT 0,
        appointments_actual    REAL NOT NULL DEFAULT 0,
        sales_actual           REAL NOT NULL DEFAULT 0,
        revenue_actual         REAL NOT NULL DEFAULT 0,
        gross_profit_actual    REAL NOT NULL DEFAULT 0,
        reviews_actual         REAL NOT NULL DEFAULT 0,
        marketing_spend_actual REAL NOT NULL DEFAULT 0,
        UNIQUE(organization_id, date)
    );
"#;

const TIME_ENTRY_TABLES: &str = r#"
    CREATE TABLE IF NOT EXISTS time_entries (
        id              INTEGER PRIMARY KEY AUTOINCREMENT,
        organization_id TEXT NOT NULL,
        employee_id     TEXT NOT NULL,
        job_id          INTEGER NOT NULL REFERENCES jobs(id),
        date            TEXT NOT NULL,
        hours           REAL NOT NULL DEFAULT 0,
        hourly_rate     REAL NOT NULL DEFAULT 0,
        notes           TEXT NOT NULL DEFAULT '',
        created_at      TEXT NOT NULL,
        updated_at      TEXT NOT NULL,
        UNIQUE(organization_id, employee_id, job_id, date)
    );

    CREATE INDEX IF NOT EXISTS idx_time_entries_date ON time_entries(organization_id, date);
"#;

/// Ordered schema history: (version, DDL, log message).
const MIGRATIONS: &[(&str, &str, &str)] = &[
    (
        "20250301_0001_core_tables",
        CORE_TABLES,
        "Created business_settings and jobs tables",
    ),
    (
        "20250315_0002_scenarios",
        SCENARIO_TABLES,
        "Created scenarios table with single-baseline index",
    ),
    (
        "20250402_0003_targets",
        TARGET_TABLES,
        "Created seasonal curve and target tables",
    ),
    (
        "20250510_0004_time_entries",
        TIME_ENTRY_TABLES,
        "Created time_entries table",
    ),
];

fn is_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Apply one migration and mark it in the log, atomically.
fn apply_migration(conn: &Connection, version: &str, ddl: &str, message: &str) -> AppResult<bool> {
    if is_applied(conn, version)? {
        return Ok(false);
    }

    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(ddl)?;
    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    tx.commit()?;

    Ok(true)
}

/// Public entry point: run all pending migrations. Returns how many ran.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<usize> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    for (version, ddl, message) in MIGRATIONS {
        if apply_migration(conn, version, ddl, message)? {
            success(format!("Migration applied: {version} → {message}"));
            applied += 1;
        }
    }
    Ok(applied)
}

/// Initialize the database. All schema comes from the migrations.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    run_pending_migrations(conn)?;
    Ok(())
}
