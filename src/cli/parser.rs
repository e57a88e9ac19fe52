use crate::export::ExportFormat;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for paintledger
/// Job costing, commissions, scenarios and targets for a painting business
#[derive(Parser)]
#[command(
    name = "paintledger",
    version = env!("CARGO_PKG_VERSION"),
    about = "Painting-contractor ledger: job financials, commissions, what-if scenarios and sales targets on SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the organization configured in the config file
    #[arg(global = true, long = "org")]
    pub org: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the effective configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "fix", requires = "check", help = "Write missing fields with their defaults")]
        fix: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Specify the editor to use (vim, nano, or custom path)")]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,

        #[arg(long = "recalc", help = "Recompute job financials with the current settings")]
        recalc: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        #[arg(long = "op", help = "Only rows whose operation starts with this prefix")]
        op: Option<String>,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f', help = "Overwrite an existing file without asking")]
        force: bool,
    },

    /// Show or change the business settings of the organization
    Settings {
        #[arg(long = "show", help = "Print the current settings")]
        show: bool,

        #[arg(long = "sub-materials-pct", value_name = "PCT")]
        sub_materials_pct: Option<f64>,

        #[arg(long = "sub-labor-pct", value_name = "PCT")]
        sub_labor_pct: Option<f64>,

        #[arg(long = "sub-payout-pct", value_name = "PCT")]
        sub_payout_pct: Option<f64>,

        #[arg(long = "min-gross-profit", value_name = "AMOUNT")]
        min_gross_profit: Option<f64>,

        #[arg(long = "target-margin-pct", value_name = "PCT")]
        target_margin_pct: Option<f64>,

        #[arg(long = "deposit-pct", value_name = "PCT")]
        deposit_pct: Option<f64>,
    },

    /// Create, update and browse jobs
    Job {
        #[command(subcommand)]
        action: JobCommand,
    },

    /// What-if scenarios and baseline comparison
    Scenario {
        #[command(subcommand)]
        action: ScenarioCommand,
    },

    /// Seasonal curves, monthly/daily targets and rollups
    Targets {
        #[command(subcommand)]
        action: TargetsCommand,
    },

    /// Crew hours per job and payroll
    Time {
        #[command(subcommand)]
        action: TimeCommand,
    },

    /// Export jobs
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter by scheduled year/month/day or a custom range (YYYY-MM:YYYY-MM)"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

/// Fields shared by `job add` and `job update`. Dates are YYYY-MM-DD.
#[derive(Args, Debug, Clone, Default)]
pub struct JobFields {
    #[arg(long)]
    pub address: Option<String>,

    #[arg(long = "value", allow_hyphen_values = true, help = "Job value (sold price)")]
    pub value: Option<f64>,

    #[arg(long, help = "lead, got_the_job, scheduled or completed")]
    pub status: Option<String>,

    #[arg(long = "start", value_name = "DATE")]
    pub start: Option<String>,

    #[arg(long = "end", value_name = "DATE")]
    pub end: Option<String>,

    #[arg(long = "sub", help = "Subcontractor id")]
    pub sub: Option<String>,

    #[arg(long = "lat", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    #[arg(long = "lng", allow_hyphen_values = true)]
    pub lng: Option<f64>,

    #[arg(long = "sales-pct", value_name = "PCT")]
    pub sales_pct: Option<f64>,

    #[arg(long = "pm-pct", value_name = "PCT")]
    pub pm_pct: Option<f64>,

    #[arg(long = "invoice", value_name = "DATE")]
    pub invoice: Option<String>,

    #[arg(long = "paid-on", value_name = "DATE", help = "Payment received date")]
    pub paid_on: Option<String>,

    #[arg(long = "deposit-paid", value_name = "BOOL")]
    pub deposit_paid: Option<bool>,

    #[arg(long = "job-paid", value_name = "BOOL")]
    pub job_paid: Option<bool>,

    #[arg(long = "sales-comm-paid", value_name = "BOOL")]
    pub sales_comm_paid: Option<bool>,

    #[arg(long = "pm-comm-paid", value_name = "BOOL")]
    pub pm_comm_paid: Option<bool>,

    #[arg(long = "sub-paid", value_name = "BOOL")]
    pub sub_paid: Option<bool>,
}

/// Status / subcontractor filters of the list, calendar and map views.
#[derive(Args, Debug, Clone, Default)]
pub struct JobFilterArgs {
    #[arg(long = "status", value_delimiter = ',', help = "Comma separated statuses")]
    pub status: Vec<String>,

    #[arg(long = "sub", help = "Subcontractor id")]
    pub sub: Option<String>,
}

#[derive(Subcommand)]
pub enum JobCommand {
    /// Add a job
    Add {
        /// Customer name
        customer: String,

        #[command(flatten)]
        fields: JobFields,
    },

    /// Update a job; derived amounts are recomputed
    Update {
        id: i64,

        #[arg(long = "customer")]
        customer: Option<String>,

        #[arg(
            long,
            value_delimiter = ',',
            value_name = "FIELD",
            help = "Unset fields: end, sub, location, invoice"
        )]
        clear: Vec<String>,

        #[command(flatten)]
        fields: JobFields,
    },

    /// Show one job
    Show {
        id: i64,

        #[arg(long)]
        json: bool,
    },

    /// List jobs
    List {
        #[command(flatten)]
        filter: JobFilterArgs,

        #[arg(long, default_value = "all", help = "all, this_week, this_month or next_month")]
        period: String,
    },

    /// Month grid (default) or one week of scheduled jobs
    Calendar {
        #[arg(long, value_name = "YYYY-MM", conflicts_with = "week")]
        month: Option<String>,

        #[arg(long, value_name = "DATE", help = "Any day of the week to show")]
        week: Option<String>,

        #[command(flatten)]
        filter: JobFilterArgs,
    },

    /// Jobs with coordinates, for map pins
    Map {
        #[command(flatten)]
        filter: JobFilterArgs,

        #[arg(long, default_value = "all", help = "all, this_week, this_month or next_month")]
        period: String,
    },
}

/// Scenario assumptions. Rates and cost shares are fractions (0.25 = 25%).
#[derive(Args, Debug, Clone, Default)]
pub struct ScenarioFields {
    #[arg(long)]
    pub leads: Option<f64>,

    #[arg(long = "issue-rate")]
    pub issue_rate: Option<f64>,

    #[arg(long = "closing-rate")]
    pub closing_rate: Option<f64>,

    #[arg(long = "average-sale")]
    pub average_sale: Option<f64>,

    #[arg(long = "labor-pct")]
    pub labor_pct: Option<f64>,

    #[arg(long = "materials-pct")]
    pub materials_pct: Option<f64>,

    #[arg(long = "other-pct")]
    pub other_pct: Option<f64>,

    #[arg(long = "sales-comm-pct")]
    pub sales_comm_pct: Option<f64>,

    #[arg(long = "pm-comm-pct")]
    pub pm_comm_pct: Option<f64>,

    #[arg(long = "marketing")]
    pub marketing: Option<f64>,

    #[arg(long = "owner-salary")]
    pub owner_salary: Option<f64>,

    #[arg(long = "production-salary")]
    pub production_salary: Option<f64>,

    #[arg(long = "sales-salary")]
    pub sales_salary: Option<f64>,

    #[arg(long = "admin-salary")]
    pub admin_salary: Option<f64>,

    #[arg(long = "overhead")]
    pub overhead: Option<f64>,
}

#[derive(Subcommand)]
pub enum ScenarioCommand {
    /// Create a scenario
    Add {
        name: String,

        #[arg(long)]
        description: Option<String>,

        #[arg(long, help = "Make it the organization's baseline")]
        baseline: bool,

        #[command(flatten)]
        fields: ScenarioFields,
    },

    /// Update a scenario (bumps its version)
    Update {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long, value_name = "BOOL")]
        baseline: Option<bool>,

        #[command(flatten)]
        fields: ScenarioFields,
    },

    /// Show inputs and projected results
    Show {
        id: i64,

        #[arg(long)]
        json: bool,
    },

    /// List scenarios
    List,

    /// Compare a scenario against the baseline (or --baseline <ID>)
    Compare {
        candidate: i64,

        #[arg(long, value_name = "ID")]
        baseline: Option<i64>,
    },

    /// Delete a scenario
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum TargetsCommand {
    /// Show or set the seasonal curve of a metric (leads, sales, revenue)
    Curve {
        metric: Option<String>,

        #[arg(long, value_delimiter = ',', help = "Twelve comma separated weights, January first")]
        weights: Vec<f64>,

        #[arg(long, requires = "weight")]
        month: Option<u32>,

        #[arg(long, requires = "month")]
        weight: Option<f64>,
    },

    /// Distribute annual goals over the months of a year
    Generate {
        year: i32,

        #[arg(long, default_value_t = 0.0)]
        leads: f64,

        #[arg(long, default_value_t = 0.0)]
        sales: f64,

        #[arg(long, default_value_t = 0.0)]
        revenue: f64,

        #[arg(long = "gross-profit", default_value_t = 0.0)]
        gross_profit: f64,

        #[arg(long, default_value_t = 0.0)]
        reviews: f64,

        #[arg(long, default_value_t = 0.0)]
        marketing: f64,
    },

    /// Record a monthly actual counter
    Actual {
        year: i32,
        month: u32,

        /// leads, appointments, sales, revenue, gross_profit, reviews, marketing_spend
        field: String,

        value: f64,
    },

    /// Set a daily counter (actual by default)
    Daily {
        date: String,
        field: String,
        value: f64,

        #[arg(long, help = "Set the goal instead of the actual")]
        goal: bool,
    },

    /// Cumulative totals: year-to-date by month, or by day over --range
    Rollup {
        #[arg(long, conflicts_with = "range")]
        year: Option<i32>,

        #[arg(long, value_name = "RANGE")]
        range: Option<String>,
    },

    /// Monthly targets of a year with the yearly totals
    Year { year: i32 },
}

#[derive(Subcommand)]
pub enum TimeCommand {
    /// Log hours of an employee on a job (same day and job replaces)
    Log {
        employee: String,
        job: i64,

        #[arg(long)]
        hours: f64,

        #[arg(long, default_value_t = 0.0)]
        rate: f64,

        #[arg(long, value_name = "DATE", help = "Defaults to today")]
        date: Option<String>,

        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Hours and amounts per employee over a range (default: this month)
    Payroll {
        #[arg(long, value_name = "RANGE")]
        range: Option<String>,

        #[arg(long, help = "Also list every entry")]
        details: bool,
    },
}
