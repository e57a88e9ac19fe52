use crate::models::job::Job;
use crate::utils::date::format_opt_date;
use serde::Serialize;

/// Flat, spreadsheet-friendly view of a job.
#[derive(Serialize, Clone, Debug)]
pub struct JobExport {
    pub id: i64,
    pub customer_name: String,
    pub address: String,
    pub status: String,
    pub scheduled_start_date: String,
    pub scheduled_end_date: String,
    pub subcontractor_id: String,
    pub job_value: f64,
    pub sub_total: f64,
    pub gross_profit: f64,
    pub gross_margin_pct: f64,
    pub deposit_required: f64,
    pub balance_due: f64,
    pub profit_flag: String,
    pub sales_commission_amount: f64,
    pub pm_commission_amount: f64,
    pub invoice_date: String,
    pub payment_received_date: String,
    pub days_to_collect: String,
    pub job_paid: bool,
}

impl From<&Job> for JobExport {
    fn from(j: &Job) -> Self {
        Self {
            id: j.id,
            customer_name: j.customer_name.clone(),
            address: j.address.clone(),
            status: j.status.to_db_str().to_string(),
            scheduled_start_date: format_opt_date(&j.scheduled_start_date),
            scheduled_end_date: format_opt_date(&j.scheduled_end_date),
            subcontractor_id: j.subcontractor_id.clone().unwrap_or_default(),
            job_value: j.job_value,
            sub_total: j.sub_total,
            gross_profit: j.gross_profit,
            gross_margin_pct: j.gross_margin_pct,
            deposit_required: j.deposit_required,
            balance_due: j.balance_due,
            profit_flag: j.profit_flag.as_str().to_string(),
            sales_commission_amount: j.sales_commission_amount,
            pm_commission_amount: j.pm_commission_amount,
            invoice_date: format_opt_date(&j.invoice_date),
            payment_received_date: format_opt_date(&j.payment_received_date),
            days_to_collect: j.days_to_collect.map(|d| d.to_string()).unwrap_or_default(),
            job_paid: j.job_paid,
        }
    }
}

pub(crate) fn get_headers() -> Vec<&'static str> {
    vec![
        "id",
        "customer_name",
        "address",
        "status",
        "scheduled_start_date",
        "scheduled_end_date",
        "subcontractor_id",
        "job_value",
        "sub_total",
        "gross_profit",
        "gross_margin_pct",
        "deposit_required",
        "balance_due",
        "profit_flag",
        "sales_commission_amount",
        "pm_commission_amount",
        "invoice_date",
        "payment_received_date",
        "days_to_collect",
        "job_paid",
    ]
}

/// Same order as `get_headers`.
pub(crate) fn job_to_row(j: &JobExport) -> Vec<String> {
    vec![
        j.id.to_string(),
        j.customer_name.clone(),
        j.address.clone(),
        j.status.clone(),
        j.scheduled_start_date.clone(),
        j.scheduled_end_date.clone(),
        j.subcontractor_id.clone(),
        format!("{:.2}", j.job_value),
        format!("{:.2}", j.sub_total),
        format!("{:.2}", j.gross_profit),
        format!("{:.2}", j.gross_margin_pct),
        format!("{:.2}", j.deposit_required),
        format!("{:.2}", j.balance_due),
        j.profit_flag.clone(),
        format!("{:.2}", j.sales_commission_amount),
        format!("{:.2}", j.pm_commission_amount),
        j.invoice_date.clone(),
        j.payment_received_date.clone(),
        j.days_to_collect.clone(),
        if j.job_paid { "yes" } else { "no" }.to_string(),
    ]
}
