use super::finite;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Commissions {
    pub sales_commission_amount: f64,
    pub pm_commission_amount: f64,
}

pub fn commission_amount(job_value: f64, pct: f64) -> f64 {
    finite(job_value) * finite(pct) / 100.0
}

/// Sales-rep and project-manager commissions; neither depends on the other.
pub fn calculate_commissions(job_value: f64, sales_pct: f64, pm_pct: f64) -> Commissions {
    Commissions {
        sales_commission_amount: commission_amount(job_value, sales_pct),
        pm_commission_amount: commission_amount(job_value, pm_pct),
    }
}

/// Whole days between invoicing and payment (negative if paid early).
pub fn days_to_collect(invoice_date: NaiveDate, payment_received_date: NaiveDate) -> i64 {
    payment_received_date
        .signed_duration_since(invoice_date)
        .num_days()
}
