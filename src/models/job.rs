use super::{job_status::JobStatus, profit_flag::ProfitFlag, settings::BusinessSettings};
use crate::core::calculator::commission::{calculate_commissions, days_to_collect};
use crate::core::calculator::financials::calculate_job_financials;
use chrono::{Local, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Job {
    pub id: i64,
    pub organization_id: String,
    pub customer_name: String,
    pub address: String,
    pub job_value: f64,
    pub status: JobStatus,
    pub scheduled_start_date: Option<NaiveDate>,
    pub scheduled_end_date: Option<NaiveDate>,
    pub subcontractor_id: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    // derived from job_value + BusinessSettings
    pub sub_materials: f64,
    pub sub_labor: f64,
    pub sub_total: f64,
    pub gross_profit: f64,
    pub gross_margin_pct: f64,
    pub deposit_required: f64,
    pub subcontractor_price: f64,
    pub balance_due: f64,
    pub meets_min_gp: bool,
    pub meets_target_gm: bool,
    pub profit_flag: ProfitFlag,

    pub sales_commission_pct: f64,
    pub sales_commission_amount: f64,
    pub pm_commission_pct: f64,
    pub pm_commission_amount: f64,

    pub invoice_date: Option<NaiveDate>,
    pub payment_received_date: Option<NaiveDate>,
    pub days_to_collect: Option<i64>,

    pub deposit_paid: bool,
    pub job_paid: bool,
    pub sales_commission_paid: bool,
    pub pm_commission_paid: bool,
    pub subcontractor_paid: bool,

    pub created_at: String,
    pub updated_at: String,
}

impl Job {
    /// Fresh lead with every derived field zeroed. Callers apply a patch
    /// and `recompute` before the first write.
    pub fn new(organization_id: &str, customer_name: &str) -> Self {
        let now = Local::now().to_rfc3339();
        Self {
            id: 0,
            organization_id: organization_id.to_string(),
            customer_name: customer_name.to_string(),
            address: String::new(),
            job_value: 0.0,
            status: JobStatus::Lead,
            scheduled_start_date: None,
            scheduled_end_date: None,
            subcontractor_id: None,
            latitude: None,
            longitude: None,
            sub_materials: 0.0,
            sub_labor: 0.0,
            sub_total: 0.0,
            gross_profit: 0.0,
            gross_margin_pct: 0.0,
            deposit_required: 0.0,
            subcontractor_price: 0.0,
            balance_due: 0.0,
            meets_min_gp: false,
            meets_target_gm: false,
            profit_flag: ProfitFlag::Ok,
            sales_commission_pct: 0.0,
            sales_commission_amount: 0.0,
            pm_commission_pct: 0.0,
            pm_commission_amount: 0.0,
            invoice_date: None,
            payment_received_date: None,
            days_to_collect: None,
            deposit_paid: false,
            job_paid: false,
            sales_commission_paid: false,
            pm_commission_paid: false,
            subcontractor_paid: false,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Last day occupied by the job; single-day jobs end where they start.
    pub fn scheduled_end_or_start(&self) -> Option<NaiveDate> {
        self.scheduled_end_date.or(self.scheduled_start_date)
    }

    /// Merge a patch into the record.
    ///
    /// `days_to_collect` is only refreshed when the patch carries a
    /// payment-received date and an invoice date is known (stored or
    /// supplied by the same patch).
    pub fn apply_patch(&mut self, patch: &JobPatch) {
        if let Some(v) = &patch.customer_name {
            self.customer_name = v.clone();
        }
        if let Some(v) = &patch.address {
            self.address = v.clone();
        }
        if let Some(v) = patch.job_value {
            self.job_value = v;
        }
        if let Some(v) = patch.status {
            self.status = v;
        }
        if let Some(v) = patch.scheduled_start_date {
            self.scheduled_start_date = Some(v);
        }
        if let Some(v) = patch.scheduled_end_date {
            self.scheduled_end_date = v;
        }
        if let Some(v) = &patch.subcontractor_id {
            self.subcontractor_id = v.clone();
        }
        if let Some(v) = patch.latitude {
            self.latitude = v;
        }
        if let Some(v) = patch.longitude {
            self.longitude = v;
        }
        if let Some(v) = patch.sales_commission_pct {
            self.sales_commission_pct = v;
        }
        if let Some(v) = patch.pm_commission_pct {
            self.pm_commission_pct = v;
        }
        if let Some(v) = patch.invoice_date {
            self.invoice_date = v;
            if v.is_none() {
                self.days_to_collect = None;
            }
        }
        if let Some(paid_on) = patch.payment_received_date {
            self.payment_received_date = Some(paid_on);
            if let Some(invoiced) = self.invoice_date {
                self.days_to_collect = Some(days_to_collect(invoiced, paid_on));
            }
        }
        if let Some(v) = patch.deposit_paid {
            self.deposit_paid = v;
        }
        if let Some(v) = patch.job_paid {
            self.job_paid = v;
        }
        if let Some(v) = patch.sales_commission_paid {
            self.sales_commission_paid = v;
        }
        if let Some(v) = patch.pm_commission_paid {
            self.pm_commission_paid = v;
        }
        if let Some(v) = patch.subcontractor_paid {
            self.subcontractor_paid = v;
        }
    }

    /// Recompute every money field derived from `job_value`.
    /// Called on every write so the derived columns cannot drift.
    pub fn recompute(&mut self, settings: &BusinessSettings) {
        let f = calculate_job_financials(self.job_value, settings);
        self.sub_materials = f.sub_materials;
        self.sub_labor = f.sub_labor;
        self.sub_total = f.sub_total;
        self.gross_profit = f.gross_profit;
        self.gross_margin_pct = f.gross_margin_pct;
        self.deposit_required = f.deposit_required;
        self.subcontractor_price = f.subcontractor_price;
        self.balance_due = f.balance_due;
        self.meets_min_gp = f.meets_min_gp;
        self.meets_target_gm = f.meets_target_gm;
        self.profit_flag = f.profit_flag;

        let c = calculate_commissions(
            self.job_value,
            self.sales_commission_pct,
            self.pm_commission_pct,
        );
        self.sales_commission_amount = c.sales_commission_amount;
        self.pm_commission_amount = c.pm_commission_amount;
    }
}

/// Typed partial update of a job. `None` leaves the stored value alone;
/// on the nullable fields `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct JobPatch {
    pub customer_name: Option<String>,
    pub address: Option<String>,
    pub job_value: Option<f64>,
    pub status: Option<JobStatus>,
    pub scheduled_start_date: Option<NaiveDate>,
    pub scheduled_end_date: Option<Option<NaiveDate>>,
    pub subcontractor_id: Option<Option<String>>,
    pub latitude: Option<Option<f64>>,
    pub longitude: Option<Option<f64>>,
    pub sales_commission_pct: Option<f64>,
    pub pm_commission_pct: Option<f64>,
    pub invoice_date: Option<Option<NaiveDate>>,
    pub payment_received_date: Option<NaiveDate>,
    pub deposit_paid: Option<bool>,
    pub job_paid: Option<bool>,
    pub sales_commission_paid: Option<bool>,
    pub pm_commission_paid: Option<bool>,
    pub subcontractor_paid: Option<bool>,
}
