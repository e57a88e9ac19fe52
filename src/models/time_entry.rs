use chrono::NaiveDate;
use serde::Serialize;

/// Hours a subcontractor crew member put on a job on one day.
/// (organization, employee, job, date) is the natural key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeEntry {
    pub id: i64,
    pub organization_id: String,
    pub employee_id: String,
    pub job_id: i64,
    pub date: NaiveDate,
    pub hours: f64,
    pub hourly_rate: f64,
    pub notes: String,
}

impl TimeEntry {
    pub fn amount(&self) -> f64 {
        self.hours * self.hourly_rate
    }
}

/// Per-employee payroll line over a date range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayrollLine {
    pub employee_id: String,
    pub entries: i64,
    pub hours: f64,
    pub amount: f64,
}
