use serde::{Deserialize, Serialize};

pub const DEFAULT_SUB_PAYOUT_PCT: f64 = 60.0;
pub const DEFAULT_SUB_MATERIALS_PCT: f64 = 15.0;
pub const DEFAULT_SUB_LABOR_PCT: f64 = 45.0;
pub const DEFAULT_MIN_GROSS_PROFIT_PER_JOB: f64 = 900.0;
pub const DEFAULT_TARGET_GROSS_MARGIN_PCT: f64 = 40.0;
pub const DEFAULT_DEPOSIT_PCT: f64 = 30.0;

/// Per-organization percentages feeding the financial calculator.
/// Percentages are stored as 0..100 and divided by 100 at use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BusinessSettings {
    pub sub_materials_pct: f64,
    pub sub_labor_pct: f64,
    pub sub_payout_pct: f64,
    pub min_gross_profit_per_job: f64,
    pub target_gross_margin_pct: f64,
    pub default_deposit_pct: f64,
}

impl Default for BusinessSettings {
    fn default() -> Self {
        Self {
            sub_materials_pct: DEFAULT_SUB_MATERIALS_PCT,
            sub_labor_pct: DEFAULT_SUB_LABOR_PCT,
            sub_payout_pct: DEFAULT_SUB_PAYOUT_PCT,
            min_gross_profit_per_job: DEFAULT_MIN_GROSS_PROFIT_PER_JOB,
            target_gross_margin_pct: DEFAULT_TARGET_GROSS_MARGIN_PCT,
            default_deposit_pct: DEFAULT_DEPOSIT_PCT,
        }
    }
}

/// Partial update of the settings row; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct SettingsPatch {
    pub sub_materials_pct: Option<f64>,
    pub sub_labor_pct: Option<f64>,
    pub sub_payout_pct: Option<f64>,
    pub min_gross_profit_per_job: Option<f64>,
    pub target_gross_margin_pct: Option<f64>,
    pub default_deposit_pct: Option<f64>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        self.sub_materials_pct.is_none()
            && self.sub_labor_pct.is_none()
            && self.sub_payout_pct.is_none()
            && self.min_gross_profit_per_job.is_none()
            && self.target_gross_margin_pct.is_none()
            && self.default_deposit_pct.is_none()
    }

    pub fn apply(&self, s: &mut BusinessSettings) {
        if let Some(v) = self.sub_materials_pct {
            s.sub_materials_pct = v;
        }
        if let Some(v) = self.sub_labor_pct {
            s.sub_labor_pct = v;
        }
        if let Some(v) = self.sub_payout_pct {
            s.sub_payout_pct = v;
        }
        if let Some(v) = self.min_gross_profit_per_job {
            s.min_gross_profit_per_job = v;
        }
        if let Some(v) = self.target_gross_margin_pct {
            s.target_gross_margin_pct = v;
        }
        if let Some(v) = self.default_deposit_pct {
            s.default_deposit_pct = v;
        }
    }
}
