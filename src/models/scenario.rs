use serde::{Deserialize, Serialize};

/// Business assumptions of a what-if scenario.
///
/// `issue_rate`, `closing_rate` and every `*_pct` here are fractions
/// (0.25 = 25%), unlike the 0..100 percentages of `BusinessSettings`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScenarioInputs {
    pub leads_count: f64,
    pub issue_rate: f64,
    pub closing_rate: f64,
    pub average_sale: f64,
    pub cogs_labor_pct: f64,
    pub cogs_materials_pct: f64,
    pub cogs_other_pct: f64,
    pub sales_commission_pct: f64,
    pub pm_commission_pct: f64,
    pub marketing_spend: f64,
    pub owner_salary: f64,
    pub production_salary: f64,
    pub sales_salary: f64,
    pub admin_salary: f64,
    pub other_overhead: f64,
}

/// Cached output of the scenario pipeline, persisted next to the inputs.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScenarioResults {
    pub appointments: f64,
    pub sales: f64,
    pub revenue: f64,
    pub cogs_labor: f64,
    pub cogs_materials: f64,
    pub cogs_other: f64,
    pub total_cogs: f64,
    pub gross_profit: f64,
    pub gross_margin_pct: f64,
    pub sales_commission: f64,
    pub pm_commission: f64,
    pub total_commissions: f64,
    pub contribution_profit: f64,
    pub total_overhead: f64,
    pub total_expenses: f64,
    pub net_profit: f64,
    pub net_margin_pct: f64,
    pub cpl: f64,
    pub roi: f64,
    pub owner_take_home: f64,
    pub nsli: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenario {
    pub id: i64,
    pub organization_id: String,
    pub name: String,
    pub description: String,
    pub version: i64,
    pub is_baseline: bool,
    pub inputs: ScenarioInputs,
    pub results: ScenarioResults,
    pub created_at: String,
    pub updated_at: String,
}

/// Deltas of a candidate scenario against a baseline.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ScenarioComparison {
    pub revenue: f64,
    pub revenue_pct: f64,
    pub gross_profit: f64,
    pub gross_profit_pct: f64,
    pub net_profit: f64,
    pub net_profit_pct: f64,
    pub owner_take_home: f64,
    pub owner_take_home_pct: f64,
    pub cpl: f64,
    pub roi: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ScenarioPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_baseline: Option<bool>,
    pub leads_count: Option<f64>,
    pub issue_rate: Option<f64>,
    pub closing_rate: Option<f64>,
    pub average_sale: Option<f64>,
    pub cogs_labor_pct: Option<f64>,
    pub cogs_materials_pct: Option<f64>,
    pub cogs_other_pct: Option<f64>,
    pub sales_commission_pct: Option<f64>,
    pub pm_commission_pct: Option<f64>,
    pub marketing_spend: Option<f64>,
    pub owner_salary: Option<f64>,
    pub production_salary: Option<f64>,
    pub sales_salary: Option<f64>,
    pub admin_salary: Option<f64>,
    pub other_overhead: Option<f64>,
}

impl ScenarioPatch {
    pub fn apply(&self, s: &mut Scenario) {
        if let Some(v) = &self.name {
            s.name = v.clone();
        }
        if let Some(v) = &self.description {
            s.description = v.clone();
        }
        if let Some(v) = self.is_baseline {
            s.is_baseline = v;
        }

        let i = &mut s.inputs;
        let fields: [(Option<f64>, &mut f64); 15] = [
            (self.leads_count, &mut i.leads_count),
            (self.issue_rate, &mut i.issue_rate),
            (self.closing_rate, &mut i.closing_rate),
            (self.average_sale, &mut i.average_sale),
            (self.cogs_labor_pct, &mut i.cogs_labor_pct),
            (self.cogs_materials_pct, &mut i.cogs_materials_pct),
            (self.cogs_other_pct, &mut i.cogs_other_pct),
            (self.sales_commission_pct, &mut i.sales_commission_pct),
            (self.pm_commission_pct, &mut i.pm_commission_pct),
            (self.marketing_spend, &mut i.marketing_spend),
            (self.owner_salary, &mut i.owner_salary),
            (self.production_salary, &mut i.production_salary),
            (self.sales_salary, &mut i.sales_salary),
            (self.admin_salary, &mut i.admin_salary),
            (self.other_overhead, &mut i.other_overhead),
        ];
        for (value, slot) in fields {
            if let Some(v) = value {
                *slot = v;
            }
        }
    }

    /// Rates that must stay within 0..=1.
    pub fn rates(&self) -> [(&'static str, Option<f64>); 7] {
        [
            ("issue_rate", self.issue_rate),
            ("closing_rate", self.closing_rate),
            ("cogs_labor_pct", self.cogs_labor_pct),
            ("cogs_materials_pct", self.cogs_materials_pct),
            ("cogs_other_pct", self.cogs_other_pct),
            ("sales_commission_pct", self.sales_commission_pct),
            ("pm_commission_pct", self.pm_commission_pct),
        ]
    }

    /// Counts and currency amounts that must be non-negative.
    pub fn amounts(&self) -> [(&'static str, Option<f64>); 8] {
        [
            ("leads_count", self.leads_count),
            ("average_sale", self.average_sale),
            ("marketing_spend", self.marketing_spend),
            ("owner_salary", self.owner_salary),
            ("production_salary", self.production_salary),
            ("sales_salary", self.sales_salary),
            ("admin_salary", self.admin_salary),
            ("other_overhead", self.other_overhead),
        ]
    }
}
