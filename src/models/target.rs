use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// Metrics with their own seasonal curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveMetric {
    Leads,
    Sales,
    Revenue,
}

impl CurveMetric {
    pub const ALL: [CurveMetric; 3] = [CurveMetric::Leads, CurveMetric::Sales, CurveMetric::Revenue];

    pub fn to_db_str(&self) -> &'static str {
        match self {
            CurveMetric::Leads => "leads",
            CurveMetric::Sales => "sales",
            CurveMetric::Revenue => "revenue",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "leads" => Some(CurveMetric::Leads),
            "sales" => Some(CurveMetric::Sales),
            "revenue" => Some(CurveMetric::Revenue),
            _ => None,
        }
    }
}

/// Share of an annual goal assigned to one month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonalCurve {
    pub metric: CurveMetric,
    pub month: u32,
    pub weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnnualGoals {
    pub leads: f64,
    pub sales: f64,
    pub revenue: f64,
    pub gross_profit: f64,
    pub reviews: f64,
    pub marketing_spend: f64,
}

/// Goal or actual counters of one period (day or month).
/// Fields a period does not track simply stay at 0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TargetCounters {
    pub leads: f64,
    pub appointments: f64,
    pub sales: f64,
    pub revenue: f64,
    pub gross_profit: f64,
    pub reviews: f64,
    pub marketing_spend: f64,
}

impl AddAssign for TargetCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.leads += rhs.leads;
        self.appointments += rhs.appointments;
        self.sales += rhs.sales;
        self.revenue += rhs.revenue;
        self.gross_profit += rhs.gross_profit;
        self.reviews += rhs.reviews;
        self.marketing_spend += rhs.marketing_spend;
    }
}

/// Counter names accepted by `targets actual` / `targets daily`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterField {
    Leads,
    Appointments,
    Sales,
    Revenue,
    GrossProfit,
    Reviews,
    MarketingSpend,
}

impl CounterField {
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "leads" => Some(Self::Leads),
            "appointments" => Some(Self::Appointments),
            "sales" => Some(Self::Sales),
            "revenue" => Some(Self::Revenue),
            "gross_profit" => Some(Self::GrossProfit),
            "reviews" => Some(Self::Reviews),
            "marketing_spend" => Some(Self::MarketingSpend),
            _ => None,
        }
    }

    /// Column stem shared by the `*_goal` / `*_actual` pairs.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Leads => "leads",
            Self::Appointments => "appointments",
            Self::Sales => "sales",
            Self::Revenue => "revenue",
            Self::GrossProfit => "gross_profit",
            Self::Reviews => "reviews",
            Self::MarketingSpend => "marketing_spend",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTarget {
    pub id: i64,
    pub organization_id: String,
    pub month: u32,
    pub year: i32,
    pub quarter: u32,
    pub goal: TargetCounters,
    pub actual: TargetCounters,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTarget {
    pub id: i64,
    pub organization_id: String,
    pub date: NaiveDate,
    pub goal: TargetCounters,
    pub actual: TargetCounters,
}

/// Goal/actual pair of one period, used for cumulative rollups.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodTotals {
    pub period: String,
    pub goal: TargetCounters,
    pub actual: TargetCounters,
}

impl From<&MonthlyTarget> for PeriodTotals {
    fn from(t: &MonthlyTarget) -> Self {
        Self {
            period: format!("{:04}-{:02}", t.year, t.month),
            goal: t.goal,
            actual: t.actual,
        }
    }
}

impl From<&DailyTarget> for PeriodTotals {
    fn from(t: &DailyTarget) -> Self {
        Self {
            period: t.date.format("%Y-%m-%d").to_string(),
            goal: t.goal,
            actual: t.actual,
        }
    }
}
