use serde::{Deserialize, Serialize};

/// Profitability signal attached to every job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ProfitFlag {
    #[default]
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "RAISE_PRICE")]
    RaisePrice,
    #[serde(rename = "FIX_SCOPE")]
    FixScope,
}

impl ProfitFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfitFlag::Ok => "OK",
            ProfitFlag::RaisePrice => "RAISE_PRICE",
            ProfitFlag::FixScope => "FIX_SCOPE",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "OK" => Some(ProfitFlag::Ok),
            "RAISE_PRICE" => Some(ProfitFlag::RaisePrice),
            "FIX_SCOPE" => Some(ProfitFlag::FixScope),
            _ => None,
        }
    }
}
