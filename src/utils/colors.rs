/// ANSI color helper utilities for terminal output.
use crate::models::profit_flag::ProfitFlag;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// OK → green, FIX_SCOPE → yellow, RAISE_PRICE → red
pub fn color_for_flag(flag: ProfitFlag) -> &'static str {
    match flag {
        ProfitFlag::Ok => GREEN,
        ProfitFlag::FixScope => YELLOW,
        ProfitFlag::RaisePrice => RED,
    }
}

/// \>0 → green, \<0 → red, 0 → reset
pub fn color_for_delta(value: f64) -> &'static str {
    if value > 0.0 {
        GREEN
    } else if value < 0.0 {
        RED
    } else {
        RESET
    }
}

pub fn colorize_flag(flag: ProfitFlag) -> String {
    format!("{}{}{}", color_for_flag(flag), flag.as_str(), RESET)
}

/// Grey out empty placeholders ("--", "").
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
