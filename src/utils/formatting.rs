//! Formatting utilities used for CLI and export outputs.

/// `$12,345.60` style amount; negative amounts keep the sign in front.
pub fn money(amount: f64, symbol: &str) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as i64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}{symbol}{grouped}.{frac:02}")
}

pub fn pct(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Signed delta with percent, e.g. `+20,000.00 (+20.0%)`.
pub fn delta(amount: f64, pct_change: Option<f64>) -> String {
    let sign = if amount > 0.0 { "+" } else { "" };
    let base = format!("{sign}{}", money(amount, ""));
    match pct_change {
        Some(p) => {
            let psign = if p > 0.0 { "+" } else { "" };
            format!("{base} ({psign}{:.1}%)", p)
        }
        None => base,
    }
}

pub fn yes_no(b: bool) -> &'static str {
    if b { "yes" } else { "no" }
}
