//! Pure calculation core. Nothing in here touches the database and
//! nothing in here can fail: degenerate arithmetic collapses to 0.

pub mod calendar;
pub mod commission;
pub mod financials;
pub mod scenario;
pub mod targets;

/// Absent or non-finite inputs count as 0.
pub fn finite(x: f64) -> f64 {
    if x.is_finite() { x } else { 0.0 }
}

/// Division that yields 0 instead of NaN/inf on a zero denominator.
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    let (n, d) = (finite(numerator), finite(denominator));
    if d == 0.0 {
        return 0.0;
    }
    finite(n / d)
}

/// Nearest integer, halves rounded up (2.5 → 3, -2.5 → -2).
pub fn round_half_up(x: f64) -> f64 {
    let x = finite(x);
    let floor = x.floor();
    // x - floor is exact for x >= 0, while x + 0.5 can round up a whole step
    if x - floor >= 0.5 { floor + 1.0 } else { floor }
}
