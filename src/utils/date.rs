use chrono::{Datelike, Days, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

pub fn format_date(d: &NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

pub fn format_opt_date(d: &Option<NaiveDate>) -> String {
    d.as_ref().map(format_date).unwrap_or_else(|| "--".to_string())
}

pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (ny, nm) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(ny, nm, 1)?.pred_opt()
}

/// Sunday on or before `d`.
pub fn week_start(d: NaiveDate) -> NaiveDate {
    d - Days::new(d.weekday().num_days_from_sunday() as u64)
}

/// Saturday on or after `d`.
pub fn week_end(d: NaiveDate) -> NaiveDate {
    d + Days::new(6 - d.weekday().num_days_from_sunday() as u64)
}

/// First and last day of the month following `d`.
pub fn next_month_bounds(d: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let (y, m) = if d.month() == 12 {
        (d.year() + 1, 1)
    } else {
        (d.year(), d.month() + 1)
    };
    Some((NaiveDate::from_ymd_opt(y, m, 1)?, last_day_of_month(y, m)?))
}

pub fn month_name(m: u32) -> &'static str {
    match m {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}
