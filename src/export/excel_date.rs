use chrono::NaiveDate;

/// Excel serial of an ISO date (`YYYY-MM-DD`), with its number format.
pub(crate) fn parse_to_excel_date(s: &str) -> Option<(&'static str, f64)> {
    let d = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    Some(("yyyy-mm-dd", excel_serial(d)?))
}

fn excel_serial(d: NaiveDate) -> Option<f64> {
    // 1899-12-30 absorbs Excel's fictitious 1900-02-29
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    Some(d.signed_duration_since(epoch).num_days() as f64)
}
