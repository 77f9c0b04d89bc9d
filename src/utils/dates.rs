use chrono::{DateTime, NaiveDate};

/// Formats accepted for record dates, tried in order. The underlying data
/// mixes ISO dates with locale-formatted display strings.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%b %e, %Y"];

/// Parse a record date leniently.
///
/// Returns `None` for anything unrecognized; callers treat that as
/// "excluded from date-dependent computations", never as an error.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(timestamp.date_naive());
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    None
}
