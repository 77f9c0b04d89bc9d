//! Deadline classification.
//!
//! Turns a due date plus the current wall-clock date into a single urgency
//! bucket, used both by the filter pipeline and the summary dashboards.
//! All comparisons run at day precision; the caller supplies "now" so the
//! classification stays deterministic under test.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::Serialize;

use crate::models::{DeadlineBucket, RiskRecord, StatusBucket};
use crate::utils::parse_date;

/// Classify a due date against `now`.
///
/// `Overdue` strictly precedes today; `DueThisWeek` runs through the Sunday
/// ending the current Monday-start week, today inclusive; `DueThisMonth`
/// covers the rest of the calendar month; everything later is `Future`.
/// Exactly one bucket applies to any date.
pub fn classify_deadline(due: NaiveDate, now: NaiveDate) -> DeadlineBucket {
    if due < now {
        return DeadlineBucket::Overdue;
    }
    if due <= now.week(Weekday::Mon).last_day() {
        return DeadlineBucket::DueThisWeek;
    }
    if due <= end_of_month(now) {
        return DeadlineBucket::DueThisMonth;
    }
    DeadlineBucket::Future
}

/// Classify a record's due date, or `None` when it does not parse.
pub fn classify_record(record: &RiskRecord, now: NaiveDate) -> Option<DeadlineBucket> {
    parse_date(&record.due_date).map(|due| classify_deadline(due, now))
}

/// A record finished after its due date. Completion is judged by status
/// bucket, so "Complete", "Completed" and "Closed" all count; either date
/// failing to parse means the record is simply not counted as late.
pub fn is_completed_late(record: &RiskRecord) -> bool {
    if record.status_bucket() != StatusBucket::Completed {
        return false;
    }
    let due = parse_date(&record.due_date);
    let done = record.completion_date.as_deref().and_then(parse_date);
    matches!((due, done), (Some(due), Some(done)) if done > due)
}

/// Assessment throughput summary for the velocity panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VelocitySummary {
    pub completed_on_time: usize,
    pub completed_late: usize,
    pub open_overdue: usize,
    pub open_on_track: usize,
}

pub fn velocity_summary(records: &[RiskRecord], now: NaiveDate) -> VelocitySummary {
    let mut summary = VelocitySummary::default();
    for record in records {
        if record.status_bucket() == StatusBucket::Completed {
            if is_completed_late(record) {
                summary.completed_late += 1;
            } else {
                summary.completed_on_time += 1;
            }
        } else if classify_record(record, now) == Some(DeadlineBucket::Overdue) {
            summary.open_overdue += 1;
        } else {
            summary.open_on_track += 1;
        }
    }
    summary
}

fn end_of_month(day: NaiveDate) -> NaiveDate {
    day.with_day(1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|next| next.checked_sub_days(Days::new(1)))
        .unwrap_or(day)
}
