//! Filter pipeline.
//!
//! Narrows a record snapshot to the subset matching the active dashboard
//! view. Predicates compose by logical AND and are order-independent, so
//! hosts may apply them in any sequence with identical results. A record
//! that fails to parse a date is excluded from deadline matching only and
//! is evaluated normally by every other predicate.

use chrono::NaiveDate;

use crate::models::{DeadlineBucket, RiskFilter, RiskLevel, RiskRecord, TabCategory};
use crate::services::deadline_service;
use crate::utils::normalize_status;

/// Narrow `records` to the subset matching `filter` at the given date.
///
/// Pure: the input list is never mutated and malformed records never raise.
pub fn filter_records(
    records: &[RiskRecord],
    filter: &RiskFilter,
    now: NaiveDate,
) -> Vec<RiskRecord> {
    let matched: Vec<RiskRecord> = records
        .iter()
        .filter(|record| matches_filter(record, filter, now))
        .cloned()
        .collect();
    tracing::debug!(
        total = records.len(),
        matched = matched.len(),
        "filtered risk snapshot"
    );
    matched
}

/// Evaluate the full predicate set against one record.
pub fn matches_filter(record: &RiskRecord, filter: &RiskFilter, now: NaiveDate) -> bool {
    matches_tab(record, filter.tab_category)
        && matches_search(record, text_option(&filter.search))
        && matches_id(record, text_option(&filter.risk_id))
        && matches_level(record, filter.risk_level)
        && matches_level(record, filter.org_level)
        && matches_status(record, text_option(&filter.status))
        && matches_deadline(record, filter.deadline, now)
        && matches_assessor(record, text_option(&filter.assessor))
        && matches_business_unit(record, text_option(&filter.business_unit))
}

/// An empty or `"all"` selection in the UI is the same as no selection.
fn text_option(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
}

fn matches_tab(record: &RiskRecord, tab: Option<TabCategory>) -> bool {
    tab.map_or(true, |wanted| record.tab_category == wanted)
}

fn matches_search(record: &RiskRecord, needle: Option<&str>) -> bool {
    needle.map_or(true, |n| {
        record.title.to_lowercase().contains(&n.to_lowercase())
    })
}

fn matches_id(record: &RiskRecord, id: Option<&str>) -> bool {
    id.map_or(true, |wanted| record.id == wanted)
}

fn matches_level(record: &RiskRecord, level: Option<RiskLevel>) -> bool {
    level.map_or(true, |wanted| record.risk_level == wanted)
}

fn matches_status(record: &RiskRecord, status: Option<&str>) -> bool {
    status.map_or(true, |wanted| {
        normalize_status(&record.status) == normalize_status(wanted)
    })
}

fn matches_deadline(record: &RiskRecord, bucket: Option<DeadlineBucket>, now: NaiveDate) -> bool {
    match bucket {
        None => true,
        Some(wanted) => deadline_service::classify_record(record, now) == Some(wanted),
    }
}

fn matches_assessor(record: &RiskRecord, assessor: Option<&str>) -> bool {
    assessor.map_or(true, |wanted| record.assessors.iter().any(|a| a == wanted))
}

fn matches_business_unit(record: &RiskRecord, unit: Option<&str>) -> bool {
    unit.map_or(true, |wanted| record.business_unit == wanted)
}
