//! View-level composition.
//!
//! The façade a host dashboard talks to: it binds the pure filter,
//! hierarchy, aggregation and deadline functions to the record store and
//! supplies the wall clock. Expand/collapse state stays host-owned; the
//! service only reads it.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use crate::models::{DeadlineBucket, RiskFilter, RiskRecord, ScoreMetric};
use crate::repositories::RiskRepository;
use crate::services::aggregation_service::{
    aggregate_children, aggregate_level1, ChildScoreRollup, LevelOneAggregation,
};
use crate::services::deadline_service::{classify_record, velocity_summary, VelocitySummary};
use crate::services::filter_service::filter_records;
use crate::services::hierarchy_service::{build_visible_sequence, default_expanded, HierarchyView};

pub struct DashboardService {
    repository: Arc<dyn RiskRepository + Send + Sync>,
}

impl DashboardService {
    pub fn new(repository: Arc<dyn RiskRepository + Send + Sync>) -> Self {
        Self { repository }
    }

    /// Rows to render: the filtered snapshot arranged for the requested
    /// hierarchy view and expand state.
    pub fn visible_rows(
        &self,
        filter: &RiskFilter,
        expanded: &HashSet<String>,
        view: HierarchyView,
    ) -> Vec<RiskRecord> {
        self.visible_rows_at(filter, expanded, view, Utc::now().date_naive())
    }

    /// Same as [`visible_rows`](Self::visible_rows) with an explicit clock,
    /// for deterministic callers and tests.
    pub fn visible_rows_at(
        &self,
        filter: &RiskFilter,
        expanded: &HashSet<String>,
        view: HierarchyView,
        now: NaiveDate,
    ) -> Vec<RiskRecord> {
        let snapshot = self.repository.snapshot();
        let filtered = filter_records(&snapshot, filter, now);
        build_visible_sequence(&filtered, expanded, view)
    }

    /// Initial expand state: every Level-1 record open.
    pub fn default_expanded(&self) -> HashSet<String> {
        default_expanded(&self.repository.snapshot())
    }

    pub fn child_rollup(
        &self,
        parent_title: &str,
        metric: ScoreMetric,
    ) -> Option<ChildScoreRollup> {
        aggregate_children(parent_title, &self.repository.snapshot(), metric)
    }

    pub fn level1_summary(&self, parent_id: &str) -> Option<LevelOneAggregation> {
        let snapshot = self.repository.snapshot();
        let parent = snapshot.iter().find(|r| r.id == parent_id)?;
        aggregate_level1(parent, &snapshot)
    }

    /// Per-bucket due-date counts over the classifiable records; records
    /// with unparsable dates are simply absent.
    pub fn deadline_counts(&self, now: NaiveDate) -> BTreeMap<DeadlineBucket, usize> {
        let mut counts = BTreeMap::new();
        for record in self.repository.snapshot() {
            if let Some(bucket) = classify_record(&record, now) {
                *counts.entry(bucket).or_insert(0) += 1;
            }
        }
        counts
    }

    pub fn velocity(&self, now: NaiveDate) -> VelocitySummary {
        velocity_summary(&self.repository.snapshot(), now)
    }

    /// Flip one record's expand state in a host-owned set.
    pub fn toggle_expanded(expanded: &mut HashSet<String>, id: &str) {
        if !expanded.remove(id) {
            expanded.insert(id.to_string());
        }
    }
}
