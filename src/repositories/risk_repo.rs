use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    EffectivenessBucket, RiskRecord, ScoreMetric, SeverityLabel,
};

/// Outcome of a bulk merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct MergeOutcome {
    pub added: usize,
    pub updated: usize,
}

/// Store of the canonical risk-record list.
///
/// The repository is the sole mutator; every derived computation (filtering,
/// hierarchy, aggregation) works on an immutable snapshot taken from here.
pub trait RiskRepository {
    /// Cloned immutable view of the full record list, in display order.
    fn snapshot(&self) -> Vec<RiskRecord>;
    fn get(&self, id: &str) -> Option<RiskRecord>;
    fn count(&self) -> usize;
    /// Monotonic counter bumped on every mutation, letting hosts invalidate
    /// derived views cheaply.
    fn version(&self) -> u64;
    fn update_status(&self, id: &str, status: &str) -> EngineResult<RiskRecord>;
    /// Inline edit of one severity label. The numeric score is left alone;
    /// it belongs to the scored assessment, not the label edit.
    fn update_risk_label(
        &self,
        id: &str,
        metric: ScoreMetric,
        label: SeverityLabel,
    ) -> EngineResult<RiskRecord>;
    fn update_control_effectiveness(&self, id: &str, label: &str) -> EngineResult<RiskRecord>;
    /// Merge a batch of already-normalized records: unknown ids are
    /// prepended ahead of the existing records (preserving batch order),
    /// known ids are replaced in place. Parent links are re-resolved
    /// afterwards.
    fn merge_records(&self, records: Vec<RiskRecord>) -> MergeOutcome;
}

/// In-memory implementation: an insertion-ordered arena with an id index.
pub struct InMemoryRiskRepository {
    inner: Mutex<StoreInner>,
}

struct StoreInner {
    records: Vec<RiskRecord>,
    index: HashMap<String, usize>,
    version: u64,
}

impl StoreInner {
    fn reindex(&mut self) {
        self.index.clear();
        for (position, record) in self.records.iter().enumerate() {
            // First occurrence wins should duplicate ids ever slip in.
            self.index.entry(record.id.clone()).or_insert(position);
        }
    }

    /// Resolve the legacy title-based parent references into id links.
    ///
    /// For each record carrying a parent title, the first record one level
    /// up whose title matches wins. Duplicate titles at the parent level are
    /// a known data-integrity gap in the source data; resolving them
    /// first-match keeps the outcome deterministic without reporting.
    /// Unresolvable references stay unlinked and surface only in flat views.
    fn link_parents(&mut self) {
        let mut links: Vec<Option<String>> = Vec::with_capacity(self.records.len());
        for record in &self.records {
            let parent_id = record.risk_level.parent_level().and_then(|parent_level| {
                let title = record.parent_risk.as_deref()?;
                self.records
                    .iter()
                    .find(|candidate| {
                        candidate.risk_level == parent_level && candidate.title == title
                    })
                    .map(|candidate| candidate.id.clone())
            });
            links.push(parent_id);
        }
        for (record, parent_id) in self.records.iter_mut().zip(links) {
            record.parent_id = parent_id;
        }
    }

    fn touch(&mut self) {
        self.version += 1;
    }
}

impl InMemoryRiskRepository {
    pub fn new(initial: Vec<RiskRecord>) -> Self {
        let mut inner = StoreInner {
            records: initial,
            index: HashMap::new(),
            version: 0,
        };
        inner.reindex();
        inner.link_parents();
        Self {
            inner: Mutex::new(inner),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap()
    }

    fn update<F>(&self, id: &str, apply: F) -> EngineResult<RiskRecord>
    where
        F: FnOnce(&mut RiskRecord),
    {
        let mut inner = self.lock();
        let position = *inner
            .index
            .get(id)
            .ok_or_else(|| EngineError::not_found(format!("risk record {}", id)))?;
        apply(&mut inner.records[position]);
        inner.touch();
        Ok(inner.records[position].clone())
    }
}

impl RiskRepository for InMemoryRiskRepository {
    fn snapshot(&self) -> Vec<RiskRecord> {
        self.lock().records.clone()
    }

    fn get(&self, id: &str) -> Option<RiskRecord> {
        let inner = self.lock();
        inner
            .index
            .get(id)
            .map(|&position| inner.records[position].clone())
    }

    fn count(&self) -> usize {
        self.lock().records.len()
    }

    fn version(&self) -> u64 {
        self.lock().version
    }

    fn update_status(&self, id: &str, status: &str) -> EngineResult<RiskRecord> {
        let updated = self.update(id, |record| {
            record.status = status.to_string();
        })?;
        tracing::debug!(id = %id, status = %status, "updated risk status");
        Ok(updated)
    }

    fn update_risk_label(
        &self,
        id: &str,
        metric: ScoreMetric,
        label: SeverityLabel,
    ) -> EngineResult<RiskRecord> {
        let updated = self.update(id, |record| {
            let rating = match metric {
                ScoreMetric::Inherent => &mut record.inherent_risk,
                ScoreMetric::Residual => &mut record.residual_risk,
            };
            rating.level = label;
            rating.color = label.default_color().to_string();
        })?;
        tracing::debug!(id = %id, label = %label, "updated risk label");
        Ok(updated)
    }

    fn update_control_effectiveness(&self, id: &str, label: &str) -> EngineResult<RiskRecord> {
        let updated = self.update(id, |record| {
            record.control_effectiveness.label = label.to_string();
            record.control_effectiveness.color =
                EffectivenessBucket::from_label(label).color().to_string();
        })?;
        tracing::debug!(id = %id, label = %label, "updated control effectiveness");
        Ok(updated)
    }

    fn merge_records(&self, records: Vec<RiskRecord>) -> MergeOutcome {
        let mut inner = self.lock();
        let mut outcome = MergeOutcome::default();
        let mut fresh: Vec<RiskRecord> = Vec::new();
        for record in records {
            if let Some(&position) = inner.index.get(&record.id) {
                inner.records[position] = record;
                outcome.updated += 1;
            } else if let Some(pending) = fresh.iter_mut().find(|f| f.id == record.id) {
                // Same novel id twice in one batch: last row wins, still one
                // new record.
                *pending = record;
                outcome.updated += 1;
            } else {
                fresh.push(record);
                outcome.added += 1;
            }
        }
        if !fresh.is_empty() {
            inner.records.splice(0..0, fresh);
            inner.reindex();
        }
        inner.link_parents();
        inner.touch();
        tracing::info!(
            added = outcome.added,
            updated = outcome.updated,
            total = inner.records.len(),
            "merged risk records"
        );
        outcome
    }
}
