//! Bulk document import.
//!
//! The document-parsing collaborator (an AI extraction pipeline in the host
//! product) is a black box behind [`DocumentSource`]; it returns
//! loosely-typed rows that this service normalizes into full records and
//! merges into the store. Records with a novel id are prepended as new;
//! records matching an existing id patch it, with imported fields winning
//! and omitted fields retaining their prior values.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::config::Settings;
use crate::error::EngineResult;
use crate::models::{
    ParsedRisk, RatingDescriptor, RiskLevel, RiskRating, RiskRecord, SeverityLabel, TabCategory,
};
use crate::repositories::{MergeOutcome, RiskRepository};

/// The document-parsing collaborator. Implementations read an uploaded
/// assessment document and extract risk rows; the engine never looks inside.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn parse_document(&self, name: &str, bytes: &[u8]) -> EngineResult<Vec<ParsedRisk>>;
}

/// Summary returned to the host after a document merge.
#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub document: String,
    pub parsed: usize,
    pub added: usize,
    pub updated: usize,
}

pub struct ImportService {
    repository: Arc<dyn RiskRepository + Send + Sync>,
    source: Arc<dyn DocumentSource>,
    settings: Arc<Settings>,
}

impl ImportService {
    pub fn new(
        repository: Arc<dyn RiskRepository + Send + Sync>,
        source: Arc<dyn DocumentSource>,
        settings: Arc<Settings>,
    ) -> Self {
        Self {
            repository,
            source,
            settings,
        }
    }

    /// Parse a document through the source and merge the extracted rows.
    ///
    /// The await is the single asynchronous step in the engine; the merge
    /// itself is synchronous. A host that abandons the import dialog simply
    /// drops the future.
    pub async fn import_document(&self, name: &str, bytes: &[u8]) -> EngineResult<ImportSummary> {
        let parsed = self.source.parse_document(name, bytes).await?;
        let parsed_count = parsed.len();
        let outcome = self.merge_parsed(parsed);
        tracing::info!(
            document = %name,
            parsed = parsed_count,
            added = outcome.added,
            updated = outcome.updated,
            "merged imported document"
        );
        Ok(ImportSummary {
            document: name.to_string(),
            parsed: parsed_count,
            added: outcome.added,
            updated: outcome.updated,
        })
    }

    /// Normalize and merge rows the host already holds.
    pub fn merge_parsed(&self, parsed: Vec<ParsedRisk>) -> MergeOutcome {
        let records: Vec<RiskRecord> = parsed
            .iter()
            .map(|row| {
                let existing = row
                    .id
                    .as_deref()
                    .and_then(|id| self.repository.get(id));
                normalize_parsed(row, existing.as_ref(), &self.settings)
            })
            .collect();
        self.repository.merge_records(records)
    }
}

/// Build a full record from a parsed row.
///
/// Shallow merge: a field present on the row wins, an omitted field falls
/// back to the existing record, then to the engine defaults. Rows without an
/// id are minted a fresh one and always land as new records.
pub fn normalize_parsed(
    parsed: &ParsedRisk,
    existing: Option<&RiskRecord>,
    settings: &Settings,
) -> RiskRecord {
    let id = parsed
        .id
        .clone()
        .filter(|v| !v.trim().is_empty())
        .or_else(|| existing.map(|e| e.id.clone()))
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    RiskRecord {
        id,
        title: parsed
            .title
            .clone()
            .or_else(|| existing.map(|e| e.title.clone()))
            .unwrap_or_else(|| "Untitled Risk".to_string()),
        risk_level: parsed
            .risk_level
            .as_deref()
            .map(RiskLevel::from)
            .or_else(|| existing.map(|e| e.risk_level))
            .unwrap_or(settings.default_risk_level),
        parent_risk: parsed
            .parent_risk
            .clone()
            .or_else(|| existing.and_then(|e| e.parent_risk.clone())),
        // Re-resolved by the repository after the merge lands.
        parent_id: None,
        business_unit: parsed
            .business_unit
            .clone()
            .or_else(|| existing.map(|e| e.business_unit.clone()))
            .unwrap_or_else(|| "Unassigned".to_string()),
        category: parsed
            .category
            .clone()
            .or_else(|| existing.map(|e| e.category.clone()))
            .unwrap_or_else(|| "Uncategorized".to_string()),
        owner: parsed
            .owner
            .clone()
            .or_else(|| existing.map(|e| e.owner.clone()))
            .unwrap_or_else(|| settings.default_owner.clone()),
        assessors: parsed
            .assessors
            .clone()
            .or_else(|| existing.map(|e| e.assessors.clone()))
            .unwrap_or_default(),
        due_date: parsed
            .due_date
            .clone()
            .or_else(|| existing.map(|e| e.due_date.clone()))
            .unwrap_or_default(),
        last_assessed: parsed
            .last_assessed
            .clone()
            .or_else(|| existing.map(|e| e.last_assessed.clone()))
            .unwrap_or_default(),
        completion_date: parsed
            .completion_date
            .clone()
            .or_else(|| existing.and_then(|e| e.completion_date.clone())),
        assessment_progress: existing
            .map(|e| e.assessment_progress)
            .unwrap_or_default(),
        inherent_risk: rating_field(
            parsed.inherent_risk.as_deref(),
            existing.map(|e| e.inherent_risk.clone()),
        ),
        residual_risk: rating_field(
            parsed.residual_risk.as_deref(),
            existing.map(|e| e.residual_risk.clone()),
        ),
        inherent_trend: existing
            .map(|e| e.inherent_trend.clone())
            .unwrap_or_default(),
        residual_trend: existing
            .map(|e| e.residual_trend.clone())
            .unwrap_or_default(),
        related_controls: existing
            .map(|e| e.related_controls.clone())
            .unwrap_or_default(),
        control_effectiveness: existing
            .map(|e| e.control_effectiveness.clone())
            .unwrap_or_default(),
        status: parsed
            .status
            .clone()
            .or_else(|| existing.map(|e| e.status.clone()))
            .unwrap_or_else(|| "Sent for Assessment".to_string()),
        tab_category: parsed
            .tab_category
            .as_deref()
            .map(TabCategory::from)
            .or_else(|| existing.map(|e| e.tab_category))
            .unwrap_or_default(),
        previous_assessments: parsed
            .previous_assessments
            .or_else(|| existing.map(|e| e.previous_assessments))
            .unwrap_or(0),
        historical_assessments: existing.and_then(|e| e.historical_assessments.clone()),
    }
}

/// Decode a rating descriptor, falling back to the existing rating and then
/// to an unscored Low.
fn rating_field(descriptor: Option<&str>, existing: Option<RiskRating>) -> RiskRating {
    descriptor
        .and_then(RatingDescriptor::parse)
        .map(|decoded| {
            RiskRating::new(SeverityLabel::from(decoded.label.as_str()), decoded.score)
        })
        .or(existing)
        .unwrap_or_else(|| RiskRating::new(SeverityLabel::Low, None))
}
