//! Headless engine for a risk & control self-assessment (RCSA) dashboard.
//!
//! Holds an in-memory, versioned store of hierarchical risk records and
//! exposes pure, snapshot-based derivations over it: multi-option
//! filtering, expand/collapse hierarchy reconstruction, parent-level
//! aggregation, deadline classification, and a bulk-import merge boundary
//! for AI-parsed documents. Presentation, routing and persistence are the
//! host's concern.

use std::sync::Arc;

use crate::config::Settings;
use crate::error::EngineResult;
use crate::repositories::{seed_records, InMemoryRiskRepository, RiskRepository};
use crate::services::{DashboardService, DocumentSource, ImportService};

pub mod config;
pub mod error;
pub mod models;
pub mod repositories;
pub mod services;
pub mod utils;

/// Shared engine state containing the record store and the services bound
/// to it. Hosts construct one per dashboard session.
pub struct EngineState {
    pub settings: Arc<Settings>,
    pub risk_repository: Arc<dyn RiskRepository + Send + Sync>,
    pub dashboard_service: Arc<DashboardService>,
    /// Present only when a document-parsing collaborator was wired in.
    pub import_service: Option<Arc<ImportService>>,
}

impl EngineState {
    /// Build an engine with no document source attached.
    pub fn new(settings: Settings) -> EngineResult<Self> {
        Self::build(settings, None)
    }

    /// Build an engine with the document-import collaborator attached.
    pub fn with_source(
        settings: Settings,
        source: Arc<dyn DocumentSource>,
    ) -> EngineResult<Self> {
        Self::build(settings, Some(source))
    }

    fn build(settings: Settings, source: Option<Arc<dyn DocumentSource>>) -> EngineResult<Self> {
        settings.validate()?;
        let settings = Arc::new(settings);

        let initial = if settings.seed_dataset {
            seed_records()
        } else {
            Vec::new()
        };
        let risk_repository: Arc<dyn RiskRepository + Send + Sync> =
            Arc::new(InMemoryRiskRepository::new(initial));

        let dashboard_service = Arc::new(DashboardService::new(risk_repository.clone()));
        let import_service = source.map(|source| {
            Arc::new(ImportService::new(
                risk_repository.clone(),
                source,
                settings.clone(),
            ))
        });

        tracing::info!(records = risk_repository.count(), "engine state initialized");
        Ok(Self {
            settings,
            risk_repository,
            dashboard_service,
            import_service,
        })
    }
}
