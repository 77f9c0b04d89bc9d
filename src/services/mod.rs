pub mod aggregation_service;
pub mod dashboard_service;
pub mod deadline_service;
pub mod filter_service;
pub mod hierarchy_service;
pub mod import_service;

// Re-export commonly used types
pub use aggregation_service::{
    aggregate_children, aggregate_level1, score_to_level, ChildScoreRollup, ControlCounts,
    EffectivenessBreakdown, LevelOneAggregation, ProgressBreakdown, ScoreBand, StatusBreakdown,
};
pub use dashboard_service::DashboardService;
pub use deadline_service::{
    classify_deadline, classify_record, is_completed_late, velocity_summary, VelocitySummary,
};
pub use filter_service::{filter_records, matches_filter};
pub use hierarchy_service::{
    build_visible_sequence, default_expanded, has_children, HierarchyView,
};
pub use import_service::{DocumentSource, ImportService, ImportSummary};
