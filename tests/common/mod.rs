//! Shared record builders for the integration suites.

// Not every suite uses every builder.
#![allow(dead_code)]

use rcsa_engine::models::{
    AssessmentProgress, ControlEffectiveness, RiskLevel, RiskRating, RiskRecord, ScoreMetric,
    SeverityLabel, TabCategory, TrendIndicator,
};

/// A minimal, valid record. Callers override the handful of fields each
/// scenario cares about.
pub fn record(id: &str, title: &str, level: RiskLevel) -> RiskRecord {
    RiskRecord {
        id: id.to_string(),
        title: title.to_string(),
        risk_level: level,
        parent_risk: None,
        parent_id: None,
        business_unit: "Group".to_string(),
        category: "Operational".to_string(),
        owner: "Owner".to_string(),
        assessors: vec![],
        due_date: "2025-04-01".to_string(),
        last_assessed: "2025-01-01".to_string(),
        completion_date: None,
        assessment_progress: AssessmentProgress::default(),
        inherent_risk: RiskRating::new(SeverityLabel::Medium, None),
        residual_risk: RiskRating::new(SeverityLabel::Low, None),
        inherent_trend: TrendIndicator::default(),
        residual_trend: TrendIndicator::default(),
        related_controls: vec![],
        control_effectiveness: ControlEffectiveness::default(),
        status: "In Progress".to_string(),
        tab_category: TabCategory::Own,
        previous_assessments: 0,
        historical_assessments: None,
    }
}

pub fn with_parent(mut record: RiskRecord, parent_title: &str) -> RiskRecord {
    record.parent_risk = Some(parent_title.to_string());
    record
}

pub fn with_tab(mut record: RiskRecord, tab: TabCategory) -> RiskRecord {
    record.tab_category = tab;
    record
}

pub fn with_status(mut record: RiskRecord, status: &str) -> RiskRecord {
    record.status = status.to_string();
    record
}

pub fn with_due(mut record: RiskRecord, due_date: &str) -> RiskRecord {
    record.due_date = due_date.to_string();
    record
}

pub fn with_score(
    mut record: RiskRecord,
    metric: ScoreMetric,
    label: SeverityLabel,
    score: u8,
) -> RiskRecord {
    let rating = RiskRating::new(label, Some(score));
    match metric {
        ScoreMetric::Inherent => record.inherent_risk = rating,
        ScoreMetric::Residual => record.residual_risk = rating,
    }
    record
}
