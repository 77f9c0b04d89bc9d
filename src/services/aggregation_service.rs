//! Aggregation engine.
//!
//! Rolls descendant metrics up into parent-level summaries. Score rollups
//! intentionally stay one level deep (direct Level-2 children only), while
//! the broader Level-1 aggregation flattens Level-2 and Level-3 together;
//! the asymmetry matches the observed dashboard behavior.

use serde::Serialize;

use crate::models::{
    EffectivenessBucket, RiskLevel, RiskRecord, ScoreMetric, SeverityLabel, StageStatus,
    StatusBucket,
};

/// Score rollup across a parent's direct Level-2 children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChildScoreRollup {
    /// Arithmetic mean of the present scores, rounded to nearest.
    pub avg_score: u8,
    /// Unrounded maximum of the present scores.
    pub max_score: u8,
    /// Direct child count, scored or not.
    pub child_count: usize,
}

/// Roll up one severity axis across the direct Level-2 children of the
/// record titled `parent_title`.
///
/// Children with an absent or zero score are excluded from the average, not
/// treated as zero. Returns `None` when the parent has no children or no
/// child carries a usable score; callers omit the rollup panel in that case.
pub fn aggregate_children(
    parent_title: &str,
    records: &[RiskRecord],
    metric: ScoreMetric,
) -> Option<ChildScoreRollup> {
    let children: Vec<&RiskRecord> = records
        .iter()
        .filter(|r| {
            r.risk_level == RiskLevel::Level2 && r.parent_risk.as_deref() == Some(parent_title)
        })
        .collect();
    if children.is_empty() {
        return None;
    }
    let scores: Vec<u8> = children
        .iter()
        .filter_map(|child| child.rating(metric).score)
        .filter(|score| *score > 0)
        .collect();
    if scores.is_empty() {
        return None;
    }
    let sum: u32 = scores.iter().map(|s| u32::from(*s)).sum();
    let avg = (f64::from(sum) / scores.len() as f64).round() as u8;
    let max = scores.iter().copied().max().unwrap_or(0);
    Some(ChildScoreRollup {
        avg_score: avg,
        max_score: max,
        child_count: children.len(),
    })
}

/// A 1-25 severity score mapped to its display band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreBand {
    pub level: SeverityLabel,
    pub color: &'static str,
}

/// Threshold table for the severity bands. Bands are inclusive on their
/// lower bound and partition the whole score range.
pub fn score_to_level(score: u8) -> ScoreBand {
    let level = if score >= 15 {
        SeverityLabel::Critical
    } else if score >= 10 {
        SeverityLabel::High
    } else if score >= 5 {
        SeverityLabel::Medium
    } else {
        SeverityLabel::Low
    };
    ScoreBand {
        level,
        color: level.default_color(),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ControlCounts {
    pub total: usize,
    pub automated: usize,
    pub manual: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EffectivenessBreakdown {
    pub effective: usize,
    pub partially_effective: usize,
    pub ineffective: usize,
    pub not_assessed: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProgressBreakdown {
    pub completed: usize,
    pub in_progress: usize,
    pub not_started: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusBreakdown {
    pub completed: usize,
    pub overdue: usize,
    pub in_progress: usize,
    pub pending_approval: usize,
    pub other: usize,
}

/// Summary attached to a Level-1 record, computed over its direct Level-2
/// children and their Level-3 children.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LevelOneAggregation {
    pub descendant_count: usize,
    pub controls: ControlCounts,
    pub effectiveness: EffectivenessBreakdown,
    pub progress: ProgressBreakdown,
    pub status: StatusBreakdown,
}

/// Aggregate controls, effectiveness, assessment progress and status across
/// a Level-1 record's two-level descendant set. Returns `None` when the
/// combined set is empty.
pub fn aggregate_level1(
    parent: &RiskRecord,
    records: &[RiskRecord],
) -> Option<LevelOneAggregation> {
    let level2: Vec<&RiskRecord> = records
        .iter()
        .filter(|r| r.risk_level == RiskLevel::Level2 && is_child_of(r, parent))
        .collect();
    let mut descendants: Vec<&RiskRecord> = Vec::new();
    for child in &level2 {
        descendants.push(child);
        descendants.extend(
            records
                .iter()
                .filter(|r| r.risk_level == RiskLevel::Level3 && is_child_of(r, child)),
        );
    }
    if descendants.is_empty() {
        return None;
    }

    let mut aggregation = LevelOneAggregation {
        descendant_count: descendants.len(),
        ..LevelOneAggregation::default()
    };
    for record in &descendants {
        for control in &record.related_controls {
            aggregation.controls.total += 1;
            if control.is_automated() {
                aggregation.controls.automated += 1;
            } else if control.is_manual() {
                aggregation.controls.manual += 1;
            }
        }
        match EffectivenessBucket::from_label(&record.control_effectiveness.label) {
            EffectivenessBucket::Effective => aggregation.effectiveness.effective += 1,
            EffectivenessBucket::PartiallyEffective => {
                aggregation.effectiveness.partially_effective += 1
            }
            EffectivenessBucket::Ineffective => aggregation.effectiveness.ineffective += 1,
            EffectivenessBucket::NotAssessed => aggregation.effectiveness.not_assessed += 1,
        }
        match record.assessment_progress.assess {
            StageStatus::Completed => aggregation.progress.completed += 1,
            StageStatus::InProgress => aggregation.progress.in_progress += 1,
            StageStatus::NotStarted => aggregation.progress.not_started += 1,
        }
        match record.status_bucket() {
            StatusBucket::Completed => aggregation.status.completed += 1,
            StatusBucket::Overdue => aggregation.status.overdue += 1,
            StatusBucket::InProgress => aggregation.status.in_progress += 1,
            StatusBucket::PendingApproval => aggregation.status.pending_approval += 1,
            StatusBucket::Other => aggregation.status.other += 1,
        }
    }
    Some(aggregation)
}

/// Resolved-id child check with a title fallback for records that were
/// never run through the repository's link step.
fn is_child_of(record: &RiskRecord, parent: &RiskRecord) -> bool {
    match record.parent_id.as_deref() {
        Some(parent_id) => parent_id == parent.id,
        None => record.parent_risk.as_deref() == Some(parent.title.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AssessmentProgress, ControlEffectiveness, KeyControl, RelatedControl, RiskRating,
        TabCategory, TrendIndicator,
    };

    fn record(id: &str, title: &str, level: RiskLevel, parent_title: Option<&str>) -> RiskRecord {
        RiskRecord {
            id: id.to_string(),
            title: title.to_string(),
            risk_level: level,
            parent_risk: parent_title.map(str::to_string),
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

    fn scored_child(id: &str, parent_title: &str, score: u8) -> RiskRecord {
        let mut r = record(id, id, RiskLevel::Level2, Some(parent_title));
        r.inherent_risk = RiskRating::new(SeverityLabel::High, Some(score));
        r
    }

    #[test]
    fn averages_and_max_over_direct_children() {
        let records = vec![
            record("l1", "Parent", RiskLevel::Level1, None),
            scored_child("l2-a", "Parent", 10),
            scored_child("l2-b", "Parent", 20),
        ];
        let rollup = aggregate_children("Parent", &records, ScoreMetric::Inherent).unwrap();
        assert_eq!(rollup.avg_score, 15);
        assert_eq!(rollup.max_score, 20);
        assert_eq!(rollup.child_count, 2);
    }

    #[test]
    fn zero_and_absent_scores_are_excluded_from_average() {
        let mut unscored = record("l2-c", "l2-c", RiskLevel::Level2, Some("Parent"));
        unscored.inherent_risk = RiskRating::new(SeverityLabel::Medium, Some(0));
        let records = vec![
            scored_child("l2-a", "Parent", 9),
            unscored,
            record("l2-d", "l2-d", RiskLevel::Level2, Some("Parent")),
        ];
        let rollup = aggregate_children("Parent", &records, ScoreMetric::Inherent).unwrap();
        assert_eq!(rollup.avg_score, 9);
        assert_eq!(rollup.max_score, 9);
        assert_eq!(rollup.child_count, 3);
    }

    #[test]
    fn unknown_parent_returns_none() {
        let records = vec![scored_child("l2-a", "Parent", 10)];
        assert!(aggregate_children("Nonexistent Parent Title", &records, ScoreMetric::Inherent)
            .is_none());
    }

    #[test]
    fn all_unscored_children_return_none() {
        let records = vec![record("l2-a", "l2-a", RiskLevel::Level2, Some("Parent"))];
        assert!(aggregate_children("Parent", &records, ScoreMetric::Residual).is_none());
    }

    #[test]
    fn level3_scores_do_not_leak_into_child_rollup() {
        let mut l3 = record("l3-a", "l3-a", RiskLevel::Level3, Some("Child"));
        l3.inherent_risk = RiskRating::new(SeverityLabel::Critical, Some(25));
        let records = vec![scored_child("l2-a", "Parent", 10), l3];
        let rollup = aggregate_children("Parent", &records, ScoreMetric::Inherent).unwrap();
        assert_eq!(rollup.avg_score, 10);
        assert_eq!(rollup.max_score, 10);
    }

    #[test]
    fn score_band_boundaries_are_exact() {
        assert_eq!(score_to_level(4).level, SeverityLabel::Low);
        assert_eq!(score_to_level(5).level, SeverityLabel::Medium);
        assert_eq!(score_to_level(9).level, SeverityLabel::Medium);
        assert_eq!(score_to_level(10).level, SeverityLabel::High);
        assert_eq!(score_to_level(14).level, SeverityLabel::High);
        assert_eq!(score_to_level(15).level, SeverityLabel::Critical);
        assert_eq!(score_to_level(16).level, SeverityLabel::Critical);
    }

    #[test]
    fn score_band_colors_follow_levels() {
        assert_eq!(score_to_level(25).color, "red");
        assert_eq!(score_to_level(12).color, "red");
        assert_eq!(score_to_level(7).color, "yellow");
        assert_eq!(score_to_level(1).color, "green");
    }

    #[test]
    fn level1_aggregation_flattens_two_levels() {
        let parent = record("l1", "Parent", RiskLevel::Level1, None);
        let mut l2 = record("l2-a", "Child A", RiskLevel::Level2, Some("Parent"));
        l2.related_controls = vec![RelatedControl {
            id: "c-1".to_string(),
            name: "Firewall".to_string(),
            control_type: "Preventive".to_string(),
            nature: "Automated".to_string(),
            key_control: KeyControl::Key,
            design_effectiveness: None,
            operating_effectiveness: None,
            testing_status: None,
        }];
        l2.control_effectiveness = ControlEffectiveness {
            label: "Effective".to_string(),
            color: "green".to_string(),
        };
        l2.assessment_progress.assess = StageStatus::Completed;
        l2.status = "Completed".to_string();

        let mut l3 = record("l3-a", "Leaf", RiskLevel::Level3, Some("Child A"));
        l3.related_controls = vec![RelatedControl {
            id: "c-2".to_string(),
            name: "Review".to_string(),
            control_type: "Detective".to_string(),
            nature: "Manual".to_string(),
            key_control: KeyControl::NonKey,
            design_effectiveness: None,
            operating_effectiveness: None,
            testing_status: None,
        }];
        l3.assessment_progress.assess = StageStatus::InProgress;
        l3.status = "Review/Challenge".to_string();

        let records = vec![parent.clone(), l2, l3];
        let aggregation = aggregate_level1(&parent, &records).unwrap();
        assert_eq!(aggregation.descendant_count, 2);
        assert_eq!(
            aggregation.controls,
            ControlCounts {
                total: 2,
                automated: 1,
                manual: 1,
            }
        );
        assert_eq!(aggregation.effectiveness.effective, 1);
        assert_eq!(aggregation.effectiveness.not_assessed, 1);
        assert_eq!(aggregation.progress.completed, 1);
        assert_eq!(aggregation.progress.in_progress, 1);
        assert_eq!(aggregation.status.completed, 1);
        assert_eq!(aggregation.status.other, 1);
    }

    #[test]
    fn level1_aggregation_without_descendants_is_none() {
        let parent = record("l1", "Parent", RiskLevel::Level1, None);
        let records = vec![parent.clone()];
        assert!(aggregate_level1(&parent, &records).is_none());
    }

    #[test]
    fn drifted_completed_spellings_bucket_together() {
        let parent = record("l1", "Parent", RiskLevel::Level1, None);
        let mut a = record("l2-a", "A", RiskLevel::Level2, Some("Parent"));
        a.status = "Complete".to_string();
        let mut b = record("l2-b", "B", RiskLevel::Level2, Some("Parent"));
        b.status = "Closed".to_string();
        let mut c = record("l2-c", "C", RiskLevel::Level2, Some("Parent"));
        c.status = "Completed".to_string();

        let records = vec![parent.clone(), a, b, c];
        let aggregation = aggregate_level1(&parent, &records).unwrap();
        assert_eq!(aggregation.status.completed, 3);
        assert_eq!(aggregation.status.other, 0);
    }
}
