use serde::{Deserialize, Serialize};

use crate::utils::normalize_status;

// ============================================================================
// Hierarchy level and tab partition
// ============================================================================

/// Position in the three-tier risk taxonomy. Level 1 is most aggregate,
/// Level 3 most granular.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "Level 1")]
    Level1,
    #[serde(rename = "Level 2")]
    Level2,
    #[serde(rename = "Level 3")]
    Level3,
}

impl RiskLevel {
    /// The level a parent of this record must have, if any. Level 1 records
    /// have no parent.
    pub fn parent_level(&self) -> Option<RiskLevel> {
        match self {
            RiskLevel::Level1 => None,
            RiskLevel::Level2 => Some(RiskLevel::Level1),
            RiskLevel::Level3 => Some(RiskLevel::Level2),
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Level1 => write!(f, "Level 1"),
            RiskLevel::Level2 => write!(f, "Level 2"),
            RiskLevel::Level3 => write!(f, "Level 3"),
        }
    }
}

impl From<&str> for RiskLevel {
    fn from(s: &str) -> Self {
        match s.to_lowercase().replace([' ', '-'], "").as_str() {
            "level1" | "l1" | "1" => RiskLevel::Level1,
            "level2" | "l2" | "2" => RiskLevel::Level2,
            _ => RiskLevel::Level3,
        }
    }
}

/// Workflow bucket deciding which dashboard tab surfaces a record. The three
/// tabs partition the record set per dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabCategory {
    Own,
    Assess,
    Approve,
}

impl Default for TabCategory {
    fn default() -> Self {
        Self::Own
    }
}

impl std::fmt::Display for TabCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TabCategory::Own => write!(f, "own"),
            TabCategory::Assess => write!(f, "assess"),
            TabCategory::Approve => write!(f, "approve"),
        }
    }
}

impl From<&str> for TabCategory {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "assess" => TabCategory::Assess,
            "approve" => TabCategory::Approve,
            _ => TabCategory::Own,
        }
    }
}

// ============================================================================
// Severity ratings and trends
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeverityLabel {
    Critical,
    High,
    Medium,
    Low,
}

impl SeverityLabel {
    /// Display color for this band. High shares red with Critical in the
    /// source palette; Medium is yellow, Low green.
    pub fn default_color(&self) -> &'static str {
        match self {
            SeverityLabel::Critical | SeverityLabel::High => "red",
            SeverityLabel::Medium => "yellow",
            SeverityLabel::Low => "green",
        }
    }
}

impl std::fmt::Display for SeverityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeverityLabel::Critical => write!(f, "Critical"),
            SeverityLabel::High => write!(f, "High"),
            SeverityLabel::Medium => write!(f, "Medium"),
            SeverityLabel::Low => write!(f, "Low"),
        }
    }
}

impl From<&str> for SeverityLabel {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "critical" => SeverityLabel::Critical,
            "high" => SeverityLabel::High,
            "medium" => SeverityLabel::Medium,
            _ => SeverityLabel::Low,
        }
    }
}

/// A severity rating on one axis (inherent or residual). `score` is the
/// optional 1-25 numeric severity used for aggregation; `level` is the human
/// label, which is edited independently of the score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskRating {
    pub level: SeverityLabel,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
}

impl RiskRating {
    pub fn new(level: SeverityLabel, score: Option<u8>) -> Self {
        Self {
            level,
            color: level.default_color().to_string(),
            score,
        }
    }
}

/// Which severity axis a computation reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreMetric {
    Inherent,
    Residual,
}

/// Directional indicator versus the prior assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendIndicator {
    pub value: String,
    pub up: bool,
}

impl Default for TrendIndicator {
    fn default() -> Self {
        Self {
            value: "0".to_string(),
            up: false,
        }
    }
}

// ============================================================================
// Assessment progress
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StageStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl Default for StageStatus {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// The three independent assessment stages tracked per record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentProgress {
    pub assess: StageStatus,
    pub review_challenge: StageStatus,
    pub approve: StageStatus,
}

// ============================================================================
// Controls
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyControl {
    Key,
    #[serde(rename = "Non-Key")]
    NonKey,
}

impl Default for KeyControl {
    fn default() -> Self {
        Self::NonKey
    }
}

/// A mitigating mechanism linked to a risk. `nature` stays a raw vocabulary
/// string ("Automated" / "Manual"); counting happens case-insensitively at
/// aggregation sites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedControl {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub control_type: String,
    pub nature: String,
    pub key_control: KeyControl,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub design_effectiveness: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operating_effectiveness: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub testing_status: Option<String>,
}

impl RelatedControl {
    pub fn is_automated(&self) -> bool {
        self.nature.eq_ignore_ascii_case("automated")
    }

    pub fn is_manual(&self) -> bool {
        self.nature.eq_ignore_ascii_case("manual")
    }
}

/// Record-level control-effectiveness rollup, independent of the ratings on
/// individual controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlEffectiveness {
    pub label: String,
    pub color: String,
}

impl Default for ControlEffectiveness {
    fn default() -> Self {
        Self {
            label: "Not Assessed".to_string(),
            color: EffectivenessBucket::NotAssessed.color().to_string(),
        }
    }
}

/// Canonical effectiveness buckets. Unknown or unset labels count as
/// `NotAssessed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectivenessBucket {
    Effective,
    PartiallyEffective,
    Ineffective,
    NotAssessed,
}

impl EffectivenessBucket {
    pub fn from_label(label: &str) -> Self {
        match normalize_status(label).as_str() {
            "effective" => EffectivenessBucket::Effective,
            "partially-effective" => EffectivenessBucket::PartiallyEffective,
            "ineffective" => EffectivenessBucket::Ineffective,
            _ => EffectivenessBucket::NotAssessed,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            EffectivenessBucket::Effective => "green",
            EffectivenessBucket::PartiallyEffective => "yellow",
            EffectivenessBucket::Ineffective => "red",
            EffectivenessBucket::NotAssessed => "gray",
        }
    }
}

// ============================================================================
// Workflow status
// ============================================================================

/// Canonical status buckets for summary breakdowns. The stored vocabulary
/// has drifted ("Completed", "Complete" and "Closed" all denote a finished
/// assessment), so bucketing goes through the normalized form and an
/// explicit equivalence table; anything unrecognized lands in `Other`
/// rather than being dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusBucket {
    Completed,
    Overdue,
    InProgress,
    PendingApproval,
    Other,
}

impl StatusBucket {
    pub fn from_raw(raw: &str) -> Self {
        match normalize_status(raw).as_str() {
            "completed" | "complete" | "closed" => StatusBucket::Completed,
            "overdue" => StatusBucket::Overdue,
            "in-progress" => StatusBucket::InProgress,
            "pending-approval" => StatusBucket::PendingApproval,
            _ => StatusBucket::Other,
        }
    }
}

// ============================================================================
// Deadline buckets
// ============================================================================

/// Urgency classification of a due date relative to "now". The four buckets
/// partition all parseable dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeadlineBucket {
    Overdue,
    DueThisWeek,
    DueThisMonth,
    Future,
}

impl std::fmt::Display for DeadlineBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeadlineBucket::Overdue => write!(f, "overdue"),
            DeadlineBucket::DueThisWeek => write!(f, "due-this-week"),
            DeadlineBucket::DueThisMonth => write!(f, "due-this-month"),
            DeadlineBucket::Future => write!(f, "future"),
        }
    }
}

// ============================================================================
// Historical assessments
// ============================================================================

/// One archived assessment version. All fields are display strings as they
/// were captured at the time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalAssessment {
    pub date: String,
    pub assessor: String,
    pub inherent_risk: String,
    pub residual_risk: String,
    pub control_effectiveness: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// ============================================================================
// RiskRecord
// ============================================================================

/// The central entity: one risk in the three-tier hierarchy.
///
/// Dates stay in their source string form (ISO or locale display format) and
/// are parsed leniently at each computation site; a record with an
/// unparsable date is excluded from date-dependent computations but remains
/// fully visible everywhere else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskRecord {
    pub id: String,
    pub title: String,
    pub risk_level: RiskLevel,
    /// Legacy reference to the owning record's title, one level up. Kept for
    /// ingest compatibility; runtime traversal uses `parent_id`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_risk: Option<String>,
    /// Resolved foreign key to the owning record, assigned by the repository
    /// when records are loaded or merged. Never populated by external
    /// payloads.
    #[serde(skip)]
    pub parent_id: Option<String>,
    pub business_unit: String,
    pub category: String,
    pub owner: String,
    pub assessors: Vec<String>,
    pub due_date: String,
    pub last_assessed: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<String>,
    pub assessment_progress: AssessmentProgress,
    pub inherent_risk: RiskRating,
    pub residual_risk: RiskRating,
    pub inherent_trend: TrendIndicator,
    pub residual_trend: TrendIndicator,
    pub related_controls: Vec<RelatedControl>,
    pub control_effectiveness: ControlEffectiveness,
    /// Raw workflow status; not canonically spelled. Compare through
    /// `status_bucket` or `normalize_status`, never by raw equality.
    pub status: String,
    pub tab_category: TabCategory,
    pub previous_assessments: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub historical_assessments: Option<Vec<HistoricalAssessment>>,
}

impl RiskRecord {
    pub fn rating(&self, metric: ScoreMetric) -> &RiskRating {
        match metric {
            ScoreMetric::Inherent => &self.inherent_risk,
            ScoreMetric::Residual => &self.residual_risk,
        }
    }

    pub fn status_bucket(&self) -> StatusBucket {
        StatusBucket::from_raw(&self.status)
    }
}

// ============================================================================
// Filter criteria
// ============================================================================

/// Multi-option narrowing criteria for the dashboard list. Absent options
/// impose no constraint; string-typed options also accept the literal
/// `"all"` as no-constraint, matching the selector vocabulary of the UI.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFilter {
    #[serde(default)]
    pub tab_category: Option<TabCategory>,
    /// Case-insensitive substring match against the title.
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub risk_id: Option<String>,
    #[serde(default)]
    pub risk_level: Option<RiskLevel>,
    /// Compared after normalization on both sides.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub deadline: Option<DeadlineBucket>,
    /// Second hierarchy-level axis; the role dashboards expose the same
    /// constraint under two selectors.
    #[serde(default)]
    pub org_level: Option<RiskLevel>,
    /// Exact assessor name membership.
    #[serde(default)]
    pub assessor: Option<String>,
    #[serde(default)]
    pub business_unit: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_level_round_trips_through_display_and_from() {
        for level in [RiskLevel::Level1, RiskLevel::Level2, RiskLevel::Level3] {
            assert_eq!(RiskLevel::from(level.to_string().as_str()), level);
        }
        assert_eq!(RiskLevel::from("L2"), RiskLevel::Level2);
        assert_eq!(RiskLevel::from("unknown"), RiskLevel::Level3);
    }

    #[test]
    fn parent_level_follows_strict_ordering() {
        assert_eq!(RiskLevel::Level1.parent_level(), None);
        assert_eq!(RiskLevel::Level2.parent_level(), Some(RiskLevel::Level1));
        assert_eq!(RiskLevel::Level3.parent_level(), Some(RiskLevel::Level2));
    }

    #[test]
    fn status_bucket_equivalence_table() {
        assert_eq!(StatusBucket::from_raw("Completed"), StatusBucket::Completed);
        assert_eq!(StatusBucket::from_raw("Complete"), StatusBucket::Completed);
        assert_eq!(StatusBucket::from_raw("Closed"), StatusBucket::Completed);
        assert_eq!(StatusBucket::from_raw("In Progress"), StatusBucket::InProgress);
        assert_eq!(
            StatusBucket::from_raw("Pending Approval"),
            StatusBucket::PendingApproval
        );
        assert_eq!(
            StatusBucket::from_raw("Review/Challenge"),
            StatusBucket::Other
        );
        assert_eq!(
            StatusBucket::from_raw("Sent for Assessment"),
            StatusBucket::Other
        );
    }

    #[test]
    fn effectiveness_bucket_handles_unset_labels() {
        assert_eq!(
            EffectivenessBucket::from_label("Partially Effective"),
            EffectivenessBucket::PartiallyEffective
        );
        assert_eq!(
            EffectivenessBucket::from_label(""),
            EffectivenessBucket::NotAssessed
        );
        assert_eq!(
            EffectivenessBucket::from_label("effective"),
            EffectivenessBucket::Effective
        );
    }

    #[test]
    fn rating_constructor_derives_color() {
        let rating = RiskRating::new(SeverityLabel::Critical, Some(20));
        assert_eq!(rating.color, "red");
        let rating = RiskRating::new(SeverityLabel::Medium, None);
        assert_eq!(rating.color, "yellow");
    }

    #[test]
    fn record_serializes_with_camel_case_keys() {
        let record = RiskRecord {
            id: "r-1".to_string(),
            title: "Cyber Security Risk".to_string(),
            risk_level: RiskLevel::Level2,
            parent_risk: Some("Technology Risk".to_string()),
            parent_id: None,
            business_unit: "Retail Banking".to_string(),
            category: "Operational".to_string(),
            owner: "A. Chen".to_string(),
            assessors: vec!["B. Osei".to_string()],
            due_date: "2025-04-01".to_string(),
            last_assessed: "2025-01-10".to_string(),
            completion_date: None,
            assessment_progress: AssessmentProgress::default(),
            inherent_risk: RiskRating::new(SeverityLabel::High, Some(12)),
            residual_risk: RiskRating::new(SeverityLabel::Medium, Some(8)),
            inherent_trend: TrendIndicator::default(),
            residual_trend: TrendIndicator::default(),
            related_controls: vec![],
            control_effectiveness: ControlEffectiveness::default(),
            status: "In Progress".to_string(),
            tab_category: TabCategory::Assess,
            previous_assessments: 2,
            historical_assessments: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["riskLevel"], "Level 2");
        assert_eq!(json["parentRisk"], "Technology Risk");
        assert_eq!(json["tabCategory"], "assess");
        assert_eq!(json["assessmentProgress"]["assess"], "not-started");
        assert!(json.get("parentId").is_none());
    }
}
