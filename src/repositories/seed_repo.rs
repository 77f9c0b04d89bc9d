//! Static seed dataset.
//!
//! Records are created once at engine construction and mutated in place
//! afterwards; there is no other ingestion path besides document import.
//! The dataset deliberately covers all three hierarchy levels, every tab,
//! divergent status spellings, scored and unscored ratings, and one
//! unparsable due date, so every engine path is reachable from the seed.

use crate::models::{
    AssessmentProgress, ControlEffectiveness, EffectivenessBucket, HistoricalAssessment,
    KeyControl, RelatedControl, RiskLevel, RiskRating, RiskRecord, SeverityLabel, StageStatus,
    TabCategory, TrendIndicator,
};

fn control(id: &str, name: &str, control_type: &str, nature: &str, key: KeyControl) -> RelatedControl {
    RelatedControl {
        id: id.to_string(),
        name: name.to_string(),
        control_type: control_type.to_string(),
        nature: nature.to_string(),
        key_control: key,
        design_effectiveness: Some("Effective".to_string()),
        operating_effectiveness: None,
        testing_status: Some("Planned".to_string()),
    }
}

fn effectiveness(label: &str) -> ControlEffectiveness {
    ControlEffectiveness {
        label: label.to_string(),
        color: EffectivenessBucket::from_label(label).color().to_string(),
    }
}

fn trend(value: &str, up: bool) -> TrendIndicator {
    TrendIndicator {
        value: value.to_string(),
        up,
    }
}

#[allow(clippy::too_many_arguments)]
fn record(
    id: &str,
    title: &str,
    level: RiskLevel,
    parent: Option<&str>,
    business_unit: &str,
    owner: &str,
    status: &str,
    tab: TabCategory,
    due_date: &str,
) -> RiskRecord {
    RiskRecord {
        id: id.to_string(),
        title: title.to_string(),
        risk_level: level,
        parent_risk: parent.map(str::to_string),
        parent_id: None,
        business_unit: business_unit.to_string(),
        category: "Operational".to_string(),
        owner: owner.to_string(),
        assessors: vec![],
        due_date: due_date.to_string(),
        last_assessed: "2025-01-15".to_string(),
        completion_date: None,
        assessment_progress: AssessmentProgress::default(),
        inherent_risk: RiskRating::new(SeverityLabel::Medium, None),
        residual_risk: RiskRating::new(SeverityLabel::Low, None),
        inherent_trend: trend("0", false),
        residual_trend: trend("0", false),
        related_controls: vec![],
        control_effectiveness: effectiveness("Not Assessed"),
        status: status.to_string(),
        tab_category: tab,
        previous_assessments: 0,
        historical_assessments: None,
    }
}

/// The mock dataset the dashboards load against.
pub fn seed_records() -> Vec<RiskRecord> {
    let mut records = Vec::new();

    // --- Technology Risk tree -----------------------------------------
    let mut tech = record(
        "RSK-001",
        "Technology Risk",
        RiskLevel::Level1,
        None,
        "Group",
        "M. Alvarez",
        "In Progress",
        TabCategory::Own,
        "2025-06-30",
    );
    tech.inherent_risk = RiskRating::new(SeverityLabel::High, Some(14));
    tech.residual_risk = RiskRating::new(SeverityLabel::Medium, Some(9));
    tech.inherent_trend = trend("+2", true);
    tech.previous_assessments = 3;
    tech.historical_assessments = Some(vec![HistoricalAssessment {
        date: "2024-09-30".to_string(),
        assessor: "J. Park".to_string(),
        inherent_risk: "High".to_string(),
        residual_risk: "Medium".to_string(),
        control_effectiveness: "Partially Effective".to_string(),
        status: "Completed".to_string(),
        notes: Some("Annual refresh".to_string()),
    }]);
    records.push(tech);

    let mut cyber = record(
        "RSK-002",
        "Cyber Security Risk",
        RiskLevel::Level2,
        Some("Technology Risk"),
        "Retail Banking",
        "A. Chen",
        "Sent for Assessment",
        TabCategory::Assess,
        "2025-03-20",
    );
    cyber.assessors = vec!["B. Osei".to_string(), "K. Tanaka".to_string()];
    cyber.inherent_risk = RiskRating::new(SeverityLabel::Critical, Some(20));
    cyber.residual_risk = RiskRating::new(SeverityLabel::High, Some(12));
    cyber.residual_trend = trend("-1", false);
    cyber.related_controls = vec![
        control("CTL-101", "Perimeter Firewall", "Preventive", "Automated", KeyControl::Key),
        control("CTL-102", "Quarterly Access Review", "Detective", "Manual", KeyControl::Key),
    ];
    cyber.control_effectiveness = effectiveness("Partially Effective");
    cyber.assessment_progress = AssessmentProgress {
        assess: StageStatus::InProgress,
        review_challenge: StageStatus::NotStarted,
        approve: StageStatus::NotStarted,
    };
    records.push(cyber);

    let mut data_mgmt = record(
        "RSK-003",
        "Data Management Risk",
        RiskLevel::Level2,
        Some("Technology Risk"),
        "Operations",
        "A. Chen",
        "Review/Challenge",
        TabCategory::Assess,
        "2025-03-12",
    );
    data_mgmt.assessors = vec!["B. Osei".to_string()];
    data_mgmt.inherent_risk = RiskRating::new(SeverityLabel::High, Some(12));
    data_mgmt.residual_risk = RiskRating::new(SeverityLabel::Medium, Some(6));
    data_mgmt.related_controls = vec![control(
        "CTL-110",
        "Data Retention Schedule",
        "Directive",
        "Manual",
        KeyControl::NonKey,
    )];
    data_mgmt.control_effectiveness = effectiveness("Effective");
    data_mgmt.assessment_progress = AssessmentProgress {
        assess: StageStatus::Completed,
        review_challenge: StageStatus::InProgress,
        approve: StageStatus::NotStarted,
    };
    records.push(data_mgmt);

    let mut phishing = record(
        "RSK-004",
        "Phishing Attack Exposure",
        RiskLevel::Level3,
        Some("Cyber Security Risk"),
        "Retail Banking",
        "L. Novak",
        "Pending Approval",
        TabCategory::Approve,
        "2025-03-14",
    );
    phishing.assessors = vec!["K. Tanaka".to_string()];
    phishing.inherent_risk = RiskRating::new(SeverityLabel::High, Some(15));
    phishing.residual_risk = RiskRating::new(SeverityLabel::Medium, Some(8));
    phishing.related_controls = vec![control(
        "CTL-120",
        "Mail Filtering Gateway",
        "Preventive",
        "Automated",
        KeyControl::Key,
    )];
    phishing.control_effectiveness = effectiveness("Effective");
    phishing.assessment_progress = AssessmentProgress {
        assess: StageStatus::Completed,
        review_challenge: StageStatus::Completed,
        approve: StageStatus::InProgress,
    };
    records.push(phishing);

    let mut retention = record(
        "RSK-005",
        "Data Retention Breaches",
        RiskLevel::Level3,
        Some("Data Management Risk"),
        "Operations",
        "L. Novak",
        // Divergent spelling of the completed state, on purpose.
        "Complete",
        TabCategory::Own,
        "2025-02-28",
    );
    retention.completion_date = Some("2025-03-04".to_string());
    retention.inherent_risk = RiskRating::new(SeverityLabel::Medium, Some(9));
    retention.residual_risk = RiskRating::new(SeverityLabel::Low, Some(4));
    retention.assessment_progress = AssessmentProgress {
        assess: StageStatus::Completed,
        review_challenge: StageStatus::Completed,
        approve: StageStatus::Completed,
    };
    records.push(retention);

    // --- Third-Party Risk tree ----------------------------------------
    let mut third_party = record(
        "RSK-006",
        "Third-Party Risk",
        RiskLevel::Level1,
        None,
        "Group",
        "M. Alvarez",
        "Sent for Assessment",
        TabCategory::Own,
        "2025-07-15",
    );
    third_party.inherent_risk = RiskRating::new(SeverityLabel::Medium, Some(8));
    third_party.residual_risk = RiskRating::new(SeverityLabel::Medium, Some(6));
    records.push(third_party);

    let mut vendor = record(
        "RSK-007",
        "Vendor Concentration Risk",
        RiskLevel::Level2,
        Some("Third-Party Risk"),
        "Procurement",
        "S. Haddad",
        "Overdue",
        TabCategory::Assess,
        "2025-01-31",
    );
    vendor.assessors = vec!["B. Osei".to_string()];
    vendor.inherent_risk = RiskRating::new(SeverityLabel::High, Some(10));
    // Unscored on the residual axis; excluded from residual averages.
    vendor.residual_risk = RiskRating::new(SeverityLabel::Medium, None);
    vendor.related_controls = vec![control(
        "CTL-130",
        "Exit Strategy Review",
        "Directive",
        "Manual",
        KeyControl::NonKey,
    )];
    vendor.control_effectiveness = effectiveness("Ineffective");
    records.push(vendor);

    let mut outage = record(
        "RSK-008",
        "Critical Vendor Outage",
        RiskLevel::Level3,
        Some("Vendor Concentration Risk"),
        "Procurement",
        "S. Haddad",
        "In Progress",
        TabCategory::Assess,
        // Unparsable on purpose; excluded from deadline classification.
        "TBD",
    );
    outage.inherent_risk = RiskRating::new(SeverityLabel::High, Some(12));
    outage.residual_risk = RiskRating::new(SeverityLabel::Medium, Some(8));
    records.push(outage);

    records
}
