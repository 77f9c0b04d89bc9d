use serde::Deserialize;

/// A loosely-typed risk row as produced by the document-parsing
/// collaborator. Every field is optional; omitted fields are filled from the
/// existing record (when the id matches) or from engine defaults during
/// normalization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParsedRisk {
    pub id: Option<String>,
    pub title: Option<String>,
    pub risk_level: Option<String>,
    pub parent_risk: Option<String>,
    pub business_unit: Option<String>,
    pub category: Option<String>,
    pub owner: Option<String>,
    pub assessors: Option<Vec<String>>,
    pub due_date: Option<String>,
    pub last_assessed: Option<String>,
    pub completion_date: Option<String>,
    pub status: Option<String>,
    pub tab_category: Option<String>,
    /// Display-formatted rating descriptor, e.g. `"[High, 16]"`.
    pub inherent_risk: Option<String>,
    pub residual_risk: Option<String>,
    pub previous_assessments: Option<u32>,
}

/// Decoded form of a display-formatted rating descriptor.
///
/// Parsed documents carry ratings as strings like `"[High, 16]"` or plain
/// `"Medium"`. Decoding happens here, at the system boundary, so merge logic
/// only ever sees structured values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingDescriptor {
    pub label: String,
    pub score: Option<u8>,
}

impl RatingDescriptor {
    /// Strip bracket characters, split on the first comma, and read a
    /// trailing numeric part as the score. Returns `None` when no label
    /// survives.
    pub fn parse(raw: &str) -> Option<Self> {
        let cleaned: String = raw.chars().filter(|c| !matches!(c, '[' | ']')).collect();
        let cleaned = cleaned.trim();
        if cleaned.is_empty() {
            return None;
        }
        let mut parts = cleaned.splitn(2, ',');
        let label = parts.next()?.trim();
        if label.is_empty() {
            return None;
        }
        let score = parts.next().and_then(|s| s.trim().parse::<u8>().ok());
        Some(Self {
            label: label.to_string(),
            score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bracketed_descriptor() {
        assert_eq!(
            RatingDescriptor::parse("[High, 16]"),
            Some(RatingDescriptor {
                label: "High".to_string(),
                score: Some(16),
            })
        );
    }

    #[test]
    fn parses_plain_label() {
        assert_eq!(
            RatingDescriptor::parse("Medium"),
            Some(RatingDescriptor {
                label: "Medium".to_string(),
                score: None,
            })
        );
    }

    #[test]
    fn tolerates_unbracketed_comma_form() {
        assert_eq!(
            RatingDescriptor::parse("Critical, 22"),
            Some(RatingDescriptor {
                label: "Critical".to_string(),
                score: Some(22),
            })
        );
    }

    #[test]
    fn non_numeric_score_part_is_dropped() {
        assert_eq!(
            RatingDescriptor::parse("[Low, n/a]"),
            Some(RatingDescriptor {
                label: "Low".to_string(),
                score: None,
            })
        );
    }

    #[test]
    fn empty_inputs_yield_none() {
        assert_eq!(RatingDescriptor::parse(""), None);
        assert_eq!(RatingDescriptor::parse("[]"), None);
        assert_eq!(RatingDescriptor::parse("[, 5]"), None);
    }

    #[test]
    fn parsed_risk_decodes_from_loose_json() {
        let row: ParsedRisk = serde_json::from_value(serde_json::json!({
            "id": "r-9",
            "title": "Vendor Outage",
            "inherentRisk": "[High, 16]",
            "unknownField": "ignored"
        }))
        .unwrap();
        assert_eq!(row.id.as_deref(), Some("r-9"));
        assert_eq!(row.title.as_deref(), Some("Vendor Outage"));
        assert_eq!(row.inherent_risk.as_deref(), Some("[High, 16]"));
        assert!(row.owner.is_none());
    }
}
