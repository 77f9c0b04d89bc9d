//! Hierarchy reconstruction.
//!
//! Projects a filtered, flat record list into the ordered sequence of rows
//! to render, honoring expand/collapse state for one of three view modes.
//! Purely a projection: deterministic for identical inputs, no side
//! effects.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::{RiskLevel, RiskRecord};

/// Which tier anchors the dashboard list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HierarchyView {
    Level1,
    Level2,
    Level3,
}

impl Default for HierarchyView {
    fn default() -> Self {
        Self::Level1
    }
}

/// Ids expanded at first load: every Level-1 record present.
pub fn default_expanded(records: &[RiskRecord]) -> HashSet<String> {
    records
        .iter()
        .filter(|r| r.risk_level == RiskLevel::Level1)
        .map(|r| r.id.clone())
        .collect()
}

/// Whether `record` has at least one child in `records`. Hosts use this to
/// suppress the expand affordance on childless parents, which still render.
pub fn has_children(record: &RiskRecord, records: &[RiskRecord]) -> bool {
    records
        .iter()
        .any(|r| r.parent_id.as_deref() == Some(record.id.as_str()))
}

/// Produce the ordered visible sequence for one view mode.
///
/// `Level1` nests two levels deep under expanded nodes; `Level2` nests one;
/// `Level3` is the flat leaf list and ignores expand state. A `Level2` view
/// over a filtered set with no Level-2 records falls back to the flat
/// Level-3 list. Each record appears at most once even if parent links are
/// pathological.
pub fn build_visible_sequence(
    filtered: &[RiskRecord],
    expanded: &HashSet<String>,
    view: HierarchyView,
) -> Vec<RiskRecord> {
    match view {
        HierarchyView::Level1 => nested_sequence(filtered, expanded, RiskLevel::Level1, true),
        HierarchyView::Level2 => {
            let sequence = nested_sequence(filtered, expanded, RiskLevel::Level2, false);
            if sequence.is_empty() {
                flat_level3(filtered)
            } else {
                sequence
            }
        }
        HierarchyView::Level3 => flat_level3(filtered),
    }
}

fn nested_sequence(
    filtered: &[RiskRecord],
    expanded: &HashSet<String>,
    root_level: RiskLevel,
    deep: bool,
) -> Vec<RiskRecord> {
    let mut out = Vec::new();
    let mut emitted: HashSet<&str> = HashSet::new();
    for root in filtered.iter().filter(|r| r.risk_level == root_level) {
        if !emitted.insert(root.id.as_str()) {
            continue;
        }
        out.push(root.clone());
        if !expanded.contains(&root.id) {
            continue;
        }
        for child in children_of(filtered, root.id.as_str()) {
            if !emitted.insert(child.id.as_str()) {
                continue;
            }
            out.push(child.clone());
            if deep && expanded.contains(&child.id) {
                for grandchild in children_of(filtered, child.id.as_str()) {
                    if emitted.insert(grandchild.id.as_str()) {
                        out.push(grandchild.clone());
                    }
                }
            }
        }
    }
    out
}

fn children_of<'a>(
    records: &'a [RiskRecord],
    parent_id: &'a str,
) -> impl Iterator<Item = &'a RiskRecord> + 'a {
    records
        .iter()
        .filter(move |r| r.parent_id.as_deref() == Some(parent_id))
}

fn flat_level3(filtered: &[RiskRecord]) -> Vec<RiskRecord> {
    filtered
        .iter()
        .filter(|r| r.risk_level == RiskLevel::Level3)
        .cloned()
        .collect()
}
