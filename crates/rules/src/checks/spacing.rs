use indexmap::IndexMap;

use patternpal_core::{LayoutMode, RuleId, RuleIssue, Severity};

use crate::scene::SceneNode;

/// Gaps are compared at 0.01px resolution.
fn gap_key(gap: f64) -> i64 {
    (gap * 100.0).round() as i64
}

struct GapGroup {
    gap: f64,
    node_ids: Vec<String>,
}

/// Auto-layout gaps that stray from the container's dominant spacing.
///
/// Frames are grouped by item spacing. The largest group is dominant (ties
/// go to the value seen first); any other value used by exactly one frame is
/// an outlier. The issue lists the outlier frames and every distinct gap.
pub fn check(container: &SceneNode) -> Option<RuleIssue> {
    let mut by_gap: IndexMap<i64, GapGroup> = IndexMap::new();
    for node in container
        .descendants()
        .filter(|n| matches!(n.layout_mode, LayoutMode::Horizontal | LayoutMode::Vertical))
    {
        let gap = node.item_spacing.unwrap_or(0.0);
        by_gap
            .entry(gap_key(gap))
            .or_insert_with(|| GapGroup {
                gap,
                node_ids: Vec::new(),
            })
            .node_ids
            .push(node.id.clone());
    }
    if by_gap.len() <= 1 {
        return None;
    }

    let groups: Vec<GapGroup> = by_gap.into_values().collect();
    let mut dominant = 0;
    for (i, group) in groups.iter().enumerate() {
        if group.node_ids.len() > groups[dominant].node_ids.len() {
            dominant = i;
        }
    }

    let outliers: Vec<String> = groups
        .iter()
        .enumerate()
        .filter(|(i, g)| *i != dominant && g.node_ids.len() == 1)
        .flat_map(|(_, g)| g.node_ids.iter().cloned())
        .collect();
    if outliers.is_empty() {
        return None;
    }

    let values: Vec<String> = groups.iter().map(|g| format!("{}", g.gap)).collect();
    let message = format!(
        "Inconsistent auto-layout spacing: {}px used (most common {}px)",
        values.join(", "),
        groups[dominant].gap
    );
    Some(RuleIssue::new(
        RuleId::SpacingConsistency,
        Severity::Warning,
        &container.id,
        &container.name,
        outliers,
        message,
    ))
}
