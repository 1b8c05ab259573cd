use patternpal_core::{RuleId, RuleIssue, Severity};

use super::plural;
use crate::scene::{NodeKind, SceneNode};

/// Text layers without a single text style (unset or mixed).
pub fn check(container: &SceneNode) -> Option<RuleIssue> {
    let unstyled: Vec<String> = container
        .descendants()
        .filter(|n| n.kind == NodeKind::Text && n.text_style_id.is_missing())
        .map(|n| n.id.clone())
        .collect();
    if unstyled.is_empty() {
        return None;
    }

    let message = format!(
        "{} text layer{} not using a text style",
        unstyled.len(),
        plural(unstyled.len())
    );
    Some(RuleIssue::new(
        RuleId::TextStyleConsistency,
        Severity::Warning,
        &container.id,
        &container.name,
        unstyled,
        message,
    ))
}
