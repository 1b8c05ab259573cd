use patternpal_core::{RuleId, RuleIssue, Severity};

use super::plural;
use crate::color::{contrast_ratio, passes_wcag_aa, Rgb};
use crate::scene::{nearest_ancestor, NodeKind, SceneNode};

/// Text whose fill does not reach WCAG AA contrast against its background.
///
/// Foreground is the text's topmost visible solid fill; text without one is
/// skipped. Background is the nearest ancestor's topmost visible solid fill,
/// white when no ancestor in the container has one.
pub fn check(container: &SceneNode) -> Option<RuleIssue> {
    let flat = container.flatten();
    let mut failing = Vec::new();
    let mut lowest = f64::INFINITY;

    for (index, entry) in flat.iter().enumerate().skip(1) {
        let node = entry.node;
        if node.kind != NodeKind::Text {
            continue;
        }
        let Some(foreground) = node.top_solid_color() else {
            continue;
        };
        let background = nearest_ancestor(&flat, index, SceneNode::top_solid_color).unwrap_or(Rgb::WHITE);

        let ratio = contrast_ratio(foreground.luminance(), background.luminance());
        if !passes_wcag_aa(ratio, node.font_size) {
            failing.push(node.id.clone());
            lowest = lowest.min(ratio);
        }
    }

    if failing.is_empty() {
        return None;
    }
    let message = format!(
        "{} text layer{} below WCAG AA contrast (lowest {:.2}:1)",
        failing.len(),
        plural(failing.len()),
        lowest
    );
    Some(RuleIssue::new(
        RuleId::ContrastRatio,
        Severity::Error,
        &container.id,
        &container.name,
        failing,
        message,
    ))
}
