use indexmap::IndexSet;

use patternpal_core::{RuleId, RuleIssue, Severity};

use super::plural;
use crate::color::rgb_to_hex;
use crate::scene::SceneNode;

/// Layers painted with a raw solid color instead of a color style.
pub fn check(container: &SceneNode) -> Option<RuleIssue> {
    let raw: Vec<&SceneNode> = container
        .descendants()
        .filter(|n| n.has_visible_solid_fill() && n.fill_style_id.is_missing())
        .collect();
    if raw.is_empty() {
        return None;
    }

    let colors: IndexSet<String> = raw
        .iter()
        .filter_map(|n| n.top_solid_color())
        .map(rgb_to_hex)
        .collect();
    let mut message = format!(
        "{} layer{} use{} a solid fill without a color style",
        raw.len(),
        plural(raw.len()),
        if raw.len() == 1 { "s" } else { "" }
    );
    if !colors.is_empty() {
        let list: Vec<&str> = colors.iter().map(String::as_str).collect();
        message.push_str(&format!(" ({})", list.join(", ")));
    }

    Some(RuleIssue::new(
        RuleId::ColorTokenUsage,
        Severity::Info,
        &container.id,
        &container.name,
        raw.iter().map(|n| n.id.clone()).collect(),
        message,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::scene::{NodeKind, Paint, StyleRef};

    #[test]
    fn raw_fills_are_reported_with_colors() {
        let mut hidden = Paint::solid(Rgb::BLACK);
        hidden.visible = false;
        let container = SceneNode::new("0", "Screen", NodeKind::Frame).with_children(vec![
            SceneNode::new("1", "Bg", NodeKind::Rectangle).with_fill(Paint::solid(Rgb::new(1.0, 0.0, 0.0))),
            SceneNode::new("2", "Tokenized", NodeKind::Rectangle)
                .with_fill(Paint::solid(Rgb::WHITE))
                .with_fill_style(StyleRef::Id("S:surface".into())),
            SceneNode::new("3", "Hidden", NodeKind::Rectangle).with_fill(hidden),
            SceneNode::new("4", "Mixed", NodeKind::Text)
                .with_fill(Paint::solid(Rgb::new(1.0, 0.0, 0.0)))
                .with_fill_style(StyleRef::Mixed),
        ]);
        let issue = check(&container).unwrap();
        assert_eq!(issue.severity, Severity::Info);
        assert_eq!(issue.node_ids, vec!["1".to_string(), "4".to_string()]);
        assert_eq!(issue.message, "2 layers use a solid fill without a color style (#ff0000)");
    }

    #[test]
    fn container_fill_is_not_checked() {
        let container = SceneNode::new("0", "Screen", NodeKind::Frame).with_fill(Paint::solid(Rgb::WHITE));
        assert!(check(&container).is_none());
    }
}
