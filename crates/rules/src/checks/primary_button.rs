//! At most one primary button per top-level container.
//!
//! Candidate discovery is a synchronous walk; resolving each instance to its
//! main component name is a separate batched async pass.

use futures::future::join_all;
use tracing::debug;

use patternpal_core::{RuleId, RuleIssue, Severity};

use crate::registry::{SceneGraph, StyleRegistry};
use crate::scene::{NodeKind, SceneNode};

/// Variant property keys that carry a button's emphasis level.
pub const HIERARCHY_VARIANT_KEYS: [&str; 9] = [
    "type",
    "variant",
    "hierarchy",
    "kind",
    "style",
    "emphasis",
    "priority",
    "appearance",
    "level",
];

/// Component name used when an instance cannot be resolved.
pub const NO_MAIN_COMPONENT: &str = "(no main component)";

pub fn is_button_component_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.contains("button") || lower.contains("btn") || lower == "cta" || lower.contains("/cta")
}

/// Emphasis declared through variant properties, if any hierarchy key is present.
fn variant_emphasis(node: &SceneNode) -> Option<bool> {
    let props = node.variant_properties.as_ref()?;
    let mut values = props
        .iter()
        .filter(|(key, _)| HIERARCHY_VARIANT_KEYS.contains(&key.trim().to_lowercase().as_str()))
        .map(|(_, value)| value.trim().eq_ignore_ascii_case("primary"))
        .peekable();
    values.peek()?;
    Some(values.any(|is_primary| is_primary))
}

fn has_primary_fill_style(node: &SceneNode, styles: &dyn StyleRegistry) -> bool {
    std::iter::once(node).chain(node.descendants()).any(|n| {
        n.fill_style_id
            .id()
            .and_then(|id| styles.style_name(id))
            .is_some_and(|name| name.to_lowercase().contains("primary"))
    })
}

fn name_says_primary(name: &str) -> bool {
    let lower = name.to_lowercase();
    if lower.contains("primary") {
        return true;
    }
    lower.contains("button")
        && !["secondary", "outline", "ghost"].iter().any(|w| lower.contains(w))
}

/// Classify a button instance: variant property, then fill style, then name.
pub fn is_primary(node: &SceneNode, styles: &dyn StyleRegistry) -> bool {
    if let Some(primary) = variant_emphasis(node) {
        return primary;
    }
    if has_primary_fill_style(node, styles) {
        return true;
    }
    name_says_primary(&node.name)
}

fn candidate_instances(container: &SceneNode) -> Vec<&SceneNode> {
    container
        .descendants()
        .filter(|n| n.kind == NodeKind::Instance)
        .collect()
}

async fn resolve_component_names(graph: &dyn SceneGraph, instances: &[&SceneNode]) -> Vec<String> {
    join_all(instances.iter().map(|node| async move {
        match graph.main_component_name(&node.id).await {
            Ok(Some(name)) => name,
            Ok(None) => NO_MAIN_COMPONENT.to_string(),
            Err(e) => {
                debug!(instance = %node.id, error = %e, "Main component lookup failed");
                NO_MAIN_COMPONENT.to_string()
            }
        }
    }))
    .await
}

pub async fn check(
    container: &SceneNode,
    graph: &dyn SceneGraph,
    styles: &dyn StyleRegistry,
) -> Option<RuleIssue> {
    let instances = candidate_instances(container);
    if instances.len() < 2 {
        return None;
    }
    let component_names = resolve_component_names(graph, &instances).await;

    let primaries: Vec<String> = instances
        .iter()
        .zip(&component_names)
        .filter(|(node, component)| {
            is_button_component_name(component) || is_button_component_name(&node.name)
        })
        .filter(|(node, _)| is_primary(node, styles))
        .map(|(node, _)| node.id.clone())
        .collect();

    if primaries.len() <= 1 {
        return None;
    }
    let message = format!(
        "{} primary buttons found; keep a single primary action per screen",
        primaries.len()
    );
    Some(RuleIssue::new(
        RuleId::PrimaryButtonLimit,
        Severity::Error,
        &container.id,
        &container.name,
        primaries,
        message,
    ))
}
