//! The rule catalog shown to users and stored in settings.

use serde::{Deserialize, Serialize};

use patternpal_core::RuleId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    pub id: RuleId,
    pub name: String,
    pub description: String,
    pub enabled: bool,
}

impl RuleConfig {
    fn enabled(id: RuleId, description: &str) -> Self {
        Self {
            id,
            name: id.display_name().to_string(),
            description: description.to_string(),
            enabled: true,
        }
    }
}

fn description(id: RuleId) -> &'static str {
    match id {
        RuleId::PrimaryButtonLimit => "Max one primary button per screen",
        RuleId::TextStyleConsistency => "Text nodes should use text styles",
        RuleId::SpacingConsistency => "Auto-layout spacing values should be consistent",
        RuleId::ColorTokenUsage => "Solid fills should reference a style",
        RuleId::ContrastRatio => "Text must meet WCAG AA contrast",
    }
}

/// Every rule, enabled, in run order.
pub fn default_rules() -> Vec<RuleConfig> {
    RuleId::ALL
        .into_iter()
        .map(|id| RuleConfig::enabled(id, description(id)))
        .collect()
}

/// Ids of the enabled entries, in catalog order.
pub fn enabled_ids(rules: &[RuleConfig]) -> Vec<RuleId> {
    rules.iter().filter(|r| r.enabled).map(|r| r.id).collect()
}
