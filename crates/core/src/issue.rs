use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a design-lint rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleId {
    PrimaryButtonLimit,
    TextStyleConsistency,
    SpacingConsistency,
    ColorTokenUsage,
    ContrastRatio,
}

impl RuleId {
    /// Every rule, in the order the orchestrator runs them.
    pub const ALL: [RuleId; 5] = [
        RuleId::PrimaryButtonLimit,
        RuleId::TextStyleConsistency,
        RuleId::SpacingConsistency,
        RuleId::ColorTokenUsage,
        RuleId::ContrastRatio,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RuleId::PrimaryButtonLimit => "primary-button-limit",
            RuleId::TextStyleConsistency => "text-style-consistency",
            RuleId::SpacingConsistency => "spacing-consistency",
            RuleId::ColorTokenUsage => "color-token-usage",
            RuleId::ContrastRatio => "contrast-ratio",
        }
    }

    /// Human-readable rule name used in issues and reports.
    pub fn display_name(self) -> &'static str {
        match self {
            RuleId::PrimaryButtonLimit => "Primary Button Limit",
            RuleId::TextStyleConsistency => "Text Style Consistency",
            RuleId::SpacingConsistency => "Spacing Consistency",
            RuleId::ColorTokenUsage => "Color Token Usage",
            RuleId::ContrastRatio => "Contrast Ratio (WCAG AA)",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleId {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        RuleId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("unknown rule id: '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// One rule violation inside one top-level container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleIssue {
    pub rule_id: RuleId,
    pub rule_name: String,
    pub severity: Severity,
    pub container_id: String,
    pub container_name: String,
    /// Offending element ids inside the container.
    pub node_ids: Vec<String>,
    pub message: String,
}

impl RuleIssue {
    pub fn new(
        rule_id: RuleId,
        severity: Severity,
        container_id: impl Into<String>,
        container_name: impl Into<String>,
        node_ids: Vec<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule_id,
            rule_name: rule_id.display_name().to_string(),
            severity,
            container_id: container_id.into(),
            container_name: container_name.into(),
            node_ids,
            message: message.into(),
        }
    }
}
