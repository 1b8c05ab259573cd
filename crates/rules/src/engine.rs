//! Rule orchestration over a page.

use std::time::Instant;

use tracing::{debug, info};

use patternpal_core::{Result, RuleId, RuleIssue, ScanContext};

use crate::checks::{color_token, contrast, primary_button, spacing, text_style};
use crate::registry::{SceneGraph, StyleRegistry};
use crate::scene::{top_level_containers, SceneNode};

/// Runs a selection of rules over the top-level containers of a page.
///
/// Issues come out grouped by rule in [`RuleId::ALL`] order, and by
/// container in page order within a rule, whatever order the caller
/// selected the rules in.
pub struct RuleEngine<'a> {
    graph: &'a dyn SceneGraph,
    styles: &'a dyn StyleRegistry,
}

impl<'a> RuleEngine<'a> {
    pub fn new(graph: &'a dyn SceneGraph, styles: &'a dyn StyleRegistry) -> Self {
        Self { graph, styles }
    }

    /// Check every top-level container among `page_children`.
    ///
    /// Cancellation is checked before each container; a cancelled run
    /// returns `Err(Cancelled)` and discards partial results.
    pub async fn run(
        &self,
        rules: &[RuleId],
        page_children: &[SceneNode],
        ctx: &ScanContext,
    ) -> Result<Vec<RuleIssue>> {
        self.run_on(rules, &top_level_containers(page_children), ctx).await
    }

    /// Check the given containers directly.
    pub async fn run_on(
        &self,
        rules: &[RuleId],
        containers: &[&SceneNode],
        ctx: &ScanContext,
    ) -> Result<Vec<RuleIssue>> {
        let start = Instant::now();
        let mut issues = Vec::new();

        for rule in RuleId::ALL.into_iter().filter(|r| rules.contains(r)) {
            let before = issues.len();
            for container in containers {
                ctx.check()?;
                if let Some(issue) = self.check(rule, container).await {
                    issues.push(issue);
                }
            }
            debug!(rule = %rule, issues = issues.len() - before, "Rule checked");
        }

        info!(
            containers = containers.len(),
            rules = rules.len(),
            issues = issues.len(),
            "Rule run done in {:.1}ms",
            start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(issues)
    }

    async fn check(&self, rule: RuleId, container: &SceneNode) -> Option<RuleIssue> {
        match rule {
            RuleId::PrimaryButtonLimit => primary_button::check(container, self.graph, self.styles).await,
            RuleId::TextStyleConsistency => text_style::check(container),
            RuleId::SpacingConsistency => spacing::check(container),
            RuleId::ColorTokenUsage => color_token::check(container),
            RuleId::ContrastRatio => contrast::check(container),
        }
    }
}
