use std::env;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::issue::RuleId;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_parse<T: std::str::FromStr>(profile: &str, key: &str, default: T) -> T {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub scan: ScanConfig,
    pub rules: RulesConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `PATTERNPAL_PROFILE`. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("PATTERNPAL_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            scan: ScanConfig::from_env_profiled(p),
            rules: RulesConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  scan:   cluster={}, library={} (max {}), team={}, names={:.2}",
            self.scan.cluster_threshold,
            self.scan.library_match_threshold,
            self.scan.library_max_results,
            self.scan.team_match_threshold,
            self.scan.name_match_threshold
        );
        let enabled: Vec<&str> = self.rules.enabled_rules().iter().map(|r| r.as_str()).collect();
        tracing::info!("  rules:  {}", enabled.join(", "));
    }
}

// ── Scan thresholds ───────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Minimum average similarity for a container to join a cluster.
    pub cluster_threshold: u8,
    /// Minimum average similarity for a catalog component to be reported.
    pub library_match_threshold: u8,
    pub library_max_results: usize,
    /// Minimum fuzzy score (0–1) for a catalog name to count as a name match.
    pub name_match_threshold: f64,
    /// Minimum similarity for a team-file container to match the selection.
    pub team_match_threshold: u8,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            cluster_threshold: 60,
            library_match_threshold: 40,
            library_max_results: 5,
            name_match_threshold: 0.6,
            team_match_threshold: 60,
        }
    }
}

impl ScanConfig {
    fn from_env_profiled(p: &str) -> Self {
        let d = Self::default();
        Self {
            cluster_threshold: profiled_env_parse(p, "CLUSTER_THRESHOLD", d.cluster_threshold).min(100),
            library_match_threshold: profiled_env_parse(p, "LIBRARY_MATCH_THRESHOLD", d.library_match_threshold)
                .min(100),
            library_max_results: profiled_env_parse(p, "LIBRARY_MAX_RESULTS", d.library_max_results),
            name_match_threshold: profiled_env_parse(p, "NAME_MATCH_THRESHOLD", d.name_match_threshold)
                .clamp(0.0, 1.0),
            team_match_threshold: profiled_env_parse(p, "TEAM_MATCH_THRESHOLD", d.team_match_threshold).min(100),
        }
    }
}

// ── Rule selection ────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesConfig {
    pub disabled: Vec<RuleId>,
}

impl RulesConfig {
    fn from_env_profiled(p: &str) -> Self {
        let disabled = profiled_env_opt(p, "DISABLED_RULES")
            .map(|raw| parse_rule_list(&raw))
            .unwrap_or_default();
        Self { disabled }
    }

    /// Rules to run, in orchestrator order.
    pub fn enabled_rules(&self) -> Vec<RuleId> {
        RuleId::ALL
            .into_iter()
            .filter(|id| !self.disabled.contains(id))
            .collect()
    }
}

/// Parse a comma-separated list of rule ids, skipping unknown entries.
pub fn parse_rule_list(raw: &str) -> Vec<RuleId> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| match s.parse::<RuleId>() {
            Ok(id) => Some(id),
            Err(e) => {
                warn!("Ignoring rule in DISABLED_RULES: {}", e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rule_list_skips_unknown_and_blank() {
        let ids = parse_rule_list(" contrast-ratio, ,bogus,spacing-consistency");
        assert_eq!(ids, vec![RuleId::ContrastRatio, RuleId::SpacingConsistency]);
    }

    #[test]
    fn enabled_rules_excludes_disabled() {
        let rules = RulesConfig {
            disabled: vec![RuleId::ColorTokenUsage],
        };
        let enabled = rules.enabled_rules();
        assert_eq!(enabled.len(), 4);
        assert!(!enabled.contains(&RuleId::ColorTokenUsage));
    }

    #[test]
    fn profiled_key_takes_precedence() {
        env::set_var("PPTEST_CLUSTER_THRESHOLD", "75");
        let scan = ScanConfig::from_env_profiled("PPTEST");
        assert_eq!(scan.cluster_threshold, 75);
        assert_eq!(scan.library_max_results, 5);
        env::remove_var("PPTEST_CLUSTER_THRESHOLD");
    }

    #[test]
    fn default_profile_label() {
        assert_eq!(Config::default().profile_label(), "default");
    }
}
