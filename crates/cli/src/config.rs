use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, warn};

use patternpal_core::RuleId;
use patternpal_rules::catalog::{default_rules, enabled_ids};
use patternpal_rules::RuleConfig;

/// CLI settings loaded from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Directory holding cached design files as `{file_key}.json`
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// Library file URLs matched against by default
    #[serde(default)]
    pub library_urls: Vec<String>,

    /// Team file keys compared against by default
    #[serde(default)]
    pub team_file_keys: Vec<String>,

    /// Rule catalog with per-rule enablement
    #[serde(default = "default_rules")]
    pub rules: Vec<RuleConfig>,
}

fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("patternpal")
        .join("files")
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            library_urls: Vec::new(),
            team_file_keys: Vec::new(),
            rules: default_rules(),
        }
    }
}

impl CliConfig {
    /// Return the default config directory path: ~/.config/patternpal/
    pub fn default_config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("could not determine user config directory")?
            .join("patternpal");
        Ok(config_dir)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        Ok(Self::default_config_dir()?.join("config.toml"))
    }

    /// Load config from the given path, or the default path.
    /// A missing file yields defaults, which are written back for editing.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_config_path()?,
        };

        if config_path.exists() {
            debug!(?config_path, "Loading config");
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("failed to read config: {}", config_path.display()))?;
            let config: Self = toml::from_str(&content)
                .with_context(|| format!("failed to parse config: {}", config_path.display()))?;
            Ok(config)
        } else {
            debug!(?config_path, "Config file not found, using defaults");
            let config = Self::default();
            let toml_str = toml::to_string_pretty(&config)
                .context("failed to serialize default config")?;
            if let Err(e) = Self::write_default(&config_path, &toml_str) {
                warn!(?config_path, error = %e, "Could not write default config");
            }
            Ok(config)
        }
    }

    fn write_default(path: &std::path::Path, content: &str) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)
    }

    /// Library URLs: command-line values win over the config file.
    pub fn resolve_libraries(&self, cli_override: &[String]) -> Vec<String> {
        if cli_override.is_empty() {
            self.library_urls.clone()
        } else {
            cli_override.to_vec()
        }
    }

    pub fn resolve_team_files(&self, cli_override: &[String]) -> Vec<String> {
        if cli_override.is_empty() {
            self.team_file_keys.clone()
        } else {
            cli_override.to_vec()
        }
    }

    /// Rules to run: explicit ids, else rules enabled here and not disabled by `env_enabled`.
    pub fn resolve_rules(&self, cli_override: &[RuleId], env_enabled: &[RuleId]) -> Vec<RuleId> {
        if !cli_override.is_empty() {
            return cli_override.to_vec();
        }
        enabled_ids(&self.rules)
            .into_iter()
            .filter(|id| env_enabled.contains(id))
            .collect()
    }
}
