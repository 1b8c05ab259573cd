use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use patternpal_core::RuleId;

/// Audit a design document for repeated layouts and design-system drift.
///
/// Frames are read from a JSON export of container fingerprints; library and
/// team files are read from the cached design-file directory.
#[derive(Parser, Debug)]
#[command(name = "patternpal", about = "Design pattern and lint auditor")]
pub struct CliArgs {
    /// Path to config file (default: ~/.config/patternpal/config.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Cluster the document's containers into pattern groups
    Scan {
        /// JSON array of container fingerprints
        #[arg(long)]
        frames: PathBuf,

        /// Library file URL (repeatable; overrides the config file)
        #[arg(long = "library")]
        libraries: Vec<String>,
    },

    /// Compare one container against team files and libraries
    Frame {
        /// JSON array of container fingerprints
        #[arg(long)]
        frames: PathBuf,

        /// Id of the selected container
        #[arg(long)]
        id: String,

        /// Team file key (repeatable; overrides the config file)
        #[arg(long = "team")]
        team_files: Vec<String>,

        /// Library file URL (repeatable; overrides the config file)
        #[arg(long = "library")]
        libraries: Vec<String>,

        /// Scene snapshot JSON; when given, rules run on the selected container
        #[arg(long)]
        scene: Option<PathBuf>,
    },

    /// Run design-lint rules over a scene snapshot
    Lint {
        /// Scene snapshot JSON
        #[arg(long)]
        scene: PathBuf,

        /// Rule id to run (repeatable; default: every enabled rule)
        #[arg(long = "rule")]
        rules: Vec<RuleId>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lint_with_rules() {
        let args = CliArgs::try_parse_from([
            "patternpal",
            "--format",
            "markdown",
            "lint",
            "--scene",
            "scene.json",
            "--rule",
            "contrast-ratio",
            "--rule",
            "spacing-consistency",
        ])
        .unwrap();
        assert_eq!(args.format, OutputFormat::Markdown);
        match args.command {
            Command::Lint { scene, rules } => {
                assert_eq!(scene, PathBuf::from("scene.json"));
                assert_eq!(rules, vec![RuleId::ContrastRatio, RuleId::SpacingConsistency]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn unknown_rule_is_rejected() {
        let result = CliArgs::try_parse_from(["patternpal", "lint", "--scene", "s.json", "--rule", "nope"]);
        assert!(result.is_err());
    }

    #[test]
    fn frame_defaults_to_json() {
        let args = CliArgs::try_parse_from([
            "patternpal", "frame", "--frames", "f.json", "--id", "1:2", "--team", "abc",
        ])
        .unwrap();
        assert_eq!(args.format, OutputFormat::Json);
        match args.command {
            Command::Frame { id, team_files, scene, .. } => {
                assert_eq!(id, "1:2");
                assert_eq!(team_files, vec!["abc".to_string()]);
                assert!(scene.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
