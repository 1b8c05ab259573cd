//! One handler per subcommand. Each returns the rendered output.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use patternpal_compute::report::{
    export_frame_scan_markdown, export_rule_issues_markdown, export_team_scan_markdown,
};
use patternpal_compute::{PatternEngine, Scanner};
use patternpal_core::{Config, FrameFingerprint, RuleId, RuleIssue, ScanContext};
use patternpal_rules::{RuleEngine, SceneSnapshot};

use crate::cli::OutputFormat;
use crate::config::CliConfig;
use crate::source::FsDesignFileSource;

/// Everything a handler needs: resolved settings and the cancellation handle.
pub struct App {
    pub env: Config,
    pub settings: CliConfig,
    pub format: OutputFormat,
    pub ctx: ScanContext,
}

impl App {
    fn scanner(&self) -> Scanner<FsDesignFileSource> {
        Scanner::new(
            FsDesignFileSource::new(&self.settings.cache_dir),
            PatternEngine::new(self.env.scan.clone()),
        )
    }

    fn rules(&self, cli_override: &[RuleId]) -> Vec<RuleId> {
        self.settings
            .resolve_rules(cli_override, &self.env.rules.enabled_rules())
    }

    fn render<T: Serialize>(&self, value: &T, markdown: impl FnOnce(NaiveDate) -> String) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(value).context("failed to serialize output"),
            OutputFormat::Markdown => Ok(markdown(chrono::Local::now().date_naive())),
        }
    }
}

fn read_frames(path: &Path) -> Result<Vec<FrameFingerprint>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read frames: {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse frames: {}", path.display()))
}

fn load_scene(path: &Path) -> Result<SceneSnapshot> {
    SceneSnapshot::load(path).with_context(|| format!("failed to load scene: {}", path.display()))
}

pub async fn scan(app: &App, frames: &Path, libraries: &[String]) -> Result<String> {
    let frames = read_frames(frames)?;
    let urls = app.settings.resolve_libraries(libraries);
    info!(frames = frames.len(), libraries = urls.len(), "Scanning document");

    let groups = app
        .scanner()
        .scan_document(&frames, &urls, &app.ctx)
        .await
        .context("pattern scan failed")?;

    app.render(&groups, |date| export_team_scan_markdown(&groups, date))
}

pub async fn frame(
    app: &App,
    frames: &Path,
    id: &str,
    team_files: &[String],
    libraries: &[String],
    scene: Option<&Path>,
) -> Result<String> {
    let frames = read_frames(frames)?;
    let selected = frames
        .iter()
        .find(|f| f.id == id)
        .with_context(|| format!("no container with id '{}' in frames file", id))?;

    let rule_issues = match scene {
        Some(path) => lint_container(app, path, id).await?,
        None => Vec::new(),
    };

    let urls = app.settings.resolve_libraries(libraries);
    let team_keys = app.settings.resolve_team_files(team_files);
    let result = app
        .scanner()
        .scan_selected_frame(selected, &urls, &team_keys, rule_issues, &app.ctx)
        .await
        .context("frame scan failed")?;

    app.render(&result, |date| export_frame_scan_markdown(&result, date))
}

async fn lint_container(app: &App, scene: &Path, id: &str) -> Result<Vec<RuleIssue>> {
    let snapshot = load_scene(scene)?;
    let Some(container) = snapshot.find(id) else {
        warn!(container = %id, "Selected container not in scene snapshot, skipping rules");
        return Ok(Vec::new());
    };
    let engine = RuleEngine::new(&snapshot, &snapshot);
    let issues = engine
        .run_on(&app.rules(&[]), &[container], &app.ctx)
        .await
        .context("rule check failed")?;
    Ok(issues)
}

pub async fn lint(app: &App, scene: &Path, rules: &[RuleId]) -> Result<String> {
    let snapshot = load_scene(scene)?;
    let rules = app.rules(rules);
    let engine = RuleEngine::new(&snapshot, &snapshot);
    let issues = engine
        .run(&rules, &snapshot.children, &app.ctx)
        .await
        .context("rule check failed")?;

    app.render(&issues, |date| export_rule_issues_markdown(&issues, date))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(dir: &Path, format: OutputFormat) -> App {
        App {
            env: Config::default(),
            settings: CliConfig {
                cache_dir: dir.to_path_buf(),
                ..CliConfig::default()
            },
            format,
            ctx: ScanContext::new(),
        }
    }

    const FRAMES: &str = r#"[
      {"id":"1:1","name":"Login","width":375,"height":812,"child_count":5,"max_depth":3,
       "aspect_ratio":0.46,"layout_mode":"VERTICAL","corner_radius":0,"fill_count":1,
       "child_type_distribution":{"FRAME":5},"component_ids":["c1"],"component_names":["Button"]},
      {"id":"1:2","name":"Signup","width":375,"height":812,"child_count":5,"max_depth":3,
       "aspect_ratio":0.46,"layout_mode":"VERTICAL","corner_radius":0,"fill_count":1,
       "child_type_distribution":{"FRAME":5},"component_ids":["c1"],"component_names":["Button"]}
    ]"#;

    const SCENE: &str = r#"{"children":[
      {"id":"1:1","name":"Login","type":"FRAME","children":[
        {"id":"1:5","name":"Title","type":"TEXT"}
      ]}
    ]}"#;

    #[tokio::test]
    async fn scan_groups_frames_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let frames = dir.path().join("frames.json");
        std::fs::write(&frames, FRAMES).unwrap();

        let out = scan(&app(dir.path(), OutputFormat::Json), &frames, &[]).await.unwrap();
        let groups: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(groups.as_array().unwrap().len(), 1);
        assert_eq!(groups[0]["consistency"], 100);
    }

    #[tokio::test]
    async fn frame_with_scene_includes_rule_issues() {
        let dir = tempfile::tempdir().unwrap();
        let frames = dir.path().join("frames.json");
        let scene = dir.path().join("scene.json");
        std::fs::write(&frames, FRAMES).unwrap();
        std::fs::write(&scene, SCENE).unwrap();

        let out = frame(&app(dir.path(), OutputFormat::Markdown), &frames, "1:1", &[], &[], Some(scene.as_path()))
            .await
            .unwrap();
        assert!(out.starts_with("# Pattern Pal - Frame Scan Report"));
        assert!(out.contains("Text Style Consistency"));
    }

    #[tokio::test]
    async fn unknown_frame_id_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let frames = dir.path().join("frames.json");
        std::fs::write(&frames, FRAMES).unwrap();
        let result = frame(&app(dir.path(), OutputFormat::Json), &frames, "9:9", &[], &[], None).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn lint_runs_selected_rules() {
        let dir = tempfile::tempdir().unwrap();
        let scene = dir.path().join("scene.json");
        std::fs::write(&scene, SCENE).unwrap();

        let out = lint(&app(dir.path(), OutputFormat::Json), &scene, &[RuleId::ContrastRatio])
            .await
            .unwrap();
        let issues: Vec<RuleIssue> = serde_json::from_str(&out).unwrap();
        assert!(issues.is_empty());

        let out = lint(&app(dir.path(), OutputFormat::Json), &scene, &[]).await.unwrap();
        let issues: Vec<RuleIssue> = serde_json::from_str(&out).unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].rule_id, RuleId::TextStyleConsistency);
    }
}
