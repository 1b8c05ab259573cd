//! Scan orchestration over an external design-file source.
//!
//! The scanner owns no I/O of its own: files come from a [`DesignFileSource`]
//! supplied by the host. Cancellation is checked before every fetch.

use async_trait::async_trait;
use tracing::{info, warn};

use patternpal_core::{
    FrameFingerprint, PatternError, PatternGroup, Result, RuleIssue, ScanContext,
    SelectedFrameScanResult,
};

use crate::engine::PatternEngine;
use crate::ingest::{extract_file_key, DesignFile, LibraryCatalog, TeamFile};

/// Fetches design files by key (remote API client, cache, fixtures, ...).
#[async_trait]
pub trait DesignFileSource: Send + Sync {
    async fn fetch_file(&self, file_key: &str) -> Result<DesignFile>;
}

pub struct Scanner<S> {
    source: S,
    engine: PatternEngine,
}

impl<S: DesignFileSource> Scanner<S> {
    pub fn new(source: S, engine: PatternEngine) -> Self {
        Self { source, engine }
    }

    pub fn engine(&self) -> &PatternEngine {
        &self.engine
    }

    /// Load the catalog from library file URLs.
    ///
    /// URLs without a recognizable file key and files that fail to load are
    /// skipped with a warning; only cancellation aborts.
    pub async fn load_library(&self, library_urls: &[String], ctx: &ScanContext) -> Result<LibraryCatalog> {
        let mut catalog = LibraryCatalog::default();
        for url in library_urls {
            ctx.check()?;
            let Some(file_key) = extract_file_key(url) else {
                warn!(url = %url, "Skipping library URL without a file key");
                continue;
            };
            match self.fetch(&file_key).await? {
                Some(file) => {
                    let part = file.library_catalog(&file_key, url);
                    info!(file = %file.name, components = part.len(), "Loaded library file");
                    catalog.extend(part);
                }
                None => continue,
            }
        }
        Ok(catalog)
    }

    /// Load the top-level containers of each team file.
    pub async fn load_team_files(&self, file_keys: &[String], ctx: &ScanContext) -> Result<Vec<TeamFile>> {
        let mut files = Vec::with_capacity(file_keys.len());
        for file_key in file_keys {
            ctx.check()?;
            if let Some(file) = self.fetch(file_key).await? {
                let team_file = file.team_file(file_key);
                info!(file = %team_file.file_name, frames = team_file.frames.len(), "Loaded team file");
                files.push(team_file);
            }
        }
        Ok(files)
    }

    /// Whole-document scan: cluster local containers and match groups against the libraries.
    pub async fn scan_document(
        &self,
        frames: &[FrameFingerprint],
        library_urls: &[String],
        ctx: &ScanContext,
    ) -> Result<Vec<PatternGroup>> {
        let catalog = self.load_library(library_urls, ctx).await?;
        ctx.check()?;
        Ok(self.engine.find_patterns(frames, &catalog))
    }

    /// Single-container scan against team files and libraries.
    pub async fn scan_selected_frame(
        &self,
        selected: &FrameFingerprint,
        library_urls: &[String],
        team_file_keys: &[String],
        rule_issues: Vec<RuleIssue>,
        ctx: &ScanContext,
    ) -> Result<SelectedFrameScanResult> {
        let catalog = self.load_library(library_urls, ctx).await?;
        let team_files = self.load_team_files(team_file_keys, ctx).await?;
        ctx.check()?;
        Ok(self
            .engine
            .scan_selected_frame(selected, &team_files, &catalog, rule_issues))
    }

    /// Fetch one file; load failures other than cancellation become `None`.
    async fn fetch(&self, file_key: &str) -> Result<Option<DesignFile>> {
        match self.source.fetch_file(file_key).await {
            Ok(file) => Ok(Some(file)),
            Err(PatternError::Cancelled) => Err(PatternError::Cancelled),
            Err(e) => {
                warn!(file_key = %file_key, error = %e, "Failed to load design file");
                Ok(None)
            }
        }
    }
}
