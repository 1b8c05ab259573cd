use std::collections::HashSet;
use std::time::Instant;

use tracing::{debug, info};

use patternpal_core::config::ScanConfig;
use patternpal_core::{
    FrameFingerprint, LibraryComponent, PatternGroup, RuleIssue, SelectedFrameScanResult,
    StructuralShape, TeamFileResult, TeamFrameMatch,
};

use crate::algorithms::clustering::cluster_frames;
use crate::algorithms::library_match::find_library_matches;
use crate::algorithms::name_match::fuzzy_match;
use crate::algorithms::similarity::structural_similarity;
use crate::ingest::{LibraryCatalog, TeamFile};

/// Bucket size in pixels for the similarity key.
const KEY_BUCKET: f64 = 50.0;

/// Coarse label for a shape: dimensions bucketed to 50px plus child count and depth.
pub fn similarity_key(shape: &StructuralShape) -> String {
    let w = (shape.width as f64 / KEY_BUCKET).round() * KEY_BUCKET;
    let h = (shape.height as f64 / KEY_BUCKET).round() * KEY_BUCKET;
    format!("{}x{}_c{}_d{}", w, h, shape.child_count, shape.max_depth)
}

/// Turns fingerprints and a catalog into pattern groups and scan results.
pub struct PatternEngine {
    config: ScanConfig,
}

impl PatternEngine {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Cluster the document's containers and attach catalog context to each group.
    ///
    /// Groups are ordered by member count, largest first.
    pub fn find_patterns(
        &self,
        frames: &[FrameFingerprint],
        catalog: &LibraryCatalog,
    ) -> Vec<PatternGroup> {
        let start = Instant::now();
        let clusters = cluster_frames(frames, self.config.cluster_threshold);

        let mut groups: Vec<PatternGroup> = clusters
            .into_iter()
            .map(|cluster| {
                let component_usage = component_usage(&cluster.members, &catalog.components);
                let name_matches = self.name_matches(&cluster.members, &catalog.components, &component_usage);
                let library_matches = find_library_matches(
                    &cluster.members,
                    &catalog.fingerprints,
                    self.config.library_match_threshold,
                    self.config.library_max_results,
                );
                PatternGroup {
                    fingerprint: similarity_key(&cluster.members[0].shape),
                    frames: cluster.members,
                    consistency: cluster.consistency,
                    component_usage,
                    name_matches,
                    library_matches,
                }
            })
            .collect();

        groups.sort_by(|a, b| b.frames.len().cmp(&a.frames.len()));

        info!(
            frames = frames.len(),
            catalog = catalog.len(),
            groups = groups.len(),
            "Pattern scan done in {:.1}ms",
            start.elapsed().as_secs_f64() * 1000.0
        );
        groups
    }

    /// Compare one selected container against team files and the catalog.
    pub fn scan_selected_frame(
        &self,
        selected: &FrameFingerprint,
        team_files: &[TeamFile],
        catalog: &LibraryCatalog,
        rule_issues: Vec<RuleIssue>,
    ) -> SelectedFrameScanResult {
        let team_file_results: Vec<TeamFileResult> = team_files
            .iter()
            .filter_map(|file| self.team_file_result(selected, file))
            .collect();

        let library_matches = find_library_matches(
            std::slice::from_ref(selected),
            &catalog.fingerprints,
            self.config.library_match_threshold,
            self.config.library_max_results,
        );

        let team_scores: Vec<u8> = team_file_results
            .iter()
            .flat_map(|r| r.matches.iter().map(|m| m.similarity))
            .collect();
        let overall_consistency = if !team_scores.is_empty() {
            rounded_mean(&team_scores)
        } else {
            library_matches.first().map(|m| m.similarity).unwrap_or(0)
        };

        debug!(
            frame = %selected.name,
            team_files = team_file_results.len(),
            library_matches = library_matches.len(),
            overall_consistency,
            "Selected frame scanned"
        );

        SelectedFrameScanResult {
            selected_frame: selected.clone(),
            team_file_results,
            library_matches,
            overall_consistency,
            rule_issues,
        }
    }

    fn team_file_result(&self, selected: &FrameFingerprint, file: &TeamFile) -> Option<TeamFileResult> {
        let mut matches: Vec<TeamFrameMatch> = file
            .frames
            .iter()
            .filter(|f| f.id != selected.id || f.origin_file_key != selected.origin_file_key)
            .map(|f| TeamFrameMatch {
                team_frame_id: f.id.clone(),
                team_frame_name: f.name.clone(),
                local_frame_id: selected.id.clone(),
                local_frame_name: selected.name.clone(),
                similarity: structural_similarity(&selected.shape, &f.shape),
            })
            .filter(|m| m.similarity >= self.config.team_match_threshold)
            .collect();

        if matches.is_empty() {
            return None;
        }
        matches.sort_by(|a, b| b.similarity.cmp(&a.similarity));

        let scores: Vec<u8> = matches.iter().map(|m| m.similarity).collect();
        Some(TeamFileResult {
            file_key: file.file_key.clone(),
            file_name: file.file_name.clone(),
            consistency: rounded_mean(&scores),
            matches,
        })
    }

    /// Catalog components whose names resemble a member name, excluding those already in use.
    fn name_matches(
        &self,
        members: &[FrameFingerprint],
        components: &[LibraryComponent],
        usage: &[LibraryComponent],
    ) -> Vec<LibraryComponent> {
        let used: HashSet<&str> = usage.iter().map(|c| c.id.as_str()).collect();
        let mut seen: HashSet<&str> = HashSet::new();
        components
            .iter()
            .filter(|c| !used.contains(c.id.as_str()))
            .filter(|c| {
                members
                    .iter()
                    .any(|m| fuzzy_match(&m.name, &c.name) >= self.config.name_match_threshold)
            })
            .filter(|&c| seen.insert(c.id.as_str()))
            .cloned()
            .collect()
    }
}

/// Catalog components instanced by any member, matched case-insensitively by name.
fn component_usage(members: &[FrameFingerprint], components: &[LibraryComponent]) -> Vec<LibraryComponent> {
    let used_names: HashSet<String> = members
        .iter()
        .flat_map(|m| m.component_names.iter())
        .map(|n| n.to_lowercase())
        .collect();
    let mut seen: HashSet<&str> = HashSet::new();
    components
        .iter()
        .filter(|c| used_names.contains(&c.name.to_lowercase()))
        .filter(|&c| seen.insert(c.id.as_str()))
        .cloned()
        .collect()
}

fn rounded_mean(scores: &[u8]) -> u8 {
    if scores.is_empty() {
        return 0;
    }
    let total: u32 = scores.iter().map(|&s| s as u32).sum();
    (total as f64 / scores.len() as f64).round() as u8
}
