//! Result values produced by a scan.

use serde::{Deserialize, Serialize};

use crate::fingerprint::{FrameFingerprint, LibraryComponent};
use crate::issue::RuleIssue;

/// A catalog component ranked against one or more containers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryMatch {
    pub component_id: String,
    pub component_name: String,
    /// Rounded mean similarity, 0–100.
    pub similarity: u8,
    pub origin_file_key: String,
    pub origin_url: String,
}

/// A cluster of structurally consistent containers plus its catalog context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternGroup {
    /// Bucketed similarity key of the first member.
    pub fingerprint: String,
    pub frames: Vec<FrameFingerprint>,
    pub consistency: u8,
    /// Catalog components the members instance, matched by name.
    pub component_usage: Vec<LibraryComponent>,
    /// Catalog components whose names resemble member names.
    pub name_matches: Vec<LibraryComponent>,
    pub library_matches: Vec<LibraryMatch>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamFrameMatch {
    pub team_frame_id: String,
    pub team_frame_name: String,
    pub local_frame_id: String,
    pub local_frame_name: String,
    pub similarity: u8,
}

/// Matches of the selected container within one team file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamFileResult {
    pub file_key: String,
    pub file_name: String,
    pub consistency: u8,
    pub matches: Vec<TeamFrameMatch>,
}

/// Aggregate result of scanning a single selected container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedFrameScanResult {
    pub selected_frame: FrameFingerprint,
    pub team_file_results: Vec<TeamFileResult>,
    pub library_matches: Vec<LibraryMatch>,
    pub overall_consistency: u8,
    #[serde(default)]
    pub rule_issues: Vec<RuleIssue>,
}
