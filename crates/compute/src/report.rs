//! Markdown export of scan results.

use std::collections::HashSet;

use chrono::NaiveDate;

use patternpal_core::{LibraryMatch, PatternGroup, RuleIssue, SelectedFrameScanResult, Severity, TeamFileResult};

const LOCAL_FILE: &str = "Local";

fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "!",
        Severity::Warning => "?",
        Severity::Info => "i",
    }
}

/// Pipes would split a table cell.
fn cell(text: &str) -> String {
    text.replace('|', "\\|")
}

fn team_file_section(results: &[TeamFileResult], lines: &mut Vec<String>) {
    if results.is_empty() {
        return;
    }
    lines.push("## Team File Matches".into());
    lines.push(String::new());
    for file in results {
        lines.push(format!("### {} ({}% consistency)", file.file_name, file.consistency));
        lines.push(String::new());
        lines.push("| Frame | Similarity |".into());
        lines.push("|-------|-----------|".into());
        for m in &file.matches {
            lines.push(format!("| {} | {}% |", cell(&m.team_frame_name), m.similarity));
        }
        lines.push(String::new());
    }
}

fn library_section(matches: &[LibraryMatch], lines: &mut Vec<String>) {
    if matches.is_empty() {
        return;
    }
    lines.push("## Library Matches".into());
    lines.push(String::new());
    lines.push("| Component | Similarity |".into());
    lines.push("|-----------|-----------|".into());
    for m in matches {
        lines.push(format!("| {} | {}% |", cell(&m.component_name), m.similarity));
    }
    lines.push(String::new());
}

fn rule_issue_section(issues: &[RuleIssue], lines: &mut Vec<String>) {
    if issues.is_empty() {
        return;
    }
    lines.push("## Rule Violations".into());
    lines.push(String::new());
    lines.push("| Severity | Rule | Frame | Message |".into());
    lines.push("|----------|------|-------|---------|".into());
    for issue in issues {
        lines.push(format!(
            "| [{}] {} | {} | {} | {} |",
            severity_icon(issue.severity),
            issue.severity,
            cell(&issue.rule_name),
            cell(&issue.container_name),
            cell(&issue.message),
        ));
    }
    lines.push(String::new());
}

/// Render a selected-frame scan as a markdown report.
pub fn export_frame_scan_markdown(result: &SelectedFrameScanResult, date: NaiveDate) -> String {
    let mut lines = vec![
        "# Pattern Pal - Frame Scan Report".to_string(),
        String::new(),
        format!("**Frame:** {}", result.selected_frame.name),
        format!("**Overall Consistency:** {}%", result.overall_consistency),
        format!("**Date:** {}", date.format("%Y-%m-%d")),
        String::new(),
    ];
    team_file_section(&result.team_file_results, &mut lines);
    library_section(&result.library_matches, &mut lines);
    rule_issue_section(&result.rule_issues, &mut lines);
    lines.join("\n").trim().to_string()
}

/// Render document-wide pattern groups as a markdown report.
pub fn export_team_scan_markdown(groups: &[PatternGroup], date: NaiveDate) -> String {
    let mut lines = vec![
        "# Pattern Pal - Team Scan Report".to_string(),
        String::new(),
        format!("**Patterns Found:** {}", groups.len()),
        format!("**Date:** {}", date.format("%Y-%m-%d")),
        String::new(),
    ];

    for group in groups {
        let Some(first) = group.frames.first() else {
            continue;
        };
        let file_count = group
            .frames
            .iter()
            .map(|f| f.origin_file_key.as_deref())
            .collect::<HashSet<_>>()
            .len();

        lines.push(format!(
            "## Pattern: {} frames, {}% consistent",
            group.frames.len(),
            group.consistency
        ));
        lines.push(String::new());
        lines.push(format!("- **Dimensions:** {}x{}px", first.shape.width, first.shape.height));
        lines.push(format!("- **Files:** {}", file_count));
        lines.push(String::new());
        lines.push("| Frame | File |".into());
        lines.push("|-------|------|".into());
        for frame in &group.frames {
            let file = frame.origin_file_name.as_deref().unwrap_or(LOCAL_FILE);
            lines.push(format!("| {} | {} |", cell(&frame.name), cell(file)));
        }
        lines.push(String::new());

        library_section(&group.library_matches, &mut lines);
    }

    lines.join("\n").trim().to_string()
}

/// Render a standalone lint run as a markdown report.
pub fn export_rule_issues_markdown(issues: &[RuleIssue], date: NaiveDate) -> String {
    let mut lines = vec![
        "# Pattern Pal - Lint Report".to_string(),
        String::new(),
        format!("**Issues:** {}", issues.len()),
        format!("**Date:** {}", date.format("%Y-%m-%d")),
        String::new(),
    ];
    rule_issue_section(issues, &mut lines);
    lines.join("\n").trim().to_string()
}
