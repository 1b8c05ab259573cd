use patternpal_core::{FrameFingerprint, LibraryComponentFingerprint, LibraryMatch};

use super::similarity::structural_similarity;

pub const DEFAULT_MATCH_THRESHOLD: u8 = 40;
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Rank catalog components against a set of containers.
///
/// A component's similarity is its mean score over all `frames`, so a group
/// favors components representative of every member rather than its single
/// best fit. Components below `threshold` are dropped; the rest are sorted
/// descending and capped at `max_results`.
pub fn find_library_matches(
    frames: &[FrameFingerprint],
    catalog: &[LibraryComponentFingerprint],
    threshold: u8,
    max_results: usize,
) -> Vec<LibraryMatch> {
    if frames.is_empty() || catalog.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(&LibraryComponentFingerprint, f64)> = catalog
        .iter()
        .map(|component| {
            let total: u32 = frames
                .iter()
                .map(|f| structural_similarity(&f.shape, &component.shape) as u32)
                .sum();
            (component, total as f64 / frames.len() as f64)
        })
        .filter(|(_, avg)| *avg >= threshold as f64)
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    scored
        .into_iter()
        .take(max_results)
        .map(|(component, avg)| LibraryMatch {
            component_id: component.id.clone(),
            component_name: component.name.clone(),
            similarity: avg.round() as u8,
            origin_file_key: component.origin_file_key.clone(),
            origin_url: component.origin_url.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use patternpal_core::{LayoutMode, StructuralShape};

    fn shape(width: u32, height: u32, ids: &[&str]) -> StructuralShape {
        StructuralShape {
            width,
            height,
            child_count: 5,
            max_depth: 3,
            aspect_ratio: patternpal_core::aspect_ratio(width, height),
            layout_mode: LayoutMode::Vertical,
            corner_radius: 8.0,
            fill_count: 1,
            child_type_distribution: [("TEXT".to_string(), 2), ("FRAME".to_string(), 3)]
                .into_iter()
                .collect(),
            component_ids: ids.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn frame(id: &str, width: u32, height: u32) -> FrameFingerprint {
        FrameFingerprint::new(id, "Card", shape(width, height, &["c1", "c2"]))
    }

    fn component(id: &str, width: u32, height: u32) -> LibraryComponentFingerprint {
        LibraryComponentFingerprint {
            id: id.to_string(),
            name: format!("Lib {}", id),
            description: String::new(),
            origin_file_key: "fk1".to_string(),
            origin_file_name: "Design System".to_string(),
            origin_url: "https://www.figma.com/file/fk1".to_string(),
            shape: shape(width, height, &[]),
        }
    }

    #[test]
    fn empty_catalog_yields_nothing() {
        assert!(find_library_matches(&[frame("f", 200, 300)], &[], 40, 5).is_empty());
    }

    #[test]
    fn empty_frames_yield_nothing() {
        assert!(find_library_matches(&[], &[component("lib-1", 200, 300)], 40, 5).is_empty());
    }

    #[test]
    fn identical_structure_caps_at_80() {
        let matches = find_library_matches(&[frame("f", 200, 300)], &[component("lib-1", 200, 300)], 40, 5);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].component_id, "lib-1");
        assert_eq!(matches[0].similarity, 80);
        assert_eq!(matches[0].origin_file_key, "fk1");
    }

    #[test]
    fn below_threshold_is_filtered() {
        let matches = find_library_matches(&[frame("f", 200, 300)], &[component("lib-1", 200, 300)], 81, 5);
        assert!(matches.is_empty());
    }

    #[test]
    fn results_are_capped() {
        let catalog: Vec<_> = (0..10).map(|i| component(&format!("lib-{i}"), 200 + i, 300)).collect();
        let matches = find_library_matches(&[frame("f", 200, 300)], &catalog, 0, 3);
        assert_eq!(matches.len(), 3);
    }

    #[test]
    fn sorted_descending() {
        let catalog = vec![
            component("far", 900, 120),
            component("close", 200, 300),
            component("mid", 260, 300),
        ];
        let matches = find_library_matches(&[frame("f", 200, 300)], &catalog, 0, 5);
        assert_eq!(matches[0].component_id, "close");
        assert!(matches.windows(2).all(|w| w[0].similarity >= w[1].similarity));
    }

    #[test]
    fn similarity_is_rounded_mean_over_frames() {
        let frames = vec![frame("a", 200, 300), frame("b", 400, 300)];
        let lib = component("lib-1", 200, 300);
        let expected = ((structural_similarity(&frames[0].shape, &lib.shape) as f64
            + structural_similarity(&frames[1].shape, &lib.shape) as f64)
            / 2.0)
            .round() as u8;
        let matches = find_library_matches(&frames, &[lib], 0, 5);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].similarity, expected);
    }
}
