use patternpal_core::FrameFingerprint;

use super::similarity::structural_similarity;

/// A group of structurally consistent containers.
#[derive(Debug, Clone)]
pub struct Cluster {
    /// Members in the order they were assigned.
    pub members: Vec<FrameFingerprint>,
    /// Rounded mean pairwise similarity between members.
    pub consistency: u8,
}

/// Greedy single-link clustering of containers.
///
/// Fingerprints are visited in input order. Each one joins the existing
/// cluster whose current members it matches best on average, provided that
/// average reaches `threshold`; otherwise it seeds a new cluster. Ties keep
/// the earlier cluster. Singleton clusters are dropped from the result.
///
/// The result depends on input order: this is a single deterministic pass,
/// not a globally optimal partition.
pub fn cluster_frames(fingerprints: &[FrameFingerprint], threshold: u8) -> Vec<Cluster> {
    let threshold = threshold as f64;
    let mut clusters: Vec<Vec<usize>> = Vec::new();

    for (i, fp) in fingerprints.iter().enumerate() {
        let mut best: Option<(usize, f64)> = None;

        for (c, members) in clusters.iter().enumerate() {
            let total: u32 = members
                .iter()
                .map(|&m| structural_similarity(&fp.shape, &fingerprints[m].shape) as u32)
                .sum();
            let avg = total as f64 / members.len() as f64;
            if avg >= threshold && best.map_or(true, |(_, best_avg)| avg > best_avg) {
                best = Some((c, avg));
            }
        }

        match best {
            Some((c, _)) => clusters[c].push(i),
            None => clusters.push(vec![i]),
        }
    }

    clusters
        .into_iter()
        .filter(|members| members.len() >= 2)
        .map(|members| {
            let members: Vec<FrameFingerprint> =
                members.into_iter().map(|m| fingerprints[m].clone()).collect();
            let consistency = pairwise_consistency(&members);
            Cluster {
                members,
                consistency,
            }
        })
        .collect()
}

/// Rounded mean similarity over all distinct pairs; 100 when there are no pairs.
pub fn pairwise_consistency(members: &[FrameFingerprint]) -> u8 {
    let mut total = 0u64;
    let mut pairs = 0u64;
    for i in 0..members.len() {
        for j in (i + 1)..members.len() {
            total += structural_similarity(&members[i].shape, &members[j].shape) as u64;
            pairs += 1;
        }
    }
    if pairs == 0 {
        return 100;
    }
    (total as f64 / pairs as f64).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use patternpal_core::{LayoutMode, StructuralShape};

    fn frame(id: &str, width: u32, height: u32, layout: LayoutMode, ids: &[&str]) -> FrameFingerprint {
        FrameFingerprint::new(
            id,
            format!("Frame {}", id),
            StructuralShape {
                width,
                height,
                child_count: 5,
                max_depth: 3,
                aspect_ratio: patternpal_core::aspect_ratio(width, height),
                layout_mode: layout,
                corner_radius: 8.0,
                fill_count: 1,
                child_type_distribution: [("TEXT".to_string(), 2), ("FRAME".to_string(), 3)]
                    .into_iter()
                    .collect(),
                component_ids: ids.iter().map(|s| s.to_string()).collect(),
            },
        )
    }

    fn card(id: &str) -> FrameFingerprint {
        frame(id, 200, 300, LayoutMode::Vertical, &["c1", "c2"])
    }

    #[test]
    fn empty_input() {
        assert!(cluster_frames(&[], 60).is_empty());
    }

    #[test]
    fn single_frame_yields_nothing() {
        assert!(cluster_frames(&[card("a")], 0).is_empty());
        assert!(cluster_frames(&[card("a")], 100).is_empty());
    }

    #[test]
    fn identical_frames_form_one_cluster() {
        let frames = vec![card("a"), card("b"), card("c")];
        let clusters = cluster_frames(&frames, 60);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].members.len(), 3);
        assert_eq!(clusters[0].consistency, 100);
        let ids: Vec<&str> = clusters[0].members.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn dissimilar_frames_are_separated() {
        let frames = vec![
            card("a"),
            card("b"),
            frame("x", 1440, 90, LayoutMode::Horizontal, &["z9"]),
            frame("y", 1440, 92, LayoutMode::Horizontal, &["z9"]),
        ];
        let clusters = cluster_frames(&frames, 80);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].members[0].id, "a");
        assert_eq!(clusters[1].members[0].id, "x");
    }

    #[test]
    fn singletons_are_dropped() {
        let frames = vec![
            card("a"),
            frame("x", 1440, 90, LayoutMode::Horizontal, &["z9"]),
        ];
        assert!(cluster_frames(&frames, 90).is_empty());
    }

    #[test]
    fn consistency_is_mean_of_pairs() {
        let frames = vec![
            card("a"),
            frame("b", 210, 300, LayoutMode::Vertical, &["c1", "c2"]),
            frame("c", 200, 320, LayoutMode::Vertical, &["c1", "c2"]),
        ];
        let clusters = cluster_frames(&frames, 60);
        assert_eq!(clusters.len(), 1);

        let s = |x: &FrameFingerprint, y: &FrameFingerprint| {
            structural_similarity(&x.shape, &y.shape) as f64
        };
        let expected = ((s(&frames[0], &frames[1]) + s(&frames[0], &frames[2]) + s(&frames[1], &frames[2]))
            / 3.0)
            .round() as u8;
        assert_eq!(clusters[0].consistency, expected);
    }

    #[test]
    fn pairwise_consistency_without_pairs_is_100() {
        assert_eq!(pairwise_consistency(&[]), 100);
        assert_eq!(pairwise_consistency(&[card("a")]), 100);
    }
}
