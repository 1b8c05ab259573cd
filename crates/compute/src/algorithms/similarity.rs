//! Weighted structural similarity between two container shapes.
//!
//! Each feature yields a partial similarity in [0, 1]; the score is the
//! weight-normalized sum scaled to 0–100. The component-overlap and
//! child-type features keep their weight in the denominator even when they
//! contribute nothing, so two identical shapes without component ids top out
//! at 80.

use std::collections::BTreeSet;

use patternpal_core::StructuralShape;

pub const WEIGHT_DIMENSIONS: f64 = 2.0;
pub const WEIGHT_ASPECT_RATIO: f64 = 1.0;
pub const WEIGHT_CHILD_COUNT: f64 = 2.0;
pub const WEIGHT_DEPTH: f64 = 2.0;
pub const WEIGHT_LAYOUT_MODE: f64 = 1.5;
pub const WEIGHT_CORNER_RADIUS: f64 = 1.0;
pub const WEIGHT_COMPONENT_OVERLAP: f64 = 3.0;
pub const WEIGHT_CHILD_TYPES: f64 = 2.0;
pub const WEIGHT_FILL_COUNT: f64 = 0.5;

/// Sum of all feature weights (15.0).
pub const TOTAL_WEIGHT: f64 = WEIGHT_DIMENSIONS
    + WEIGHT_ASPECT_RATIO
    + WEIGHT_CHILD_COUNT
    + WEIGHT_DEPTH
    + WEIGHT_LAYOUT_MODE
    + WEIGHT_CORNER_RADIUS
    + WEIGHT_COMPONENT_OVERLAP
    + WEIGHT_CHILD_TYPES
    + WEIGHT_FILL_COUNT;

/// Structural similarity of two shapes, 0–100. Symmetric and total.
pub fn structural_similarity(a: &StructuralShape, b: &StructuralShape) -> u8 {
    let mut score = 0.0;

    let dim_w = closeness(a.width as f64, b.width as f64, 1.0);
    let dim_h = closeness(a.height as f64, b.height as f64, 1.0);
    score += (dim_w + dim_h) / 2.0 * WEIGHT_DIMENSIONS;

    score += closeness(a.aspect_ratio, b.aspect_ratio, 0.01) * WEIGHT_ASPECT_RATIO;
    score += closeness(a.child_count as f64, b.child_count as f64, 1.0) * WEIGHT_CHILD_COUNT;
    score += closeness(a.max_depth as f64, b.max_depth as f64, 1.0) * WEIGHT_DEPTH;

    if a.layout_mode == b.layout_mode {
        score += WEIGHT_LAYOUT_MODE;
    }

    score += closeness(a.corner_radius, b.corner_radius, 1.0) * WEIGHT_CORNER_RADIUS;
    score += component_overlap(a, b) * WEIGHT_COMPONENT_OVERLAP;
    score += child_type_similarity(a, b) * WEIGHT_CHILD_TYPES;
    score += closeness(a.fill_count as f64, b.fill_count as f64, 1.0) * WEIGHT_FILL_COUNT;

    (score / TOTAL_WEIGHT * 100.0).round().clamp(0.0, 100.0) as u8
}

/// `1 - |a - b| / max(a, b, floor)`.
fn closeness(a: f64, b: f64, floor: f64) -> f64 {
    1.0 - (a - b).abs() / a.max(b).max(floor)
}

/// Jaccard index of the component id sets; 0 when both are empty.
fn component_overlap(a: &StructuralShape, b: &StructuralShape) -> f64 {
    let ids_a = &a.component_ids;
    let ids_b = &b.component_ids;
    let intersection = ids_a.iter().filter(|id| ids_b.contains(*id)).count();
    let union = ids_a.len() + ids_b.len() - intersection;
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}

/// Mean per-kind closeness over the union of child kinds; 0 when both are empty.
fn child_type_similarity(a: &StructuralShape, b: &StructuralShape) -> f64 {
    let kinds: BTreeSet<&String> = a
        .child_type_distribution
        .keys()
        .chain(b.child_type_distribution.keys())
        .collect();
    if kinds.is_empty() {
        return 0.0;
    }

    let total: f64 = kinds
        .iter()
        .map(|kind| {
            let count_a = a.child_type_distribution.get(*kind).copied().unwrap_or(0) as f64;
            let count_b = b.child_type_distribution.get(*kind).copied().unwrap_or(0) as f64;
            closeness(count_a, count_b, 1.0)
        })
        .sum();
    total / kinds.len() as f64
}
