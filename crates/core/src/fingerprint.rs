use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Auto-layout direction of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutMode {
    #[default]
    None,
    Horizontal,
    Vertical,
    Grid,
}

impl LayoutMode {
    /// Parse a design-file layout string. Unknown or missing values mean no auto-layout.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("HORIZONTAL") => LayoutMode::Horizontal,
            Some("VERTICAL") => LayoutMode::Vertical,
            Some("GRID") => LayoutMode::Grid,
            _ => LayoutMode::None,
        }
    }

    pub fn is_auto_layout(self) -> bool {
        self != LayoutMode::None
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutMode::None => write!(f, "NONE"),
            LayoutMode::Horizontal => write!(f, "HORIZONTAL"),
            LayoutMode::Vertical => write!(f, "VERTICAL"),
            LayoutMode::Grid => write!(f, "GRID"),
        }
    }
}

/// The structural summary two containers are compared on.
///
/// Local containers and catalog components share this shape; only local
/// containers populate `component_ids`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StructuralShape {
    pub width: u32,
    pub height: u32,
    pub child_count: u32,
    /// Depth of the deepest descendant below the container (leaf = 0).
    pub max_depth: u32,
    /// `width / height`, rounded to two decimals.
    pub aspect_ratio: f64,
    pub layout_mode: LayoutMode,
    /// Largest corner radius when corners differ.
    pub corner_radius: f64,
    /// Number of visible solid fills on the container itself.
    pub fill_count: u32,
    /// Child node kind → number of direct children of that kind.
    #[serde(default)]
    pub child_type_distribution: BTreeMap<String, u32>,
    /// Ids of reusable components instanced anywhere in the subtree.
    #[serde(default, skip_serializing_if = "IndexSet::is_empty")]
    pub component_ids: IndexSet<String>,
}

/// Aspect ratio rounded to two decimals; a zero height yields 1.
pub fn aspect_ratio(width: u32, height: u32) -> f64 {
    if height == 0 {
        return 1.0;
    }
    (width as f64 / height as f64 * 100.0).round() / 100.0
}

/// Structural fingerprint of a container in the local document or a team file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameFingerprint {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub shape: StructuralShape,
    /// Display names of instanced components, first-seen order.
    #[serde(default)]
    pub component_names: IndexSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_file_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_file_name: Option<String>,
}

impl FrameFingerprint {
    pub fn new(id: impl Into<String>, name: impl Into<String>, shape: StructuralShape) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            shape,
            component_names: IndexSet::new(),
            origin_file_key: None,
            origin_file_name: None,
        }
    }

    pub fn has_auto_layout(&self) -> bool {
        self.shape.layout_mode.is_auto_layout()
    }

    /// True when the fingerprint was read from the local document.
    pub fn is_local(&self) -> bool {
        self.origin_file_key.is_none()
    }
}

/// Descriptive metadata of a catalog component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryComponent {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub origin_file_key: String,
    pub origin_file_name: String,
    pub origin_url: String,
}

/// Structural fingerprint of a catalog component.
///
/// `shape.component_ids` is always empty for catalog entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryComponentFingerprint {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub origin_file_key: String,
    pub origin_file_name: String,
    pub origin_url: String,
    #[serde(flatten)]
    pub shape: StructuralShape,
}

impl LibraryComponentFingerprint {
    pub fn component(&self) -> LibraryComponent {
        LibraryComponent {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            origin_file_key: self.origin_file_key.clone(),
            origin_file_name: self.origin_file_name.clone(),
            origin_url: self.origin_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_ratio_rounds_to_two_decimals() {
        assert_eq!(aspect_ratio(200, 300), 0.67);
        assert_eq!(aspect_ratio(375, 812), 0.46);
        assert_eq!(aspect_ratio(10, 0), 1.0);
    }

    #[test]
    fn layout_mode_parse_falls_back_to_none() {
        assert_eq!(LayoutMode::parse(Some("VERTICAL")), LayoutMode::Vertical);
        assert_eq!(LayoutMode::parse(Some("WRAP")), LayoutMode::None);
        assert_eq!(LayoutMode::parse(None), LayoutMode::None);
        assert!(!LayoutMode::None.is_auto_layout());
    }

    #[test]
    fn frame_fingerprint_deserializes_flattened_shape() {
        let json = r#"{
            "id": "1:2",
            "name": "Home",
            "width": 375,
            "height": 812,
            "child_count": 5,
            "max_depth": 3,
            "aspect_ratio": 0.46,
            "layout_mode": "VERTICAL",
            "corner_radius": 0,
            "fill_count": 1,
            "child_type_distribution": { "TEXT": 2, "INSTANCE": 3 },
            "component_ids": ["c1", "c2", "c1"],
            "component_names": ["Button"]
        }"#;
        let fp: FrameFingerprint = serde_json::from_str(json).unwrap();
        assert_eq!(fp.shape.width, 375);
        assert_eq!(fp.shape.layout_mode, LayoutMode::Vertical);
        assert_eq!(fp.shape.component_ids.len(), 2);
        assert!(fp.has_auto_layout());
        assert!(fp.is_local());
    }
}
