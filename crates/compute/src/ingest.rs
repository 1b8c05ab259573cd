//! Fingerprint extraction from design-file JSON documents.
//!
//! The document tree is whatever the remote file API returned; fetching it is
//! the caller's concern. Every walk here uses an explicit stack so arbitrarily
//! deep documents cannot exhaust the call stack.

use std::collections::BTreeMap;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use url::Url;

use patternpal_core::{
    aspect_ratio, FrameFingerprint, LayoutMode, LibraryComponent, LibraryComponentFingerprint,
    StructuralShape,
};

const UNNAMED: &str = "Unnamed";
const UNKNOWN_KIND: &str = "UNKNOWN";

// ── Document model ──────────────────────────────────────────────────

/// A design file as returned by the file API: a name and a node tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DesignFile {
    pub name: String,
    pub document: ApiNode,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiNode {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub node_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub children: Vec<ApiNode>,
    #[serde(default)]
    pub absolute_bounding_box: Option<BoundingBox>,
    #[serde(default)]
    pub layout_mode: Option<String>,
    #[serde(default)]
    pub corner_radius: Option<f64>,
    #[serde(default)]
    pub rectangle_corner_radii: Option<Vec<f64>>,
    #[serde(default)]
    pub fills: Vec<ApiPaint>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiPaint {
    #[serde(rename = "type")]
    pub paint_type: String,
    #[serde(default)]
    pub visible: Option<bool>,
}

impl ApiNode {
    fn kind(&self) -> &str {
        self.node_type.as_deref().unwrap_or(UNKNOWN_KIND)
    }

    fn is(&self, kind: &str) -> bool {
        self.node_type.as_deref() == Some(kind)
    }
}

// ── Extracted collections ───────────────────────────────────────────

/// Catalog components gathered from one or more library files.
#[derive(Debug, Clone, Default)]
pub struct LibraryCatalog {
    pub components: Vec<LibraryComponent>,
    pub fingerprints: Vec<LibraryComponentFingerprint>,
}

impl LibraryCatalog {
    pub fn extend(&mut self, other: LibraryCatalog) {
        self.components.extend(other.components);
        self.fingerprints.extend(other.fingerprints);
    }

    pub fn len(&self) -> usize {
        self.fingerprints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fingerprints.is_empty()
    }
}

/// Top-level containers of one team file.
#[derive(Debug, Clone)]
pub struct TeamFile {
    pub file_key: String,
    pub file_name: String,
    pub frames: Vec<FrameFingerprint>,
}

// ── Tree helpers ────────────────────────────────────────────────────

/// Depth of the deepest descendant below `node` (a leaf has depth 0).
pub fn node_depth(node: &ApiNode) -> u32 {
    let mut max = 0;
    let mut stack = vec![(node, 0u32)];
    while let Some((current, depth)) = stack.pop() {
        max = max.max(depth);
        for child in &current.children {
            stack.push((child, depth + 1));
        }
    }
    max
}

/// Structural shape of an API node. Component ids are never populated here.
fn api_shape(node: &ApiNode) -> StructuralShape {
    let (width, height) = node
        .absolute_bounding_box
        .map(|bb| (bb.width.round().max(0.0) as u32, bb.height.round().max(0.0) as u32))
        .unwrap_or((0, 0));

    let mut child_type_distribution: BTreeMap<String, u32> = BTreeMap::new();
    for child in &node.children {
        *child_type_distribution.entry(child.kind().to_string()).or_insert(0) += 1;
    }

    let corner_radius = match (node.corner_radius, &node.rectangle_corner_radii) {
        (Some(r), _) => r,
        (None, Some(radii)) => radii.iter().copied().fold(0.0, f64::max),
        (None, None) => 0.0,
    };

    let fill_count = node
        .fills
        .iter()
        .filter(|p| p.visible != Some(false) && p.paint_type == "SOLID")
        .count() as u32;

    StructuralShape {
        width,
        height,
        child_count: node.children.len() as u32,
        max_depth: node_depth(node),
        aspect_ratio: aspect_ratio(width, height),
        layout_mode: LayoutMode::parse(node.layout_mode.as_deref()),
        corner_radius,
        fill_count,
        child_type_distribution,
        component_ids: IndexSet::new(),
    }
}

fn node_name(node: &ApiNode) -> String {
    node.name.clone().unwrap_or_else(|| UNNAMED.to_string())
}

// ── Library extraction ──────────────────────────────────────────────

/// Build the catalog fingerprint of a COMPONENT or COMPONENT_SET node.
pub fn build_library_fingerprint(
    node: &ApiNode,
    file_key: &str,
    file_name: &str,
    file_url: &str,
) -> LibraryComponentFingerprint {
    LibraryComponentFingerprint {
        id: node.id.clone().unwrap_or_default(),
        name: node_name(node),
        description: node.description.clone().unwrap_or_default(),
        origin_file_key: file_key.to_string(),
        origin_file_name: file_name.to_string(),
        origin_url: file_url.to_string(),
        shape: api_shape(node),
    }
}

/// Collect every COMPONENT and COMPONENT_SET in document order.
///
/// A component set is taken as one unit; its variants are not visited.
pub fn extract_components(
    root: &ApiNode,
    file_key: &str,
    file_name: &str,
    file_url: &str,
) -> LibraryCatalog {
    let mut catalog = LibraryCatalog::default();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if node.is("COMPONENT_SET") || node.is("COMPONENT") {
            let fp = build_library_fingerprint(node, file_key, file_name, file_url);
            catalog.components.push(fp.component());
            catalog.fingerprints.push(fp);
            if node.is("COMPONENT_SET") {
                continue;
            }
        }
        // Reverse so children pop in document order.
        stack.extend(node.children.iter().rev());
    }

    catalog
}

// ── Team-file extraction ────────────────────────────────────────────

/// Fingerprint the top-level FRAME children of every CANVAS page.
pub fn extract_frame_fingerprints(
    document: &ApiNode,
    file_key: &str,
    file_name: &str,
) -> Vec<FrameFingerprint> {
    document
        .children
        .iter()
        .filter(|page| page.is("CANVAS"))
        .flat_map(|page| page.children.iter())
        .filter(|child| child.is("FRAME"))
        .map(|frame| FrameFingerprint {
            id: frame.id.clone().unwrap_or_default(),
            name: node_name(frame),
            shape: api_shape(frame),
            component_names: instance_names(frame),
            origin_file_key: Some(file_key.to_string()),
            origin_file_name: Some(file_name.to_string()),
        })
        .collect()
}

/// Names of INSTANCE nodes in the subtree, deduplicated in first-seen order.
fn instance_names(root: &ApiNode) -> IndexSet<String> {
    let mut names = IndexSet::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is("INSTANCE") {
            if let Some(name) = &node.name {
                names.insert(name.clone());
            }
        }
        stack.extend(node.children.iter().rev());
    }
    names
}

impl DesignFile {
    pub fn library_catalog(&self, file_key: &str, file_url: &str) -> LibraryCatalog {
        extract_components(&self.document, file_key, &self.name, file_url)
    }

    pub fn team_file(&self, file_key: &str) -> TeamFile {
        TeamFile {
            file_key: file_key.to_string(),
            file_name: self.name.clone(),
            frames: extract_frame_fingerprints(&self.document, file_key, &self.name),
        }
    }
}

// ── URLs ────────────────────────────────────────────────────────────

/// Extract the file key from a `figma.com/file/<key>` or `figma.com/design/<key>` URL.
pub fn extract_file_key(raw: &str) -> Option<String> {
    let url = Url::parse(raw).ok()?;
    let host = url.host_str()?;
    if host != "figma.com" && !host.ends_with(".figma.com") {
        return None;
    }

    let mut segments = url.path_segments()?;
    match segments.next()? {
        "file" | "design" => {}
        _ => return None,
    }
    let key: String = segments
        .next()?
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    if key.is_empty() { None } else { Some(key) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ApiNode {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn depth_of_leaf_and_nested() {
        assert_eq!(node_depth(&parse(r#"{"type":"TEXT"}"#)), 0);
        assert_eq!(node_depth(&parse(r#"{"children":[]}"#)), 0);
        assert_eq!(node_depth(&parse(r#"{"children":[{"type":"TEXT"}]}"#)), 1);
        let tree = parse(
            r#"{"children":[{"children":[{"children":[{"type":"TEXT"}]}]},{"type":"TEXT"}]}"#,
        );
        assert_eq!(node_depth(&tree), 3);
    }

    #[test]
    fn depth_survives_very_deep_trees() {
        let mut node = ApiNode::default();
        for _ in 0..10_000 {
            node = ApiNode {
                children: vec![node],
                ..Default::default()
            };
        }
        assert_eq!(node_depth(&node), 10_000);
        // Drop iteratively as well; the derived Drop would recurse.
        let mut stack = vec![node];
        while let Some(mut n) = stack.pop() {
            stack.append(&mut n.children);
        }
    }

    #[test]
    fn builds_library_fingerprint() {
        let node = parse(
            r#"{
                "id": "n1", "name": "Card", "description": "A card", "type": "COMPONENT",
                "absoluteBoundingBox": {"x": 0, "y": 0, "width": 200, "height": 300},
                "layoutMode": "VERTICAL", "cornerRadius": 8,
                "fills": [{"type": "SOLID", "visible": true}],
                "children": [{"type": "TEXT"}, {"type": "FRAME"}]
            }"#,
        );
        let fp = build_library_fingerprint(&node, "fk1", "File1", "https://figma.com/file/fk1");
        assert_eq!(fp.id, "n1");
        assert_eq!(fp.name, "Card");
        assert_eq!(fp.description, "A card");
        assert_eq!(fp.shape.width, 200);
        assert_eq!(fp.shape.height, 300);
        assert_eq!(fp.shape.child_count, 2);
        assert_eq!(fp.shape.max_depth, 1);
        assert_eq!(fp.shape.aspect_ratio, 0.67);
        assert_eq!(fp.shape.layout_mode, LayoutMode::Vertical);
        assert_eq!(fp.shape.corner_radius, 8.0);
        assert_eq!(fp.shape.fill_count, 1);
        assert_eq!(fp.shape.child_type_distribution.get("TEXT"), Some(&1));
        assert_eq!(fp.shape.child_type_distribution.get("FRAME"), Some(&1));
        assert!(fp.shape.component_ids.is_empty());
    }

    #[test]
    fn missing_bounding_box_and_name() {
        let fp = build_library_fingerprint(&ApiNode::default(), "fk", "f", "url");
        assert_eq!(fp.shape.width, 0);
        assert_eq!(fp.shape.height, 0);
        assert_eq!(fp.shape.aspect_ratio, 1.0);
        assert_eq!(fp.name, "Unnamed");
        assert_eq!(fp.shape.layout_mode, LayoutMode::None);
    }

    #[test]
    fn per_corner_radii_take_maximum() {
        let fp = build_library_fingerprint(
            &parse(r#"{"rectangleCornerRadii":[4, 12, 8, 0]}"#),
            "fk",
            "f",
            "url",
        );
        assert_eq!(fp.shape.corner_radius, 12.0);
    }

    #[test]
    fn counts_only_visible_solid_fills() {
        let fp = build_library_fingerprint(
            &parse(
                r#"{"fills":[
                    {"type":"SOLID"},
                    {"type":"SOLID","visible":false},
                    {"type":"SOLID","visible":true},
                    {"type":"IMAGE"}
                ]}"#,
            ),
            "fk",
            "f",
            "url",
        );
        assert_eq!(fp.shape.fill_count, 2);
    }

    #[test]
    fn extracts_components_without_entering_sets() {
        let root = parse(
            r#"{"type":"DOCUMENT","children":[{"type":"CANVAS","children":[
                {"type":"COMPONENT_SET","id":"s1","name":"ButtonSet","children":[
                    {"type":"COMPONENT","id":"v1","name":"Type=Primary"},
                    {"type":"COMPONENT","id":"v2","name":"Type=Secondary"}
                ]},
                {"type":"FRAME","children":[{"type":"COMPONENT","id":"c1","name":"Deep"}]},
                {"type":"COMPONENT","id":"c2","name":"Icon"}
            ]}]}"#,
        );
        let catalog = extract_components(&root, "fk", "Lib", "https://figma.com/file/fk");
        let names: Vec<&str> = catalog.components.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["ButtonSet", "Deep", "Icon"]);
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.fingerprints[0].origin_file_name, "Lib");
    }

    #[test]
    fn extracts_top_level_frames_of_canvas_pages() {
        let doc = parse(
            r#"{"children":[
                {"type":"CANVAS","children":[
                    {"type":"FRAME","id":"1:1","name":"Home",
                     "absoluteBoundingBox":{"x":0,"y":0,"width":375,"height":812},
                     "children":[
                        {"type":"INSTANCE","name":"Button"},
                        {"type":"FRAME","children":[{"type":"INSTANCE","name":"Icon"},{"type":"INSTANCE","name":"Button"}]}
                     ]},
                    {"type":"TEXT","id":"1:2","name":"Loose"},
                    {"type":"FRAME","id":"1:3","name":"RealFrame"}
                ]},
                {"type":"SLIDE","children":[{"type":"FRAME","id":"9:9","name":"Skipped"}]}
            ]}"#,
        );
        let frames = extract_frame_fingerprints(&doc, "fk1", "MyFile");
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].name, "Home");
        assert_eq!(frames[0].shape.width, 375);
        assert_eq!(frames[0].shape.height, 812);
        assert_eq!(frames[0].origin_file_key.as_deref(), Some("fk1"));
        assert_eq!(frames[0].origin_file_name.as_deref(), Some("MyFile"));
        let names: Vec<&str> = frames[0].component_names.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["Button", "Icon"]);
        assert_eq!(frames[1].name, "RealFrame");
    }

    #[test]
    fn file_keys_from_urls() {
        assert_eq!(
            extract_file_key("https://www.figma.com/file/abc123/My-Design").as_deref(),
            Some("abc123")
        );
        assert_eq!(
            extract_file_key("https://www.figma.com/design/xyz789/My-Design?node-id=1").as_deref(),
            Some("xyz789")
        );
        assert_eq!(extract_file_key("https://example.com/file/abc"), None);
        assert_eq!(extract_file_key("https://www.figma.com/proto/abc"), None);
        assert_eq!(extract_file_key(""), None);
    }
}
