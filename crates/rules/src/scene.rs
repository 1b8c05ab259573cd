//! Scene tree consumed by the rule checks.
//!
//! This is a read-only snapshot of the live document: per-node kind, fills,
//! style references, text size, auto-layout spacing and variant properties.
//! Producing it is the host's job; the rules only walk it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use patternpal_core::LayoutMode;

use crate::color::Rgb;

/// Node kinds the rules distinguish. Anything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    Frame,
    Section,
    Group,
    Component,
    ComponentSet,
    Instance,
    Text,
    Rectangle,
    Ellipse,
    Vector,
    #[serde(other)]
    Other,
}

impl NodeKind {
    /// Kinds that count as a top-level container when placed directly on a page.
    pub fn is_container(self) -> bool {
        matches!(
            self,
            NodeKind::Frame
                | NodeKind::Section
                | NodeKind::Group
                | NodeKind::Component
                | NodeKind::ComponentSet
        )
    }
}

/// Reference from a node to a shared style.
///
/// In JSON this is a plain string: absent, `null` or `""` is unset, the
/// literal `"MIXED"` marks a node whose ranges use different styles.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum StyleRef {
    #[default]
    Unset,
    Mixed,
    Id(String),
}

const MIXED_MARKER: &str = "MIXED";

impl StyleRef {
    /// True when the node does not point at exactly one style.
    pub fn is_missing(&self) -> bool {
        !matches!(self, StyleRef::Id(_))
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            StyleRef::Id(id) => Some(id),
            _ => None,
        }
    }
}

impl From<Option<String>> for StyleRef {
    fn from(raw: Option<String>) -> Self {
        match raw.as_deref() {
            None | Some("") => StyleRef::Unset,
            Some(MIXED_MARKER) => StyleRef::Mixed,
            Some(id) => StyleRef::Id(id.to_string()),
        }
    }
}

impl From<StyleRef> for Option<String> {
    fn from(style: StyleRef) -> Self {
        match style {
            StyleRef::Unset => None,
            StyleRef::Mixed => Some(MIXED_MARKER.to_string()),
            StyleRef::Id(id) => Some(id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaintKind {
    Solid,
    Image,
    #[serde(other)]
    Other,
}

fn default_true() -> bool {
    true
}

fn default_opacity() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paint {
    #[serde(rename = "type")]
    pub kind: PaintKind,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub color: Option<Rgb>,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

impl Paint {
    pub fn solid(color: Rgb) -> Self {
        Self {
            kind: PaintKind::Solid,
            visible: true,
            color: Some(color),
            opacity: 1.0,
        }
    }

    pub fn is_visible_solid(&self) -> bool {
        self.visible && self.kind == PaintKind::Solid
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneNode {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub fills: Vec<Paint>,
    #[serde(default)]
    pub fill_style_id: StyleRef,
    #[serde(default)]
    pub text_style_id: StyleRef,
    #[serde(default)]
    pub font_size: Option<f64>,
    #[serde(default)]
    pub layout_mode: LayoutMode,
    #[serde(default)]
    pub item_spacing: Option<f64>,
    #[serde(default)]
    pub variant_properties: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            visible: true,
            fills: Vec::new(),
            fill_style_id: StyleRef::Unset,
            text_style_id: StyleRef::Unset,
            font_size: None,
            layout_mode: LayoutMode::None,
            item_spacing: None,
            variant_properties: None,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<SceneNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_fill(mut self, paint: Paint) -> Self {
        self.fills.push(paint);
        self
    }

    pub fn with_fill_style(mut self, style: StyleRef) -> Self {
        self.fill_style_id = style;
        self
    }

    pub fn with_text_style(mut self, style: StyleRef) -> Self {
        self.text_style_id = style;
        self
    }

    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn with_auto_layout(mut self, mode: LayoutMode, spacing: f64) -> Self {
        self.layout_mode = mode;
        self.item_spacing = Some(spacing);
        self
    }

    pub fn with_variant(mut self, key: &str, value: &str) -> Self {
        self.variant_properties
            .get_or_insert_with(BTreeMap::new)
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn has_visible_solid_fill(&self) -> bool {
        self.fills.iter().any(Paint::is_visible_solid)
    }

    /// Color of the topmost (last) visible solid fill.
    pub fn top_solid_color(&self) -> Option<Rgb> {
        self.fills
            .iter()
            .rev()
            .filter(|p| p.is_visible_solid())
            .find_map(|p| p.color)
    }

    /// Every node strictly below this one, depth-first in document order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// This node and its whole subtree in document order, each with the
    /// index of its parent in the returned list (`None` for `self`).
    pub fn flatten(&self) -> Vec<FlatNode<'_>> {
        let mut out = Vec::new();
        let mut stack: Vec<(&SceneNode, Option<usize>)> = vec![(self, None)];
        while let Some((node, parent)) = stack.pop() {
            let index = out.len();
            out.push(FlatNode { node, parent });
            stack.extend(node.children.iter().rev().map(|c| (c, Some(index))));
        }
        out
    }
}

/// Iterator behind [`SceneNode::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a SceneNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a SceneNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FlatNode<'a> {
    pub node: &'a SceneNode,
    pub parent: Option<usize>,
}

/// First value `f` yields walking up from `flat[index]` through its ancestors.
pub fn nearest_ancestor<'a, T>(
    flat: &[FlatNode<'a>],
    index: usize,
    f: impl Fn(&'a SceneNode) -> Option<T>,
) -> Option<T> {
    let mut current = flat.get(index)?.parent;
    while let Some(i) = current {
        let entry = flat[i];
        if let Some(value) = f(entry.node) {
            return Some(value);
        }
        current = entry.parent;
    }
    None
}

/// Page children that count as top-level containers.
pub fn top_level_containers(page_children: &[SceneNode]) -> Vec<&SceneNode> {
    page_children
        .iter()
        .filter(|n| n.kind.is_container())
        .collect()
}
