//! A scene exported to JSON, usable wherever a live scene graph is expected.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use patternpal_core::{PatternError, Result};

use crate::registry::{SceneGraph, StyleRegistry};
use crate::scene::SceneNode;

/// Page children plus the lookup tables the rules need.
///
/// ```json
/// {
///   "children": [{ "id": "1:1", "type": "FRAME", "children": [] }],
///   "styles": { "S:abc": "Brand/Primary" },
///   "mainComponents": { "1:5": "Button/Primary" }
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneSnapshot {
    #[serde(default)]
    pub children: Vec<SceneNode>,
    /// Style id to style name.
    #[serde(default)]
    pub styles: HashMap<String, String>,
    /// Instance id to main component name; `null` for detached instances.
    #[serde(default)]
    pub main_components: HashMap<String, Option<String>>,
}

impl SceneSnapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json(&raw)?;
        info!(
            path = %path.display(),
            nodes = snapshot.children.len(),
            styles = snapshot.styles.len(),
            "Loaded scene snapshot"
        );
        Ok(snapshot)
    }

    /// Find a node anywhere on the page by id.
    pub fn find(&self, id: &str) -> Option<&SceneNode> {
        self.children
            .iter()
            .flat_map(|child| std::iter::once(child).chain(child.descendants()))
            .find(|n| n.id == id)
    }
}

impl StyleRegistry for SceneSnapshot {
    fn style_name(&self, style_id: &str) -> Option<&str> {
        self.styles.style_name(style_id)
    }
}

#[async_trait]
impl SceneGraph for SceneSnapshot {
    async fn main_component_name(&self, instance_id: &str) -> Result<Option<String>> {
        self.main_components
            .get(instance_id)
            .cloned()
            .ok_or_else(|| PatternError::Unresolved(instance_id.to_string()))
    }
}
