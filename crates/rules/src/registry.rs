//! Lookups the rules need from the host document.

use std::collections::HashMap;

use async_trait::async_trait;

use patternpal_core::Result;

/// Named styles of the document, keyed by style id.
pub trait StyleRegistry: Send + Sync {
    fn style_name(&self, style_id: &str) -> Option<&str>;
}

impl StyleRegistry for HashMap<String, String> {
    fn style_name(&self, style_id: &str) -> Option<&str> {
        self.get(style_id).map(String::as_str)
    }
}

/// Read-only access to the live scene graph.
///
/// Resolving an instance to its main component may need a round trip to the
/// host, hence async. `Ok(None)` means the instance has no main component.
#[async_trait]
pub trait SceneGraph: Send + Sync {
    async fn main_component_name(&self, instance_id: &str) -> Result<Option<String>>;
}
