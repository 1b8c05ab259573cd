//! Design-lint rules over a scene tree.
//!
//! This crate provides:
//! - A serde model of the scene tree (`scene`) and a JSON snapshot of it
//! - Style and main-component lookups as traits (`registry`)
//! - Five rule checks: primary button limit, text styles, spacing, color
//!   tokens and WCAG AA contrast
//! - The rule catalog and an orchestrator running a selection of rules

pub mod catalog;
pub mod checks;
pub mod color;
pub mod engine;
pub mod registry;
pub mod scene;
pub mod snapshot;

pub use catalog::{default_rules, RuleConfig};
pub use engine::RuleEngine;
pub use registry::{SceneGraph, StyleRegistry};
pub use scene::{top_level_containers, NodeKind, SceneNode, StyleRef};
pub use snapshot::SceneSnapshot;
