//! Developer tooling: read-only scene diagnostics.
//!
//! # Invariants
//! - Inspection never mutates the scene.

mod inspector;

pub use inspector::{SceneInspector, SceneSummary};
