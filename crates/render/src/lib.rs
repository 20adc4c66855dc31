//! Rendering adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers read the scene; they never mutate it.
//! - Output derives only from scene state at the moment of the call.

mod renderer;

pub use renderer::{DebugTextRenderer, Renderer};
