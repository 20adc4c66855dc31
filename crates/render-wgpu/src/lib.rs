//! wgpu render backend for the backdrop.
//!
//! Renders the deformed grid mesh with per-vertex colors, one directional
//! light plus ambient fill, and exponential-squared fog toward the clear
//! color.
//!
//! # Invariants
//! - The renderer never mutates scene state.
//! - Vertex positions and normals are re-uploaded each frame; colors and
//!   indices are uploaded once.

mod shaders;
mod terrain;

pub use terrain::TerrainRenderer;
