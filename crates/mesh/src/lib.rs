//! Deformable grid mesh for the animated terrain.
//!
//! # Invariants
//! - Vertex x/z coordinates and colors are fixed at construction.
//! - Only the height (y) component changes, recomputed from the closed-form
//!   wave field each frame.
//! - Construction is deterministic given a color seed.

mod grid;
mod wave;

pub use grid::{GridMesh, TerrainVertex};
pub use wave::wave_height;
