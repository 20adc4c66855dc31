//! Scene context for the animated backdrop.
//!
//! All per-instance state — mesh, camera, animation clock, pointer — lives in
//! an explicit [`Scene`] owned by the embedder and passed to the per-frame
//! update. Nothing here is global; multiple independent scenes can coexist.
//!
//! # Invariants
//! - `advance_frame` is the only mutation path for mesh heights, the clock,
//!   and the camera.
//! - Pointer state is overwritten between frames, never mid-frame.
//! - The scene never touches a display; rendering is the caller's concern.

mod camera;
mod state;

pub use camera::EasedCamera;
pub use state::{Scene, SceneError, SceneLights};
