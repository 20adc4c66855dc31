//! Runtime concerns around the scene: whether to run at all, when frames are
//! scheduled, and how long they take.
//!
//! # Invariants
//! - The capability gate is evaluated once at startup, never on resize.
//! - At most one frame request is outstanding at any time.
//! - Pausing withholds the next request; it never aborts a frame in flight.

mod frame_loop;
mod gate;
mod timing;

pub use frame_loop::{FrameLoop, FrameScheduler, LoopState};
pub use gate::{DisableReason, DisplayCaps, GateDecision, evaluate_gate};
pub use timing::FrameTimer;
