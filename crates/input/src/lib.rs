//! Ambient input signals mapped to normalized state.
//!
//! # Invariants
//! - The scene consumes normalized signals, never raw window events.
//! - Pointer normalization is pure: same cursor and viewport, same offset.

pub mod signal;

pub use signal::{PointerTracker, Signal};
