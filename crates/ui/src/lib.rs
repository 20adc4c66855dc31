//! Page-level collaborators around the renderer.
//!
//! Badge, reveal observer, and notify form are independent of the scene and
//! of each other; they carry presentation state only and are drawn by the
//! embedding application.

mod badge;
mod notify;
mod reveal;

pub use badge::{BadgeTransform, Keyframes, StatusBadge};
pub use notify::{FormStatus, NotifyForm};
pub use reveal::{RevealEvent, RevealObserver};
