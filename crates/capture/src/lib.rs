//! File-backed capture store for the notify form.
//!
//! Records accepted email addresses with timestamps in a JSON file under a
//! fixed key, mirroring a browser local-storage list. The in-memory list is
//! authoritative; the file is best-effort backup.
//!
//! # Invariants
//! - The record list only grows; records are never rewritten.
//! - Write failures are swallowed (debug-logged), never surfaced to the form.
//! - Invalid addresses are rejected before any record is created.

mod store;
mod validate;

pub use store::{CaptureError, CaptureRecord, CaptureStore, STORAGE_KEY};
pub use validate::is_email_shaped;
