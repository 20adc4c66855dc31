//! Shared types and tuning configuration for the backdrop engine.
//!
//! # Invariants
//! - Every tuning constant lives in `BackdropConfig`; no crate hardcodes one.
//! - Types here carry no behavior beyond construction and conversion.

pub mod config;
pub mod types;

pub use config::{
    BackdropConfig, CameraConfig, ConfigError, GateConfig, LightConfig, MeshConfig, PageConfig,
    PaletteConfig, SurfaceConfig, WaveConfig,
};
pub use types::{PointerOffset, Rgb, Viewport};
