use crate::types::Rgb;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from loading or validating a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Grid mesh resolution and extent.
///
/// `cols`/`rows` count segments; the vertex grid is `(cols+1) x (rows+1)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    pub cols: u32,
    pub rows: u32,
    pub plane_width: f32,
    pub plane_depth: f32,
    /// Vertical offset of the whole mesh below the origin.
    pub offset_y: f32,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            cols: 160,
            rows: 160,
            plane_width: 160.0,
            plane_depth: 140.0,
            offset_y: -8.0,
        }
    }
}

/// Constants of the closed-form height field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    /// Spatial frequency along X.
    pub freq_x: f32,
    /// Spatial frequency along Z.
    pub freq_z: f32,
    pub amp_x: f32,
    pub amp_z: f32,
    /// Ratio applied to the phase in the cosine term.
    pub phase_ratio: f32,
    /// Phase advance per frame.
    pub phase_increment: f32,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            freq_x: 0.06,
            freq_z: 0.045,
            amp_x: 1.8,
            amp_z: 1.3,
            phase_ratio: 0.84,
            phase_increment: 0.012,
        }
    }
}

/// Camera rig: start pose, projection, and pointer-follow easing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub start_position: [f32; 3],
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Horizontal pointer-to-target scale.
    pub orbit_x: f32,
    /// Vertical pointer-to-target scale.
    pub orbit_y: f32,
    /// Resting camera height the vertical target is offset from.
    pub base_height: f32,
    /// Per-axis exponential smoothing factor in (0, 1).
    pub smoothing: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            start_position: [0.0, 25.0, 55.0],
            fov_degrees: 45.0,
            near: 0.1,
            far: 1000.0,
            orbit_x: 30.0,
            orbit_y: 20.0,
            base_height: 26.0,
            smoothing: 0.03,
        }
    }
}

/// Vertex colors, background, and fog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub top: Rgb,
    pub bottom: Rgb,
    /// Bound on the per-vertex color jitter.
    pub jitter: f32,
    /// Seed for the deterministic jitter sequence.
    pub seed: u64,
    /// Background clear color, also the fog color.
    pub clear: Rgb,
    pub fog_density: f32,
    pub opacity: f32,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            top: Rgb::from_hex(0x1fd9a8),
            bottom: Rgb::from_hex(0x063a2e),
            jitter: 0.18,
            seed: 7,
            clear: Rgb::from_hex(0x071126),
            fog_density: 0.0025,
            opacity: 0.96,
        }
    }
}

/// Fixed light sources: one directional sun, one ambient fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    /// Sun direction, normalized by the renderer.
    pub sun_direction: [f32; 3],
    pub sun_intensity: f32,
    pub ambient: Rgb,
    pub ambient_intensity: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            sun_direction: [-1.0, 1.0, 1.0],
            sun_intensity: 0.6,
            ambient: Rgb::from_hex(0x9fcbe6),
            ambient_intensity: 0.35,
        }
    }
}

/// Rendering surface limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Display scale is capped here to bound GPU cost; never above 2.0.
    pub pixel_ratio_cap: f32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            pixel_ratio_cap: 2.0,
        }
    }
}

/// Capability gate thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Viewports at or below this width are treated as small screens.
    pub small_screen_max_width: u32,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            small_screen_max_width: 600,
        }
    }
}

/// Page collaborator constants: badge pulse, reveal observer, form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub badge_press_ms: u64,
    pub reveal_threshold: f32,
    pub reveal_stagger_ms: u64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            badge_press_ms: 420,
            reveal_threshold: 0.18,
            reveal_stagger_ms: 70,
        }
    }
}

/// Complete tuning configuration for a backdrop instance.
///
/// Defaults reproduce the reference look. Deployments that want a different
/// grid resolution, wave shape, or palette override fields via a YAML file
/// instead of patching constants.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BackdropConfig {
    pub mesh: MeshConfig,
    pub wave: WaveConfig,
    pub camera: CameraConfig,
    pub palette: PaletteConfig,
    pub lights: LightConfig,
    pub surface: SurfaceConfig,
    pub gate: GateConfig,
    pub page: PageConfig,
}

impl BackdropConfig {
    /// Load a configuration from a YAML file and validate it.
    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the renderer cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mesh.cols == 0 || self.mesh.rows == 0 {
            return Err(ConfigError::Invalid(
                "mesh.cols and mesh.rows must be positive".into(),
            ));
        }
        if self.mesh.plane_width <= 0.0 || self.mesh.plane_depth <= 0.0 {
            return Err(ConfigError::Invalid(
                "mesh plane extent must be positive".into(),
            ));
        }
        if !(0.0..1.0).contains(&self.camera.smoothing) || self.camera.smoothing == 0.0 {
            return Err(ConfigError::Invalid(
                "camera.smoothing must be in (0, 1)".into(),
            ));
        }
        if self.camera.near <= 0.0 || self.camera.far <= self.camera.near {
            return Err(ConfigError::Invalid(
                "camera near/far planes are inverted".into(),
            ));
        }
        if self.surface.pixel_ratio_cap <= 0.0 || self.surface.pixel_ratio_cap > 2.0 {
            return Err(ConfigError::Invalid(
                "surface.pixel_ratio_cap must be in (0, 2]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.page.reveal_threshold) {
            return Err(ConfigError::Invalid(
                "page.reveal_threshold must be in [0, 1]".into(),
            ));
        }
        Ok(())
    }

    /// Vertex count of the configured grid, `(cols+1) * (rows+1)`.
    pub fn vertex_count(&self) -> usize {
        (self.mesh.cols as usize + 1) * (self.mesh.rows as usize + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        BackdropConfig::default().validate().unwrap();
    }

    #[test]
    fn default_vertex_count() {
        let config = BackdropConfig::default();
        assert_eq!(config.vertex_count(), 161 * 161);
    }

    #[test]
    fn zero_resolution_rejected() {
        let mut config = BackdropConfig::default();
        config.mesh.cols = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn smoothing_bounds_rejected() {
        let mut config = BackdropConfig::default();
        config.camera.smoothing = 1.0;
        assert!(config.validate().is_err());
        config.camera.smoothing = 0.0;
        assert!(config.validate().is_err());
        config.camera.smoothing = 0.03;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn pixel_ratio_cap_never_above_two() {
        let mut config = BackdropConfig::default();
        config.surface.pixel_ratio_cap = 3.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn yaml_roundtrip() {
        let config = BackdropConfig::default();
        let text = serde_yaml::to_string(&config).unwrap();
        let parsed: BackdropConfig = serde_yaml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn partial_yaml_uses_defaults() {
        let parsed: BackdropConfig =
            serde_yaml::from_str("mesh:\n  cols: 120\n  rows: 120\n").unwrap();
        assert_eq!(parsed.mesh.cols, 120);
        assert_eq!(parsed.wave, WaveConfig::default());
    }
}
