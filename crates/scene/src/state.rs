use crate::camera::EasedCamera;
use backdrop_common::{BackdropConfig, ConfigError, PointerOffset, Rgb, Viewport};
use backdrop_mesh::GridMesh;
use glam::Vec3;

/// Errors from scene construction.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Fixed light sources consumed by the renderer.
#[derive(Debug, Clone, Copy)]
pub struct SceneLights {
    pub sun_direction: Vec3,
    pub sun_intensity: f32,
    pub ambient: Rgb,
    pub ambient_intensity: f32,
}

/// All state of one backdrop instance.
///
/// Constructed synchronously; on error nothing is left behind. The scene is
/// display-agnostic so it can be stepped headless in tests and the CLI.
pub struct Scene {
    config: BackdropConfig,
    mesh: GridMesh,
    camera: EasedCamera,
    lights: SceneLights,
    pointer: PointerOffset,
    phase: f32,
    frame: u64,
}

impl Scene {
    /// Build mesh, camera, and lights from a validated configuration.
    pub fn new(config: BackdropConfig, viewport: Viewport) -> Result<Self, SceneError> {
        config.validate()?;

        let mesh = GridMesh::new(&config.mesh, &config.palette);
        let camera = EasedCamera::new(
            Vec3::from_array(config.camera.start_position),
            config.camera.fov_degrees,
            viewport.aspect(),
            config.camera.near,
            config.camera.far,
        );
        let lights = SceneLights {
            sun_direction: Vec3::from_array(config.lights.sun_direction).normalize(),
            sun_intensity: config.lights.sun_intensity,
            ambient: config.lights.ambient,
            ambient_intensity: config.lights.ambient_intensity,
        };

        tracing::debug!(
            vertices = mesh.vertex_count(),
            cols = config.mesh.cols,
            rows = config.mesh.rows,
            "scene initialized"
        );

        Ok(Self {
            config,
            mesh,
            camera,
            lights,
            pointer: PointerOffset::default(),
            phase: 0.0,
            frame: 0,
        })
    }

    /// One animation tick: advance the clock, displace the mesh, rebuild
    /// normals, ease the camera toward the pointer-derived target.
    pub fn advance_frame(&mut self) {
        self.phase += self.config.wave.phase_increment;
        self.mesh.displace(self.phase, &self.config.wave);
        self.mesh.recompute_normals();
        self.camera
            .ease_toward(self.pointer_target(), self.config.camera.smoothing);
        self.frame += 1;
    }

    /// Camera target derived from the current pointer offset. The camera
    /// drifts horizontally with the pointer and dips as the pointer moves
    /// down; depth is held at the start distance.
    pub fn pointer_target(&self) -> Vec3 {
        let cam = &self.config.camera;
        Vec3::new(
            self.pointer.x * cam.orbit_x,
            -self.pointer.y * cam.orbit_y + cam.base_height,
            cam.start_position[2],
        )
    }

    /// Overwrite the pointer offset; takes effect on the next frame.
    pub fn set_pointer(&mut self, pointer: PointerOffset) {
        self.pointer = pointer;
    }

    /// Update the camera aspect ratio after a viewport resize.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.camera.set_aspect(viewport.aspect());
    }

    pub fn config(&self) -> &BackdropConfig {
        &self.config
    }

    pub fn mesh(&self) -> &GridMesh {
        &self.mesh
    }

    pub fn camera(&self) -> &EasedCamera {
        &self.camera
    }

    pub fn lights(&self) -> &SceneLights {
        &self.lights
    }

    pub fn pointer(&self) -> PointerOffset {
        self.pointer
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}
