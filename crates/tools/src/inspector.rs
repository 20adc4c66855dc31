use backdrop_scene::Scene;

/// Read-only queries against a scene for debugging and development UI.
pub struct SceneInspector;

impl SceneInspector {
    pub fn summary(scene: &Scene) -> SceneSummary {
        let cam = scene.camera().position;
        SceneSummary {
            frame: scene.frame(),
            phase: scene.phase(),
            vertex_count: scene.mesh().vertex_count(),
            camera_position: [cam.x, cam.y, cam.z],
            pointer: [scene.pointer().x, scene.pointer().y],
        }
    }
}

/// Snapshot of scene state for display.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSummary {
    pub frame: u64,
    pub phase: f32,
    pub vertex_count: usize,
    pub camera_position: [f32; 3],
    pub pointer: [f32; 2],
}

impl std::fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Backdrop: frame={} phase={:.4} vertices={} camera=({:.2}, {:.2}, {:.2}) pointer=({:.2}, {:.2})",
            self.frame,
            self.phase,
            self.vertex_count,
            self.camera_position[0],
            self.camera_position[1],
            self.camera_position[2],
            self.pointer[0],
            self.pointer[1],
        )
    }
}
