use backdrop_scene::Scene;

/// Renderer-agnostic interface. The GPU backend and the debug renderer both
/// consume the same scene; neither may mutate it.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the current scene state.
    fn render(&self, scene: &Scene) -> Self::Output;
}

/// Text renderer for headless use: CLI output, logging, and exercising the
/// render interface without a GPU.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene) -> String {
        let cam = scene.camera().position;
        let pointer = scene.pointer();
        let mut out = String::new();
        out.push_str(&format!(
            "=== Backdrop (frame={}, phase={:.4}) ===\n",
            scene.frame(),
            scene.phase()
        ));
        out.push_str(&format!(
            "Mesh: {}x{} segments, {} vertices\n",
            scene.mesh().cols(),
            scene.mesh().rows(),
            scene.mesh().vertex_count()
        ));
        out.push_str(&format!(
            "Camera: ({:.2}, {:.2}, {:.2}) looking at origin\n",
            cam.x, cam.y, cam.z
        ));
        out.push_str(&format!(
            "Pointer: ({:.2}, {:.2})\n",
            pointer.x, pointer.y
        ));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backdrop_common::{BackdropConfig, PointerOffset, Viewport};

    fn scene() -> Scene {
        let mut config = BackdropConfig::default();
        config.mesh.cols = 4;
        config.mesh.rows = 4;
        Scene::new(config, Viewport::new(1280, 720)).unwrap()
    }

    #[test]
    fn debug_renderer_fresh_scene() {
        let output = DebugTextRenderer::new().render(&scene());
        assert!(output.contains("frame=0"));
        assert!(output.contains("4x4 segments"));
        assert!(output.contains("25 vertices"));
    }

    #[test]
    fn debug_renderer_tracks_state() {
        let mut scene = scene();
        scene.set_pointer(PointerOffset::new(0.5, -0.5));
        for _ in 0..3 {
            scene.advance_frame();
        }
        let output = DebugTextRenderer::new().render(&scene);
        assert!(output.contains("frame=3"));
        assert!(output.contains("Pointer: (0.50, -0.50)"));
    }
}
