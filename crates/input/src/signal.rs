use backdrop_common::{PointerOffset, Viewport};

/// Ambient signals the backdrop reacts to. Anything else the host window
/// produces is ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Signal {
    /// Cursor moved to a logical position within the viewport.
    PointerMoved { x: f64, y: f64 },
    /// Viewport was resized to new logical dimensions.
    Resized { width: u32, height: u32 },
    /// The surface became observed or unobserved.
    VisibilityChanged { visible: bool },
}

/// Maps cursor positions to pointer offsets normalized around the viewport
/// center, x and y each in [-1, 1].
#[derive(Debug, Clone, Copy)]
pub struct PointerTracker {
    viewport: Viewport,
}

impl PointerTracker {
    pub fn new(viewport: Viewport) -> Self {
        Self { viewport }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Normalize a cursor position: center maps to (0, 0), edges to ±1.
    pub fn normalize(&self, x: f64, y: f64) -> PointerOffset {
        let w = self.viewport.width.max(1) as f64;
        let h = self.viewport.height.max(1) as f64;
        PointerOffset::new(
            ((x - w / 2.0) / w * 2.0) as f32,
            ((y - h / 2.0) / h * 2.0) as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> PointerTracker {
        PointerTracker::new(Viewport::new(1000, 500))
    }

    #[test]
    fn center_is_origin() {
        let p = tracker().normalize(500.0, 250.0);
        assert_eq!(p, PointerOffset::new(0.0, 0.0));
    }

    #[test]
    fn corners_map_to_unit_offsets() {
        let t = tracker();
        let top_left = t.normalize(0.0, 0.0);
        assert!((top_left.x - -1.0).abs() < 1e-6);
        assert!((top_left.y - -1.0).abs() < 1e-6);

        let bottom_right = t.normalize(1000.0, 500.0);
        assert!((bottom_right.x - 1.0).abs() < 1e-6);
        assert!((bottom_right.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn out_of_viewport_positions_clamp() {
        let p = tracker().normalize(5000.0, -5000.0);
        assert_eq!(p.x, 1.0);
        assert_eq!(p.y, -1.0);
    }

    #[test]
    fn resize_changes_normalization() {
        let mut t = tracker();
        t.set_viewport(Viewport::new(2000, 500));
        let p = t.normalize(500.0, 250.0);
        assert!((p.x - -0.5).abs() < 1e-6);
        assert_eq!(p.y, 0.0);
    }

    #[test]
    fn normalization_is_pure() {
        let t = tracker();
        assert_eq!(t.normalize(123.0, 456.0), t.normalize(123.0, 456.0));
    }
}
