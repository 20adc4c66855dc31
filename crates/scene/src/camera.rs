use glam::{Mat4, Vec3};

/// Perspective camera that eases toward a moving target point.
///
/// The camera always looks at the origin; only its position changes, by one
/// exponential smoothing step per frame.
#[derive(Debug, Clone)]
pub struct EasedCamera {
    pub position: Vec3,
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl EasedCamera {
    pub fn new(position: Vec3, fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            fov_y: fov_degrees.to_radians(),
            aspect,
            near,
            far,
        }
    }

    /// One smoothing step: `position += (target - position) * factor` on each
    /// axis. For factor in (0, 1) the camera converges monotonically and
    /// never overshoots.
    pub fn ease_toward(&mut self, target: Vec3, factor: f32) {
        self.position += (target - self.position) * factor;
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, Vec3::ZERO, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> EasedCamera {
        EasedCamera::new(Vec3::new(0.0, 25.0, 55.0), 45.0, 16.0 / 9.0, 0.1, 1000.0)
    }

    #[test]
    fn view_projection_is_finite() {
        let cam = camera();
        let vp = cam.view_projection();
        for col in 0..4 {
            assert!(vp.col(col).is_finite());
        }
    }

    #[test]
    fn ease_moves_toward_target() {
        let mut cam = camera();
        let target = Vec3::new(30.0, 6.0, 55.0);
        let before = (target - cam.position).length();
        cam.ease_toward(target, 0.03);
        let after = (target - cam.position).length();
        assert!(after < before);
    }

    #[test]
    fn ease_never_overshoots() {
        let mut cam = camera();
        let target = Vec3::new(-30.0, 46.0, 55.0);
        for _ in 0..10_000 {
            let before = cam.position;
            cam.ease_toward(target, 0.03);
            // Each axis stays on its own side of the target.
            for axis in 0..3 {
                let b = before[axis];
                let a = cam.position[axis];
                let t = target[axis];
                assert!((t - a).abs() <= (t - b).abs() + 1e-6);
                assert!((b - t).signum() * (a - t).signum() >= 0.0);
            }
        }
        assert!((cam.position - target).length() < 1e-3);
    }

    #[test]
    fn full_factor_snaps_to_target() {
        let mut cam = camera();
        let target = Vec3::new(1.0, 2.0, 3.0);
        cam.ease_toward(target, 1.0);
        assert!((cam.position - target).length() < 1e-6);
    }
}
