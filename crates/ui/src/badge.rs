/// Sampled badge pose at one instant of the press animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BadgeTransform {
    pub translate_y: f32,
    pub scale: f32,
}

impl BadgeTransform {
    pub const REST: Self = Self {
        translate_y: 0.0,
        scale: 1.0,
    };
}

/// Fixed-duration press micro-animation: rest, lift, rest, eased by a
/// cubic bezier.
#[derive(Debug, Clone, Copy)]
pub struct Keyframes {
    pub duration_ms: u64,
    bezier: CubicBezier,
}

impl Keyframes {
    /// The badge press curve: lift by 6 with a slight scale bump at the
    /// midpoint, easing `cubic-bezier(0.2, 0.9, 0.2, 1)`.
    pub fn badge_press(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            bezier: CubicBezier::new(0.2, 0.9, 0.2, 1.0),
        }
    }

    /// Sample the pose `elapsed_ms` into the animation. Clamps to the rest
    /// pose outside the duration.
    pub fn sample(&self, elapsed_ms: u64) -> BadgeTransform {
        if elapsed_ms >= self.duration_ms {
            return BadgeTransform::REST;
        }
        let u = elapsed_ms as f32 / self.duration_ms as f32;
        let t = self.bezier.ease(u);
        // Piecewise linear between rest (0), lifted (0.5), rest (1).
        let lift = if t < 0.5 { t * 2.0 } else { (1.0 - t) * 2.0 };
        BadgeTransform {
            translate_y: -6.0 * lift,
            scale: 1.0 + 0.02 * lift,
        }
    }
}

/// Pulsing status badge with a pressed toggle.
///
/// Pulses while unpressed; a click flips the pressed flag, stops or restarts
/// the pulse, and yields the press animation to play.
#[derive(Debug)]
pub struct StatusBadge {
    pressed: bool,
    press_ms: u64,
}

impl StatusBadge {
    pub fn new(press_ms: u64) -> Self {
        Self {
            pressed: false,
            press_ms,
        }
    }

    pub fn pressed(&self) -> bool {
        self.pressed
    }

    /// Whether the idle pulse is active. The pulse runs exactly when the
    /// badge is not pressed.
    pub fn pulsing(&self) -> bool {
        !self.pressed
    }

    /// Handle a click: toggle the pressed state and return the press
    /// animation to play.
    pub fn toggle(&mut self) -> Keyframes {
        self.pressed = !self.pressed;
        Keyframes::badge_press(self.press_ms)
    }
}

/// Cubic bezier easing with fixed endpoints (0,0) and (1,1).
#[derive(Debug, Clone, Copy)]
struct CubicBezier {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

impl CubicBezier {
    fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Progress at input `u` in [0, 1]: solve the curve parameter for x = u
    /// by bisection, then evaluate y.
    fn ease(&self, u: f32) -> f32 {
        if u <= 0.0 {
            return 0.0;
        }
        if u >= 1.0 {
            return 1.0;
        }
        let mut lo = 0.0f32;
        let mut hi = 1.0f32;
        for _ in 0..24 {
            let mid = (lo + hi) / 2.0;
            if bezier_component(self.x1, self.x2, mid) < u {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        bezier_component(self.y1, self.y2, (lo + hi) / 2.0)
    }
}

fn bezier_component(p1: f32, p2: f32, t: f32) -> f32 {
    let inv = 1.0 - t;
    3.0 * inv * inv * t * p1 + 3.0 * inv * t * t * p2 + t * t * t
}
