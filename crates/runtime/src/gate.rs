use backdrop_common::GateConfig;

/// Device capability signals sampled once at startup by the embedder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayCaps {
    /// The primary input is touch (no hover pointer to follow).
    pub touch_input: bool,
    /// Logical viewport width in pixels at startup.
    pub viewport_width: u32,
}

/// Why the backdrop was disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisableReason {
    TouchInput,
    SmallScreen,
}

impl std::fmt::Display for DisableReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TouchInput => write!(f, "touch input device"),
            Self::SmallScreen => write!(f, "small screen"),
        }
    }
}

/// Startup decision: run the renderer or hide the backdrop layer entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Enabled,
    Disabled(DisableReason),
}

impl GateDecision {
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled)
    }
}

/// One-time, side-effect-free capability check. When it disables, the caller
/// must not allocate any rendering resource, listener, or timer for the
/// backdrop layer.
pub fn evaluate_gate(caps: DisplayCaps, gate: &GateConfig) -> GateDecision {
    if caps.touch_input {
        return GateDecision::Disabled(DisableReason::TouchInput);
    }
    if caps.viewport_width <= gate.small_screen_max_width {
        return GateDecision::Disabled(DisableReason::SmallScreen);
    }
    GateDecision::Enabled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> GateConfig {
        GateConfig::default()
    }

    #[test]
    fn touch_disables() {
        let caps = DisplayCaps {
            touch_input: true,
            viewport_width: 1920,
        };
        assert_eq!(
            evaluate_gate(caps, &gate()),
            GateDecision::Disabled(DisableReason::TouchInput)
        );
    }

    #[test]
    fn narrow_viewport_disables() {
        let caps = DisplayCaps {
            touch_input: false,
            viewport_width: 600,
        };
        assert_eq!(
            evaluate_gate(caps, &gate()),
            GateDecision::Disabled(DisableReason::SmallScreen)
        );
    }

    #[test]
    fn wide_pointer_device_enables() {
        let caps = DisplayCaps {
            touch_input: false,
            viewport_width: 601,
        };
        assert!(evaluate_gate(caps, &gate()).is_enabled());
    }

    #[test]
    fn touch_reported_before_width() {
        let caps = DisplayCaps {
            touch_input: true,
            viewport_width: 320,
        };
        assert_eq!(
            evaluate_gate(caps, &gate()),
            GateDecision::Disabled(DisableReason::TouchInput)
        );
    }
}
