/// Host hook for scheduling animation frames.
///
/// The production implementation wraps the windowing system's redraw
/// request; tests use a counting fake to step the loop deterministically
/// without a real display clock.
pub trait FrameScheduler {
    /// Ask the host to deliver one frame callback.
    fn request_frame(&mut self);
    /// Retract an outstanding request. Hosts that cannot cancel may treat
    /// this as a no-op; the loop drops the delivered frame instead.
    fn cancel_frame(&mut self);
}

/// Frame-loop states. Paused means the next frame is withheld, not that a
/// frame in flight is aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Paused,
}

/// Explicit state machine replacing the implicit re-armed callback chain.
///
/// Tracks whether a frame request is outstanding so that repeated
/// visibility toggles can never stack duplicate loops or leave an orphaned
/// one behind.
#[derive(Debug)]
pub struct FrameLoop {
    state: LoopState,
    request_outstanding: bool,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            state: LoopState::Paused,
            request_outstanding: false,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Start the loop and arm the first frame.
    pub fn start(&mut self, scheduler: &mut impl FrameScheduler) {
        self.state = LoopState::Running;
        self.arm(scheduler);
    }

    /// Visibility transition. Hidden pauses and retracts the pending
    /// request; visible resumes from a fresh scheduling call.
    pub fn set_visible(&mut self, visible: bool, scheduler: &mut impl FrameScheduler) {
        match (visible, self.state) {
            (false, LoopState::Running) => {
                self.state = LoopState::Paused;
                if self.request_outstanding {
                    scheduler.cancel_frame();
                    self.request_outstanding = false;
                }
                tracing::debug!("frame loop paused");
            }
            (true, LoopState::Paused) => {
                self.state = LoopState::Running;
                self.arm(scheduler);
                tracing::debug!("frame loop resumed");
            }
            _ => {}
        }
    }

    /// Called when the host delivers a frame. Returns whether the frame
    /// should run; while running, the next frame is armed immediately.
    pub fn begin_frame(&mut self, scheduler: &mut impl FrameScheduler) -> bool {
        self.request_outstanding = false;
        if self.state != LoopState::Running {
            // A frame scheduled before a pause may still arrive; drop it.
            return false;
        }
        self.arm(scheduler);
        true
    }

    fn arm(&mut self, scheduler: &mut impl FrameScheduler) {
        if !self.request_outstanding {
            scheduler.request_frame();
            self.request_outstanding = true;
        }
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic scheduler fake that tracks outstanding requests.
    #[derive(Default)]
    struct CountingScheduler {
        outstanding: usize,
        total_requests: usize,
    }

    impl FrameScheduler for CountingScheduler {
        fn request_frame(&mut self) {
            self.outstanding += 1;
            self.total_requests += 1;
        }

        fn cancel_frame(&mut self) {
            self.outstanding = self.outstanding.saturating_sub(1);
        }
    }

    impl CountingScheduler {
        /// Deliver the outstanding frame to the loop, as the host would.
        fn fire(&mut self, frame_loop: &mut FrameLoop) -> bool {
            assert!(self.outstanding > 0, "no frame scheduled");
            self.outstanding -= 1;
            frame_loop.begin_frame(self)
        }
    }

    #[test]
    fn start_arms_exactly_one_frame() {
        let mut sched = CountingScheduler::default();
        let mut frame_loop = FrameLoop::new();
        frame_loop.start(&mut sched);
        assert_eq!(sched.outstanding, 1);
    }

    #[test]
    fn frames_rearm_while_running() {
        let mut sched = CountingScheduler::default();
        let mut frame_loop = FrameLoop::new();
        frame_loop.start(&mut sched);
        for _ in 0..10 {
            assert!(sched.fire(&mut frame_loop));
            assert_eq!(sched.outstanding, 1);
        }
        assert_eq!(sched.total_requests, 11);
    }

    #[test]
    fn hide_retracts_pending_frame() {
        let mut sched = CountingScheduler::default();
        let mut frame_loop = FrameLoop::new();
        frame_loop.start(&mut sched);
        frame_loop.set_visible(false, &mut sched);
        assert_eq!(sched.outstanding, 0);
        assert_eq!(frame_loop.state(), LoopState::Paused);
    }

    #[test]
    fn toggle_cycle_keeps_single_frame() {
        let mut sched = CountingScheduler::default();
        let mut frame_loop = FrameLoop::new();
        frame_loop.start(&mut sched);

        for _ in 0..50 {
            frame_loop.set_visible(false, &mut sched);
            frame_loop.set_visible(true, &mut sched);
            assert_eq!(sched.outstanding, 1, "duplicate or orphaned loop");
        }
        assert!(sched.fire(&mut frame_loop));
        assert_eq!(sched.outstanding, 1);
    }

    #[test]
    fn frame_delivered_after_pause_is_dropped() {
        // Host cannot cancel: simulate by pausing without retracting.
        struct NoCancel(usize);
        impl FrameScheduler for NoCancel {
            fn request_frame(&mut self) {
                self.0 += 1;
            }
            fn cancel_frame(&mut self) {}
        }

        let mut sched = NoCancel(0);
        let mut frame_loop = FrameLoop::new();
        frame_loop.start(&mut sched);
        frame_loop.set_visible(false, &mut sched);
        // The stale frame arrives anyway; it must not run or re-arm.
        assert!(!frame_loop.begin_frame(&mut sched));
        assert_eq!(sched.0, 1);
    }

    #[test]
    fn redundant_visibility_events_are_idempotent() {
        let mut sched = CountingScheduler::default();
        let mut frame_loop = FrameLoop::new();
        frame_loop.start(&mut sched);
        frame_loop.set_visible(true, &mut sched);
        frame_loop.set_visible(true, &mut sched);
        assert_eq!(sched.outstanding, 1);
        frame_loop.set_visible(false, &mut sched);
        frame_loop.set_visible(false, &mut sched);
        assert_eq!(sched.outstanding, 0);
    }

    #[test]
    fn paused_loop_does_not_rearm_on_stale_delivery() {
        let mut sched = CountingScheduler::default();
        let mut frame_loop = FrameLoop::new();
        frame_loop.start(&mut sched);
        assert!(sched.fire(&mut frame_loop));
        frame_loop.set_visible(false, &mut sched);
        assert_eq!(sched.outstanding, 0);
        assert!(!frame_loop.begin_frame(&mut sched));
        assert_eq!(sched.outstanding, 0);
    }
}
