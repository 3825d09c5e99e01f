//! Robot-style driver for a [`PullableController`].
//!
//! The robot plays the part of the host view container: it routes pointer
//! events through the intercept pass until the controller claims the
//! gesture, then straight to `on_touch_event`, and it owns the frame loop
//! that drives terminal animations.
//!
//! # Example
//!
//! ```
//! use pullable_testing::PullRobot;
//! use pullable_view::{
//!     PullableConfig, PullableLayout, ScrollOffsetLimit, ScrollOffsetThreshold, StartArea,
//! };
//!
//! let mut robot = PullRobot::new(PullableConfig::default());
//! robot
//!     .layout(PullableLayout::new(
//!         StartArea::new(0, 0, 400, 400),
//!         ScrollOffsetLimit::new(-200, 200),
//!         ScrollOffsetThreshold::new(-100, 100),
//!     ))
//!     .unwrap();
//!
//! robot.drag(200.0, 200.0, 200.0, 350.0).unwrap();
//! robot.wait_for_idle();
//! assert!(robot.controller().is_snapped());
//! ```

use pullable_core::{FrameClock, Runtime, RuntimeHandle};
use pullable_ui_graphics::Point;
use pullable_view::{
    PointerEvent, PointerEventKind, PullableConfig, PullableController, PullableError,
    PullableLayout,
};

/// One frame at 60 Hz.
pub const FRAME_INTERVAL_NANOS: u64 = 16_666_667;

const MAX_IDLE_FRAMES: usize = 1_000;

pub struct PullRobot {
    runtime: Runtime,
    controller: PullableController,
    frame_time_nanos: u64,
    pointer: Option<Point>,
    intercepted: bool,
    child_handles_touches: bool,
}

impl PullRobot {
    /// Creates a controller on a fresh runtime. Call
    /// [`layout`](Self::layout) before sending events.
    pub fn new(config: PullableConfig) -> Self {
        let runtime = Runtime::new();
        let controller = PullableController::new(runtime.handle().frame_clock(), config);
        Self {
            runtime,
            controller,
            frame_time_nanos: 0,
            pointer: None,
            intercepted: false,
            child_handles_touches: true,
        }
    }

    pub fn controller(&self) -> &PullableController {
        &self.controller
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn frame_clock(&self) -> FrameClock {
        self.runtime.handle().frame_clock()
    }

    pub fn frame_time_nanos(&self) -> u64 {
        self.frame_time_nanos
    }

    pub fn layout(&mut self, layout: PullableLayout) -> Result<(), PullableError> {
        self.controller.on_layout(layout)
    }

    /// With `false`, no child claims the press, so events reach
    /// `on_touch_event` without the intercept pass.
    pub fn set_child_handles_touches(&mut self, handles: bool) {
        self.child_handles_touches = handles;
    }

    /// Whether the controller has claimed the current gesture.
    pub fn is_intercepted(&self) -> bool {
        self.intercepted
    }

    /// Routes `event` the way a view container would. Returns whether the
    /// controller consumed it.
    pub fn dispatch(&mut self, event: PointerEvent) -> Result<bool, PullableError> {
        if event.kind == PointerEventKind::Down {
            self.intercepted = !self.child_handles_touches;
        }
        let consumed = if self.intercepted {
            self.controller.on_touch_event(&event)?
        } else {
            let claimed = self.controller.on_intercept_touch_event(&event)?;
            self.intercepted = claimed;
            claimed
        };
        match event.kind {
            PointerEventKind::Up | PointerEventKind::Cancel => {
                self.pointer = None;
                self.intercepted = false;
            }
            PointerEventKind::Down | PointerEventKind::Move => {
                self.pointer = Some(event.global_position);
            }
        }
        log::trace!("dispatch {:?} -> consumed={}", event.kind, consumed);
        Ok(consumed)
    }

    pub fn press(&mut self, x: f32, y: f32) -> Result<bool, PullableError> {
        self.dispatch(PointerEvent::down(x, y))
    }

    pub fn move_to(&mut self, x: f32, y: f32) -> Result<bool, PullableError> {
        self.dispatch(PointerEvent::moved(x, y))
    }

    /// Lifts the pointer where it last was.
    pub fn release(&mut self) -> Result<bool, PullableError> {
        let at = self.pointer.unwrap_or_default();
        self.dispatch(PointerEvent::up(at.x, at.y))
    }

    pub fn cancel(&mut self) -> Result<bool, PullableError> {
        let at = self.pointer.unwrap_or_default();
        self.dispatch(PointerEvent::cancel(at.x, at.y))
    }

    /// Presses at the start point and moves to the end point in ten steps,
    /// leaving the pointer down.
    pub fn drag_and_hold(
        &mut self,
        from_x: f32,
        from_y: f32,
        to_x: f32,
        to_y: f32,
    ) -> Result<(), PullableError> {
        self.press(from_x, from_y)?;
        let steps = 10;
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            let x = from_x + (to_x - from_x) * t;
            let y = from_y + (to_y - from_y) * t;
            self.move_to(x, y)?;
        }
        Ok(())
    }

    /// Press, move, and release.
    pub fn drag(
        &mut self,
        from_x: f32,
        from_y: f32,
        to_x: f32,
        to_y: f32,
    ) -> Result<(), PullableError> {
        self.drag_and_hold(from_x, from_y, to_x, to_y)?;
        self.release()?;
        Ok(())
    }

    /// Advances the clock one frame and runs due callbacks.
    pub fn advance_frame(&mut self) {
        self.frame_time_nanos += FRAME_INTERVAL_NANOS;
        self.runtime
            .handle()
            .drain_frame_callbacks(self.frame_time_nanos);
    }

    /// Runs frames until at least `millis` of frame time has passed.
    pub fn advance_time(&mut self, millis: u64) {
        let target = self.frame_time_nanos + millis * pullable_core::NANOS_PER_MILLI;
        while self.frame_time_nanos < target {
            self.advance_frame();
        }
    }

    /// Runs frames until nothing is scheduled. Returns the number of frames.
    ///
    /// Panics if work is still scheduled after a large number of frames,
    /// which usually means an animation restarts itself forever.
    pub fn wait_for_idle(&mut self) -> usize {
        let handle = self.runtime.handle();
        for frames in 0..MAX_IDLE_FRAMES {
            if !handle.needs_frame() {
                return frames;
            }
            self.advance_frame();
        }
        panic!("still busy after {MAX_IDLE_FRAMES} frames");
    }
}
