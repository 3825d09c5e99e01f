//! The sample screen: a pullable panel plus two elements bound to it.

use std::cell::RefCell;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use pullable_core::{FrameCallbackRegistration, FrameClock, Runtime, NANOS_PER_MILLI};
use pullable_view::prelude::*;
use pullable_view::{IntRect, LayoutOverrides, PointerEvent, PullableError};
use web_time::Instant;

pub const SCREEN_HEIGHT: i32 = 1280;
pub const PANEL_BOUNDS: IntRect = IntRect::new(0, 300, 720, 500);
pub const RESET_DELAY_MILLIS: u64 = 3000;
pub const FRAME_INTERVAL: Duration = Duration::from_nanos(16_666_667);

/// Logs every callback and brings the panel back a while after it snaps.
struct SampleListener {
    controller: RefCell<Option<PullableController>>,
    clock: FrameClock,
    pending_reset: RefCell<Option<FrameCallbackRegistration>>,
}

impl PullListener for SampleListener {
    fn on_pull_start(&self) {
        log::info!("onPullStart");
    }

    fn on_reset(&self) {
        log::info!("onReset");
    }

    fn on_snap(&self) {
        log::info!("onSnap, resetting in {} ms", RESET_DELAY_MILLIS);
        let Some(controller) = self.controller.borrow().clone() else {
            return;
        };
        let registration = self.clock.post_delayed(RESET_DELAY_MILLIS, move || {
            if let Err(err) = controller.reset_animated() {
                log::warn!("delayed reset failed: {}", err);
            }
        });
        *self.pending_reset.borrow_mut() = Some(registration);
    }
}

pub struct SampleScreen {
    runtime: Runtime,
    controller: PullableController,
    panel: Rc<LayerNode>,
    alpheable: Rc<LayerNode>,
    transleable: Rc<LayerNode>,
    listener: Rc<SampleListener>,
}

impl SampleScreen {
    pub fn new() -> Result<Self, PullableError> {
        let runtime = Runtime::new();
        let clock = runtime.handle().frame_clock();
        let controller = PullableController::new(clock.clone(), PullableConfig::default());
        controller.on_layout(PullableLayout::from_bounds(
            PANEL_BOUNDS,
            SCREEN_HEIGHT,
            LayoutOverrides::default(),
        ))?;

        let panel = Rc::new(LayerNode::new());
        let alpheable = Rc::new(LayerNode::new());
        let transleable = Rc::new(LayerNode::new());
        controller.set_bound_elements(vec![
            BoundElement::new(panel.clone()).with_transformation(TranslateTransformation::new()),
            BoundElement::new(alpheable.clone())
                .with_transformation(AlphaTransformation::default()),
            BoundElement::new(transleable.clone())
                .with_transformation(TranslateTransformation::new()),
        ]);

        let listener = Rc::new(SampleListener {
            controller: RefCell::new(Some(controller.clone())),
            clock,
            pending_reset: RefCell::new(None),
        });
        controller.set_listener(listener.clone());

        Ok(Self {
            runtime,
            controller,
            panel,
            alpheable,
            transleable,
            listener,
        })
    }

    pub fn controller(&self) -> &PullableController {
        &self.controller
    }

    pub fn panel(&self) -> &LayerNode {
        &self.panel
    }

    pub fn alpheable(&self) -> &LayerNode {
        &self.alpheable
    }

    pub fn transleable(&self) -> &LayerNode {
        &self.transleable
    }

    /// Routes `event` through the intercept pass until the controller
    /// claims the gesture.
    pub fn dispatch(
        &self,
        event: &PointerEvent,
        intercepted: &mut bool,
    ) -> Result<(), PullableError> {
        if *intercepted {
            self.controller.on_touch_event(event)?;
        } else {
            *intercepted = self.controller.on_intercept_touch_event(event)?;
        }
        Ok(())
    }

    pub fn frame(&self, frame_time_nanos: u64) {
        self.runtime
            .handle()
            .drain_frame_callbacks(frame_time_nanos);
    }

    pub fn is_idle(&self) -> bool {
        !self.runtime.handle().needs_frame()
    }

    pub fn describe(&self) -> String {
        format!(
            "panel.y={:7.1} alpheable.alpha={:.2} transleable.y={:7.1} phase={:?}",
            self.panel.translation_y(),
            self.alpheable.alpha(),
            self.transleable.translation_y(),
            self.controller.phase()
        )
    }
}

impl Drop for SampleScreen {
    fn drop(&mut self) {
        self.listener.controller.borrow_mut().take();
        self.listener.pending_reset.borrow_mut().take();
        self.controller.clear_listener();
    }
}

/// One event per frame: press in the middle of the panel, drag down in
/// even steps, then lift.
#[derive(Clone, Debug)]
pub struct ScriptedPull {
    x: f32,
    from_y: f32,
    to_y: f32,
    steps: usize,
    next: usize,
}

impl ScriptedPull {
    pub fn new(x: f32, from_y: f32, to_y: f32, steps: usize) -> Self {
        Self {
            x,
            from_y,
            to_y,
            steps: steps.max(1),
            next: 0,
        }
    }

    /// Pull from the panel's centre down to 80% of the way to the screen
    /// bottom, which crosses the snap threshold.
    pub fn past_threshold() -> Self {
        let x = (PANEL_BOUNDS.left + PANEL_BOUNDS.width() / 2) as f32;
        let from_y = (PANEL_BOUNDS.top + PANEL_BOUNDS.height() / 2) as f32;
        let travel = (SCREEN_HEIGHT - PANEL_BOUNDS.bottom) as f32 * 0.8;
        Self::new(x, from_y, from_y + travel, 24)
    }
}

impl Iterator for ScriptedPull {
    type Item = PointerEvent;

    fn next(&mut self) -> Option<PointerEvent> {
        let index = self.next;
        if index > self.steps + 1 {
            return None;
        }
        self.next += 1;
        let t = index.min(self.steps) as f32 / self.steps as f32;
        let y = self.from_y + (self.to_y - self.from_y) * t;
        Some(match index {
            0 => PointerEvent::down(self.x, y),
            i if i <= self.steps => PointerEvent::moved(self.x, y),
            _ => PointerEvent::up(self.x, y),
        })
    }
}

/// Plays `script` one event per frame, then keeps producing frames until the
/// screen is idle. `next_frame` yields the time of each frame; `on_frame`
/// sees the screen after it.
pub fn run_script(
    screen: &SampleScreen,
    script: ScriptedPull,
    mut next_frame: impl FnMut() -> u64,
    mut on_frame: impl FnMut(usize, &SampleScreen),
) -> Result<usize, PullableError> {
    let mut intercepted = false;
    let mut frames = 0;
    for event in script {
        screen.dispatch(&event, &mut intercepted)?;
        screen.frame(next_frame());
        on_frame(frames, screen);
        frames += 1;
    }
    while !screen.is_idle() {
        screen.frame(next_frame());
        on_frame(frames, screen);
        frames += 1;
    }
    Ok(frames)
}

/// Runs the scripted session at 60 FPS against the wall clock.
pub fn run_realtime() -> Result<(), PullableError> {
    let screen = SampleScreen::new()?;
    let started = Instant::now();
    println!("start: {}", screen.describe());

    let frames = run_script(
        &screen,
        ScriptedPull::past_threshold(),
        || {
            thread::sleep(FRAME_INTERVAL);
            started.elapsed().as_nanos() as u64
        },
        |frame, screen| {
            if frame % 6 == 0 {
                println!("{:8} ms  {}", frame as u64 * 1000 / 60, screen.describe());
            }
        },
    )?;

    println!("end:   {}", screen.describe());
    log::info!(
        "{} frames in {} ms",
        frames,
        started.elapsed().as_nanos() as u64 / NANOS_PER_MILLI
    );
    Ok(())
}

#[cfg(test)]
#[path = "tests/sample_tests.rs"]
mod tests;
