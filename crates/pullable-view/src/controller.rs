//! Pull gesture state machine.
//!
//! The host feeds pointer events in two passes, the way a view container
//! sees them: [`PullableController::on_intercept_touch_event`] while a child
//! may still own the gesture, then [`PullableController::on_touch_event`]
//! once the controller has taken it over. Releases resolve into a reset or
//! snap animation played on the controller's [`FrameClock`].
//!
//! The controller is a cheap `Rc` handle; clones share state, which lets
//! listener callbacks call back into it (for example `reset_animated` from
//! `on_snap`).

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use pullable_animation::{AnimationHandle, AnimatorListener, AnimatorSet, ValueAnimator};
use pullable_core::FrameClock;
use pullable_foundation::gestures::{is_within_limit, resolve_release};
use pullable_foundation::{DragGesture, PointerEvent, PointerEventKind, ReleaseOutcome};

use crate::{BoundElement, PullListener, PullableConfig, PullableError, PullableLayout};

/// Where the controller is in a gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PullPhase {
    /// No pointer down.
    Idle,
    /// Pointer down; waiting for a move that qualifies as a pull.
    Tracking,
    /// Consuming the gesture; moves drive the bound elements.
    Dragging,
    /// A reset or snap animation is in flight.
    Resolving,
}

struct ControllerInner {
    clock: FrameClock,
    config: Cell<PullableConfig>,
    layout: Cell<Option<PullableLayout>>,
    bound_elements: RefCell<Vec<BoundElement>>,
    listener: RefCell<Option<Rc<dyn PullListener>>>,
    gesture: Cell<DragGesture>,
    phase: Cell<PullPhase>,
    animation_running: Cell<bool>,
    snapped: Cell<bool>,
    animation: RefCell<Option<AnimationHandle>>,
}

#[derive(Clone)]
pub struct PullableController {
    inner: Rc<ControllerInner>,
}

impl PullableController {
    pub fn new(clock: FrameClock, config: PullableConfig) -> Self {
        Self {
            inner: Rc::new(ControllerInner {
                clock,
                config: Cell::new(config),
                layout: Cell::new(None),
                bound_elements: RefCell::new(Vec::new()),
                listener: RefCell::new(None),
                gesture: Cell::new(DragGesture::new()),
                phase: Cell::new(PullPhase::Idle),
                animation_running: Cell::new(false),
                snapped: Cell::new(false),
                animation: RefCell::new(None),
            }),
        }
    }

    pub fn with_bound_element(self, bound_element: BoundElement) -> Self {
        self.add_bound_element(bound_element);
        self
    }

    pub fn with_listener(self, listener: Rc<dyn PullListener>) -> Self {
        self.set_listener(listener);
        self
    }

    pub fn config(&self) -> PullableConfig {
        self.inner.config.get()
    }

    pub fn set_config(&self, config: PullableConfig) {
        self.inner.config.set(config);
    }

    pub fn layout(&self) -> Option<PullableLayout> {
        self.inner.layout.get()
    }

    /// Supplies the geometry computed by the host's layout pass. Called again
    /// on every re-layout.
    pub fn on_layout(&self, layout: PullableLayout) -> Result<(), PullableError> {
        layout.validate()?;
        log::debug!(
            "on_layout: {} {} {}",
            layout.start_area,
            layout.scroll_offset_limit,
            layout.scroll_offset_threshold
        );
        self.inner.layout.set(Some(layout));
        Ok(())
    }

    pub fn set_bound_elements(&self, bound_elements: Vec<BoundElement>) {
        *self.inner.bound_elements.borrow_mut() = bound_elements;
    }

    pub fn add_bound_element(&self, bound_element: BoundElement) {
        self.inner.bound_elements.borrow_mut().push(bound_element);
    }

    pub fn bound_element_count(&self) -> usize {
        self.inner.bound_elements.borrow().len()
    }

    pub fn set_listener(&self, listener: Rc<dyn PullListener>) {
        *self.inner.listener.borrow_mut() = Some(listener);
    }

    pub fn clear_listener(&self) {
        self.inner.listener.borrow_mut().take();
    }

    pub fn phase(&self) -> PullPhase {
        self.inner.phase.get()
    }

    pub fn is_snapped(&self) -> bool {
        self.inner.snapped.get()
    }

    pub fn is_animation_running(&self) -> bool {
        self.inner.animation_running.get()
    }

    /// Whether a new gesture may be accepted: no terminal animation in
    /// flight, not locked in the snapped state, and the listener agrees.
    pub fn is_pullable(&self) -> bool {
        let inner = &self.inner;
        let locked = inner.config.get().lock_on_snap && inner.snapped.get();
        let listener_allows = self
            .listener()
            .map_or(true, |listener| listener.is_pullable());
        let pullable = !inner.animation_running.get() && !locked && listener_allows;
        log::debug!("is_pullable={}", pullable);
        pullable
    }

    /// Watches events on their way to children. Returns `true` exactly once,
    /// on the move that turns the gesture into a pull; route the rest of the
    /// gesture to [`on_touch_event`](Self::on_touch_event) from then on.
    pub fn on_intercept_touch_event(&self, event: &PointerEvent) -> Result<bool, PullableError> {
        if !self.is_pullable() {
            return Ok(false);
        }

        match event.kind {
            PointerEventKind::Down => {
                self.on_down(event);
                Ok(false)
            }
            PointerEventKind::Move => {
                if self.phase() != PullPhase::Tracking {
                    return Ok(false);
                }
                let consumed = self.try_start_pull(event, "on_intercept_touch_event")?;
                Ok(consumed)
            }
            PointerEventKind::Up | PointerEventKind::Cancel => {
                if self.phase() == PullPhase::Tracking {
                    self.inner.phase.set(PullPhase::Idle);
                }
                Ok(false)
            }
        }
    }

    /// Handles events the controller receives directly. Returns `true` while
    /// the gesture is being consumed.
    pub fn on_touch_event(&self, event: &PointerEvent) -> Result<bool, PullableError> {
        if !self.is_pullable() {
            return Ok(false);
        }

        let consumed = match event.kind {
            PointerEventKind::Down => {
                let layout = self.require_layout("on_touch_event")?;
                self.on_down(event);
                layout.start_area.in_bounds(event.raw_x(), event.raw_y())
            }
            PointerEventKind::Move => match self.phase() {
                PullPhase::Dragging => {
                    let layout = self.require_layout("on_touch_event")?;
                    self.on_drag(event, layout);
                    true
                }
                PullPhase::Tracking => self.try_start_pull(event, "on_touch_event")?,
                PullPhase::Idle | PullPhase::Resolving => false,
            },
            PointerEventKind::Up | PointerEventKind::Cancel => match self.phase() {
                PullPhase::Dragging => {
                    let layout = self.require_layout("on_touch_event")?;
                    self.on_release(event, layout)?;
                    true
                }
                PullPhase::Tracking => {
                    self.inner.phase.set(PullPhase::Idle);
                    false
                }
                PullPhase::Idle | PullPhase::Resolving => false,
            },
        };

        if consumed {
            event.consume();
        }
        Ok(consumed)
    }

    /// Animates every bound element back to its pre-gesture value, then
    /// notifies `on_reset`. No-op while a terminal animation is running.
    pub fn reset_animated(&self) -> Result<(), PullableError> {
        log::debug!(
            "reset_animated: animation_running={}",
            self.inner.animation_running.get()
        );
        if self.inner.animation_running.get() {
            return Ok(());
        }
        let layout = self.require_layout("reset_animated")?;
        self.start_terminal_animation(layout, ReleaseOutcome::Reset);
        Ok(())
    }

    /// Animates every bound element out to its limit value, then notifies
    /// `on_snap`. No-op while a terminal animation is running.
    pub fn snap(&self) -> Result<(), PullableError> {
        log::debug!(
            "snap: animation_running={}",
            self.inner.animation_running.get()
        );
        if self.inner.animation_running.get() {
            return Ok(());
        }
        let layout = self.require_layout("snap")?;
        self.start_terminal_animation(layout, ReleaseOutcome::Snap);
        Ok(())
    }

    /// Puts every bound element back at offset zero without animating and
    /// notifies `on_reset` before returning.
    pub fn reset_immediate(&self) -> Result<(), PullableError> {
        log::debug!(
            "reset_immediate: animation_running={}",
            self.inner.animation_running.get()
        );
        if self.inner.animation_running.get() {
            return Ok(());
        }
        let layout = self.require_layout("reset_immediate")?;
        for bound in self.inner.bound_elements.borrow().iter() {
            bound.transform(0, layout.scroll_offset_limit);
            bound.set_clickable(true);
        }
        self.inner.snapped.set(false);
        self.inner.phase.set(PullPhase::Idle);
        if let Some(listener) = self.listener() {
            listener.on_reset();
        }
        Ok(())
    }

    /// Completes the in-flight terminal animation now: elements jump to its
    /// end values and the usual completion callback fires.
    pub fn end_animation(&self) {
        let handle = self.inner.animation.borrow().clone();
        if let Some(handle) = handle {
            handle.end();
        }
    }

    fn listener(&self) -> Option<Rc<dyn PullListener>> {
        self.inner.listener.borrow().clone()
    }

    fn require_layout(&self, operation: &'static str) -> Result<PullableLayout, PullableError> {
        self.inner.layout.get().ok_or_else(|| {
            log::warn!("{} called before on_layout", operation);
            PullableError::NotLaidOut { operation }
        })
    }

    fn on_down(&self, event: &PointerEvent) {
        let mut gesture = self.inner.gesture.get();
        gesture.on_down(event.raw_x(), event.raw_y());
        self.inner.gesture.set(gesture);
        self.inner.phase.set(PullPhase::Tracking);
        log::debug!("on_down: down=({}, {})", event.raw_x(), event.raw_y());
    }

    fn try_start_pull(
        &self,
        event: &PointerEvent,
        operation: &'static str,
    ) -> Result<bool, PullableError> {
        let layout = self.require_layout(operation)?;
        let config = self.inner.config.get();
        let qualifies = self.inner.gesture.get().qualifies(
            event,
            layout.start_area,
            config.direction,
            config.touch_slop,
            config.vertical_ratio,
        );
        if !qualifies {
            return Ok(false);
        }

        log::debug!("consuming move");
        self.inner.phase.set(PullPhase::Dragging);
        event.consume();
        if let Some(listener) = self.listener() {
            listener.on_pull_start();
        }
        Ok(true)
    }

    fn on_drag(&self, event: &PointerEvent, layout: PullableLayout) {
        let offset = self.inner.gesture.get().offset_y(event.raw_y());
        let direction = self.inner.config.get().direction;
        let limit = layout.scroll_offset_limit;
        log::debug!("on_drag: offset={} direction={} {}", offset, direction, limit);
        if !is_within_limit(offset, direction, limit) {
            return;
        }
        for bound in self.inner.bound_elements.borrow().iter() {
            bound.transform(offset, limit);
        }
    }

    fn on_release(&self, event: &PointerEvent, layout: PullableLayout) -> Result<(), PullableError> {
        let offset = self.inner.gesture.get().offset_y(event.raw_y());
        let outcome = match event.kind {
            PointerEventKind::Cancel => ReleaseOutcome::Reset,
            _ => resolve_release(
                offset,
                self.inner.config.get().direction,
                layout.scroll_offset_threshold,
            ),
        };
        log::debug!(
            "on_release: offset={} {} -> {:?}",
            offset,
            layout.scroll_offset_threshold,
            outcome
        );
        match outcome {
            ReleaseOutcome::Snap => self.snap(),
            ReleaseOutcome::Reset => self.reset_animated(),
        }
    }

    fn start_terminal_animation(&self, layout: PullableLayout, outcome: ReleaseOutcome) {
        let inner = &self.inner;
        inner.animation_running.set(true);
        inner.phase.set(PullPhase::Resolving);

        let progress = match outcome {
            ReleaseOutcome::Reset => 0.0,
            ReleaseOutcome::Snap => 1.0,
        };
        let spec = inner.config.get().animation_spec;
        let animators: Vec<ValueAnimator> = {
            let bound_elements = inner.bound_elements.borrow();
            for bound in bound_elements.iter() {
                bound.set_clickable(false);
            }
            bound_elements
                .iter()
                .flat_map(|bound| bound.animators(layout.scroll_offset_limit, progress, spec))
                .collect()
        };

        let listener = TerminalAnimationListener {
            controller: Rc::downgrade(inner),
            outcome,
        };
        let handle = AnimatorSet::play_together(animators)
            .add_listener(listener)
            .start(&inner.clock);
        *inner.animation.borrow_mut() = Some(handle);
    }

    fn finish_terminal_animation(&self, outcome: ReleaseOutcome) {
        let inner = &self.inner;
        for bound in inner.bound_elements.borrow().iter() {
            bound.set_clickable(true);
        }
        inner.animation.borrow_mut().take();
        inner.animation_running.set(false);
        inner.phase.set(PullPhase::Idle);
        inner.snapped.set(outcome == ReleaseOutcome::Snap);

        if let Some(listener) = self.listener() {
            match outcome {
                ReleaseOutcome::Reset => listener.on_reset(),
                ReleaseOutcome::Snap => listener.on_snap(),
            }
        }
    }
}

impl fmt::Debug for PullableController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PullableController")
            .field("config", &self.inner.config.get())
            .field("layout", &self.inner.layout.get())
            .field("phase", &self.inner.phase.get())
            .field("animation_running", &self.inner.animation_running.get())
            .field("snapped", &self.inner.snapped.get())
            .finish()
    }
}

struct TerminalAnimationListener {
    controller: Weak<ControllerInner>,
    outcome: ReleaseOutcome,
}

impl AnimatorListener for TerminalAnimationListener {
    fn on_animation_start(&self) {
        log::debug!("{:?} animation start", self.outcome);
    }

    fn on_animation_end(&self) {
        log::debug!("{:?} animation end", self.outcome);
        if let Some(inner) = self.controller.upgrade() {
            PullableController { inner }.finish_terminal_animation(self.outcome);
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
