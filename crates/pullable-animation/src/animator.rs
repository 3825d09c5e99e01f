//! Value animators and animator sets.
//!
//! A [`ValueAnimator`] tweens one `f32` and pushes every sample into an
//! update closure. An [`AnimatorSet`] plays several animators together on a
//! [`FrameClock`] and notifies its listeners once when the slowest one ends.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use pullable_core::{FrameCallbackRegistration, FrameClock};
use smallvec::SmallVec;

use crate::{AnimationSpec, Lerp};

/// Receives lifecycle notifications from an [`AnimatorSet`].
pub trait AnimatorListener {
    fn on_animation_start(&self) {}
    fn on_animation_end(&self) {}
}

/// Tween of a single scalar from `from` to `to`.
pub struct ValueAnimator {
    from: f32,
    to: f32,
    spec: AnimationSpec,
    update: Box<dyn FnMut(f32)>,
}

impl ValueAnimator {
    pub fn of_float(
        from: f32,
        to: f32,
        spec: AnimationSpec,
        update: impl FnMut(f32) + 'static,
    ) -> Self {
        Self {
            from,
            to,
            spec,
            update: Box::new(update),
        }
    }

    pub fn from_value(&self) -> f32 {
        self.from
    }

    pub fn to_value(&self) -> f32 {
        self.to
    }

    pub fn spec(&self) -> AnimationSpec {
        self.spec
    }

    /// Value the animator reports after `elapsed_nanos`, or `None` while delayed.
    pub fn value_at(&self, elapsed_nanos: u64) -> Option<f32> {
        let (progress, finished) = self.spec.progress_at(elapsed_nanos);
        if finished {
            return Some(self.to);
        }
        progress.map(|progress| self.from.lerp(&self.to, progress))
    }

    /// Pushes the sample for `elapsed_nanos`; returns `true` once finished.
    fn seek(&mut self, elapsed_nanos: u64) -> bool {
        let (_, finished) = self.spec.progress_at(elapsed_nanos);
        if let Some(value) = self.value_at(elapsed_nanos) {
            (self.update)(value);
        }
        finished
    }

    fn finish(&mut self) {
        (self.update)(self.to);
    }
}

impl fmt::Debug for ValueAnimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueAnimator")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("spec", &self.spec)
            .finish()
    }
}

/// Animators that start on the same frame and end as a group.
#[derive(Default)]
pub struct AnimatorSet {
    animators: Vec<ValueAnimator>,
    listeners: SmallVec<[Rc<dyn AnimatorListener>; 2]>,
}

impl AnimatorSet {
    pub fn play_together(animators: impl IntoIterator<Item = ValueAnimator>) -> Self {
        Self {
            animators: animators.into_iter().collect(),
            listeners: SmallVec::new(),
        }
    }

    pub fn add_listener(mut self, listener: impl AnimatorListener + 'static) -> Self {
        self.listeners.push(Rc::new(listener));
        self
    }

    pub fn len(&self) -> usize {
        self.animators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animators.is_empty()
    }

    pub fn animators(&self) -> &[ValueAnimator] {
        &self.animators
    }

    /// Starts the set on `clock`. Listeners see `on_animation_start`
    /// before this returns; the first sample is written on the next frame.
    pub fn start(self, clock: &FrameClock) -> AnimationHandle {
        let listeners = self.listeners.clone();
        let inner = Rc::new(RefCell::new(AnimatorSetInner {
            animators: self.animators,
            listeners: self.listeners,
            clock: clock.clone(),
            start_time_nanos: None,
            registration: None,
            state: RunState::Running,
        }));
        log::trace!(
            "AnimatorSet::start: {} animators",
            inner.borrow().animators.len()
        );
        for listener in &listeners {
            listener.on_animation_start();
        }
        AnimationHandle::schedule_frame(&inner);
        AnimationHandle { inner }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RunState {
    Running,
    Ended,
    Cancelled,
}

struct AnimatorSetInner {
    animators: Vec<ValueAnimator>,
    listeners: SmallVec<[Rc<dyn AnimatorListener>; 2]>,
    clock: FrameClock,
    start_time_nanos: Option<u64>,
    registration: Option<FrameCallbackRegistration>,
    state: RunState,
}

/// Handle to a started [`AnimatorSet`].
#[derive(Clone)]
pub struct AnimationHandle {
    inner: Rc<RefCell<AnimatorSetInner>>,
}

impl AnimationHandle {
    pub fn is_running(&self) -> bool {
        self.inner.borrow().state == RunState::Running
    }

    /// Jumps every animator to its end value and notifies `on_animation_end`.
    /// No-op unless running.
    pub fn end(&self) {
        let listeners = {
            let mut inner = self.inner.borrow_mut();
            if inner.state != RunState::Running {
                return;
            }
            inner.state = RunState::Ended;
            if let Some(registration) = inner.registration.take() {
                registration.cancel();
            }
            for animator in inner.animators.iter_mut() {
                animator.finish();
            }
            inner.listeners.clone()
        };
        log::trace!("AnimationHandle::end");
        for listener in &listeners {
            listener.on_animation_end();
        }
    }

    /// Stops without writing end values or notifying listeners.
    pub fn cancel(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.state != RunState::Running {
            return;
        }
        inner.state = RunState::Cancelled;
        if let Some(registration) = inner.registration.take() {
            registration.cancel();
        }
    }

    fn schedule_frame(this: &Rc<RefCell<AnimatorSetInner>>) {
        let clock = {
            let inner = this.borrow();
            if inner.registration.is_some() || inner.state != RunState::Running {
                return;
            }
            inner.clock.clone()
        };
        let weak = Rc::downgrade(this);
        let registration = clock.with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time);
            }
        });
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<RefCell<AnimatorSetInner>>, frame_time_nanos: u64) {
        let finished_listeners = {
            let mut guard = this.borrow_mut();
            let inner = &mut *guard;
            inner.registration = None;
            if inner.state != RunState::Running {
                return;
            }

            let start_time = *inner.start_time_nanos.get_or_insert(frame_time_nanos);
            let elapsed_nanos = frame_time_nanos.saturating_sub(start_time);

            let mut all_finished = true;
            for animator in inner.animators.iter_mut() {
                if !animator.seek(elapsed_nanos) {
                    all_finished = false;
                }
            }
            log::trace!(
                "AnimatorSet frame: elapsed={}ns finished={}",
                elapsed_nanos,
                all_finished
            );

            if all_finished {
                inner.state = RunState::Ended;
                Some(inner.listeners.clone())
            } else {
                None
            }
        };

        match finished_listeners {
            Some(listeners) => {
                for listener in &listeners {
                    listener.on_animation_end();
                }
            }
            None => Self::schedule_frame(this),
        }
    }
}

#[cfg(test)]
#[path = "tests/animator_tests.rs"]
mod animator_tests;
