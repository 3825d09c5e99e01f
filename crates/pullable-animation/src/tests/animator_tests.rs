use super::*;

use pullable_core::{Runtime, RuntimeHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

const FRAME_NANOS: u64 = 16_666_667;

#[derive(Default)]
struct CountingListener {
    started: Cell<u32>,
    ended: Cell<u32>,
}

impl AnimatorListener for Rc<CountingListener> {
    fn on_animation_start(&self) {
        self.started.set(self.started.get() + 1);
    }

    fn on_animation_end(&self) {
        self.ended.set(self.ended.get() + 1);
    }
}

fn recording_animator(
    from: f32,
    to: f32,
    duration_millis: u64,
) -> (ValueAnimator, Rc<RefCell<Vec<f32>>>) {
    let samples = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&samples);
    let animator = ValueAnimator::of_float(
        from,
        to,
        AnimationSpec::linear(duration_millis),
        move |value| sink.borrow_mut().push(value),
    );
    (animator, samples)
}

fn run_frames(handle: &RuntimeHandle, frames: u32) {
    let mut time = 0;
    for _ in 0..frames {
        if !handle.needs_frame() {
            break;
        }
        handle.drain_frame_callbacks(time);
        time += FRAME_NANOS;
    }
}

#[test]
fn value_at_interpolates_linearly() {
    let animator = ValueAnimator::of_float(1.0, 0.0, AnimationSpec::linear(300), |_| {});
    assert_eq!(animator.value_at(0), Some(1.0));
    assert_eq!(animator.value_at(150_000_000), Some(0.5));
    assert_eq!(animator.value_at(400_000_000), Some(0.0));
}

#[test]
fn set_plays_animators_together_and_ends_once() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let listener = Rc::new(CountingListener::default());

    let (fast, fast_samples) = recording_animator(0.0, 10.0, 100);
    let (slow, slow_samples) = recording_animator(1.0, 0.0, 300);
    let animation = AnimatorSet::play_together([fast, slow])
        .add_listener(Rc::clone(&listener))
        .start(&handle.frame_clock());

    assert!(animation.is_running());
    assert_eq!(listener.started.get(), 1);

    run_frames(&handle, 64);

    assert!(!animation.is_running());
    assert_eq!(listener.ended.get(), 1);
    assert_eq!(fast_samples.borrow().first().copied(), Some(0.0));
    assert_eq!(fast_samples.borrow().last().copied(), Some(10.0));
    assert_eq!(slow_samples.borrow().last().copied(), Some(0.0));
    assert!(slow_samples.borrow().len() > fast_samples.borrow().len() / 2);
    assert!(slow_samples
        .borrow()
        .iter()
        .any(|value| *value > 0.0 && *value < 1.0));
}

#[test]
fn empty_set_ends_on_first_frame() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let listener = Rc::new(CountingListener::default());

    let set = AnimatorSet::play_together(Vec::<ValueAnimator>::new());
    assert!(set.is_empty());
    let animation = set
        .add_listener(Rc::clone(&listener))
        .start(&handle.frame_clock());

    handle.drain_frame_callbacks(0);
    assert!(!animation.is_running());
    assert_eq!(listener.ended.get(), 1);
}

#[test]
fn end_jumps_to_final_values_and_notifies() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let listener = Rc::new(CountingListener::default());

    let (animator, samples) = recording_animator(0.0, 50.0, 300);
    let animation = AnimatorSet::play_together([animator])
        .add_listener(Rc::clone(&listener))
        .start(&handle.frame_clock());
    handle.drain_frame_callbacks(0);
    handle.drain_frame_callbacks(FRAME_NANOS);

    animation.end();
    animation.end();

    assert_eq!(samples.borrow().last().copied(), Some(50.0));
    assert_eq!(listener.ended.get(), 1);
    assert!(!handle.has_frame_callbacks());
}

#[test]
fn cancel_stops_without_notifying() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let listener = Rc::new(CountingListener::default());

    let (animator, samples) = recording_animator(0.0, 50.0, 300);
    let animation = AnimatorSet::play_together([animator])
        .add_listener(Rc::clone(&listener))
        .start(&handle.frame_clock());
    animation.cancel();
    run_frames(&handle, 8);

    assert!(!animation.is_running());
    assert!(samples.borrow().is_empty());
    assert_eq!(listener.ended.get(), 0);
}
