use super::*;
use crate::{
    AlphaTransformation, Direction, LayerNode, PullEvent, TranslateTransformation, VisualElement,
};
use pullable_animation::AnimationSpec;
use pullable_core::Runtime;
use pullable_ui_graphics::{ScrollOffsetLimit, ScrollOffsetThreshold, StartArea};

const FRAME_NANOS: u64 = 16_666_667;
const X: f32 = 500.0;

struct Fixture {
    runtime: Runtime,
    controller: PullableController,
    panel: Rc<LayerNode>,
    events: Rc<RefCell<Vec<PullEvent>>>,
    time: Cell<u64>,
}

fn layout() -> PullableLayout {
    PullableLayout::new(
        StartArea::new(0, 0, 1000, 1000),
        ScrollOffsetLimit::new(-100, 100),
        ScrollOffsetThreshold::new(-50, 50),
    )
}

fn fixture(config: PullableConfig) -> Fixture {
    let runtime = Runtime::new();
    let controller = PullableController::new(runtime.handle().frame_clock(), config);
    controller.on_layout(layout()).expect("valid layout");

    let panel = Rc::new(LayerNode::new());
    controller.add_bound_element(
        BoundElement::new(panel.clone())
            .with_transformation(TranslateTransformation::new())
            .with_transformation(AlphaTransformation::default()),
    );
    let events = Rc::new(RefCell::new(Vec::new()));
    controller.set_listener(events.clone());

    Fixture {
        runtime,
        controller,
        panel,
        events,
        time: Cell::new(0),
    }
}

impl Fixture {
    /// Presses at `from_y`, crosses the slop in the direction of `to_y`, then
    /// moves to `to_y`. Leaves the pointer down.
    fn drag(&self, from_y: f32, to_y: f32) -> bool {
        let c = &self.controller;
        assert!(!c.on_intercept_touch_event(&PointerEvent::down(X, from_y)).unwrap());
        let step = if to_y < from_y { -10.0 } else { 10.0 };
        let intercepted = c
            .on_intercept_touch_event(&PointerEvent::moved(X, from_y + step))
            .unwrap();
        if intercepted {
            assert!(c.on_touch_event(&PointerEvent::moved(X, to_y)).unwrap());
        }
        intercepted
    }

    fn release(&self, y: f32) -> bool {
        self.controller
            .on_touch_event(&PointerEvent::up(X, y))
            .unwrap()
    }

    fn frame(&self) {
        let time = self.time.get() + FRAME_NANOS;
        self.time.set(time);
        self.runtime.handle().drain_frame_callbacks(time);
    }

    fn settle(&self) {
        for _ in 0..200 {
            if !self.runtime.handle().needs_frame() {
                return;
            }
            self.frame();
        }
        panic!("frames never settled");
    }

    fn events(&self) -> Vec<PullEvent> {
        self.events.borrow().clone()
    }
}

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-3,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn short_pull_up_resets() {
    let f = fixture(PullableConfig::default());
    assert!(f.drag(500.0, 470.0));
    assert_eq!(f.controller.phase(), PullPhase::Dragging);
    assert_close(f.panel.translation_y(), -30.0);

    assert!(f.release(470.0));
    assert_eq!(f.controller.phase(), PullPhase::Resolving);
    assert!(f.controller.is_animation_running());
    f.settle();

    assert_eq!(f.events(), vec![PullEvent::PullStart, PullEvent::Reset]);
    assert_close(f.panel.translation_y(), 0.0);
    assert_close(f.panel.alpha(), 1.0);
    assert!(!f.controller.is_snapped());
    assert_eq!(f.controller.phase(), PullPhase::Idle);
}

#[test]
fn long_pull_down_snaps_to_limit() {
    let f = fixture(PullableConfig::default());
    assert!(f.drag(500.0, 570.0));
    assert_close(f.panel.translation_y(), 70.0);
    assert_close(f.panel.alpha(), 0.3);

    f.release(570.0);
    f.settle();

    assert_eq!(f.events(), vec![PullEvent::PullStart, PullEvent::Snap]);
    assert_close(f.panel.translation_y(), 100.0);
    assert_close(f.panel.alpha(), 0.0);
    assert!(f.controller.is_snapped());
}

#[test]
fn release_exactly_on_threshold_resets() {
    let f = fixture(PullableConfig::default());
    f.drag(500.0, 550.0);
    f.release(550.0);
    f.settle();
    assert_eq!(f.events(), vec![PullEvent::PullStart, PullEvent::Reset]);
}

#[test]
fn up_only_ignores_downward_pull() {
    let f = fixture(PullableConfig::default().with_direction(Direction::Up));
    let c = &f.controller;
    c.on_intercept_touch_event(&PointerEvent::down(X, 500.0))
        .unwrap();
    let event = PointerEvent::moved(X, 580.0);
    assert!(!c.on_intercept_touch_event(&event).unwrap());
    assert!(!event.is_consumed());
    assert!(f.events().is_empty());
    assert_close(f.panel.translation_y(), 0.0);
}

#[test]
fn down_only_accepts_downward_pull() {
    let f = fixture(PullableConfig::default().with_direction(Direction::Down));
    assert!(f.drag(500.0, 530.0));
    assert_eq!(f.events(), vec![PullEvent::PullStart]);
}

#[test]
fn press_outside_start_area_never_pulls() {
    let f = fixture(PullableConfig::default());
    let c = &f.controller;
    c.on_intercept_touch_event(&PointerEvent::down(X, 1200.0))
        .unwrap();
    assert!(!c
        .on_intercept_touch_event(&PointerEvent::moved(X, 1100.0))
        .unwrap());
    assert!(!c
        .on_intercept_touch_event(&PointerEvent::moved(X, 1000.0))
        .unwrap());
    assert!(f.events().is_empty());
}

#[test]
fn horizontal_movement_does_not_pull() {
    let f = fixture(PullableConfig::default());
    let c = &f.controller;
    c.on_intercept_touch_event(&PointerEvent::down(X, 500.0))
        .unwrap();
    assert!(!c
        .on_intercept_touch_event(&PointerEvent::moved(X + 40.0, 520.0))
        .unwrap());
    assert_eq!(c.phase(), PullPhase::Tracking);
}

#[test]
fn vertical_ratio_is_configurable() {
    let f = fixture(PullableConfig::default().with_vertical_ratio(3.0));
    let c = &f.controller;
    c.on_intercept_touch_event(&PointerEvent::down(X, 500.0))
        .unwrap();
    assert!(!c
        .on_intercept_touch_event(&PointerEvent::moved(X + 10.0, 525.0))
        .unwrap());
    assert!(c
        .on_intercept_touch_event(&PointerEvent::moved(X + 10.0, 540.0))
        .unwrap());
}

#[test]
fn second_pointer_does_not_pull() {
    let f = fixture(PullableConfig::default());
    let c = &f.controller;
    c.on_intercept_touch_event(&PointerEvent::down(X, 500.0))
        .unwrap();
    let event = PointerEvent::moved(X, 540.0).with_pointer_count(2);
    assert!(!c.on_intercept_touch_event(&event).unwrap());
}

#[test]
fn move_past_limit_leaves_elements_in_place() {
    let f = fixture(PullableConfig::default());
    f.drag(500.0, 560.0);
    assert_close(f.panel.translation_y(), 60.0);

    assert!(f
        .controller
        .on_touch_event(&PointerEvent::moved(X, 650.0))
        .unwrap());
    assert_close(f.panel.translation_y(), 60.0);

    f.controller
        .on_touch_event(&PointerEvent::moved(X, 580.0))
        .unwrap();
    assert_close(f.panel.translation_y(), 80.0);
}

#[test]
fn intercept_claims_gesture_once() {
    let f = fixture(PullableConfig::default());
    assert!(f.drag(500.0, 520.0));
    assert!(!f
        .controller
        .on_intercept_touch_event(&PointerEvent::moved(X, 530.0))
        .unwrap());
}

#[test]
fn touch_event_path_can_start_pull_directly() {
    let f = fixture(PullableConfig::default());
    let c = &f.controller;
    let down = PointerEvent::down(X, 500.0);
    assert!(c.on_touch_event(&down).unwrap());
    assert!(down.is_consumed());
    assert!(c.on_touch_event(&PointerEvent::moved(X, 520.0)).unwrap());
    assert_eq!(c.phase(), PullPhase::Dragging);
    assert!(c.on_touch_event(&PointerEvent::moved(X, 540.0)).unwrap());
    assert_close(f.panel.translation_y(), 40.0);
}

#[test]
fn touch_down_outside_area_is_not_consumed() {
    let f = fixture(PullableConfig::default());
    let down = PointerEvent::down(X, 1001.0);
    assert!(!f.controller.on_touch_event(&down).unwrap());
    assert!(!down.is_consumed());
}

#[test]
fn cancel_resolves_to_reset() {
    let f = fixture(PullableConfig::default());
    f.drag(500.0, 590.0);
    assert!(f
        .controller
        .on_touch_event(&PointerEvent::cancel(X, 590.0))
        .unwrap());
    f.settle();
    assert_eq!(f.events(), vec![PullEvent::PullStart, PullEvent::Reset]);
    assert_close(f.panel.translation_y(), 0.0);
}

#[test]
fn elements_are_not_clickable_while_animating() {
    let f = fixture(PullableConfig::default());
    f.drag(500.0, 570.0);
    assert!(f.panel.is_clickable());
    f.release(570.0);
    assert!(!f.panel.is_clickable());
    f.frame();
    assert!(!f.panel.is_clickable());
    f.settle();
    assert!(f.panel.is_clickable());
}

#[test]
fn animation_blocks_new_gestures() {
    let f = fixture(PullableConfig::default());
    f.drag(500.0, 520.0);
    f.release(520.0);
    assert!(!f.controller.is_pullable());
    assert!(!f.drag(500.0, 570.0));
    f.settle();
    assert!(f.controller.is_pullable());
}

#[test]
fn reset_animated_twice_runs_once() {
    let f = fixture(PullableConfig::default());
    f.controller.reset_animated().unwrap();
    f.controller.reset_animated().unwrap();
    f.settle();
    assert_eq!(f.events(), vec![PullEvent::Reset]);
}

#[test]
fn reset_immediate_is_ignored_during_snap_animation() {
    let f = fixture(PullableConfig::default());
    f.drag(500.0, 570.0);
    f.release(570.0);
    f.frame();

    f.controller.reset_immediate().unwrap();

    assert!(f.controller.is_animation_running());
    assert_eq!(f.events(), vec![PullEvent::PullStart]);
    f.settle();
    assert_eq!(f.events(), vec![PullEvent::PullStart, PullEvent::Snap]);
    assert_close(f.panel.translation_y(), 100.0);
    assert!(f.controller.is_snapped());
}

#[test]
fn reset_animated_is_ignored_during_snap_animation() {
    let f = fixture(PullableConfig::default());
    f.drag(500.0, 570.0);
    f.release(570.0);
    f.frame();

    f.controller.reset_animated().unwrap();
    f.settle();

    assert_eq!(f.events(), vec![PullEvent::PullStart, PullEvent::Snap]);
    assert_close(f.panel.translation_y(), 100.0);
    assert_close(f.panel.alpha(), 0.0);
}

#[test]
fn snap_is_ignored_during_reset_animation() {
    let f = fixture(PullableConfig::default());
    f.drag(500.0, 530.0);
    f.release(530.0);
    f.frame();

    f.controller.snap().unwrap();
    f.settle();

    assert_eq!(f.events(), vec![PullEvent::PullStart, PullEvent::Reset]);
    assert_close(f.panel.translation_y(), 0.0);
    assert_close(f.panel.alpha(), 1.0);
    assert!(!f.controller.is_snapped());
}

#[test]
fn snap_then_reset_animated_returns_home() {
    let f = fixture(PullableConfig::default());
    f.controller.snap().unwrap();
    f.settle();
    assert_close(f.panel.translation_y(), 100.0);
    assert!(!f.controller.is_pullable());

    f.controller.reset_animated().unwrap();
    f.settle();
    assert_close(f.panel.translation_y(), 0.0);
    assert!(f.controller.is_pullable());
    assert_eq!(f.events(), vec![PullEvent::Snap, PullEvent::Reset]);
}

#[test]
fn reset_immediate_restores_without_frames() {
    let f = fixture(PullableConfig::default());
    f.drag(500.0, 460.0);
    assert_close(f.panel.translation_y(), -40.0);

    f.controller.reset_immediate().unwrap();

    assert_close(f.panel.translation_y(), 0.0);
    assert_close(f.panel.alpha(), 1.0);
    assert_eq!(f.events(), vec![PullEvent::PullStart, PullEvent::Reset]);
    assert_eq!(f.controller.phase(), PullPhase::Idle);
}

#[test]
fn end_animation_finishes_immediately() {
    let f = fixture(PullableConfig::default());
    f.drag(500.0, 570.0);
    f.release(570.0);
    f.frame();

    f.controller.end_animation();

    assert!(!f.controller.is_animation_running());
    assert_close(f.panel.translation_y(), 100.0);
    assert_eq!(f.events(), vec![PullEvent::PullStart, PullEvent::Snap]);
    f.settle();
    assert_eq!(f.events().len(), 2);
}

#[test]
fn snapped_stays_pullable_without_lock() {
    let f = fixture(PullableConfig::default().with_lock_on_snap(false));
    f.controller.snap().unwrap();
    f.settle();
    assert!(f.controller.is_snapped());
    assert!(f.controller.is_pullable());
}

struct Blocking;

impl PullListener for Blocking {
    fn is_pullable(&self) -> bool {
        false
    }
}

#[test]
fn listener_can_veto_pulls() {
    let f = fixture(PullableConfig::default());
    f.controller.set_listener(Rc::new(Blocking));
    assert!(!f.drag(500.0, 570.0));
    assert_eq!(f.controller.phase(), PullPhase::Idle);

    f.controller.clear_listener();
    assert!(f.drag(500.0, 570.0));
}

#[test]
fn terminal_animation_uses_configured_spec() {
    let config = PullableConfig::default().with_animation_spec(AnimationSpec::linear(100));
    let f = fixture(config);
    f.controller.snap().unwrap();
    f.frame();
    for _ in 0..6 {
        f.frame();
    }
    assert!(!f.controller.is_animation_running());
    assert_close(f.panel.translation_y(), 100.0);
}

#[test]
fn operations_before_layout_fail() {
    let runtime = Runtime::new();
    let controller =
        PullableController::new(runtime.handle().frame_clock(), PullableConfig::default());

    assert_eq!(
        controller.reset_animated(),
        Err(PullableError::NotLaidOut {
            operation: "reset_animated"
        })
    );
    assert!(matches!(
        controller.snap(),
        Err(PullableError::NotLaidOut { .. })
    ));
    assert!(!controller
        .on_intercept_touch_event(&PointerEvent::down(X, 10.0))
        .unwrap());
    assert!(controller
        .on_intercept_touch_event(&PointerEvent::moved(X, 40.0))
        .is_err());
}

#[test]
fn invalid_layout_is_rejected() {
    let f = fixture(PullableConfig::default());
    let bad = PullableLayout::new(
        StartArea::new(0, 0, 0, 0),
        ScrollOffsetLimit::new(-1, 1),
        ScrollOffsetThreshold::new(0, 0),
    );
    assert!(f.controller.on_layout(bad).is_err());
    assert_eq!(f.controller.layout(), Some(layout()));
}

#[test]
fn snap_listener_can_schedule_reset() {
    struct ResetOnSnap(RefCell<Option<PullableController>>);

    impl PullListener for ResetOnSnap {
        fn on_snap(&self) {
            if let Some(controller) = self.0.borrow().as_ref() {
                controller.reset_animated().unwrap();
            }
        }
    }

    let f = fixture(PullableConfig::default());
    let listener = Rc::new(ResetOnSnap(RefCell::new(Some(f.controller.clone()))));
    f.controller.set_listener(listener.clone());
    f.controller.snap().unwrap();
    f.settle();

    assert!(!f.controller.is_snapped());
    assert_close(f.panel.translation_y(), 0.0);
    listener.0.borrow_mut().take();
}

#[test]
fn debug_output_names_phase() {
    let f = fixture(PullableConfig::default());
    assert!(format!("{:?}", f.controller).contains("Idle"));
}

#[test]
fn builders_and_channel_listener() {
    let runtime = Runtime::new();
    let (sender, receiver) = std::sync::mpsc::channel::<PullEvent>();
    let node = Rc::new(LayerNode::new());
    let controller =
        PullableController::new(runtime.handle().frame_clock(), PullableConfig::default())
            .with_bound_element(
                BoundElement::new(node.clone()).with_transformation(TranslateTransformation::new()),
            )
            .with_listener(Rc::new(sender));
    controller.on_layout(layout()).unwrap();
    assert_eq!(controller.bound_element_count(), 1);

    controller.reset_immediate().unwrap();

    assert_eq!(receiver.try_recv(), Ok(PullEvent::Reset));
    assert!(receiver.try_recv().is_err());
}
