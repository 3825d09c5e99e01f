use pullable_animation::AnimationSpec;
use pullable_foundation::gesture_constants::{TOUCH_SLOP, VERTICAL_RATIO};
use pullable_foundation::Direction;

/// Options that do not depend on layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PullableConfig {
    pub direction: Direction,
    /// Vertical travel, in whole pixels, before a touch becomes a pull.
    pub touch_slop: i32,
    pub vertical_ratio: f32,
    /// Spec of the terminal reset and snap animations.
    pub animation_spec: AnimationSpec,
    /// Refuse new pulls while snapped until a reset completes.
    pub lock_on_snap: bool,
}

impl Default for PullableConfig {
    fn default() -> Self {
        Self {
            direction: Direction::Both,
            touch_slop: TOUCH_SLOP,
            vertical_ratio: VERTICAL_RATIO,
            animation_spec: AnimationSpec::default(),
            lock_on_snap: true,
        }
    }
}

impl PullableConfig {
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_touch_slop(mut self, touch_slop: i32) -> Self {
        self.touch_slop = touch_slop;
        self
    }

    pub fn with_vertical_ratio(mut self, vertical_ratio: f32) -> Self {
        self.vertical_ratio = vertical_ratio;
        self
    }

    pub fn with_animation_spec(mut self, animation_spec: AnimationSpec) -> Self {
        self.animation_spec = animation_spec;
        self
    }

    pub fn with_lock_on_snap(mut self, lock_on_snap: bool) -> Self {
        self.lock_on_snap = lock_on_snap;
        self
    }
}
