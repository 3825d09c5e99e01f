//! Vertical pull recogniser.
//!
//! The free functions are the whole classification policy; [`DragGesture`]
//! only remembers where the pointer went down.

use crate::direction::Direction;
use crate::input::PointerEvent;
use pullable_ui_graphics::{ScrollOffsetLimit, ScrollOffsetThreshold, StartArea};

/// How a released pull resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReleaseOutcome {
    /// Back to the pre-gesture values.
    Reset,
    /// Out to the limit-extreme values.
    Snap,
}

/// `true` when `move_y` has passed the slope in a direction `direction` allows.
pub fn is_over_slope(move_y: i32, slope: i32, direction: Direction) -> bool {
    (direction.down_enabled() && move_y > slope) || (direction.up_enabled() && move_y < -slope)
}

/// `true` when `|move_y| / max(|move_x|, 1)` exceeds `ratio`.
pub fn is_vertical_movement(move_y: i32, move_x: i32, ratio: f32) -> bool {
    let move_x = move_x.unsigned_abs().max(1) as f32;
    move_y.unsigned_abs() as f32 / move_x > ratio
}

/// `true` when `move_y` lies inside `limit` on an enabled side of zero.
pub fn is_within_limit(move_y: i32, direction: Direction, limit: ScrollOffsetLimit) -> bool {
    (direction.up_enabled() && move_y < 0 && move_y >= limit.min)
        || (direction.down_enabled() && move_y > 0 && move_y <= limit.max)
}

pub fn resolve_release(
    move_y: i32,
    direction: Direction,
    threshold: ScrollOffsetThreshold,
) -> ReleaseOutcome {
    if (direction.up_enabled() && move_y < threshold.min)
        || (direction.down_enabled() && move_y > threshold.max)
    {
        ReleaseOutcome::Snap
    } else {
        ReleaseOutcome::Reset
    }
}

/// Pointer origin of the current gesture, in absolute whole pixels.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragGesture {
    down_x: i32,
    down_y: i32,
}

impl DragGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_down(&mut self, x: i32, y: i32) {
        self.down_x = x;
        self.down_y = y;
    }

    pub fn origin(&self) -> (i32, i32) {
        (self.down_x, self.down_y)
    }

    /// Signed vertical offset from the origin.
    pub fn offset_y(&self, y: i32) -> i32 {
        y.saturating_sub(self.down_y)
    }

    /// Whether a move `event` should become a pull: single pointer, origin
    /// inside `area`, past the slope and steep enough.
    pub fn qualifies(
        &self,
        event: &PointerEvent,
        area: StartArea,
        direction: Direction,
        slope: i32,
        ratio: f32,
    ) -> bool {
        let pointer_count = event.pointer_count;
        let move_x = event.raw_x().saturating_sub(self.down_x);
        let move_y = self.offset_y(event.raw_y());
        let qualifies = pointer_count == 1
            && area.in_bounds(self.down_x, self.down_y)
            && is_over_slope(move_y, slope, direction)
            && is_vertical_movement(move_y, move_x, ratio);
        log::debug!(
            "DragGesture::qualifies: down=({}, {}) move=({}, {}) pointers={} -> {}",
            self.down_x,
            self.down_y,
            move_x,
            move_y,
            pointer_count,
            qualifies
        );
        qualifies
    }
}

#[cfg(test)]
#[path = "../tests/drag_tests.rs"]
mod tests;
