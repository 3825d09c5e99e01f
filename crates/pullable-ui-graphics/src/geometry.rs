//! Geometric primitives: Point, IntRect, StartArea, offset limits and thresholds

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Integer rectangle in screen pixels, as reported by a host layout pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct IntRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl IntRect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// Region in which a pull gesture is allowed to begin.
///
/// Membership is exclusive on the lower edges and inclusive on the upper
/// edges of both axes. `min_x < max_x` and `min_y < max_y` are the caller's
/// responsibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct StartArea {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl StartArea {
    pub const fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn from_rect(rect: IntRect) -> Self {
        Self::new(rect.left, rect.top, rect.right, rect.bottom)
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x > self.min_x && x <= self.max_x && y > self.min_y && y <= self.max_y
    }
}

impl fmt::Display for StartArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StartArea(min_x={}, min_y={}, max_x={}, max_y={})",
            self.min_x, self.min_y, self.max_x, self.max_y
        )
    }
}

/// Legal range of the cumulative drag offset.
///
/// By convention `min <= 0 <= max`: `min` bounds an upward pull, `max` a
/// downward one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct ScrollOffsetLimit {
    pub min: i32,
    pub max: i32,
}

impl ScrollOffsetLimit {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// The bound on the side of `offset`: `min` for negative offsets,
    /// `max` otherwise.
    pub fn bound_for(&self, offset: i32) -> i32 {
        if offset < 0 {
            self.min
        } else {
            self.max
        }
    }
}

impl fmt::Display for ScrollOffsetLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScrollOffsetLimit(min={}, max={})", self.min, self.max)
    }
}

/// Offset beyond which a release snaps to the limit instead of resetting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct ScrollOffsetThreshold {
    pub min: i32,
    pub max: i32,
}

impl ScrollOffsetThreshold {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Half of each limit bound, rounded toward zero.
    pub fn half_of(limit: ScrollOffsetLimit) -> Self {
        Self::new(limit.min / 2, limit.max / 2)
    }
}

impl fmt::Display for ScrollOffsetThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScrollOffsetThreshold(min={}, max={})", self.min, self.max)
    }
}

#[cfg(test)]
#[path = "tests/geometry_tests.rs"]
mod tests;
