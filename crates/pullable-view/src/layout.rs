//! Layout-derived pull geometry.

use crate::PullableError;
use pullable_ui_graphics::{IntRect, ScrollOffsetLimit, ScrollOffsetThreshold, StartArea};

/// Geometry the controller needs before it can handle a gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PullableLayout {
    pub start_area: StartArea,
    pub scroll_offset_limit: ScrollOffsetLimit,
    pub scroll_offset_threshold: ScrollOffsetThreshold,
}

/// Explicit values that replace the ones derived from bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutOverrides {
    pub start_area: Option<StartArea>,
    pub limit_up: Option<i32>,
    pub limit_down: Option<i32>,
    pub threshold_up: Option<i32>,
    pub threshold_down: Option<i32>,
}

impl PullableLayout {
    pub fn new(
        start_area: StartArea,
        scroll_offset_limit: ScrollOffsetLimit,
        scroll_offset_threshold: ScrollOffsetThreshold,
    ) -> Self {
        Self {
            start_area,
            scroll_offset_limit,
            scroll_offset_threshold,
        }
    }

    /// Derives the geometry from the panel's on-screen `bounds`.
    ///
    /// The panel may travel up until its top edge reaches the top of the
    /// screen and down until its bottom edge reaches `screen_height`.
    /// Thresholds sit halfway to each limit. The start area is the panel.
    pub fn from_bounds(bounds: IntRect, screen_height: i32, overrides: LayoutOverrides) -> Self {
        let scroll_offset_limit = ScrollOffsetLimit::new(
            overrides.limit_up.unwrap_or(-bounds.top),
            overrides.limit_down.unwrap_or(screen_height - bounds.bottom),
        );
        let half = ScrollOffsetThreshold::half_of(scroll_offset_limit);
        let scroll_offset_threshold = ScrollOffsetThreshold::new(
            overrides.threshold_up.unwrap_or(half.min),
            overrides.threshold_down.unwrap_or(half.max),
        );
        Self {
            start_area: overrides
                .start_area
                .unwrap_or_else(|| StartArea::from_rect(bounds)),
            scroll_offset_limit,
            scroll_offset_threshold,
        }
    }

    pub fn validate(&self) -> Result<(), PullableError> {
        let area = self.start_area;
        if area.min_x >= area.max_x || area.min_y >= area.max_y {
            return Err(PullableError::InvalidLayout {
                reason: "start area is empty",
            });
        }
        let limit = self.scroll_offset_limit;
        if limit.min > 0 || limit.max < 0 {
            return Err(PullableError::InvalidLayout {
                reason: "offset limit must contain zero",
            });
        }
        let threshold = self.scroll_offset_threshold;
        if threshold.min > 0 || threshold.max < 0 {
            return Err(PullableError::InvalidLayout {
                reason: "offset threshold must contain zero",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/layout_tests.rs"]
mod tests;
