//! Shared gesture constants for pull handling.
//!
//! Values are in logical pixels and are fixed policy, not derived from the
//! display.

/// Minimum vertical travel before a touch counts as a pull rather than a tap.
///
/// Matches the common platform touch slop (~8dp).
pub const TOUCH_SLOP: i32 = 8;

/// Minimum `|dy| / max(|dx|, 1)` for a move to count as vertical.
///
/// 1.73 is tan(60°): anything shallower than 60° from horizontal is treated
/// as a sideways swipe.
pub const VERTICAL_RATIO: f32 = 1.73;
