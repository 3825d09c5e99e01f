pub mod drag;

pub use drag::{
    is_over_slope, is_vertical_movement, is_within_limit, resolve_release, DragGesture,
    ReleaseOutcome,
};
