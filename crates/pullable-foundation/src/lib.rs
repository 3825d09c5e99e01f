//! Input plumbing for Pullable: pointer events, the direction policy, and
//! the pure functions that classify a vertical pull.

pub mod direction;
pub mod gesture_constants;
pub mod gestures;
pub mod input;

pub use direction::{Direction, PullAxis};
pub use gestures::{DragGesture, ReleaseOutcome};
pub use input::{PointerEvent, PointerEventKind};

pub mod prelude {
    pub use super::direction::{Direction, PullAxis};
    pub use super::gestures::{DragGesture, ReleaseOutcome};
    pub use super::input::{PointerEvent, PointerEventKind};
}
