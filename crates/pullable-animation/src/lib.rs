//! Animation system for Pullable
//!
//! Provides time-based tweens of scalar values, driven by the frame clock of
//! `pullable-core`, and grouping of tweens into sets that start together and
//! report completion once.

mod animation;
mod animator;

pub use animation::{AnimationSpec, Easing, Lerp, DEFAULT_DURATION_MILLIS};
pub use animator::{AnimationHandle, AnimatorListener, AnimatorSet, ValueAnimator};
