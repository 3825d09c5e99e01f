//! Pull gesture controller for Pullable.
//!
//! A [`PullableController`] intercepts vertical drags that start inside a
//! configured area, moves every [`BoundElement`] along with the finger
//! through its [`Transformation`]s, and on release animates them either back
//! to where they started or out to the offset limit.

mod bound_element;
mod config;
mod controller;
mod element;
mod error;
mod layout;
mod listener;
pub mod transformation;

pub use bound_element::BoundElement;
pub use config::PullableConfig;
pub use controller::{PullPhase, PullableController};
pub use element::{LayerNode, VisualElement};
pub use error::PullableError;
pub use layout::{LayoutOverrides, PullableLayout};
pub use listener::{PullEvent, PullListener};
pub use transformation::{AlphaTransformation, TranslateTransformation, Transformation};

pub use pullable_foundation::{Direction, PointerEvent, PointerEventKind, ReleaseOutcome};
pub use pullable_ui_graphics::{
    IntRect, ScrollOffsetLimit, ScrollOffsetThreshold, StartArea,
};

pub mod prelude {
    pub use crate::{
        AlphaTransformation, BoundElement, Direction, LayerNode, PullEvent, PullListener,
        PullableConfig, PullableController, PullableLayout, Transformation,
        TranslateTransformation, VisualElement,
    };
}
