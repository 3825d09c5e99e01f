//! Pure math/data for Pullable
//!
//! This crate contains the geometry primitives the pull gesture is configured
//! with (start area, offset limits, offset thresholds) and the graphics layer
//! values a pull animates.

mod geometry;
mod layer;

pub use geometry::*;
pub use layer::*;

pub mod prelude {
    pub use crate::geometry::{
        IntRect, Point, ScrollOffsetLimit, ScrollOffsetThreshold, StartArea,
    };
    pub use crate::layer::{GraphicsLayer, LayerProperty};
}
