//! Strategies mapping a drag offset (live) or a progress (animated) onto one
//! property of a bound element.

use std::cell::Cell;
use std::rc::Rc;

use pullable_animation::{AnimationSpec, ValueAnimator};
use pullable_ui_graphics::{LayerProperty, ScrollOffsetLimit};

use crate::VisualElement;

pub trait Transformation {
    /// Captures whatever start values the transformation measures from.
    /// Called when the transformation is bound to `element`.
    fn attach(&self, _element: &dyn VisualElement) {}

    /// Applies the live value for drag `offset`. Called on every move.
    fn transform(&self, element: &dyn VisualElement, offset: i32, limit: ScrollOffsetLimit);

    /// Tween from the element's current value to the value at `progress`
    /// (0.0 = reset, 1.0 = at the limit).
    fn animator(
        &self,
        element: &Rc<dyn VisualElement>,
        limit: ScrollOffsetLimit,
        progress: f32,
        spec: AnimationSpec,
    ) -> ValueAnimator;
}

fn property_animator(
    element: &Rc<dyn VisualElement>,
    property: LayerProperty,
    target: f32,
    spec: AnimationSpec,
) -> ValueAnimator {
    let from = element.property(property);
    let element = Rc::clone(element);
    ValueAnimator::of_float(from, target, spec, move |value| {
        element.set_property(property, value)
    })
}

/// Fades between `start_alpha` and `end_alpha` as the pull approaches the
/// limit on its side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AlphaTransformation {
    pub start_alpha: f32,
    pub end_alpha: f32,
}

impl AlphaTransformation {
    pub fn new(start_alpha: f32, end_alpha: f32) -> Self {
        Self {
            start_alpha,
            end_alpha,
        }
    }

    pub fn alpha_at(&self, progress: f32) -> f32 {
        self.start_alpha - progress * (self.start_alpha - self.end_alpha)
    }

    /// `|offset| / |bound|` where the bound is picked by the offset's sign.
    pub fn progress_for(offset: i32, limit: ScrollOffsetLimit) -> f32 {
        let bound = limit.bound_for(offset).unsigned_abs();
        if bound == 0 {
            return 0.0;
        }
        offset.unsigned_abs() as f32 / bound as f32
    }
}

impl Default for AlphaTransformation {
    fn default() -> Self {
        Self::new(1.0, 0.0)
    }
}

impl Transformation for AlphaTransformation {
    fn transform(&self, element: &dyn VisualElement, offset: i32, limit: ScrollOffsetLimit) {
        let alpha = self.alpha_at(Self::progress_for(offset, limit));
        element.set_property(LayerProperty::Alpha, alpha);
        log::debug!("AlphaTransformation: offset={} {} alpha={}", offset, limit, alpha);
    }

    fn animator(
        &self,
        element: &Rc<dyn VisualElement>,
        _limit: ScrollOffsetLimit,
        progress: f32,
        spec: AnimationSpec,
    ) -> ValueAnimator {
        property_animator(element, LayerProperty::Alpha, self.alpha_at(progress), spec)
    }
}

/// Moves the element vertically with the finger.
///
/// The translation the element had when it was bound is the start value;
/// live values are `start + offset`.
#[derive(Debug, Default)]
pub struct TranslateTransformation {
    start_translation: Cell<Option<f32>>,
}

impl TranslateTransformation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start value captured so far, if any.
    pub fn start_translation(&self) -> Option<f32> {
        self.start_translation.get()
    }

    /// Forgets the captured start so the next use re-measures it, e.g. after
    /// the host moved the element itself.
    pub fn clear_start(&self) {
        self.start_translation.set(None);
    }

    fn start_for(&self, element: &dyn VisualElement) -> f32 {
        match self.start_translation.get() {
            Some(start) => start,
            None => {
                let start = element.property(LayerProperty::TranslationY);
                self.start_translation.set(Some(start));
                start
            }
        }
    }

    /// Resting translation at `progress`. The side of the limit is picked
    /// from where the element currently sits relative to its start, so the
    /// same call animates back from either side.
    ///
    /// An element still at its start goes to the `max` side. This happens
    /// when every move of a pull overshot the limit and none was applied.
    pub fn target_at(
        &self,
        current: f32,
        start: f32,
        limit: ScrollOffsetLimit,
        progress: f32,
    ) -> f32 {
        let bound = if current < start { limit.min } else { limit.max };
        start + progress * bound as f32
    }
}

impl Transformation for TranslateTransformation {
    fn attach(&self, element: &dyn VisualElement) {
        self.start_translation
            .set(Some(element.property(LayerProperty::TranslationY)));
    }

    fn transform(&self, element: &dyn VisualElement, offset: i32, limit: ScrollOffsetLimit) {
        let translation = self.start_for(element) + offset as f32;
        element.set_property(LayerProperty::TranslationY, translation);
        log::debug!(
            "TranslateTransformation: offset={} {} translation_y={}",
            offset,
            limit,
            translation
        );
    }

    fn animator(
        &self,
        element: &Rc<dyn VisualElement>,
        limit: ScrollOffsetLimit,
        progress: f32,
        spec: AnimationSpec,
    ) -> ValueAnimator {
        let start = self.start_for(&**element);
        let current = element.property(LayerProperty::TranslationY);
        let target = self.target_at(current, start, limit, progress);
        property_animator(element, LayerProperty::TranslationY, target, spec)
    }
}

#[cfg(test)]
#[path = "tests/transformation_tests.rs"]
mod tests;
