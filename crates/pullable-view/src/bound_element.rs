use std::fmt;
use std::rc::Rc;

use pullable_animation::{AnimationSpec, ValueAnimator};
use pullable_ui_graphics::ScrollOffsetLimit;
use smallvec::SmallVec;

use crate::{Transformation, VisualElement};

/// One element plus the transformations applied to it, in order.
pub struct BoundElement {
    element: Rc<dyn VisualElement>,
    transformations: SmallVec<[Box<dyn Transformation>; 2]>,
}

impl BoundElement {
    pub fn new(element: Rc<dyn VisualElement>) -> Self {
        Self {
            element,
            transformations: SmallVec::new(),
        }
    }

    /// Binds `transformation` to the element, capturing its start values now.
    pub fn with_transformation(mut self, transformation: impl Transformation + 'static) -> Self {
        transformation.attach(&*self.element);
        self.transformations.push(Box::new(transformation));
        self
    }

    pub fn element(&self) -> &Rc<dyn VisualElement> {
        &self.element
    }

    pub fn transformation_count(&self) -> usize {
        self.transformations.len()
    }

    pub fn transform(&self, offset: i32, limit: ScrollOffsetLimit) {
        for transformation in &self.transformations {
            transformation.transform(&*self.element, offset, limit);
        }
    }

    /// One animator per transformation, for the caller to play together.
    pub fn animators(
        &self,
        limit: ScrollOffsetLimit,
        progress: f32,
        spec: AnimationSpec,
    ) -> Vec<ValueAnimator> {
        self.transformations
            .iter()
            .map(|transformation| transformation.animator(&self.element, limit, progress, spec))
            .collect()
    }

    pub fn set_clickable(&self, clickable: bool) {
        self.element.set_clickable(clickable);
    }
}

impl fmt::Debug for BoundElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundElement")
            .field("transformations", &self.transformations.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/bound_element_tests.rs"]
mod tests;
