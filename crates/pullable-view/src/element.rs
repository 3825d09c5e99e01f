use pullable_ui_graphics::{GraphicsLayer, LayerProperty};
use std::cell::Cell;
use std::fmt;

/// A visual element the controller can move.
///
/// Elements are owned by the surrounding UI and shared with the controller
/// through `Rc`, so all mutation goes through `&self`.
pub trait VisualElement {
    fn property(&self, property: LayerProperty) -> f32;

    fn set_property(&self, property: LayerProperty, value: f32);

    fn set_clickable(&self, clickable: bool);

    fn is_clickable(&self) -> bool;
}

/// [`VisualElement`] backed by a [`GraphicsLayer`].
pub struct LayerNode {
    layer: Cell<GraphicsLayer>,
    clickable: Cell<bool>,
}

impl LayerNode {
    pub fn new() -> Self {
        Self::with_layer(GraphicsLayer::default())
    }

    pub fn with_layer(layer: GraphicsLayer) -> Self {
        Self {
            layer: Cell::new(layer),
            clickable: Cell::new(true),
        }
    }

    pub fn layer(&self) -> GraphicsLayer {
        self.layer.get()
    }

    pub fn alpha(&self) -> f32 {
        self.layer.get().alpha
    }

    pub fn translation_y(&self) -> f32 {
        self.layer.get().translation_y
    }
}

impl Default for LayerNode {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LayerNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayerNode")
            .field("layer", &self.layer.get())
            .field("clickable", &self.clickable.get())
            .finish()
    }
}

impl VisualElement for LayerNode {
    fn property(&self, property: LayerProperty) -> f32 {
        self.layer.get().get(property)
    }

    fn set_property(&self, property: LayerProperty, value: f32) {
        let mut layer = self.layer.get();
        layer.set(property, value);
        self.layer.set(layer);
    }

    fn set_clickable(&self, clickable: bool) {
        self.clickable.set(clickable);
    }

    fn is_clickable(&self) -> bool {
        self.clickable.get()
    }
}
