//! Graphics layer values a pull gesture can drive.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphicsLayer {
    pub alpha: f32,
    pub translation_y: f32,
}

impl Default for GraphicsLayer {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            translation_y: 0.0,
        }
    }
}

/// A single scalar property of a [`GraphicsLayer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerProperty {
    Alpha,
    TranslationY,
}

impl LayerProperty {
    pub fn name(self) -> &'static str {
        match self {
            LayerProperty::Alpha => "alpha",
            LayerProperty::TranslationY => "translationY",
        }
    }
}

impl GraphicsLayer {
    pub fn get(&self, property: LayerProperty) -> f32 {
        match property {
            LayerProperty::Alpha => self.alpha,
            LayerProperty::TranslationY => self.translation_y,
        }
    }

    pub fn set(&mut self, property: LayerProperty, value: f32) {
        match property {
            LayerProperty::Alpha => self.alpha = value,
            LayerProperty::TranslationY => self.translation_y = value,
        }
    }
}
