//! Elements and listeners that remember what the controller did to them.

use pullable_ui_graphics::{GraphicsLayer, LayerProperty};
use pullable_view::{LayerNode, PullEvent, PullListener, VisualElement};
use std::cell::{Cell, RefCell};

/// [`VisualElement`] that records every property write and clickable change.
#[derive(Debug, Default)]
pub struct RecordingElement {
    node: LayerNode,
    writes: RefCell<Vec<(LayerProperty, f32)>>,
    clickable_changes: RefCell<Vec<bool>>,
}

impl RecordingElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layer(layer: GraphicsLayer) -> Self {
        Self {
            node: LayerNode::with_layer(layer),
            ..Self::default()
        }
    }

    pub fn layer(&self) -> GraphicsLayer {
        self.node.layer()
    }

    pub fn writes(&self) -> Vec<(LayerProperty, f32)> {
        self.writes.borrow().clone()
    }

    pub fn write_count(&self, property: LayerProperty) -> usize {
        self.writes
            .borrow()
            .iter()
            .filter(|(written, _)| *written == property)
            .count()
    }

    pub fn last_write(&self, property: LayerProperty) -> Option<f32> {
        self.writes
            .borrow()
            .iter()
            .rev()
            .find(|(written, _)| *written == property)
            .map(|(_, value)| *value)
    }

    pub fn clickable_changes(&self) -> Vec<bool> {
        self.clickable_changes.borrow().clone()
    }

    /// Forgets recorded history; current values are kept.
    pub fn clear(&self) {
        self.writes.borrow_mut().clear();
        self.clickable_changes.borrow_mut().clear();
    }
}

impl VisualElement for RecordingElement {
    fn property(&self, property: LayerProperty) -> f32 {
        self.node.property(property)
    }

    fn set_property(&self, property: LayerProperty, value: f32) {
        self.writes.borrow_mut().push((property, value));
        self.node.set_property(property, value);
    }

    fn set_clickable(&self, clickable: bool) {
        self.clickable_changes.borrow_mut().push(clickable);
        self.node.set_clickable(clickable);
    }

    fn is_clickable(&self) -> bool {
        self.node.is_clickable()
    }
}

/// [`PullListener`] recording callbacks, with a switchable `is_pullable`.
#[derive(Debug)]
pub struct RecordingListener {
    events: RefCell<Vec<PullEvent>>,
    pullable: Cell<bool>,
    pullable_queries: Cell<usize>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self {
            events: RefCell::new(Vec::new()),
            pullable: Cell::new(true),
            pullable_queries: Cell::new(0),
        }
    }

    pub fn events(&self) -> Vec<PullEvent> {
        self.events.borrow().clone()
    }

    pub fn take_events(&self) -> Vec<PullEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn count(&self, event: PullEvent) -> usize {
        self.events.borrow().iter().filter(|e| **e == event).count()
    }

    pub fn set_pullable(&self, pullable: bool) {
        self.pullable.set(pullable);
    }

    /// How many times the controller asked `is_pullable`.
    pub fn pullable_queries(&self) -> usize {
        self.pullable_queries.get()
    }
}

impl Default for RecordingListener {
    fn default() -> Self {
        Self::new()
    }
}

impl PullListener for RecordingListener {
    fn on_pull_start(&self) {
        self.events.borrow_mut().push(PullEvent::PullStart);
    }

    fn on_reset(&self) {
        self.events.borrow_mut().push(PullEvent::Reset);
    }

    fn on_snap(&self) {
        self.events.borrow_mut().push(PullEvent::Snap);
    }

    fn is_pullable(&self) -> bool {
        self.pullable_queries.set(self.pullable_queries.get() + 1);
        self.pullable.get()
    }
}
