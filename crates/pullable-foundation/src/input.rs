use pullable_ui_graphics::Point;
use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// Pointer event as delivered by the host, already demultiplexed.
///
/// `global_position` is in absolute screen coordinates; pull tracking only
/// reads that one so it is unaffected by the panel moving under the finger.
#[derive(Clone, Debug)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub position: Point,
    pub global_position: Point,
    pub pointer_count: usize,
    /// Shared so consumption is visible across copies of the event.
    consumed: Rc<Cell<bool>>,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, position: Point, global_position: Point) -> Self {
        Self {
            kind,
            position,
            global_position,
            pointer_count: 1,
            consumed: Rc::new(Cell::new(false)),
        }
    }

    /// Event whose local and global positions coincide.
    pub fn at(kind: PointerEventKind, x: f32, y: f32) -> Self {
        let point = Point::new(x, y);
        Self::new(kind, point, point)
    }

    pub fn down(x: f32, y: f32) -> Self {
        Self::at(PointerEventKind::Down, x, y)
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self::at(PointerEventKind::Move, x, y)
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self::at(PointerEventKind::Up, x, y)
    }

    pub fn cancel(x: f32, y: f32) -> Self {
        Self::at(PointerEventKind::Cancel, x, y)
    }

    pub fn with_pointer_count(mut self, pointer_count: usize) -> Self {
        self.pointer_count = pointer_count;
        self
    }

    /// Absolute coordinates truncated to whole pixels.
    pub fn raw_x(&self) -> i32 {
        self.global_position.x as i32
    }

    pub fn raw_y(&self) -> i32 {
        self.global_position.y as i32
    }

    /// Mark this event as consumed so other handlers skip it.
    pub fn consume(&self) {
        self.consumed.set(true);
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed.get()
    }
}
