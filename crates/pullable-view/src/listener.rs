use std::cell::RefCell;
use std::sync::mpsc::Sender;

/// Receives pull lifecycle callbacks. Every method has a no-op default.
pub trait PullListener {
    /// A drag qualified and the controller started consuming it.
    fn on_pull_start(&self) {}

    /// Bound elements are back at their pre-gesture values.
    fn on_reset(&self) {}

    /// Bound elements rest at their limit values.
    fn on_snap(&self) {}

    /// Polled before every gesture; returning `false` blocks new pulls.
    fn is_pullable(&self) -> bool {
        true
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PullEvent {
    PullStart,
    Reset,
    Snap,
}

/// Appends every callback as a [`PullEvent`].
impl PullListener for RefCell<Vec<PullEvent>> {
    fn on_pull_start(&self) {
        self.borrow_mut().push(PullEvent::PullStart);
    }

    fn on_reset(&self) {
        self.borrow_mut().push(PullEvent::Reset);
    }

    fn on_snap(&self) {
        self.borrow_mut().push(PullEvent::Snap);
    }
}

/// Forwards every callback into a channel. A closed receiver is ignored.
impl PullListener for Sender<PullEvent> {
    fn on_pull_start(&self) {
        let _ = self.send(PullEvent::PullStart);
    }

    fn on_reset(&self) {
        let _ = self.send(PullEvent::Reset);
    }

    fn on_snap(&self) {
        let _ = self.send(PullEvent::Snap);
    }
}
