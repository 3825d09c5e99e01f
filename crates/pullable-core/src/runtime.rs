use crate::{FrameCallbackId, FrameClock, NANOS_PER_MILLI};
use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

/// Owns the frame-callback registry. Dropping the runtime turns every
/// [`RuntimeHandle`] into a no-op.
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new()),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: Option<Box<dyn FnOnce(u64) + 'static>>,
}

struct DelayedTask {
    id: FrameCallbackId,
    delay_nanos: u64,
    /// Resolved against the first frame that observes the task.
    deadline_nanos: Option<u64>,
    task: Option<Box<dyn FnOnce() + 'static>>,
}

struct RuntimeInner {
    needs_frame: Cell<bool>,
    frame_callbacks: RefCell<VecDeque<FrameCallbackEntry>>,
    delayed_tasks: RefCell<Vec<DelayedTask>>,
    next_frame_callback_id: Cell<u64>,
    last_frame_time_nanos: Cell<Option<u64>>,
}

impl RuntimeInner {
    fn new() -> Self {
        Self {
            needs_frame: Cell::new(false),
            frame_callbacks: RefCell::new(VecDeque::new()),
            delayed_tasks: RefCell::new(Vec::new()),
            next_frame_callback_id: Cell::new(1),
            last_frame_time_nanos: Cell::new(None),
        }
    }

    fn next_id(&self) -> FrameCallbackId {
        let id = self.next_frame_callback_id.get();
        self.next_frame_callback_id.set(id + 1);
        id
    }

    fn has_frame_callbacks(&self) -> bool {
        !self.frame_callbacks.borrow().is_empty() || !self.delayed_tasks.borrow().is_empty()
    }

    fn register_frame_callback(&self, callback: Box<dyn FnOnce(u64) + 'static>) -> FrameCallbackId {
        let id = self.next_id();
        self.frame_callbacks
            .borrow_mut()
            .push_back(FrameCallbackEntry {
                id,
                callback: Some(callback),
            });
        self.needs_frame.set(true);
        id
    }

    fn post_delayed(&self, delay_millis: u64, task: Box<dyn FnOnce() + 'static>) -> FrameCallbackId {
        let id = self.next_id();
        let delay_nanos = delay_millis.saturating_mul(NANOS_PER_MILLI);
        let deadline_nanos = self
            .last_frame_time_nanos
            .get()
            .map(|last| last.saturating_add(delay_nanos));
        self.delayed_tasks.borrow_mut().push(DelayedTask {
            id,
            delay_nanos,
            deadline_nanos,
            task: Some(task),
        });
        self.needs_frame.set(true);
        id
    }

    fn cancel_frame_callback(&self, id: FrameCallbackId) {
        {
            let mut callbacks = self.frame_callbacks.borrow_mut();
            if let Some(index) = callbacks.iter().position(|entry| entry.id == id) {
                callbacks.remove(index);
            }
        }
        self.delayed_tasks.borrow_mut().retain(|task| task.id != id);
        if !self.has_frame_callbacks() {
            self.needs_frame.set(false);
        }
    }

    fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        self.last_frame_time_nanos.set(Some(frame_time_nanos));

        let mut pending: Vec<Box<dyn FnOnce(u64) + 'static>> = {
            let mut callbacks = self.frame_callbacks.borrow_mut();
            let mut pending = Vec::with_capacity(callbacks.len());
            while let Some(mut entry) = callbacks.pop_front() {
                if let Some(callback) = entry.callback.take() {
                    pending.push(callback);
                }
            }
            pending
        };

        let due: SmallVec<[Box<dyn FnOnce() + 'static>; 2]> = {
            let mut tasks = self.delayed_tasks.borrow_mut();
            let mut due = SmallVec::new();
            tasks.retain_mut(|task| {
                let deadline = *task
                    .deadline_nanos
                    .get_or_insert(frame_time_nanos.saturating_add(task.delay_nanos));
                if frame_time_nanos >= deadline {
                    if let Some(callback) = task.task.take() {
                        due.push(callback);
                    }
                    false
                } else {
                    true
                }
            });
            due
        };

        log::trace!(
            "drain_frame_callbacks: t={} callbacks={} delayed={}",
            frame_time_nanos,
            pending.len(),
            due.len()
        );

        for callback in pending.drain(..) {
            callback(frame_time_nanos);
        }
        for task in due {
            task();
        }

        if !self.has_frame_callbacks() {
            self.needs_frame.set(false);
        }
    }
}

/// Weak handle to a [`Runtime`]; cheap to clone and safe to keep in closures.
#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
}

impl RuntimeHandle {
    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        self.inner
            .upgrade()
            .map(|inner| inner.register_frame_callback(Box::new(callback)))
    }

    /// Runs `task` on the first drained frame at or past the last frame
    /// time plus `delay_millis`. With no frame drained yet, the delay is
    /// measured from the next frame.
    pub fn post_delayed(
        &self,
        delay_millis: u64,
        task: impl FnOnce() + 'static,
    ) -> Option<FrameCallbackId> {
        self.inner
            .upgrade()
            .map(|inner| inner.post_delayed(delay_millis, Box::new(task)))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel_frame_callback(id);
        }
    }

    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        if let Some(inner) = self.inner.upgrade() {
            inner.drain_frame_callbacks(frame_time_nanos);
        }
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.has_frame_callbacks())
            .unwrap_or(false)
    }

    pub fn needs_frame(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.needs_frame.get())
            .unwrap_or(false)
    }

    pub fn last_frame_time_nanos(&self) -> Option<u64> {
        self.inner
            .upgrade()
            .and_then(|inner| inner.last_frame_time_nanos.get())
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
