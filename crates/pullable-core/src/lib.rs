//! Frame runtime for Pullable.
//!
//! All gesture handling and animation happens on one UI thread. The host
//! drives time by calling [`RuntimeHandle::drain_frame_callbacks`] once per
//! frame; animations register frame callbacks through a [`FrameClock`].

mod frame_clock;
mod runtime;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use runtime::{Runtime, RuntimeHandle};

pub type FrameCallbackId = u64;

pub const NANOS_PER_MILLI: u64 = 1_000_000;
