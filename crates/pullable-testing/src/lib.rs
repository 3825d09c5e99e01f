//! Testing utilities and harness for Pullable

pub mod recording;
pub mod robot;
pub mod robot_assertions;

pub use recording::{RecordingElement, RecordingListener};
pub use robot::{PullRobot, FRAME_INTERVAL_NANOS};

pub mod prelude {
    pub use crate::recording::{RecordingElement, RecordingListener};
    pub use crate::robot::*;
    pub use crate::robot_assertions;
}
