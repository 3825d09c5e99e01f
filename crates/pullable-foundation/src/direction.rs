//! Which vertical directions a pull may travel in.

use std::fmt;

/// One vertical half-axis of a pull.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PullAxis {
    /// Negative offsets (pointer moving toward the top of the screen).
    Up,
    /// Positive offsets.
    Down,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    Up,
    Down,
    #[default]
    Both,
}

impl Direction {
    /// Maps the integer attribute encoding used by hosts (0 = up, 1 = down,
    /// 2 = both).
    pub fn from_value(value: i32) -> Option<Self> {
        match value {
            0 => Some(Direction::Up),
            1 => Some(Direction::Down),
            2 => Some(Direction::Both),
            _ => None,
        }
    }

    pub fn value(self) -> i32 {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Both => 2,
        }
    }

    pub fn enabled(self, axis: PullAxis) -> bool {
        match axis {
            PullAxis::Up => matches!(self, Direction::Up | Direction::Both),
            PullAxis::Down => matches!(self, Direction::Down | Direction::Both),
        }
    }

    #[inline]
    pub fn up_enabled(self) -> bool {
        self.enabled(PullAxis::Up)
    }

    #[inline]
    pub fn down_enabled(self) -> bool {
        self.enabled(PullAxis::Down)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Both => "both",
        })
    }
}

#[cfg(test)]
#[path = "tests/direction_tests.rs"]
mod tests;
