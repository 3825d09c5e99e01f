use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullableError {
    /// A gesture or terminal animation needed the layout before
    /// [`PullableController::on_layout`](crate::PullableController::on_layout)
    /// supplied it.
    NotLaidOut { operation: &'static str },
    InvalidLayout { reason: &'static str },
}

impl fmt::Display for PullableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PullableError::NotLaidOut { operation } => {
                write!(f, "{operation} called before layout")
            }
            PullableError::InvalidLayout { reason } => write!(f, "invalid layout: {reason}"),
        }
    }
}

impl std::error::Error for PullableError {}
