//! Error types for starting a draw.
//!
//! Only the preconditions of a draw can fail. Once dispatching begins,
//! per-item failures are reported as [`DispatchOutcome`] values instead.
//!
//! [`DispatchOutcome`]: super::DispatchOutcome

use thiserror::Error;

/// Error type for draw operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DrawError {
    /// The roster is empty.
    #[error("Please add people to the list")]
    NoParticipants,

    /// Fewer participants than the draw requires.
    #[error("You need at least {required} people")]
    TooFewParticipants {
        /// Minimum number of participants.
        required: usize,
        /// Number of participants supplied.
        actual: usize,
    },

    /// A draw is already dispatching in this session.
    #[error("A draw is already in progress")]
    AlreadyRunning,
}

/// Result type alias for draw operations.
pub type Result<T> = std::result::Result<T, DrawError>;
