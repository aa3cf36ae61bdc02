//! Draw progress: phases, user-facing status updates and the sinks that
//! surface them.

use log::debug;
use serde::Serialize;
use tokio::sync::mpsc;

use super::dispatch::DispatchOutcome;

/// Where a session is in the draw-and-notify flow.
///
/// `Idle -> Shuffling -> Assigning -> Dispatching -> Done`. Nothing moves
/// back to `Idle` on its own; the presentation does that when dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum DrawPhase {
    /// No draw running.
    #[default]
    Idle,
    /// Randomizing the participant order.
    Shuffling,
    /// Building the rotation.
    Assigning,
    /// Sending notification `current` of `total` (1-based).
    Dispatching {
        /// Position of the notification being sent.
        current: usize,
        /// Number of notifications in this draw.
        total: usize,
    },
    /// Every notification has resolved.
    Done,
}

impl DrawPhase {
    /// Returns whether a draw is between start and completion.
    #[must_use]
    pub const fn is_in_progress(&self) -> bool {
        matches!(
            self,
            Self::Shuffling | Self::Assigning | Self::Dispatching { .. }
        )
    }
}

/// A progress update shown to the user while a draw runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DrawStatus {
    /// The draw was accepted and is starting.
    Started,
    /// Shuffling participants.
    Shuffling,
    /// Creating assignments.
    Assigning,
    /// About to send notifications.
    Preparing,
    /// One notification resolved.
    Notified {
        /// Name of the giver who was (or was not) notified.
        giver: String,
        /// How the send ended.
        outcome: DispatchOutcome,
    },
    /// All notifications resolved.
    AllDone,
}

impl std::fmt::Display for DrawStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Started => f.write_str("Santa is working!"),
            Self::Shuffling => f.write_str("Shuffling all the items!"),
            Self::Assigning => f.write_str("Creating the secret santa!"),
            Self::Preparing => f.write_str("Preparing to notify!"),
            Self::Notified { giver, outcome } => match outcome {
                DispatchOutcome::Delivered => write!(f, "{giver} has been notified!"),
                DispatchOutcome::CancelledByUser => write!(
                    f,
                    "{giver} hasn't been notified. Reason: Cancelled by user!"
                ),
                DispatchOutcome::Failed => {
                    write!(f, "{giver} hasn't been notified. Reason: Something failed!")
                }
            },
            Self::AllDone => f.write_str("All done. Happy holidays!"),
        }
    }
}

/// Receives progress updates for the presentation layer.
pub trait StatusSink: Send + Sync {
    /// Surfaces one update. Must not block.
    fn publish(&self, status: &DrawStatus);
}

/// A sink that discards every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStatusSink;

impl StatusSink for NoopStatusSink {
    fn publish(&self, _status: &DrawStatus) {}
}

/// Forwards updates over an unbounded `tokio` channel.
///
/// If the receiving side has been dropped (the progress view was
/// dismissed) updates are discarded and the draw carries on.
#[derive(Debug, Clone)]
pub struct ChannelStatusSink {
    tx: mpsc::UnboundedSender<DrawStatus>,
}

impl ChannelStatusSink {
    /// Creates a sink and the receiver that reads from it.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<DrawStatus>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Returns whether the receiving side is gone.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl StatusSink for ChannelStatusSink {
    fn publish(&self, status: &DrawStatus) {
        if self.tx.send(status.clone()).is_err() {
            debug!("Status receiver closed, dropping update: {status}");
        }
    }
}
