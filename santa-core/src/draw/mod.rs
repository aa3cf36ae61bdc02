//! The gift draw and its notification sequence.
//!
//! # Flow
//!
//! ```text
//! participants ──shuffle──▶ order ──rotate──▶ assignments
//!                                                  │
//!                           MessageSender ◀──dispatch_all (one at a time)
//!                                                  │
//!                           StatusSink    ◀──per-item + "all done" updates
//! ```
//!
//! The draw itself can only fail on its preconditions ([`DrawError`]).
//! Notification problems are per-item [`DispatchOutcome`] values.

mod dispatch;
mod engine;
mod error;
mod message;
mod status;

pub(crate) use dispatch::dispatch_all_with_progress;
pub use dispatch::{
    dispatch_all, pending_outcome, DispatchOutcome, DispatchRecord, FnSender, MessageSender,
    OutcomeCallback, PendingOutcome,
};
pub use engine::{assign_rotation, draw, draw_with_rng, Assignment, MIN_DRAW_SIZE};
pub use error::{DrawError, Result};
pub use message::{MessageTemplate, OutgoingMessage, DEFAULT_TEMPLATE};
pub use status::{ChannelStatusSink, DrawPhase, DrawStatus, NoopStatusSink, StatusSink};
