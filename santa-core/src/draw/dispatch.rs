//! Sequential notification dispatch.
//!
//! Each assignment is turned into one [`OutgoingMessage`] and handed to a
//! [`MessageSender`]. Sends happen strictly one after another: the next one
//! does not start until the previous outcome has resolved. A failed or
//! cancelled send is recorded and reported but never stops the sequence.

use std::future::Future;

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use futures::FutureExt;
use log::{debug, info, warn};
use serde::Serialize;
use tokio::sync::oneshot;

use super::engine::Assignment;
use super::message::{MessageTemplate, OutgoingMessage};
use super::status::{DrawStatus, StatusSink};

/// How a single notification attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchOutcome {
    /// The platform accepted the message (sent or queued).
    Delivered,
    /// The user backed out of sending.
    CancelledByUser,
    /// The platform reported an error.
    Failed,
}

impl DispatchOutcome {
    /// Collapses a platform callback's three flags into one outcome.
    ///
    /// `completed` wins over `cancelled`; anything else is a failure,
    /// including a callback with no flag set.
    ///
    /// ```
    /// use santa_core::draw::DispatchOutcome;
    ///
    /// assert_eq!(DispatchOutcome::from_flags(true, false, false), DispatchOutcome::Delivered);
    /// assert_eq!(DispatchOutcome::from_flags(false, true, false), DispatchOutcome::CancelledByUser);
    /// assert_eq!(DispatchOutcome::from_flags(false, false, true), DispatchOutcome::Failed);
    /// ```
    #[must_use]
    pub const fn from_flags(completed: bool, cancelled: bool, _error: bool) -> Self {
        if completed {
            Self::Delivered
        } else if cancelled {
            Self::CancelledByUser
        } else {
            Self::Failed
        }
    }

    /// Returns whether the message went out.
    #[must_use]
    pub const fn is_delivered(self) -> bool {
        matches!(self, Self::Delivered)
    }
}

/// The message-transmission capability.
///
/// Implementations own the transport; the dispatcher only awaits the
/// outcome.
pub trait MessageSender: Send + Sync {
    /// Sends one message and resolves once the platform reports back.
    fn send(&self, message: OutgoingMessage) -> BoxFuture<'_, DispatchOutcome>;
}

/// Adapts an async closure into a [`MessageSender`].
///
/// ```
/// use santa_core::draw::{DispatchOutcome, FnSender};
///
/// let sender = FnSender::new(|_message| async { DispatchOutcome::Delivered });
/// # let _ = sender;
/// ```
#[derive(Debug, Clone)]
pub struct FnSender<F> {
    send: F,
}

impl<F> FnSender<F> {
    /// Wraps a closure.
    pub fn new<Fut>(send: F) -> Self
    where
        F: Fn(OutgoingMessage) -> Fut + Send + Sync,
        Fut: Future<Output = DispatchOutcome> + Send + 'static,
    {
        Self { send }
    }
}

impl<F, Fut> MessageSender for FnSender<F>
where
    F: Fn(OutgoingMessage) -> Fut + Send + Sync,
    Fut: Future<Output = DispatchOutcome> + Send + 'static,
{
    fn send(&self, message: OutgoingMessage) -> BoxFuture<'_, DispatchOutcome> {
        (self.send)(message).boxed()
    }
}

/// Creates a one-shot bridge from a callback-style platform API.
///
/// Hand the [`OutcomeCallback`] to the platform and await the
/// [`PendingOutcome`]. A callback dropped without being completed resolves
/// to [`DispatchOutcome::Failed`].
#[must_use]
pub fn pending_outcome() -> (OutcomeCallback, PendingOutcome) {
    let (tx, rx) = oneshot::channel();
    (OutcomeCallback { tx }, PendingOutcome { rx })
}

/// Completion handle given to a callback-style sender.
#[derive(Debug)]
pub struct OutcomeCallback {
    tx: oneshot::Sender<DispatchOutcome>,
}

impl OutcomeCallback {
    /// Resolves the pending outcome.
    pub fn complete(self, outcome: DispatchOutcome) {
        if self.tx.send(outcome).is_err() {
            debug!("Outcome {outcome:?} arrived after the dispatcher stopped waiting");
        }
    }

    /// Resolves the pending outcome from the platform's three flags.
    pub fn complete_with_flags(self, completed: bool, cancelled: bool, error: bool) {
        self.complete(DispatchOutcome::from_flags(completed, cancelled, error));
    }
}

/// Future side of [`pending_outcome`].
#[derive(Debug)]
pub struct PendingOutcome {
    rx: oneshot::Receiver<DispatchOutcome>,
}

impl PendingOutcome {
    /// Waits for the callback to fire.
    pub async fn wait(self) -> DispatchOutcome {
        self.rx.await.unwrap_or(DispatchOutcome::Failed)
    }
}

/// One assignment with the outcome of its notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchRecord {
    /// The assignment that was announced.
    pub assignment: Assignment,
    /// How the send ended.
    pub outcome: DispatchOutcome,
    /// When the outcome arrived.
    pub resolved_at: DateTime<Utc>,
}

/// Sends one notification per assignment, strictly in order.
///
/// After each send resolves a [`DrawStatus::Notified`] is published; after
/// the last one, [`DrawStatus::AllDone`]. Returns the records in input
/// order.
pub async fn dispatch_all<S, K>(
    assignments: Vec<Assignment>,
    sender: &S,
    status: &K,
    template: &MessageTemplate,
    direct_send: bool,
) -> Vec<DispatchRecord>
where
    S: MessageSender + ?Sized,
    K: StatusSink + ?Sized,
{
    dispatch_all_with_progress(assignments, sender, status, template, direct_send, |_, _| {})
        .await
}

/// [`dispatch_all`] with a hook called as each send starts, with the
/// 1-based position and the total.
pub(crate) async fn dispatch_all_with_progress<S, K, P>(
    assignments: Vec<Assignment>,
    sender: &S,
    status: &K,
    template: &MessageTemplate,
    direct_send: bool,
    mut on_start: P,
) -> Vec<DispatchRecord>
where
    S: MessageSender + ?Sized,
    K: StatusSink + ?Sized,
    P: FnMut(usize, usize),
{
    let total = assignments.len();
    let mut records = Vec::with_capacity(total);

    for (index, assignment) in assignments.into_iter().enumerate() {
        on_start(index + 1, total);

        let giver = assignment.giver.name().to_string();
        debug!(
            "Notifying {} ({}/{total})",
            assignment.giver.masked_phone(),
            index + 1
        );

        let message = OutgoingMessage::for_assignment(assignment, template, direct_send);
        let assignment = message.assignment.clone();
        let outcome = sender.send(message).await;

        if outcome.is_delivered() {
            debug!("Notification {}/{total} delivered", index + 1);
        } else {
            warn!("Notification {}/{total} not delivered: {outcome:?}", index + 1);
        }

        status.publish(&DrawStatus::Notified { giver, outcome });
        records.push(DispatchRecord {
            assignment,
            outcome,
            resolved_at: Utc::now(),
        });
    }

    info!("Dispatched {total} notifications");
    status.publish(&DrawStatus::AllDone);
    records
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::draw::status::NoopStatusSink;
    use crate::participant::Participant;

    #[derive(Default)]
    struct RecordingSink {
        seen: Mutex<Vec<DrawStatus>>,
    }

    impl StatusSink for RecordingSink {
        fn publish(&self, status: &DrawStatus) {
            self.seen.lock().unwrap().push(status.clone());
        }
    }

    fn rotation() -> Vec<Assignment> {
        let a = Participant::new("A", "5550000001").unwrap();
        let b = Participant::new("B", "5550000002").unwrap();
        let c = Participant::new("C", "5550000003").unwrap();
        vec![
            Assignment::new(a.clone(), b.clone()),
            Assignment::new(b, c.clone()),
            Assignment::new(c, a),
        ]
    }

    #[test]
    fn from_flags_prefers_completed() {
        assert_eq!(
            DispatchOutcome::from_flags(true, true, true),
            DispatchOutcome::Delivered
        );
        assert_eq!(
            DispatchOutcome::from_flags(false, true, true),
            DispatchOutcome::CancelledByUser
        );
        assert_eq!(
            DispatchOutcome::from_flags(false, false, false),
            DispatchOutcome::Failed
        );
    }

    #[test]
    fn outcome_serializes_snake_case() {
        let json = serde_json::to_string(&DispatchOutcome::CancelledByUser).unwrap();
        assert_eq!(json, r#""cancelled_by_user""#);
    }

    #[tokio::test]
    async fn all_delivered() {
        let sender = FnSender::new(|_| async { DispatchOutcome::Delivered });
        let sink = RecordingSink::default();

        let records =
            dispatch_all(rotation(), &sender, &sink, &MessageTemplate::default(), true).await;

        let outcomes: Vec<_> = records.iter().map(|r| r.outcome).collect();
        assert_eq!(outcomes, [DispatchOutcome::Delivered; 3]);

        let seen = sink.seen.lock().unwrap();
        assert_eq!(seen.len(), 4);
        assert_eq!(seen.last(), Some(&DrawStatus::AllDone));
    }

    #[tokio::test]
    async fn records_keep_input_order() {
        let sender = FnSender::new(|_| async { DispatchOutcome::Delivered });
        let input = rotation();

        let records = dispatch_all(
            input.clone(),
            &sender,
            &NoopStatusSink,
            &MessageTemplate::default(),
            true,
        )
        .await;

        let assignments: Vec<_> = records.into_iter().map(|r| r.assignment).collect();
        assert_eq!(assignments, input);
    }

    #[tokio::test]
    async fn empty_input_still_reports_done() {
        let sender = FnSender::new(|_| async { DispatchOutcome::Delivered });
        let sink = RecordingSink::default();

        let records =
            dispatch_all(Vec::new(), &sender, &sink, &MessageTemplate::default(), true).await;

        assert!(records.is_empty());
        assert_eq!(*sink.seen.lock().unwrap(), [DrawStatus::AllDone]);
    }

    #[tokio::test]
    async fn progress_hook_sees_each_position() {
        let sender = FnSender::new(|_| async { DispatchOutcome::Delivered });
        let mut positions = Vec::new();

        dispatch_all_with_progress(
            rotation(),
            &sender,
            &NoopStatusSink,
            &MessageTemplate::default(),
            true,
            |current, total| positions.push((current, total)),
        )
        .await;

        assert_eq!(positions, [(1, 3), (2, 3), (3, 3)]);
    }

    #[tokio::test]
    async fn pending_outcome_resolves_from_flags() {
        let (callback, pending) = pending_outcome();
        callback.complete_with_flags(false, true, false);
        assert_eq!(pending.wait().await, DispatchOutcome::CancelledByUser);
    }

    #[tokio::test]
    async fn dropped_callback_is_failure() {
        let (callback, pending) = pending_outcome();
        drop(callback);
        assert_eq!(pending.wait().await, DispatchOutcome::Failed);
    }

    #[test]
    fn late_callback_is_ignored() {
        let (callback, pending) = pending_outcome();
        drop(pending);
        callback.complete(DispatchOutcome::Delivered);
    }
}
