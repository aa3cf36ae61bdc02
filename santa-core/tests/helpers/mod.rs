//! Reusable test helpers for draw and dispatch integration tests.
//!
//! The senders here stand in for the platform SMS API. They record every
//! message they are given and track how many sends overlap, so tests can
//! assert on ordering and sequencing without a device.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use santa_core::draw::{
    pending_outcome, DispatchOutcome, DrawStatus, MessageSender, OutgoingMessage, StatusSink,
};
use santa_core::participant::Participant;

/// Builds `n` valid participants with distinct phones.
pub fn participants(n: usize) -> Vec<Participant> {
    (0..n)
        .map(|i| {
            Participant::new(format!("Person {i}"), format!("555{i:07}"))
                .expect("generated participant should be valid")
        })
        .collect()
}

/// Sender that records messages and answers from a script.
///
/// Each send sleeps briefly before resolving so that overlapping sends
/// would be observable through [`max_in_flight`](Self::max_in_flight).
#[derive(Clone, Default)]
pub struct RecordingSender {
    inner: Arc<RecordingInner>,
}

#[derive(Default)]
struct RecordingInner {
    sent: Mutex<Vec<OutgoingMessage>>,
    script: Mutex<VecDeque<DispatchOutcome>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl RecordingSender {
    /// Sender that delivers every message.
    pub fn delivering() -> Self {
        Self::default()
    }

    /// Sender that answers with `outcomes` in order, then delivers.
    pub fn scripted(outcomes: impl IntoIterator<Item = DispatchOutcome>) -> Self {
        let sender = Self::default();
        sender
            .inner
            .script
            .lock()
            .unwrap()
            .extend(outcomes);
        sender
    }

    /// Messages sent so far, in order.
    pub fn sent(&self) -> Vec<OutgoingMessage> {
        self.inner.sent.lock().unwrap().clone()
    }

    /// Highest number of sends that were running at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.inner.max_in_flight.load(Ordering::SeqCst)
    }
}

impl MessageSender for RecordingSender {
    fn send(&self, message: OutgoingMessage) -> BoxFuture<'_, DispatchOutcome> {
        async move {
            let now = self.inner.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.inner.max_in_flight.fetch_max(now, Ordering::SeqCst);

            self.inner.sent.lock().unwrap().push(message);
            tokio::time::sleep(Duration::from_millis(2)).await;

            let outcome = self
                .inner
                .script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(DispatchOutcome::Delivered);

            self.inner.in_flight.fetch_sub(1, Ordering::SeqCst);
            outcome
        }
        .boxed()
    }
}

/// Sender shaped like a callback-style platform API.
///
/// The platform "calls back" from a spawned task with the three flags
/// `(completed, cancelled, error)` taken from the script.
#[derive(Clone, Default)]
pub struct CallbackSender {
    flags: Arc<Mutex<VecDeque<(bool, bool, bool)>>>,
}

impl CallbackSender {
    /// Creates a sender that replays the given callback flags.
    pub fn new(flags: impl IntoIterator<Item = (bool, bool, bool)>) -> Self {
        Self {
            flags: Arc::new(Mutex::new(flags.into_iter().collect())),
        }
    }
}

impl MessageSender for CallbackSender {
    fn send(&self, _message: OutgoingMessage) -> BoxFuture<'_, DispatchOutcome> {
        let (callback, pending) = pending_outcome();
        let next = self.flags.lock().unwrap().pop_front();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(1)).await;
            match next {
                Some((completed, cancelled, error)) => {
                    callback.complete_with_flags(completed, cancelled, error);
                }
                // Platform never calls back.
                None => drop(callback),
            }
        });

        pending.wait().boxed()
    }
}

/// Sink that keeps every status it receives.
#[derive(Clone, Default)]
pub struct RecordingSink {
    seen: Arc<Mutex<Vec<DrawStatus>>>,
}

impl RecordingSink {
    /// Statuses received so far, in order.
    pub fn seen(&self) -> Vec<DrawStatus> {
        self.seen.lock().unwrap().clone()
    }

    /// Status texts received so far, in order.
    pub fn texts(&self) -> Vec<String> {
        self.seen().iter().map(ToString::to_string).collect()
    }
}

impl StatusSink for RecordingSink {
    fn publish(&self, status: &DrawStatus) {
        self.seen.lock().unwrap().push(status.clone());
    }
}
