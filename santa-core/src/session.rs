//! A single run of the app: the roster, the settings and the draw phase.
//!
//! The session is owned by the caller and passed around explicitly.
//! [`SantaSession::run_draw`] borrows it mutably until every notification
//! has resolved, so the roster cannot change under a running draw.

use chrono::{DateTime, Utc};
use log::{debug, info};
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::config::DrawSettings;
use crate::draw::{
    dispatch_all_with_progress, draw_with_rng, DispatchOutcome, DispatchRecord, DrawError,
    DrawPhase, DrawStatus, MessageSender, StatusSink,
};
use crate::participant::{self, DeviceContact, Participant, Roster};

/// Result of a completed draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrawReport {
    /// One record per assignment, in dispatch order.
    pub records: Vec<DispatchRecord>,
    /// When the draw started.
    pub started_at: DateTime<Utc>,
    /// When the last notification resolved.
    pub finished_at: DateTime<Utc>,
}

impl DrawReport {
    /// Outcomes in dispatch order.
    #[must_use]
    pub fn outcomes(&self) -> Vec<DispatchOutcome> {
        self.records.iter().map(|r| r.outcome).collect()
    }

    /// Number of notifications that went out.
    #[must_use]
    pub fn delivered(&self) -> usize {
        self.count(DispatchOutcome::Delivered)
    }

    /// Number of notifications the user cancelled.
    #[must_use]
    pub fn cancelled(&self) -> usize {
        self.count(DispatchOutcome::CancelledByUser)
    }

    /// Number of notifications that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(DispatchOutcome::Failed)
    }

    /// Returns whether every participant was notified.
    #[must_use]
    pub fn all_delivered(&self) -> bool {
        self.records.iter().all(|r| r.outcome.is_delivered())
    }

    fn count(&self, outcome: DispatchOutcome) -> usize {
        self.records.iter().filter(|r| r.outcome == outcome).count()
    }
}

/// Roster, settings and draw state for one session.
#[derive(Debug, Clone, Default)]
pub struct SantaSession {
    roster: Roster,
    settings: DrawSettings,
    phase: DrawPhase,
}

impl SantaSession {
    /// Creates an empty session.
    #[must_use]
    pub fn new(settings: DrawSettings) -> Self {
        Self {
            roster: Roster::new(),
            settings,
            phase: DrawPhase::Idle,
        }
    }

    /// The participant list.
    #[must_use]
    pub const fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The active settings.
    #[must_use]
    pub const fn settings(&self) -> &DrawSettings {
        &self.settings
    }

    /// Replaces the settings for subsequent draws.
    pub fn set_settings(&mut self, settings: DrawSettings) {
        self.settings = settings;
    }

    /// Current draw phase.
    #[must_use]
    pub const fn phase(&self) -> DrawPhase {
        self.phase
    }

    /// Adds a participant by manual entry.
    ///
    /// # Errors
    ///
    /// See [`Roster::add`].
    pub fn add_participant(&mut self, name: &str, phone: &str) -> participant::Result<&Participant> {
        self.roster.add(name, phone)
    }

    /// Adds a participant from a device contact.
    ///
    /// # Errors
    ///
    /// See [`Roster::import_contact`].
    pub fn import_contact(&mut self, contact: &DeviceContact) -> participant::Result<&Participant> {
        self.roster.import_contact(contact)
    }

    /// Removes the participant with this phone number.
    ///
    /// # Errors
    ///
    /// See [`Roster::remove`].
    pub fn remove_participant(&mut self, phone: &str) -> participant::Result<Participant> {
        self.roster.remove(phone)
    }

    /// Removes the participant at a list position.
    ///
    /// # Errors
    ///
    /// See [`Roster::remove_at`].
    pub fn remove_participant_at(&mut self, index: usize) -> participant::Result<Participant> {
        self.roster.remove_at(index)
    }

    /// Checks whether a draw may start now.
    ///
    /// # Errors
    ///
    /// - [`DrawError::AlreadyRunning`] if a previous draw never finished
    /// - [`DrawError::NoParticipants`] for an empty roster
    /// - [`DrawError::TooFewParticipants`] below the configured minimum
    pub fn check_ready(&self) -> Result<(), DrawError> {
        if self.phase.is_in_progress() {
            return Err(DrawError::AlreadyRunning);
        }

        let actual = self.roster.len();
        if actual == 0 {
            return Err(DrawError::NoParticipants);
        }

        let required = self.settings.min_participants.max(crate::draw::MIN_DRAW_SIZE);
        if actual < required {
            return Err(DrawError::TooFewParticipants { required, actual });
        }

        Ok(())
    }

    /// Runs the draw with a freshly seeded RNG.
    ///
    /// # Errors
    ///
    /// Returns a [`DrawError`] if [`check_ready`](Self::check_ready) fails.
    /// Nothing is sent in that case.
    pub async fn run_draw<S, K>(&mut self, sender: &S, status: &K) -> Result<DrawReport, DrawError>
    where
        S: MessageSender + ?Sized,
        K: StatusSink + ?Sized,
    {
        let mut rng = rand::rngs::StdRng::from_entropy();
        self.run_draw_with_rng(sender, status, &mut rng).await
    }

    /// Runs the draw: shuffle, assign, then notify everyone in order.
    ///
    /// Failed or cancelled notifications are part of the report; they do
    /// not stop the remaining ones.
    ///
    /// # Errors
    ///
    /// Returns a [`DrawError`] if [`check_ready`](Self::check_ready) fails.
    pub async fn run_draw_with_rng<S, K, R>(
        &mut self,
        sender: &S,
        status: &K,
        rng: &mut R,
    ) -> Result<DrawReport, DrawError>
    where
        S: MessageSender + ?Sized,
        K: StatusSink + ?Sized,
        R: Rng + ?Sized,
    {
        self.check_ready()?;

        let started_at = Utc::now();
        info!("Starting draw for {} participants", self.roster.len());
        status.publish(&DrawStatus::Started);

        self.enter(DrawPhase::Shuffling);
        status.publish(&DrawStatus::Shuffling);
        let assignments = draw_with_rng(self.roster.as_slice(), rng)?;

        self.enter(DrawPhase::Assigning);
        status.publish(&DrawStatus::Assigning);

        status.publish(&DrawStatus::Preparing);
        let settings = self.settings.clone();
        let phase = &mut self.phase;
        let records = dispatch_all_with_progress(
            assignments,
            sender,
            status,
            &settings.message_template,
            settings.direct_send,
            |current, total| {
                *phase = DrawPhase::Dispatching { current, total };
                debug!("Phase -> {phase:?}");
            },
        )
        .await;

        self.enter(DrawPhase::Done);
        let report = DrawReport {
            records,
            started_at,
            finished_at: Utc::now(),
        };
        info!(
            "Draw finished: {} delivered, {} cancelled, {} failed",
            report.delivered(),
            report.cancelled(),
            report.failed()
        );
        Ok(report)
    }

    /// Returns to `Idle` after the progress view is closed.
    pub fn dismiss(&mut self) {
        self.enter(DrawPhase::Idle);
    }

    fn enter(&mut self, phase: DrawPhase) {
        debug!("Phase {:?} -> {phase:?}", self.phase);
        self.phase = phase;
    }
}
