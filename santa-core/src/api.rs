//! API module driven by the Flutter wrapper crate.

use crate::config::DrawSettings;
use crate::draw::{DrawError, DrawPhase, MessageSender, StatusSink};
use crate::participant::{self, DeviceContact, Participant};
use crate::session::{DrawReport, SantaSession};

/// Core interface for Secret Santa functionality.
///
/// This struct serves as the main entry point for the app: it owns the
/// current session and exposes participant management and the draw.
#[derive(Debug, Default)]
pub struct SantaCore {
    session: SantaSession,
}

impl SantaCore {
    /// Creates a new `SantaCore` with default settings.
    ///
    /// # Examples
    ///
    /// ```
    /// use santa_core::SantaCore;
    ///
    /// let core = SantaCore::new();
    /// assert_eq!(core.participant_count(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new `SantaCore` with the given settings.
    #[must_use]
    pub fn with_settings(settings: DrawSettings) -> Self {
        Self {
            session: SantaSession::new(settings),
        }
    }

    /// The current session.
    #[must_use]
    pub const fn session(&self) -> &SantaSession {
        &self.session
    }

    /// Participants in insertion order.
    #[must_use]
    pub fn participants(&self) -> &[Participant] {
        self.session.roster().as_slice()
    }

    /// Number of participants.
    #[must_use]
    pub fn participant_count(&self) -> usize {
        self.session.roster().len()
    }

    /// Headline for the participant list.
    #[must_use]
    pub fn summary(&self) -> String {
        self.session.roster().summary()
    }

    /// Adds a participant by manual entry.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank name, a phone that is not
    /// 10 digits, or a phone already on the list.
    pub fn add_participant(&mut self, name: &str, phone: &str) -> participant::Result<()> {
        self.session.add_participant(name, phone).map(|_| ())
    }

    /// Adds a participant picked from the device contacts.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the contact has no usable name or
    /// phone, or its phone is already on the list.
    pub fn import_contact(&mut self, contact: &DeviceContact) -> participant::Result<()> {
        self.session.import_contact(contact).map(|_| ())
    }

    /// Removes a participant by phone number.
    ///
    /// # Errors
    ///
    /// Returns an error if no participant has that phone.
    pub fn remove_participant(&mut self, phone: &str) -> participant::Result<()> {
        self.session.remove_participant(phone).map(|_| ())
    }

    /// Removes the participant shown at a list position.
    ///
    /// # Errors
    ///
    /// Returns an error if the index is out of range.
    pub fn remove_participant_at(&mut self, index: usize) -> participant::Result<()> {
        self.session.remove_participant_at(index).map(|_| ())
    }

    /// The active settings.
    #[must_use]
    pub const fn settings(&self) -> &DrawSettings {
        self.session.settings()
    }

    /// Replaces the settings for the next draw.
    pub fn set_settings(&mut self, settings: DrawSettings) {
        self.session.set_settings(settings);
    }

    /// Current draw phase.
    #[must_use]
    pub const fn phase(&self) -> DrawPhase {
        self.session.phase()
    }

    /// Checks whether the draw button should start a draw.
    ///
    /// # Errors
    ///
    /// Returns the guard message to show if it should not.
    pub fn check_ready(&self) -> Result<(), DrawError> {
        self.session.check_ready()
    }

    /// Runs the draw and notifies every participant.
    ///
    /// # Errors
    ///
    /// Returns a [`DrawError`] if the draw cannot start.
    pub async fn run_draw<S, K>(&mut self, sender: &S, status: &K) -> Result<DrawReport, DrawError>
    where
        S: MessageSender + ?Sized,
        K: StatusSink + ?Sized,
    {
        self.session.run_draw(sender, status).await
    }

    /// Returns the draw phase to idle when the progress view closes.
    pub fn dismiss(&mut self) {
        self.session.dismiss();
    }

    /// Starts a fresh session, keeping the current settings.
    pub fn reset(&mut self) {
        let settings = self.session.settings().clone();
        self.session = SantaSession::new(settings);
    }
}
