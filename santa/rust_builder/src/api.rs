//! API bridging layer that exposes santa-core functionality.

use flutter_rust_bridge::{frb, DartFnFuture};
use futures::future::BoxFuture;
use log::debug;
use santa_core::config::DrawSettings;
use santa_core::draw::{
    ChannelStatusSink, DispatchOutcome, DrawPhase, MessageSender, OutgoingMessage,
};
use santa_core::participant::DeviceContact;

/// Core interface for Secret Santa (wrapper around santa-core).
#[derive(Debug, Default)]
#[frb(opaque)]
pub struct SantaApp {
    inner: santa_core::SantaCore,
}

impl SantaApp {
    /// Creates a new `SantaApp` with default settings.
    #[must_use]
    #[frb(sync)]
    pub fn new() -> Self {
        Self {
            inner: santa_core::SantaCore::new(),
        }
    }

    /// Creates a new `SantaApp` from a settings JSON document.
    #[frb(sync)]
    pub fn with_settings_json(json: String) -> Result<Self, String> {
        let settings = DrawSettings::from_json(&json).map_err(|e| e.to_string())?;
        Ok(Self {
            inner: santa_core::SantaCore::with_settings(settings),
        })
    }

    /// Gets the active settings as JSON.
    #[frb(sync)]
    pub fn settings_json(&self) -> Result<String, String> {
        self.inner.settings().to_json().map_err(|e| e.to_string())
    }

    /// Adds a participant typed into the form.
    #[frb(sync)]
    pub fn add_participant(&mut self, name: String, phone: String) -> Result<(), String> {
        self.inner
            .add_participant(&name, &phone)
            .map_err(|e| e.to_string())
    }

    /// Adds a participant picked from the device contacts.
    #[frb(sync)]
    pub fn import_contact(
        &mut self,
        display_name: String,
        phone_numbers: Vec<String>,
    ) -> Result<(), String> {
        let contact = DeviceContact {
            display_name,
            phone_numbers,
        };
        self.inner
            .import_contact(&contact)
            .map_err(|e| e.to_string())
    }

    /// Removes the participant at a list position.
    #[frb(sync)]
    pub fn remove_participant(&mut self, index: usize) -> Result<(), String> {
        self.inner
            .remove_participant_at(index)
            .map_err(|e| e.to_string())
    }

    /// Gets the participants for list rendering.
    #[frb(sync)]
    #[must_use]
    pub fn participants(&self) -> Vec<ParticipantView> {
        self.inner
            .participants()
            .iter()
            .map(|p| ParticipantView {
                name: p.name().to_string(),
                masked_phone: p.masked_phone(),
            })
            .collect()
    }

    /// Gets the headline shown above the list.
    #[frb(sync)]
    #[must_use]
    pub fn summary(&self) -> String {
        self.inner.summary()
    }

    /// Checks whether the draw can start; the error is the message to show.
    #[frb(sync)]
    pub fn check_ready(&self) -> Result<(), String> {
        self.inner.check_ready().map_err(|e| e.to_string())
    }

    /// Gets the current draw phase.
    #[frb(sync)]
    #[must_use]
    pub fn phase(&self) -> PhaseView {
        PhaseView::from(self.inner.phase())
    }

    /// Returns the phase to idle after the progress modal closes.
    #[frb(sync)]
    pub fn dismiss(&mut self) {
        self.inner.dismiss();
    }

    /// Runs the draw.
    ///
    /// `send` performs one SMS send on the platform and resolves with its
    /// callback flags. `on_status` receives every progress text, in order.
    pub async fn run_draw(
        &mut self,
        send: impl Fn(SmsRequest) -> DartFnFuture<SmsResult> + Send + Sync + 'static,
        on_status: impl Fn(String) -> DartFnFuture<()> + Send + Sync + 'static,
    ) -> Result<DrawSummary, String> {
        let sender = DartSender { send };
        let (sink, mut updates) = ChannelStatusSink::new();

        let draw = async {
            // Dropping the sink when the draw ends closes the update stream.
            let sink = sink;
            self.inner.run_draw(&sender, &sink).await
        };
        let forward = async {
            while let Some(status) = updates.recv().await {
                on_status(status.to_string()).await;
            }
        };

        let (result, ()) = futures::join!(draw, forward);
        let report = result.map_err(|e| e.to_string())?;

        Ok(DrawSummary {
            delivered: report.delivered(),
            cancelled: report.cancelled(),
            failed: report.failed(),
        })
    }
}

/// A participant row for the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantView {
    /// Participant name.
    pub name: String,
    /// Phone with the leading digits hidden.
    pub masked_phone: String,
}

/// Draw phase for the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseView {
    /// No draw running.
    Idle,
    /// Shuffling participants.
    Shuffling,
    /// Building assignments.
    Assigning,
    /// Sending notification `current` of `total`.
    Dispatching {
        /// 1-based position.
        current: usize,
        /// Total notifications.
        total: usize,
    },
    /// All notifications resolved.
    Done,
}

impl From<DrawPhase> for PhaseView {
    fn from(phase: DrawPhase) -> Self {
        match phase {
            DrawPhase::Idle => Self::Idle,
            DrawPhase::Shuffling => Self::Shuffling,
            DrawPhase::Assigning => Self::Assigning,
            DrawPhase::Dispatching { current, total } => Self::Dispatching { current, total },
            DrawPhase::Done => Self::Done,
        }
    }
}

/// An SMS for the platform to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsRequest {
    /// Destination phone number.
    pub to: String,
    /// Message text.
    pub body: String,
    /// Send without opening the compose screen.
    pub direct_send: bool,
}

impl From<&OutgoingMessage> for SmsRequest {
    fn from(message: &OutgoingMessage) -> Self {
        Self {
            to: message.to.clone(),
            body: message.body.clone(),
            direct_send: message.direct_send,
        }
    }
}

/// The platform SMS callback flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SmsResult {
    /// Message was sent or queued.
    pub completed: bool,
    /// User cancelled the send.
    pub cancelled: bool,
    /// Sending failed.
    pub error: bool,
}

impl From<SmsResult> for DispatchOutcome {
    fn from(result: SmsResult) -> Self {
        Self::from_flags(result.completed, result.cancelled, result.error)
    }
}

/// Counts of how the notifications ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawSummary {
    /// Participants notified.
    pub delivered: usize,
    /// Sends cancelled by the user.
    pub cancelled: usize,
    /// Sends that failed.
    pub failed: usize,
}

/// Adapts the Dart send callback to the core's sender.
struct DartSender<F> {
    send: F,
}

impl<F> MessageSender for DartSender<F>
where
    F: Fn(SmsRequest) -> DartFnFuture<SmsResult> + Send + Sync,
{
    fn send(&self, message: OutgoingMessage) -> BoxFuture<'_, DispatchOutcome> {
        debug!("Handing SMS to platform for {}", message.assignment.giver.masked_phone());
        let pending = (self.send)(SmsRequest::from(&message));
        Box::pin(async move { DispatchOutcome::from(pending.await) })
    }
}
