//! Notification text for a drawn assignment.

use serde::{Deserialize, Serialize};

use super::engine::Assignment;

/// Template used when none is configured.
pub const DEFAULT_TEMPLATE: &str =
    "Hola {giver}, has sido elegid@ para darle regalo a {recipient} en la proxima navidad!";

const GIVER_PLACEHOLDER: &str = "{giver}";
const RECIPIENT_PLACEHOLDER: &str = "{recipient}";

/// Message body with `{giver}` and `{recipient}` placeholders.
///
/// Any other text, including unknown `{...}` sequences, is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageTemplate(String);

impl MessageTemplate {
    /// Creates a template from raw text.
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// Returns the raw template text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns whether the template mentions the recipient at all.
    #[must_use]
    pub fn mentions_recipient(&self) -> bool {
        self.0.contains(RECIPIENT_PLACEHOLDER)
    }

    /// Fills in the placeholders for one assignment.
    ///
    /// ```
    /// use santa_core::draw::{Assignment, MessageTemplate};
    /// use santa_core::participant::Participant;
    ///
    /// let a = Assignment::new(
    ///     Participant::new("Ana", "5550000001").unwrap(),
    ///     Participant::new("Beto", "5550000002").unwrap(),
    /// );
    /// let template = MessageTemplate::new("{giver} -> {recipient}");
    /// assert_eq!(template.render(&a), "Ana -> Beto");
    /// ```
    #[must_use]
    pub fn render(&self, assignment: &Assignment) -> String {
        self.0
            .replace(GIVER_PLACEHOLDER, assignment.giver.name())
            .replace(RECIPIENT_PLACEHOLDER, assignment.recipient.name())
    }
}

impl Default for MessageTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

/// A text message ready to hand to the platform sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingMessage {
    /// The assignment this message announces.
    pub assignment: Assignment,
    /// Destination phone number (the giver's).
    pub to: String,
    /// Rendered message body.
    pub body: String,
    /// Ask the platform to send without showing its compose screen.
    pub direct_send: bool,
}

impl OutgoingMessage {
    /// Builds the message for an assignment.
    #[must_use]
    pub fn for_assignment(
        assignment: Assignment,
        template: &MessageTemplate,
        direct_send: bool,
    ) -> Self {
        let body = template.render(&assignment);
        let to = assignment.giver.phone().to_string();
        Self {
            assignment,
            to,
            body,
            direct_send,
        }
    }
}
