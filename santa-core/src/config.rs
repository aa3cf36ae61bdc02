//! Draw settings.
//!
//! Settings are plain data with defaults for every field, so a partial JSON
//! document (or none at all) yields a usable configuration.
//!
//! ```
//! use santa_core::config::DrawSettings;
//!
//! let settings = DrawSettings::from_json(r#"{ "min_participants": 4 }"#).unwrap();
//! assert_eq!(settings.min_participants, 4);
//! assert!(settings.direct_send);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::draw::{MessageTemplate, MIN_DRAW_SIZE};

/// Participants required before the app will start a draw.
pub const DEFAULT_MIN_PARTICIPANTS: usize = 3;

/// Error type for loading settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Settings file could not be read.
    #[error("Failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    /// Settings document is not valid JSON for [`DrawSettings`].
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// Settings parsed but are not usable.
    #[error("Invalid settings: {0}")]
    Invalid(String),
}

/// Result type alias for settings operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Settings for running a draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawSettings {
    /// Minimum roster size to start a draw. Never below 2.
    pub min_participants: usize,
    /// Notification text with `{giver}` and `{recipient}` placeholders.
    pub message_template: MessageTemplate,
    /// Ask the platform to send without its compose screen.
    pub direct_send: bool,
}

impl Default for DrawSettings {
    fn default() -> Self {
        Self {
            min_participants: DEFAULT_MIN_PARTICIPANTS,
            message_template: MessageTemplate::default(),
            direct_send: true,
        }
    }
}

impl DrawSettings {
    /// Creates default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum roster size.
    #[must_use]
    pub const fn with_min_participants(mut self, min_participants: usize) -> Self {
        self.min_participants = min_participants;
        self
    }

    /// Sets the message template.
    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.message_template = MessageTemplate::new(template);
        self
    }

    /// Sets whether messages are sent without the compose screen.
    #[must_use]
    pub const fn with_direct_send(mut self, direct_send: bool) -> Self {
        self.direct_send = direct_send;
        self
    }

    /// Checks that the settings can drive a draw.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `min_participants` is below 2 or
    /// the template is blank.
    pub fn validate(&self) -> Result<()> {
        if self.min_participants < MIN_DRAW_SIZE {
            return Err(ConfigError::Invalid(format!(
                "min_participants must be at least {MIN_DRAW_SIZE}, got {}",
                self.min_participants
            )));
        }
        if self.message_template.as_str().trim().is_empty() {
            return Err(ConfigError::Invalid(
                "message_template must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Parses and validates settings from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or fails [`validate`](Self::validate).
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serializes the settings to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Loads settings from a JSON file, falling back to defaults if the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed or
    /// validated.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_json(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }
}
