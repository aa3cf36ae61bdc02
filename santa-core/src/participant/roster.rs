//! Ordered, phone-unique participant list.

use log::debug;

use super::error::{Result, ValidationError};
use super::types::{mask_phone, DeviceContact, Participant};

/// The participants registered for the current session.
///
/// Insertion order is preserved. Phone numbers are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    /// Creates an empty roster.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            participants: Vec::new(),
        }
    }

    /// Adds a participant after validating it.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the entry is malformed or its phone
    /// number is already on the roster.
    pub fn add(&mut self, name: &str, phone: &str) -> Result<&Participant> {
        let participant = Participant::new(name, phone)?;
        self.insert(participant)
    }

    /// Adds a participant built from a device contact.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the contact has no usable name or
    /// phone, or if its phone number is already on the roster.
    pub fn import_contact(&mut self, contact: &DeviceContact) -> Result<&Participant> {
        let participant = Participant::from_contact(contact)?;
        self.insert(participant)
    }

    /// Adds an already-validated participant.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DuplicatePhone`] if the phone number is
    /// already on the roster.
    pub fn insert(&mut self, participant: Participant) -> Result<&Participant> {
        if self.contains(participant.phone()) {
            return Err(ValidationError::DuplicatePhone(participant.masked_phone()));
        }

        debug!("Adding participant {participant}");
        self.participants.push(participant);
        let index = self.participants.len() - 1;
        Ok(&self.participants[index])
    }

    /// Removes the participant with the given phone number.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NotFound`] if no participant has that phone.
    pub fn remove(&mut self, phone: &str) -> Result<Participant> {
        let index = self
            .participants
            .iter()
            .position(|p| p.phone() == phone)
            .ok_or_else(|| ValidationError::NotFound(mask_phone(phone)))?;

        Ok(self.participants.remove(index))
    }

    /// Removes the participant at a list position.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NotFound`] if the index is out of range.
    pub fn remove_at(&mut self, index: usize) -> Result<Participant> {
        if index >= self.participants.len() {
            return Err(ValidationError::NotFound(format!("index {index}")));
        }
        Ok(self.participants.remove(index))
    }

    /// Looks up a participant by phone number.
    #[must_use]
    pub fn get(&self, phone: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.phone() == phone)
    }

    /// Returns whether a participant with this phone number exists.
    #[must_use]
    pub fn contains(&self, phone: &str) -> bool {
        self.get(phone).is_some()
    }

    /// Number of participants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Whether the roster is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Iterates participants in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Participant> {
        self.participants.iter()
    }

    /// Participants as a slice, in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[Participant] {
        &self.participants
    }

    /// Removes everyone.
    pub fn clear(&mut self) {
        self.participants.clear();
    }

    /// Headline shown above the participant list.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.is_empty() {
            "You need to add people to start the Secret Santa".to_string()
        } else {
            format!("You have added {} people", self.len())
        }
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Participant;
    type IntoIter = std::slice::Iter<'a, Participant>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
