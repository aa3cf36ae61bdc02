//! Participant and contact types.
//!
//! A [`Participant`] is only ever constructed through validation, so every
//! value flowing into the roster or the draw has a non-empty name and a
//! 10-digit phone number.

use serde::{Deserialize, Serialize};

use super::error::{Result, ValidationError};

/// Number of digits a participant phone number must have.
pub const PHONE_DIGITS: usize = 10;

/// Number of leading phone digits hidden when displaying a participant.
pub const MASKED_DIGITS: usize = 7;

/// A person taking part in the gift exchange.
///
/// Identity within a roster is the phone number.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Participant {
    name: String,
    phone: String,
}

impl Participant {
    /// Creates a validated participant.
    ///
    /// The name is trimmed. The phone must be exactly [`PHONE_DIGITS`] ASCII
    /// digits with no formatting characters.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyName`] for a blank name and
    /// [`ValidationError::InvalidPhone`] for a malformed phone number.
    ///
    /// # Examples
    ///
    /// ```
    /// use santa_core::participant::Participant;
    ///
    /// let ana = Participant::new(" Ana ", "5512345678").unwrap();
    /// assert_eq!(ana.name(), "Ana");
    /// assert!(Participant::new("Ana", "55-1234").is_err());
    /// ```
    pub fn new(name: impl AsRef<str>, phone: impl AsRef<str>) -> Result<Self> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let phone = phone.as_ref();
        if !is_valid_phone(phone) {
            return Err(ValidationError::InvalidPhone(phone.to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            phone: phone.to_string(),
        })
    }

    /// Creates a participant from a device contact.
    ///
    /// Uses the first phone number on the contact that normalizes to a
    /// 10-digit number (see [`normalize_phone`]).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyName`] if the contact has no display
    /// name and [`ValidationError::NoUsablePhone`] if none of its numbers
    /// normalize.
    pub fn from_contact(contact: &DeviceContact) -> Result<Self> {
        let phone = contact
            .phone_numbers
            .iter()
            .find_map(|raw| normalize_phone(raw))
            .ok_or_else(|| ValidationError::NoUsablePhone(contact.display_name.clone()))?;

        Self::new(&contact.display_name, phone)
    }

    /// Returns the participant's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the full phone number.
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Returns the phone number with its first digits hidden, for display.
    ///
    /// ```
    /// use santa_core::participant::Participant;
    ///
    /// let p = Participant::new("Luis", "1234567890").unwrap();
    /// assert_eq!(p.masked_phone(), "*******890");
    /// ```
    #[must_use]
    pub fn masked_phone(&self) -> String {
        mask_phone(&self.phone)
    }
}

impl std::fmt::Debug for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Participant")
            .field("name", &self.name)
            .field("phone", &self.masked_phone())
            .finish()
    }
}

impl std::fmt::Display for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.masked_phone())
    }
}

/// A contact as handed over by the platform contact picker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceContact {
    /// Display name shown in the device address book.
    pub display_name: String,
    /// Raw phone numbers, in whatever format the address book stores them.
    pub phone_numbers: Vec<String>,
}

impl DeviceContact {
    /// Creates a contact with a single phone number.
    #[must_use]
    pub fn new(display_name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            phone_numbers: vec![phone.into()],
        }
    }

    /// Adds another phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone_numbers.push(phone.into());
        self
    }
}

/// Returns whether `phone` is exactly [`PHONE_DIGITS`] ASCII digits.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() == PHONE_DIGITS && phone.bytes().all(|b| b.is_ascii_digit())
}

/// Normalizes an address-book phone number to 10 digits.
///
/// Strips every non-digit character. An 11-digit result starting with the
/// `1` country code is trimmed to its last 10 digits.
///
/// ```
/// use santa_core::participant::normalize_phone;
///
/// assert_eq!(normalize_phone("(555) 123-4567").as_deref(), Some("5551234567"));
/// assert_eq!(normalize_phone("+1 555 123 4567").as_deref(), Some("5551234567"));
/// assert_eq!(normalize_phone("123"), None);
/// ```
#[must_use]
pub fn normalize_phone(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    match digits.len() {
        PHONE_DIGITS => Some(digits),
        11 if digits.starts_with('1') => Some(digits[1..].to_string()),
        _ => None,
    }
}

/// Replaces the first [`MASKED_DIGITS`] characters of a phone with `*`.
#[must_use]
pub fn mask_phone(phone: &str) -> String {
    phone
        .chars()
        .enumerate()
        .map(|(i, c)| if i < MASKED_DIGITS { '*' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_name() {
        let p = Participant::new("  Marta  ", "5551234567").unwrap();
        assert_eq!(p.name(), "Marta");
        assert_eq!(p.phone(), "5551234567");
    }

    #[test]
    fn new_rejects_blank_name() {
        let err = Participant::new("   ", "5551234567").unwrap_err();
        assert!(matches!(err, ValidationError::EmptyName));
    }

    #[test]
    fn new_rejects_short_phone() {
        let err = Participant::new("Marta", "555123456").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidPhone(p) if p == "555123456"));
    }

    #[test]
    fn new_rejects_long_phone() {
        assert!(Participant::new("Marta", "55512345678").is_err());
    }

    #[test]
    fn new_rejects_non_digit_phone() {
        assert!(Participant::new("Marta", "555-123-45").is_err());
        assert!(Participant::new("Marta", "55512345a7").is_err());
    }

    #[test]
    fn new_rejects_non_ascii_digits() {
        // Arabic-Indic digits are numeric but not ASCII.
        assert!(Participant::new("Marta", "٠١٢٣٤٥٦٧٨٩").is_err());
    }

    #[test]
    fn masked_phone_hides_first_seven() {
        let p = Participant::new("John", "1234567890").unwrap();
        assert_eq!(p.masked_phone(), "*******890");
    }

    #[test]
    fn mask_phone_short_input() {
        assert_eq!(mask_phone("123"), "***");
        assert_eq!(mask_phone(""), "");
    }

    #[test]
    fn debug_redacts_phone() {
        let p = Participant::new("John", "1234567890").unwrap();
        let debug_str = format!("{p:?}");
        assert!(debug_str.contains("John"));
        assert!(debug_str.contains("*******890"));
        assert!(!debug_str.contains("1234567"));
    }

    #[test]
    fn display_shows_name_and_masked_phone() {
        let p = Participant::new("John", "1234567890").unwrap();
        assert_eq!(p.to_string(), "John (*******890)");
    }

    #[test]
    fn normalize_strips_formatting() {
        assert_eq!(normalize_phone("555.123.4567").as_deref(), Some("5551234567"));
        assert_eq!(normalize_phone(" 555 123 4567 ").as_deref(), Some("5551234567"));
    }

    #[test]
    fn normalize_drops_us_country_code() {
        assert_eq!(normalize_phone("15551234567").as_deref(), Some("5551234567"));
    }

    #[test]
    fn normalize_rejects_other_country_codes() {
        assert_eq!(normalize_phone("+52 555 123 4567"), None);
    }

    #[test]
    fn from_contact_uses_first_usable_number() {
        let contact = DeviceContact::new("Abuela", "123")
            .with_phone("+1 (555) 987-6543")
            .with_phone("5550000000");

        let p = Participant::from_contact(&contact).unwrap();
        assert_eq!(p.name(), "Abuela");
        assert_eq!(p.phone(), "5559876543");
    }

    #[test]
    fn from_contact_without_usable_number() {
        let contact = DeviceContact::new("Tio", "911");
        let err = Participant::from_contact(&contact).unwrap_err();
        assert!(matches!(err, ValidationError::NoUsablePhone(name) if name == "Tio"));
    }

    #[test]
    fn from_contact_without_name() {
        let contact = DeviceContact::new("", "5551234567");
        let err = Participant::from_contact(&contact).unwrap_err();
        assert!(matches!(err, ValidationError::EmptyName));
    }

    #[test]
    fn participant_serializes_full_phone() {
        let p = Participant::new("Ana", "5551234567").unwrap();
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"{"name":"Ana","phone":"5551234567"}"#);
    }
}
