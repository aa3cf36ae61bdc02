//! Participants and the in-memory roster.
//!
//! Participants are added by manual entry or imported from a device contact
//! and live only for the duration of a session. The roster keys entries by
//! phone number and rejects duplicates.
//!
//! # Types
//!
//! - [`Participant`]: a validated name and 10-digit phone number
//! - [`DeviceContact`]: raw contact data from the platform picker
//! - [`Roster`]: the ordered participant list

mod error;
mod roster;
mod types;

pub use error::{Result, ValidationError};
pub use roster::Roster;
pub use types::{
    is_valid_phone, mask_phone, normalize_phone, DeviceContact, Participant, MASKED_DIGITS,
    PHONE_DIGITS,
};
