//! WhatsApp destination number.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`WhatsAppNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneNumberError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input contains something other than digits and separators.
    #[error("phone number may only contain digits, got {0:?}")]
    InvalidCharacter(char),
    /// Too few or too many digits for an international number.
    #[error("phone number must have {min}-{max} digits, got {len}")]
    InvalidLength {
        /// Minimum digit count.
        min: usize,
        /// Maximum digit count.
        max: usize,
        /// Digits found.
        len: usize,
    },
}

/// An international phone number in the digits-only form `wa.me` expects.
///
/// ## Constraints
///
/// - Country code included, no leading `+` (it is stripped if present)
/// - Spaces and dashes are ignored
/// - 8-15 digits (E.164 allows at most 15)
///
/// ## Examples
///
/// ```
/// use darsi_core::WhatsAppNumber;
///
/// let number = WhatsAppNumber::parse("+91 94944-37815").unwrap();
/// assert_eq!(number.as_str(), "919494437815");
///
/// assert!(WhatsAppNumber::parse("").is_err());
/// assert!(WhatsAppNumber::parse("call-me").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct WhatsAppNumber(String);

impl WhatsAppNumber {
    /// Fewest digits accepted.
    pub const MIN_DIGITS: usize = 8;
    /// Most digits accepted (E.164).
    pub const MAX_DIGITS: usize = 15;

    /// Parse a number, normalising it to bare digits.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, contains characters other than
    /// digits, spaces, dashes or a leading `+`, or has the wrong digit count.
    pub fn parse(s: &str) -> Result<Self, PhoneNumberError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PhoneNumberError::Empty);
        }

        let body = trimmed.strip_prefix('+').unwrap_or(trimmed);
        let mut digits = String::with_capacity(body.len());
        for c in body.chars() {
            match c {
                '0'..='9' => digits.push(c),
                ' ' | '-' => {}
                other => return Err(PhoneNumberError::InvalidCharacter(other)),
            }
        }

        if !(Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&digits.len()) {
            return Err(PhoneNumberError::InvalidLength {
                min: Self::MIN_DIGITS,
                max: Self::MAX_DIGITS,
                len: digits.len(),
            });
        }

        Ok(Self(digits))
    }

    /// The number as bare digits.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The shop's own number.
impl Default for WhatsAppNumber {
    fn default() -> Self {
        Self(crate::checkout::DEFAULT_WHATSAPP_NUMBER.to_owned())
    }
}

impl fmt::Display for WhatsAppNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for WhatsAppNumber {
    type Err = PhoneNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for WhatsAppNumber {
    type Error = PhoneNumberError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<WhatsAppNumber> for String {
    fn from(number: WhatsAppNumber) -> Self {
        number.0
    }
}

impl AsRef<str> for WhatsAppNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
