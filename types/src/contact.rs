//! Contact identifiers with a single normalization point.
//!
//! Emails and phone numbers are normalized exactly once, when parsed at the
//! API boundary. Everything downstream (stores, engines, channel senders)
//! only ever sees normalized values, so lookups and cooldown matching can
//! compare strings directly.

use crate::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A normalized (trimmed, lowercased) email address.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parse and normalize a raw email string.
    pub fn parse(raw: &str) -> Result<Self, EngineError> {
        let normalized = raw.trim().to_ascii_lowercase();
        let Some((local, domain)) = normalized.split_once('@') else {
            return Err(EngineError::Validation(format!(
                "invalid email address: {raw}"
            )));
        };
        if local.is_empty() || domain.is_empty() || !domain.contains('.') {
            return Err(EngineError::Validation(format!(
                "invalid email address: {raw}"
            )));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A phone number normalized to E.164 (`+` followed by digits).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Parse and normalize a raw phone string.
    ///
    /// Strips formatting characters, keeps an existing `+` country prefix,
    /// and otherwise prepends `default_country_code`. A bare 10-digit number
    /// with the default `+91` code is treated as a national number.
    pub fn parse(raw: &str, default_country_code: &str) -> Result<Self, EngineError> {
        let mut cleaned = String::with_capacity(raw.len());
        for (i, c) in raw.trim().chars().enumerate() {
            if c.is_ascii_digit() || (c == '+' && i == 0) {
                cleaned.push(c);
            } else if c == ' ' || c == '-' || c == '(' || c == ')' || c == '.' {
                continue;
            } else {
                return Err(EngineError::Validation(format!(
                    "invalid phone number: {raw}"
                )));
            }
        }

        let normalized = if cleaned.starts_with('+') {
            cleaned
        } else if cleaned.len() == 10 && default_country_code == "+91" {
            format!("+91{cleaned}")
        } else {
            let national = cleaned.trim_start_matches('0');
            format!("{default_country_code}{national}")
        };

        let digits = normalized.trim_start_matches('+');
        if digits.len() < 8 || digits.len() > 15 || digits.contains('+') {
            return Err(EngineError::Validation(format!(
                "invalid phone number: {raw}"
            )));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single contact identifier, for directory lookups.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContactValue {
    Email(EmailAddress),
    Phone(PhoneNumber),
}

impl fmt::Display for ContactValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactValue::Email(e) => write!(f, "{e}"),
            ContactValue::Phone(p) => write!(f, "{p}"),
        }
    }
}

/// The subject of a one-time credential: at least one contact identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subject {
    email: Option<EmailAddress>,
    phone: Option<PhoneNumber>,
}

impl Subject {
    /// Build a subject from already-normalized identifiers.
    ///
    /// Fails with a [`EngineError::Validation`] if both are absent.
    pub fn new(email: Option<EmailAddress>, phone: Option<PhoneNumber>) -> Result<Self, EngineError> {
        if email.is_none() && phone.is_none() {
            return Err(EngineError::Validation(
                "at least one of email or phone is required".to_string(),
            ));
        }
        Ok(Self { email, phone })
    }

    pub fn email(&self) -> Option<&EmailAddress> {
        self.email.as_ref()
    }

    pub fn phone(&self) -> Option<&PhoneNumber> {
        self.phone.as_ref()
    }

    /// Whether two subjects share at least one identifier.
    ///
    /// This is the credential-lookup matching rule: a match on either
    /// identifier selects the credential.
    pub fn overlaps(&self, other: &Subject) -> bool {
        let email_match = matches!((&self.email, &other.email), (Some(a), Some(b)) if a == b);
        let phone_match = matches!((&self.phone, &other.phone), (Some(a), Some(b)) if a == b);
        email_match || phone_match
    }
}
