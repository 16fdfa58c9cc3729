//! Credential purposes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a one-time credential proves control of a contact channel *for*.
///
/// Credentials are scoped per (subject, purpose): a code issued for login
/// can never verify a password reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CredentialPurpose {
    Registration,
    Login,
    PasswordReset,
}

impl CredentialPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialPurpose::Registration => "registration",
            CredentialPurpose::Login => "login",
            CredentialPurpose::PasswordReset => "password-reset",
        }
    }
}

impl fmt::Display for CredentialPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
