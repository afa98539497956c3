//! Value objects for the customer domain.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A customer's display name: non-empty, at most [`PersonName::MAX_LEN`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PersonName(String);

impl PersonName {
    /// Maximum length in characters.
    pub const MAX_LEN: usize = 50;

    /// Validates and wraps a name. Surrounding whitespace is trimmed.
    pub fn create(name: &str) -> Result<Self, ValidationError> {
        let name = name.trim();

        if name.is_empty() {
            return Err(ValidationError::InvalidName {
                reason: "customer name should not be empty",
            });
        }

        if name.chars().count() > Self::MAX_LEN {
            return Err(ValidationError::InvalidName {
                reason: "customer name is too long",
            });
        }

        Ok(Self(name.to_string()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PersonName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PersonName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::create(&value)
    }
}

impl From<PersonName> for String {
    fn from(name: PersonName) -> Self {
        name.0
    }
}

/// A customer email address.
///
/// Compared as an exact, case-sensitive string: `Ann@x.io` and `ann@x.io`
/// are different addresses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Maximum length in characters.
    pub const MAX_LEN: usize = 254;

    /// Validates and wraps an email. Surrounding whitespace is trimmed; case is kept.
    pub fn create(email: &str) -> Result<Self, ValidationError> {
        let email = email.trim();
        let invalid = |reason| ValidationError::InvalidEmail {
            email: email.to_string(),
            reason,
        };

        if email.is_empty() {
            return Err(invalid("email should not be empty"));
        }

        if email.chars().count() > Self::MAX_LEN {
            return Err(invalid("email is too long"));
        }

        if !is_basic_email(email) {
            return Err(invalid("email is invalid"));
        }

        Ok(Self(email.to_string()))
    }

    /// Returns the email as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// local@domain: exactly one '@', both sides non-empty, no whitespace.
fn is_basic_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::create(&value)
    }
}

impl From<EmailAddress> for String {
    fn from(email: EmailAddress) -> Self {
        email.0
    }
}
