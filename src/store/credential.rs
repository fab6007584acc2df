//! Credential Entry
//!
//! One stored website/username/password record.

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::ValidationFailure;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct CredentialEntry {
    pub website: String,
    #[serde(default)]
    pub username: String,
    pub password: String,
}

impl CredentialEntry {
    pub fn new(
        website: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            website: website.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Presence check for the required fields. Formats are not checked.
    pub fn validate(&self) -> Result<(), ValidationFailure> {
        if self.website.is_empty() {
            return Err(ValidationFailure::MissingWebsite);
        }
        validate_password(&self.password)
    }

    /// Password rendered as a fixed-width mask.
    pub fn masked_password(&self) -> String {
        "*".repeat(self.password.chars().count().min(12))
    }
}

pub fn validate_password(password: &str) -> Result<(), ValidationFailure> {
    if password.is_empty() {
        Err(ValidationFailure::MissingPassword)
    } else {
        Ok(())
    }
}

// Keep passwords out of logs and panic messages.
impl std::fmt::Debug for CredentialEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialEntry")
            .field("website", &self.website)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_website_and_password() {
        assert_eq!(CredentialEntry::new("a.com", "u", "p").validate(), Ok(()));
        assert_eq!(
            CredentialEntry::new("", "u", "p").validate(),
            Err(ValidationFailure::MissingWebsite)
        );
        assert_eq!(
            CredentialEntry::new("a.com", "u", "").validate(),
            Err(ValidationFailure::MissingPassword)
        );
    }

    #[test]
    fn test_empty_username_allowed() {
        assert!(CredentialEntry::new("a.com", "", "p").validate().is_ok());
    }

    #[test]
    fn test_json_shape() {
        let entry = CredentialEntry::new("a.com", "u", "p");
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"website":"a.com","username":"u","password":"p"}"#);
    }

    #[test]
    fn test_missing_username_defaults_to_empty() {
        let entry: CredentialEntry =
            serde_json::from_str(r#"{"website":"a.com","password":"p"}"#).unwrap();
        assert_eq!(entry.username, "");
    }

    #[test]
    fn test_debug_redacts_password() {
        let entry = CredentialEntry::new("a.com", "u", "hunter2");
        assert!(!format!("{:?}", entry).contains("hunter2"));
    }

    #[test]
    fn test_masked_password() {
        assert_eq!(CredentialEntry::new("a", "", "abc").masked_password(), "***");
        assert_eq!(
            CredentialEntry::new("a", "", "x".repeat(40)).masked_password().len(),
            12
        );
    }
}
