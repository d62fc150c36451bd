//! # Contact Form
//!
//! What a visitor sends from the contact section.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::validation::{validate_contact, ValidationResult};

/// A contact form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    /// Optional; blank means no subject.
    #[serde(default)]
    pub subject: String,
    pub message: String,
}

impl ContactRequest {
    /// Validates and returns a copy with surrounding whitespace trimmed.
    pub fn normalized(&self) -> ValidationResult<ContactRequest> {
        validate_contact(self)?;

        Ok(ContactRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[test]
    fn test_normalized_trims() {
        let request = ContactRequest {
            name: " Danny ".to_string(),
            email: "fan@example.com\n".to_string(),
            subject: "  ".to_string(),
            message: "  Do you ship to Denver?  ".to_string(),
        };

        let clean = request.normalized().unwrap();
        assert_eq!(clean.name, "Danny");
        assert_eq!(clean.email, "fan@example.com");
        assert!(clean.subject.is_empty());
        assert_eq!(clean.message, "Do you ship to Denver?");
    }

    #[test]
    fn test_missing_subject_deserializes() {
        let request: ContactRequest = serde_json::from_str(
            r#"{"name": "Danny", "email": "fan@example.com", "message": "Hello"}"#,
        )
        .unwrap();
        assert!(request.subject.is_empty());

        let blank = ContactRequest::default();
        assert!(matches!(
            blank.normalized(),
            Err(ValidationError::Required { .. })
        ));
    }
}
