use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::domain::submission::FieldErrors;

/// Field names in the order they appear on the contact page.
const CONTACT_FIELDS: [&str; 4] = ["name", "email", "subject", "message"];

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
/// Message sent from the contact page.
pub struct ContactForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "নাম প্রয়োজন"))]
    pub name: String,
    #[serde(default)]
    #[validate(email(message = "সঠিক ইমেইল ঠিকানা দিন"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "বিষয় প্রয়োজন"))]
    pub subject: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "বার্তা লিখুন"))]
    pub message: String,
}

impl ContactForm {
    /// Trims every input before validation.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }

    /// Multipart fields relayed to the contact endpoint.
    pub fn relay_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.clone()),
            ("email", self.email.clone()),
            ("subject", self.subject.clone()),
            ("message", self.message.clone()),
        ]
    }
}

/// Flattens `validator` errors into per-field messages in page order.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    let by_field = errors.field_errors();
    let mut result = FieldErrors::new();
    for name in CONTACT_FIELDS {
        let message = by_field
            .get(name)
            .and_then(|errors| errors.first())
            .and_then(|error| error.message.as_ref());
        if let Some(message) = message {
            result.insert(name, message.to_string());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_inputs_fail_after_normalization() {
        let form = ContactForm {
            name: "   ".to_string(),
            email: "rahim@example.com".to_string(),
            subject: "Batch".to_string(),
            message: "\n".to_string(),
        }
        .normalized();

        let errors = form.validate().unwrap_err();
        let errors = field_errors(&errors);

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.first(), Some("নাম প্রয়োজন"));
        assert_eq!(errors.get("message"), Some("বার্তা লিখুন"));
    }

    #[test]
    fn valid_message_passes() {
        let form = ContactForm {
            name: "Rahim".to_string(),
            email: " rahim@example.com ".to_string(),
            subject: "Next batch".to_string(),
            message: "When does the next batch start?".to_string(),
        }
        .normalized();

        assert!(form.validate().is_ok());
        assert_eq!(
            form.relay_fields()[1],
            ("email", "rahim@example.com".to_string())
        );
    }
}
