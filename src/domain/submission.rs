//! Values produced while submitting the admission form.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::domain::field::UploadedFile;

/// Per-field validation messages in form order. A name without an entry is
/// valid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<(String, String)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` for `field`, keeping the first message per field.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        if self.get(&field).is_none() {
            self.errors.push((field, message.into()));
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, message)| message.as_str())
    }

    /// The message shown in the notification: the first one recorded.
    pub fn first(&self) -> Option<&str> {
        self.errors.first().map(|(_, message)| message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors
            .iter()
            .map(|(name, message)| (name.as_str(), message.as_str()))
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.errors.len()))?;
        for (name, message) in &self.errors {
            map.serialize_entry(name, message)?;
        }
        map.end()
    }
}

/// Value of one multipart field sent to the backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PayloadValue {
    Text(String),
    Integer(i32),
    File(UploadedFile),
}

/// Ordered multipart body using backend field names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubmissionPayload {
    parts: Vec<(String, PayloadValue)>,
}

impl SubmissionPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: PayloadValue) {
        self.parts.push((name.into(), value));
    }

    pub fn get(&self, name: &str) -> Option<&PayloadValue> {
        self.parts
            .iter()
            .find(|(part, _)| part == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Field names in the order they are sent.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|(name, _)| name.as_str())
    }

    pub fn into_parts(self) -> Vec<(String, PayloadValue)> {
        self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

/// Outcome of one submit attempt, consumed by the notification layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmissionResult {
    /// Backend accepted the submission. `reset` tells the caller to clear the
    /// form; it is false when the backend answered with its own message.
    Success { message: String, reset: bool },
    /// Client-side validation failed; nothing was sent.
    ValidationFailed(FieldErrors),
    /// Backend rejected the submission (`status` set) or could not be reached
    /// (`status` is `None`).
    ServerError {
        message: String,
        status: Option<u16>,
    },
}

impl SubmissionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionResult::Success { .. })
    }

    /// Whether the form should be cleared after showing the notification.
    pub fn resets_form(&self) -> bool {
        matches!(self, SubmissionResult::Success { reset: true, .. })
    }
}

/// Lifecycle of a submit attempt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

impl SubmissionState {
    /// Success and failure wait for the notification to be dismissed.
    pub fn is_terminal(self) -> bool {
        matches!(self, SubmissionState::Succeeded | SubmissionState::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_errors_keep_first_message_and_order() {
        let mut errors = FieldErrors::new();
        errors.insert("mobile", "first");
        errors.insert("name", "second");
        errors.insert("mobile", "ignored");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.first(), Some("first"));
        assert_eq!(errors.get("mobile"), Some("first"));
        assert_eq!(
            serde_json::to_string(&errors).unwrap(),
            r#"{"mobile":"first","name":"second"}"#
        );
    }

    #[test]
    fn only_full_success_resets_the_form() {
        let reset = SubmissionResult::Success {
            message: "ok".to_string(),
            reset: true,
        };
        let kept = SubmissionResult::Success {
            message: "pending review".to_string(),
            reset: false,
        };
        let failed = SubmissionResult::ServerError {
            message: "boom".to_string(),
            status: Some(500),
        };

        assert!(reset.resets_form());
        assert!(kept.is_success() && !kept.resets_form());
        assert!(!failed.is_success() && !failed.resets_form());
    }
}
