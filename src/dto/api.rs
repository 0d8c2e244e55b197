//! JSON bodies exposed under `/api/v1`.

use serde::Serialize;

use crate::domain::submission::{FieldErrors, SubmissionResult};
use crate::services::submission::notification;

/// Outcome kind reported to API clients.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Success,
    ValidationFailed,
    ServerError,
}

/// Body returned by `POST /api/v1/admission`.
#[derive(Debug, Serialize, PartialEq)]
pub struct SubmissionResponse {
    pub status: SubmissionStatus,
    pub message: String,
    /// Per-field messages, empty unless validation failed.
    pub errors: FieldErrors,
    /// Status the backend answered with, when it answered at all.
    pub http_status: Option<u16>,
    /// Whether the client should clear its form.
    pub reset: bool,
}

impl From<&SubmissionResult> for SubmissionResponse {
    fn from(result: &SubmissionResult) -> Self {
        let message = notification(result).to_string();
        match result {
            SubmissionResult::Success { reset, .. } => Self {
                status: SubmissionStatus::Success,
                message,
                errors: FieldErrors::new(),
                http_status: None,
                reset: *reset,
            },
            SubmissionResult::ValidationFailed(errors) => Self {
                status: SubmissionStatus::ValidationFailed,
                message,
                errors: errors.clone(),
                http_status: None,
                reset: false,
            },
            SubmissionResult::ServerError { status, .. } => Self {
                status: SubmissionStatus::ServerError,
                message,
                errors: FieldErrors::new(),
                http_status: *status,
                reset: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn validation_failure_serializes_errors_as_map() {
        let mut errors = FieldErrors::new();
        errors.insert("mobile", "সঠিক মোবাইল নম্বর দিন");
        let response = SubmissionResponse::from(&SubmissionResult::ValidationFailed(errors));

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "status": "validation_failed",
                "message": "সঠিক মোবাইল নম্বর দিন",
                "errors": {"mobile": "সঠিক মোবাইল নম্বর দিন"},
                "http_status": null,
                "reset": false,
            })
        );
    }

    #[test]
    fn server_error_keeps_upstream_status() {
        let response = SubmissionResponse::from(&SubmissionResult::ServerError {
            message: "Invalid mobile".to_string(),
            status: Some(400),
        });

        assert_eq!(response.status, SubmissionStatus::ServerError);
        assert_eq!(response.http_status, Some(400));
        assert!(response.errors.is_empty());
    }
}
