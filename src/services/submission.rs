//! Drives one admission submit: validate, assemble, post, interpret.

use chrono::NaiveDate;

use crate::backend::{BackendApi, StudentResponse};
use crate::domain::field::FormFields;
use crate::domain::profile::FormProfile;
use crate::domain::submission::{FieldErrors, SubmissionResult, SubmissionState};
use crate::domain::types::SiteId;
use crate::forms::validation::{SELECTION_INVALID, validate_form};
use crate::services::assembler::assemble_payload;

pub const MSG_REGISTERED: &str = "ফর্ম সফলভাবে জমা হয়েছে! শিক্ষার্থী নিবন্ধিত হয়েছে।";
pub const MSG_SUBMITTED: &str = "ফর্ম সফলভাবে জমা হয়েছে!";
pub const MSG_FIX_ERRORS: &str = "অনুগ্রহ করে উপরের ত্রুটিগুলো সংশোধন করে আবার জমা দিন।";
pub const MSG_NETWORK_FAILURE: &str = "একটি ত্রুটি ঘটেছে। অনুগ্রহ করে আবার চেষ্টা করুন।";
pub const MSG_SENDING: &str = "সাবমিট হচ্ছে...";

/// Text shown in the notification for `result`.
pub fn notification(result: &SubmissionResult) -> &str {
    match result {
        SubmissionResult::Success { message, .. } => message.as_str(),
        SubmissionResult::ValidationFailed(errors) => errors.first().unwrap_or(MSG_FIX_ERRORS),
        SubmissionResult::ServerError { message, .. } => message.as_str(),
    }
}

/// Maps the backend's answer onto a submission outcome.
///
/// A 2xx with a non-empty `results` array is a registration. A 2xx carrying
/// a `message` (and no populated `results`) is shown verbatim without
/// clearing the form. Any other 2xx is a plain success. Non-2xx answers use
/// the body's `message` or `error`, else a status-bearing fallback.
pub fn interpret_response(response: &StudentResponse) -> SubmissionResult {
    if response.is_success() {
        if response.results_len().is_some_and(|len| len > 0) {
            return SubmissionResult::Success {
                message: MSG_REGISTERED.to_string(),
                reset: true,
            };
        }
        if let Some(message) = response.message() {
            return SubmissionResult::Success {
                message: message.to_string(),
                reset: false,
            };
        }
        return SubmissionResult::Success {
            message: MSG_SUBMITTED.to_string(),
            reset: true,
        };
    }

    let message = response
        .message()
        .or_else(|| response.error())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Submission failed ({})", response.status));

    SubmissionResult::ServerError {
        message,
        status: Some(response.status),
    }
}

/// State machine for a single admission form.
///
/// `submit` takes `&mut self` and marks the controller as submitting before
/// its first await, so one controller never has two posts in flight.
pub struct SubmissionController<'a, B: ?Sized> {
    backend: &'a B,
    profile: &'a FormProfile,
    site_id: SiteId,
    state: SubmissionState,
}

impl<'a, B> SubmissionController<'a, B>
where
    B: BackendApi + ?Sized,
{
    pub fn new(backend: &'a B, profile: &'a FormProfile, site_id: SiteId) -> Self {
        Self {
            backend,
            profile,
            site_id,
            state: SubmissionState::Idle,
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    /// Returns to `Idle` once the outcome notification has been shown.
    pub fn acknowledge(&mut self) {
        if self.state.is_terminal() {
            self.state = SubmissionState::Idle;
        }
    }

    /// Runs one submit attempt. Starting a new attempt from a terminal state
    /// dismisses the previous outcome.
    ///
    /// Validation failures return to `Idle` without touching the network.
    /// Otherwise exactly one POST is made and the controller ends in
    /// `Succeeded` or `Failed`.
    pub async fn submit(&mut self, fields: &FormFields, today: NaiveDate) -> SubmissionResult {
        self.acknowledge();
        self.state = SubmissionState::Validating;

        let errors = validate_form(fields, self.profile, today);
        if !errors.is_empty() {
            log::info!(
                "Admission form rejected with {} field error(s)",
                errors.len()
            );
            self.state = SubmissionState::Idle;
            return SubmissionResult::ValidationFailed(errors);
        }

        let payload = match assemble_payload(fields, self.profile, self.site_id, today) {
            Ok(payload) => payload,
            Err(err) => {
                log::warn!("Failed to assemble admission payload: {err}");
                let mut errors = FieldErrors::new();
                errors.insert(err.field(), SELECTION_INVALID);
                self.state = SubmissionState::Idle;
                return SubmissionResult::ValidationFailed(errors);
            }
        };

        self.state = SubmissionState::Submitting;

        let result = match self.backend.submit_student(payload).await {
            Ok(response) => {
                log::info!("Backend answered admission with status {}", response.status);
                interpret_response(&response)
            }
            Err(err) => {
                log::error!("Failed to submit admission form: {err}");
                SubmissionResult::ServerError {
                    message: MSG_NETWORK_FAILURE.to_string(),
                    status: None,
                }
            }
        };

        self.state = if result.is_success() {
            SubmissionState::Succeeded
        } else {
            SubmissionState::Failed
        };

        result
    }
}
