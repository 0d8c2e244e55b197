//! Access to the institute's REST backend.
//!
//! Every request carries the tenant's `Site-Id` header. Services depend on
//! [`BackendApi`] only, so tests can swap the HTTP client for a mock.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::domain::course::Course;
use crate::domain::settings::SiteSettings;
use crate::domain::submission::SubmissionPayload;

pub mod http;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

pub use http::{BackendOptions, HttpBackend};

/// Header distinguishing which institute the multi-tenant backend serves.
pub const SITE_ID_HEADER: &str = "Site-Id";

#[derive(Debug, Error)]
pub enum BackendError {
    /// The request never produced a response (offline, DNS, TLS, timeout).
    #[error("request failed: {0}")]
    Transport(String),
    /// A response arrived but its body was not the expected JSON.
    #[error("unexpected response body: {0}")]
    Decode(String),
    /// A list endpoint answered with a non-success status.
    #[error("backend returned status {0}")]
    Status(u16),
    /// The contact relay has no endpoint configured.
    #[error("contact relay is not configured")]
    NotConfigured,
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Status and JSON body returned for a student registration.
#[derive(Clone, Debug, PartialEq)]
pub struct StudentResponse {
    pub status: u16,
    pub body: Value,
}

impl StudentResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Number of entries in `results`, `None` when the field is missing or
    /// not an array.
    pub fn results_len(&self) -> Option<usize> {
        self.body
            .get("results")
            .and_then(Value::as_array)
            .map(Vec::len)
    }

    pub fn message(&self) -> Option<&str> {
        self.text_field("message")
    }

    pub fn error(&self) -> Option<&str> {
        self.text_field("error")
    }

    fn text_field(&self, name: &str) -> Option<&str> {
        self.body
            .get(name)
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
    }
}

/// Reply of the contact form relay.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize)]
pub struct ContactReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[async_trait]
pub trait BackendApi: Send + Sync {
    /// `GET /courses/?page_size=100`.
    async fn list_courses(&self) -> BackendResult<Vec<Course>>;

    /// `GET` on the configured site settings path.
    async fn site_settings(&self) -> BackendResult<SiteSettings>;

    /// `POST /students/` with the assembled multipart body. Any HTTP status
    /// is returned as a response; only transport and decode problems are
    /// errors.
    async fn submit_student(&self, payload: SubmissionPayload) -> BackendResult<StudentResponse>;

    /// Relays a contact page message.
    async fn send_contact(
        &self,
        fields: Vec<(&'static str, String)>,
    ) -> BackendResult<ContactReply>;
}
