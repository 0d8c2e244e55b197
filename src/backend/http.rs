//! `reqwest` implementation of [`BackendApi`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::backend::{
    BackendApi, BackendError, BackendResult, ContactReply, SITE_ID_HEADER, StudentResponse,
};
use crate::domain::course::{Course, CourseList};
use crate::domain::settings::SiteSettings;
use crate::domain::submission::{PayloadValue, SubmissionPayload};
use crate::models::config::{ContactConfig, ServerConfig, SiteEnv};

const COURSES_PATH: &str = "/courses/?page_size=100";
const STUDENTS_PATH: &str = "/students/";

/// Knobs for [`HttpBackend`] that do not belong to [`SiteEnv`].
#[derive(Clone, Debug)]
pub struct BackendOptions {
    pub settings_path: String,
    pub timeout: Duration,
    pub contact: Option<ContactConfig>,
}

impl Default for BackendOptions {
    fn default() -> Self {
        Self {
            settings_path: "/site-settings/".to_string(),
            timeout: Duration::from_secs(30),
            contact: None,
        }
    }
}

impl From<&ServerConfig> for BackendOptions {
    fn from(config: &ServerConfig) -> Self {
        Self {
            settings_path: config.api.settings_path.clone(),
            timeout: Duration::from_secs(config.api.timeout_secs),
            contact: config.contact.clone(),
        }
    }
}

/// Backend client sharing one connection pool across handlers.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: reqwest::Client,
    site: SiteEnv,
    options: BackendOptions,
}

impl HttpBackend {
    pub fn new(site: SiteEnv, options: BackendOptions) -> BackendResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            site,
            options,
        })
    }

    pub fn site(&self) -> &SiteEnv {
        &self.site
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> BackendResult<T> {
        let response = self
            .client
            .get(self.site.url(path))
            .header(SITE_ID_HEADER, self.site.site_id().to_string())
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await.map_err(transport)?;
        serde_json::from_slice(&bytes).map_err(|e| BackendError::Decode(e.to_string()))
    }
}

fn transport(err: reqwest::Error) -> BackendError {
    BackendError::Transport(err.to_string())
}

fn multipart_form(payload: SubmissionPayload) -> BackendResult<Form> {
    let mut form = Form::new();
    for (name, value) in payload.into_parts() {
        form = match value {
            PayloadValue::Text(text) => form.text(name, text),
            PayloadValue::Integer(number) => form.text(name, number.to_string()),
            PayloadValue::File(file) => {
                let mut part = Part::bytes(file.bytes).file_name(file.file_name);
                if let Some(content_type) = file.content_type {
                    part = part.mime_str(&content_type).map_err(transport)?;
                }
                form.part(name, part)
            }
        };
    }
    Ok(form)
}

#[async_trait]
impl BackendApi for HttpBackend {
    async fn list_courses(&self) -> BackendResult<Vec<Course>> {
        let list: CourseList = self.get_json(COURSES_PATH).await?;
        Ok(list.results)
    }

    async fn site_settings(&self) -> BackendResult<SiteSettings> {
        let value: Value = self.get_json(&self.options.settings_path).await?;
        SiteSettings::from_response(value).map_err(|e| BackendError::Decode(e.to_string()))
    }

    async fn submit_student(&self, payload: SubmissionPayload) -> BackendResult<StudentResponse> {
        let form = multipart_form(payload)?;

        let response = self
            .client
            .post(self.site.url(STUDENTS_PATH))
            .header(SITE_ID_HEADER, self.site.site_id().to_string())
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(transport)?;
        let body = serde_json::from_slice(&bytes)
            .map_err(|e| BackendError::Decode(e.to_string()))?;

        Ok(StudentResponse { status, body })
    }

    async fn send_contact(
        &self,
        fields: Vec<(&'static str, String)>,
    ) -> BackendResult<ContactReply> {
        let contact = self
            .options
            .contact
            .as_ref()
            .ok_or(BackendError::NotConfigured)?;

        let mut form = Form::new().text("access_key", contact.access_key.clone());
        for (name, value) in fields {
            form = form.text(name, value);
        }

        let response = self
            .client
            .post(&contact.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;

        let bytes = response.bytes().await.map_err(transport)?;
        serde_json::from_slice(&bytes).map_err(|e| BackendError::Decode(e.to_string()))
    }
}
