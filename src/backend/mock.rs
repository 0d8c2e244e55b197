//! Mock backend for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::backend::{BackendApi, BackendResult, ContactReply, StudentResponse};
use crate::domain::course::Course;
use crate::domain::settings::SiteSettings;
use crate::domain::submission::SubmissionPayload;

mock! {
    pub Backend {}

    #[async_trait]
    impl BackendApi for Backend {
        async fn list_courses(&self) -> BackendResult<Vec<Course>>;
        async fn site_settings(&self) -> BackendResult<SiteSettings>;
        async fn submit_student(
            &self,
            payload: SubmissionPayload,
        ) -> BackendResult<StudentResponse>;
        async fn send_contact(
            &self,
            fields: Vec<(&'static str, String)>,
        ) -> BackendResult<ContactReply>;
    }
}
