use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, web};
use chrono::Local;

use crate::backend::{BackendApi, HttpBackend};
use crate::domain::field::FormFields;
use crate::domain::profile::FormProfile;
use crate::dto::api::SubmissionResponse;
use crate::forms::admission::AdmissionForm;
use crate::routes::submission_status;
use crate::services::submission::SubmissionController;

#[get("/v1/courses")]
pub async fn api_v1_courses(backend: web::Data<HttpBackend>) -> impl Responder {
    match backend.list_courses().await {
        Ok(courses) => HttpResponse::Ok().json(courses),
        Err(e) => {
            log::error!("Failed to list courses: {e}");
            HttpResponse::BadGateway().finish()
        }
    }
}

#[post("/v1/admission")]
pub async fn api_v1_admission(
    backend: web::Data<HttpBackend>,
    profile: web::Data<FormProfile>,
    MultipartForm(form): MultipartForm<AdmissionForm>,
) -> impl Responder {
    let fields = match FormFields::try_from(form) {
        Ok(fields) => fields,
        Err(e) => {
            log::error!("Failed to read admission form: {e}");
            return HttpResponse::BadRequest().finish();
        }
    };

    let site_id = backend.site().site_id();
    let mut controller = SubmissionController::new(backend.get_ref(), profile.get_ref(), site_id);
    let result = controller.submit(&fields, Local::now().date_naive()).await;

    HttpResponse::build(submission_status(&result)).json(SubmissionResponse::from(&result))
}
