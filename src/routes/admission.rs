use std::collections::BTreeMap;
use std::time::Duration;

use actix_multipart::form::MultipartForm;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use chrono::Local;
use tera::Tera;

use crate::backend::HttpBackend;
use crate::cache::MemoryCache;
use crate::domain::field::FormFields;
use crate::domain::profile::FormProfile;
use crate::domain::submission::{FieldErrors, SubmissionResult};
use crate::dto::admission::{AdmissionPageData, AdmissionQuery};
use crate::forms::admission::AdmissionForm;
use crate::models::config::ServerConfig;
use crate::routes::{
    base_context, flash_alerts, redirect, render_template_with_status, submission_status,
};
use crate::services::admission::load_admission_page;
use crate::services::submission::{MSG_SENDING, SubmissionController, notification};

const ADMISSION_TEMPLATE: &str = "admission/form.html";

#[get("/")]
pub async fn index() -> impl Responder {
    redirect("/admission")
}

#[get("/admission")]
pub async fn show_admission(
    query: web::Query<AdmissionQuery>,
    flash_messages: IncomingFlashMessages,
    backend: web::Data<HttpBackend>,
    cache: web::Data<MemoryCache>,
    profile: web::Data<FormProfile>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let page = load_admission_page(
        backend.get_ref(),
        cache.get_ref(),
        settings_ttl(&server_config),
        query.into_inner(),
    )
    .await;

    render_admission(
        &tera,
        &profile,
        &page,
        &flash_alerts(&flash_messages),
        &FormFields::new(),
        &FieldErrors::new(),
        StatusCode::OK,
    )
}

#[post("/admission")]
pub async fn submit_admission(
    backend: web::Data<HttpBackend>,
    cache: web::Data<MemoryCache>,
    profile: web::Data<FormProfile>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    MultipartForm(form): MultipartForm<AdmissionForm>,
) -> impl Responder {
    let fields = match FormFields::try_from(form) {
        Ok(fields) => fields,
        Err(err) => {
            log::error!("Failed to read admission form: {err}");
            FlashMessage::error("ফর্ম পড়া যায়নি, আবার চেষ্টা করুন।").send();
            return redirect("/admission");
        }
    };

    let site_id = backend.site().site_id();
    let mut controller = SubmissionController::new(backend.get_ref(), profile.get_ref(), site_id);
    let result = controller.submit(&fields, Local::now().date_naive()).await;

    if result.resets_form() {
        FlashMessage::success(notification(&result)).send();
        return redirect("/admission");
    }

    let page = load_admission_page(
        backend.get_ref(),
        cache.get_ref(),
        settings_ttl(&server_config),
        AdmissionQuery::default(),
    )
    .await;

    let level = match &result {
        SubmissionResult::Success { .. } => "info",
        _ => "danger",
    };
    let alerts = vec![(notification(&result).to_string(), level)];
    let errors = match &result {
        SubmissionResult::ValidationFailed(errors) => errors.clone(),
        _ => FieldErrors::new(),
    };

    render_admission(
        &tera,
        &profile,
        &page,
        &alerts,
        &fields,
        &errors,
        submission_status(&result),
    )
}

fn settings_ttl(server_config: &ServerConfig) -> Duration {
    Duration::from_secs(server_config.settings_cache_ttl_secs)
}

fn render_admission(
    tera: &Tera,
    profile: &FormProfile,
    page: &AdmissionPageData,
    alerts: &[(String, &str)],
    fields: &FormFields,
    errors: &FieldErrors,
    status: StatusCode,
) -> HttpResponse {
    let mut context = base_context(alerts, &page.theme, "admission");
    context.insert("courses", &page.courses);
    context.insert("preselected", &page.preselected);
    let required: BTreeMap<&str, bool> = profile
        .required_fields
        .iter()
        .map(|name| (name.as_str(), true))
        .collect();
    context.insert("required", &required);
    context.insert("values", &fields.text_values());
    context.insert("errors", errors);
    context.insert("sending_label", MSG_SENDING);

    render_template_with_status(tera, status, ADMISSION_TEMPLATE, &context)
}
