use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::backend::HttpBackend;
use crate::cache::MemoryCache;
use crate::domain::submission::FieldErrors;
use crate::forms::contact::ContactForm;
use crate::models::config::ServerConfig;
use crate::routes::{
    base_context, flash_alerts, redirect, render_template, render_template_with_status,
};
use crate::services::contact::{ContactOutcome, send_contact};
use crate::services::settings::load_site_settings;

const CONTACT_TEMPLATE: &str = "contact/form.html";

#[get("/contact")]
pub async fn show_contact(
    flash_messages: IncomingFlashMessages,
    backend: web::Data<HttpBackend>,
    cache: web::Data<MemoryCache>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let settings = load_site_settings(
        backend.get_ref(),
        cache.get_ref(),
        Duration::from_secs(server_config.settings_cache_ttl_secs),
    )
    .await;

    let mut context = base_context(&flash_alerts(&flash_messages), &settings.theme(), "contact");
    context.insert("values", &ContactForm::default());
    context.insert("errors", &FieldErrors::new());

    render_template(&tera, CONTACT_TEMPLATE, &context)
}

#[post("/contact")]
pub async fn submit_contact(
    backend: web::Data<HttpBackend>,
    cache: web::Data<MemoryCache>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<ContactForm>,
) -> impl Responder {
    let values = form.clone();

    let (status, alert, errors) = match send_contact(backend.get_ref(), form).await {
        ContactOutcome::Sent(message) => {
            FlashMessage::success(message).send();
            return redirect("/contact");
        }
        ContactOutcome::Rejected(message) => (StatusCode::BAD_GATEWAY, message, FieldErrors::new()),
        ContactOutcome::Invalid(errors) => {
            let first = errors.first().unwrap_or_default().to_string();
            (StatusCode::UNPROCESSABLE_ENTITY, first, errors)
        }
    };

    let settings = load_site_settings(
        backend.get_ref(),
        cache.get_ref(),
        Duration::from_secs(server_config.settings_cache_ttl_secs),
    )
    .await;

    let alerts = vec![(alert, "danger")];
    let mut context = base_context(&alerts, &settings.theme(), "contact");
    context.insert("values", &values);
    context.insert("errors", &errors);

    render_template_with_status(&tera, status, CONTACT_TEMPLATE, &context)
}
