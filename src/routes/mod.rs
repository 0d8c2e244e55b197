//! HTTP handlers and the helpers they share.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::domain::settings::Theme;
use crate::domain::submission::SubmissionResult;

pub mod admission;
pub mod api;
pub mod contact;

/// Maps a flash message level onto the CSS alert class used by templates.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// Redirects the browser with `303 See Other` so a refresh never re-posts.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Renders `template` with `200 OK`.
pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    render_template_with_status(tera, StatusCode::OK, template, context)
}

pub fn render_template_with_status(
    tera: &Tera,
    status: StatusCode,
    template: &str,
    context: &Context,
) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Pending flash messages as `(text, alert class)` pairs.
pub fn flash_alerts(flash_messages: &IncomingFlashMessages) -> Vec<(String, &'static str)> {
    flash_messages
        .iter()
        .map(|f| (f.content().to_string(), alert_level_to_str(&f.level())))
        .collect()
}

/// Context shared by every page: alerts, theme and the active nav item.
pub fn base_context(alerts: &[(String, &str)], theme: &Theme, current_page: &str) -> Context {
    let mut context = Context::new();
    context.insert("alerts", alerts);
    context.insert("theme", theme);
    context.insert("current_page", current_page);
    context
}

/// HTTP status used to answer a submit attempt that did not redirect.
///
/// Validation failures are `422`. A backend that refused with a 4xx becomes
/// `400`; an unreachable or failing backend becomes `502`.
pub fn submission_status(result: &SubmissionResult) -> StatusCode {
    match result {
        SubmissionResult::Success { .. } => StatusCode::OK,
        SubmissionResult::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SubmissionResult::ServerError {
            status: Some(status),
            ..
        } if (400..500).contains(status) => StatusCode::BAD_REQUEST,
        SubmissionResult::ServerError { .. } => StatusCode::BAD_GATEWAY,
    }
}
