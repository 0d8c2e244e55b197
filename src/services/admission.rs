//! Loaders for the admission page.

use std::time::Duration;

use crate::backend::BackendApi;
use crate::cache::SettingsCache;
use crate::domain::course::{Course, find_by_title};
use crate::dto::admission::{AdmissionPageData, AdmissionQuery};
use crate::services::settings::load_site_settings;

/// Fetches the offered courses. A failed fetch leaves the selection empty.
pub async fn load_courses<B>(backend: &B) -> Vec<Course>
where
    B: BackendApi + ?Sized,
{
    match backend.list_courses().await {
        Ok(courses) => courses,
        Err(err) => {
            log::error!("Failed to fetch courses: {err}");
            Vec::new()
        }
    }
}

/// Loads the course list and theme for the admission form and resolves the
/// course requested through the query string.
pub async fn load_admission_page<B, C>(
    backend: &B,
    cache: &C,
    settings_ttl: Duration,
    query: AdmissionQuery,
) -> AdmissionPageData
where
    B: BackendApi + ?Sized,
    C: SettingsCache + ?Sized,
{
    let courses = load_courses(backend).await;
    let theme = load_site_settings(backend, cache, settings_ttl)
        .await
        .theme();

    let preselected = query
        .course
        .as_deref()
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .and_then(|title| {
            let found = find_by_title(&courses, title).cloned();
            if found.is_none() {
                log::warn!("Requested course not offered: {title}");
            }
            found
        });

    AdmissionPageData {
        courses,
        theme,
        preselected,
    }
}
