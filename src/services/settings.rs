//! Site settings lookup backed by the expiring cache.

use std::time::Duration;

use crate::backend::BackendApi;
use crate::cache::{SITE_SETTINGS_KEY, SettingsCache};
use crate::domain::settings::SiteSettings;

/// Returns the site settings, preferring a fresh cached copy.
///
/// On a miss the backend is asked and a successful answer is cached for
/// `ttl`. When the backend cannot be reached the defaults are returned and
/// nothing is cached, so the next request tries again.
pub async fn load_site_settings<B, C>(backend: &B, cache: &C, ttl: Duration) -> SiteSettings
where
    B: BackendApi + ?Sized,
    C: SettingsCache + ?Sized,
{
    if let Some(cached) = cache.get(SITE_SETTINGS_KEY) {
        match serde_json::from_value::<SiteSettings>(cached) {
            Ok(settings) => return settings,
            Err(err) => log::warn!("Ignoring unreadable cached site settings: {err}"),
        }
    }

    match backend.site_settings().await {
        Ok(settings) => {
            match serde_json::to_value(&settings) {
                Ok(value) => {
                    cache.set(SITE_SETTINGS_KEY, value, ttl);
                    log::info!("Site settings refreshed");
                }
                Err(err) => log::warn!("Failed to cache site settings: {err}"),
            }
            settings
        }
        Err(err) => {
            log::warn!("Failed to fetch site settings: {err}");
            SiteSettings::default()
        }
    }
}
