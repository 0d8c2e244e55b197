//! Checks the configured backend once: lists courses and reads site settings.

use std::env;

use dotenvy::dotenv;

use shikkha_admission::backend::{BackendApi, BackendOptions, HttpBackend};
use shikkha_admission::models::config::ServerConfig;

#[actix_web::main]
async fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let server_config = match ServerConfig::load(&app_env) {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading server config: {err}");
            std::process::exit(1);
        }
    };

    let site = match server_config.site_env() {
        Ok(site) => site,
        Err(err) => {
            log::error!("Invalid api config: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = server_config.active_profile() {
        log::error!("Invalid form profile: {err}");
        std::process::exit(1);
    }

    let backend = match HttpBackend::new(site, BackendOptions::from(&server_config)) {
        Ok(backend) => backend,
        Err(err) => {
            log::error!("Failed to build backend client: {err}");
            std::process::exit(1);
        }
    };

    log::info!(
        "Checking {} as site {}",
        backend.site().base_url(),
        backend.site().site_id()
    );

    let mut failed = false;

    match backend.list_courses().await {
        Ok(courses) => {
            log::info!("Found {} course(s)", courses.len());
            for course in &courses {
                log::info!("  #{} {}", course.id, course.title);
            }
        }
        Err(err) => {
            log::error!("Failed to list courses: {err}");
            failed = true;
        }
    }

    match backend.site_settings().await {
        Ok(settings) => {
            let theme = settings.theme();
            log::info!(
                "Site settings: button {} on primary {}",
                theme.button_color,
                theme.primary_color
            );
        }
        Err(err) => {
            log::error!("Failed to read site settings: {err}");
            failed = true;
        }
    }

    if failed {
        std::process::exit(1);
    }
}
