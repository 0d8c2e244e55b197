#[cfg(feature = "data")]
pub mod cache;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod forms;

#[cfg(feature = "server")]
pub mod backend;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

#[cfg(feature = "server")]
pub use server::{configure, run};

#[cfg(feature = "server")]
mod server {
    use actix_cors::Cors;
    use actix_files::Files;
    use actix_web::cookie::Key;
    use actix_web::{App, HttpServer, middleware, web};
    use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
    use tera::Tera;

    use crate::backend::{BackendOptions, HttpBackend};
    use crate::cache::MemoryCache;
    use crate::models::config::ServerConfig;
    use crate::routes::admission::{index, show_admission, submit_admission};
    use crate::routes::api::{api_v1_admission, api_v1_courses};
    use crate::routes::contact::{show_contact, submit_contact};

    /// Registers every page and API handler.
    pub fn configure(cfg: &mut web::ServiceConfig) {
        cfg.service(index)
            .service(show_admission)
            .service(submit_admission)
            .service(show_contact)
            .service(submit_contact)
            .service(
                web::scope("/api")
                    .service(api_v1_courses)
                    .service(api_v1_admission),
            );
    }

    /// Builds and runs the Actix-Web HTTP server using the provided configuration.
    pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
        let site = server_config
            .site_env()
            .map_err(|e| std::io::Error::other(format!("Invalid api config: {e}")))?;
        let profile = server_config
            .active_profile()
            .map_err(|e| std::io::Error::other(format!("Invalid form profile: {e}")))?;

        log::info!(
            "Serving site {} from {} with the '{}' form profile",
            site.site_id(),
            site.base_url(),
            profile.name
        );

        // One pooled client shared by every worker.
        let backend = HttpBackend::new(site, BackendOptions::from(&server_config))
            .map_err(|e| std::io::Error::other(format!("Failed to build backend client: {e}")))?;

        let cache = MemoryCache::new();

        let secret_key = Key::from(server_config.secret.as_bytes());
        let message_store = CookieMessageStore::builder(secret_key).build();
        let message_framework = FlashMessagesFramework::builder(message_store).build();

        let tera = Tera::new(&server_config.templates_dir)
            .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

        let bind_address = (server_config.address.clone(), server_config.port);

        let backend = web::Data::new(backend);
        let cache = web::Data::new(cache);
        let profile = web::Data::new(profile);
        let tera = web::Data::new(tera);
        let server_config = web::Data::new(server_config);

        HttpServer::new(move || {
            App::new()
                .wrap(Cors::permissive())
                .wrap(message_framework.clone())
                .wrap(middleware::Compress::default())
                .wrap(middleware::Logger::default())
                .service(Files::new("/assets", "./assets"))
                .configure(configure)
                .app_data(backend.clone())
                .app_data(cache.clone())
                .app_data(profile.clone())
                .app_data(tera.clone())
                .app_data(server_config.clone())
        })
        .bind(bind_address)?
        .run()
        .await
    }
}
