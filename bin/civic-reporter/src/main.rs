//! # Civic Reporter Binary
//!
//! The entry point that assembles the application based on compile-time features.

use std::path::PathBuf;

use actix_files::Files;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use cr_api::{configure_routes, middleware, AppState};
use cr_config::Settings;
use cr_core::ReportPipeline;

// Plugins are selected at compile time
#[cfg(feature = "db-sqlite")]
use cr_db_sqlite::SqliteReportRepo;

#[cfg(feature = "storage-local")]
use cr_storage_local::LocalMediaStore;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("loading settings")?;
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // 1. Initialize Database Implementation
    #[cfg(feature = "db-sqlite")]
    let repo = SqliteReportRepo::new(&settings.database_url)
        .await
        .context("initialising SQLite")?;

    // 2. Initialize Storage Implementation
    let upload_dir = PathBuf::from(&settings.upload_dir);
    tokio::fs::create_dir_all(&upload_dir)
        .await
        .with_context(|| format!("creating upload directory {}", upload_dir.display()))?;

    #[cfg(feature = "storage-local")]
    let store = LocalMediaStore::new(upload_dir.clone(), settings.upload_url_prefix.clone());

    // 3. Wrap in AppState (Using dynamic dispatch for maximum flexibility)
    let state = web::Data::new(AppState {
        pipeline: ReportPipeline::default(),
        repo: Box::new(repo),
        store: Box::new(store),
        max_upload_bytes: settings.max_upload_bytes,
    });

    let (host, port) = settings.bind_address();
    log::info!("🚀 Civic reporter starting on http://{}:{}", host, port);

    let cors_origin = settings.cors_origin.clone();
    let url_prefix = settings.upload_url_prefix.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::cors_policy(&cors_origin))
            .wrap(middleware::security_headers())
            .wrap(middleware::standard_middleware())
            .service(Files::new(&url_prefix, upload_dir.clone()))
            .configure(configure_routes)
    })
    .bind((host, port))?
    .run()
    .await?;

    Ok(())
}
