//! # cr-api
//!
//! The web routing and orchestration layer for the civic reporter.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod upload;

use actix_web::web;

pub use error::ApiError;
pub use handlers::AppState;

/// Configures the routes for the reporting service.
///
/// # Developer Note
/// The browser frontend posts to `/api/submit-report` and friends;
/// keep these paths stable.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::health))
        .service(
            web::scope("/api")
                .route("/quick-classify", web::post().to(handlers::quick_classify))
                .route("/submit-report", web::post().to(handlers::submit_report))
                .route("/get-complaint", web::post().to(handlers::get_complaint))
                .route("/reports", web::get().to(handlers::list_reports))
                .route("/reports/{report_id}", web::get().to(handlers::get_report)),
        )
        .service(
            web::scope("/ui")
                .route("", web::get().to(handlers::ui_index))
                .route("/report", web::post().to(handlers::ui_submit)),
        );
}
