//! # cr-api Handlers
//!
//! This module coordinates the flow between HTTP requests, the report
//! pipeline and the persistence/storage ports.

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use askama::Template;
use cr_core::error::AppError;
use cr_core::models::{ComplaintRecord, Report};
use cr_core::report::ReportPipeline;
use cr_core::traits::{MediaStore, ReportRepo};
use cr_ui::{IndexTemplate, ReportTemplate, ReportView};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::ApiError;
use crate::upload::UploadForm;

pub const API_VERSION: &str = "1.0";
const DEFAULT_LIST_LIMIT: i64 = 20;
const MAX_LIST_LIMIT: i64 = 100;
const UI_RECENT_LIMIT: i64 = 10;

/// State shared across all Actix-web workers.
pub struct AppState {
    pub pipeline: ReportPipeline,
    pub repo: Box<dyn ReportRepo>,
    pub store: Box<dyn MediaStore>,
    pub max_upload_bytes: usize,
}

#[derive(Serialize)]
struct Success<T: Serialize> {
    success: bool,
    data: T,
}

fn success<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(Success { success: true, data })
}

/// Parses the form and stores the upload; returns the form and its media ID.
async fn accept_upload(
    state: &AppState,
    payload: Multipart,
) -> Result<(UploadForm, String), AppError> {
    let mut form = UploadForm::from_multipart(payload, state.max_upload_bytes).await?;
    let data = std::mem::take(&mut form.data);
    let media_id = state.store.save_upload(data, &form.content_type).await?;
    Ok((form, media_id))
}

/// Builds, persists and returns a full report.
async fn submit(state: &AppState, form: &UploadForm) -> Result<Report, AppError> {
    let report = state.pipeline.full_report(&form.filename, form.location());
    state.repo.save(&ComplaintRecord::from(&report)).await?;
    log::info!(
        "report {} filed: {} / {} priority",
        report.report_id,
        report.issue.issue_type,
        report.issue.priority
    );
    Ok(report)
}

/// Health check.
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "online",
        "message": "AI Civic Issue Reporting System API",
        "version": API_VERSION,
    }))
}

/// Classification and metrics only, for instant feedback while uploading.
pub async fn quick_classify(
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let (form, _media_id) = accept_upload(&state, payload).await?;
    Ok(success(state.pipeline.quick_classify(&form.filename)))
}

/// Full report submission with optional location; the report is persisted.
pub async fn submit_report(
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let (form, _media_id) = accept_upload(&state, payload).await?;
    let report = submit(&state, &form).await?;
    Ok(success(report))
}

/// Complaint text only. Nothing is persisted.
pub async fn get_complaint(
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let (form, _media_id) = accept_upload(&state, payload).await?;
    let complaint = state.pipeline.complaint_only(&form.filename, form.location());
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "complaint": complaint,
    })))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
}

/// Most recently filed complaints.
pub async fn list_reports(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .clamp(1, MAX_LIST_LIMIT);
    let records = state.repo.list_recent(limit).await?;
    Ok(success(records))
}

/// One filed complaint by report ID.
pub async fn get_report(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let report_id = path.into_inner();
    match state.repo.get(&report_id).await? {
        Some(record) => Ok(success(record)),
        None => Err(AppError::NotFound("Report".into(), report_id).into()),
    }
}

fn render<T: Template>(template: &T) -> Result<String, AppError> {
    template
        .render()
        .map_err(|e| AppError::Internal(format!("template rendering failed: {e}")))
}

fn html(status: actix_web::http::StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(body)
}

async fn render_index(
    state: &AppState,
    error: Option<&str>,
) -> Result<String, AppError> {
    let recent = state
        .repo
        .list_recent(UI_RECENT_LIMIT)
        .await
        .unwrap_or_else(|err| {
            log::warn!("could not load recent reports: {}", err);
            Vec::new()
        });
    render(&IndexTemplate {
        title: "Civic Issue Reporting",
        recent: &recent,
        error,
    })
}

/// Upload form.
pub async fn ui_index(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let body = render_index(&state, None).await?;
    Ok(html(actix_web::http::StatusCode::OK, body))
}

/// Form submission; validation problems re-render the form with a message.
pub async fn ui_submit(
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let (form, media_id) = match accept_upload(&state, payload).await {
        Ok(accepted) => accepted,
        Err(AppError::ValidationError(message)) => {
            let body = render_index(&state, Some(message.as_str())).await?;
            return Ok(html(actix_web::http::StatusCode::BAD_REQUEST, body));
        }
        Err(err) => return Err(err.into()),
    };

    let report = submit(&state, &form).await?;
    let view = ReportView::new(
        &report,
        state.store.get_url(&media_id).await,
        state.store.get_thumbnail_url(&media_id).await,
    );
    let body = render(&ReportTemplate {
        title: &report.report_id,
        view: &view,
    })?;
    Ok(html(actix_web::http::StatusCode::OK, body))
}
