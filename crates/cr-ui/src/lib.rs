//! # cr-ui
//!
//! Server-rendered pages for citizens without the JSON client.

use askama::Template;
use cr_core::models::{ComplaintRecord, Report};

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate<'a> {
    pub title: &'a str,
    pub recent: &'a [ComplaintRecord],
    pub error: Option<&'a str>,
}

/// Display-ready copy of a report.
pub struct ReportView {
    pub report_id: String,
    pub image: String,
    pub issue_type: String,
    pub category: String,
    /// One decimal place, matching the JSON value ("92.0%")
    pub confidence: String,
    pub severity: String,
    pub priority: String,
    pub timeline: String,
    pub department: String,
    pub feedback_message: String,
    pub feedback_action: String,
    pub complaint: String,
    pub media_url: String,
    pub thumb_url: String,
}

impl ReportView {
    pub fn new(report: &Report, media_url: String, thumb_url: String) -> Self {
        Self {
            report_id: report.report_id.clone(),
            image: report.image.clone(),
            issue_type: report.issue.issue_type.to_string(),
            category: report.issue.category.to_string(),
            confidence: format!("{:.1}%", report.issue.confidence),
            severity: report.issue.severity.to_string(),
            priority: report.issue.priority.to_string(),
            timeline: report.resolution_timeline.clone(),
            department: report.department.clone(),
            feedback_message: report.user_feedback.message.clone(),
            feedback_action: report.user_feedback.action.clone(),
            complaint: report.complaint.clone(),
            media_url,
            thumb_url,
        }
    }
}

#[derive(Template)]
#[template(path = "report.html")]
pub struct ReportTemplate<'a> {
    pub title: &'a str,
    pub view: &'a ReportView,
}
