//! # Report Assembler
//!
//! Runs classifier → severity/priority → feedback/complaint and assembles the
//! immutable `Report`. The clock is read once per report so the timestamp,
//! the report ID and the ID printed inside the complaint always agree.

use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::classifier::classify;
use crate::clock::SystemClock;
use crate::complaint::{complaint_for, department_for, feedback_for, ComplaintDetails};
use crate::models::{confidence_percent, IssueSummary, Location, QuickClassification, Report};
use crate::priority::{priority_of, severity_of};
use crate::traits::Clock;

pub const REPORT_ID_PREFIX: &str = "CIV";
const REPORT_ID_FORMAT: &str = "%Y%m%d%H%M%S";
const TIMESTAMP_FORMAT: &str = "%d %B %Y, %I:%M %p";

/// Report IDs have one-second resolution. Two reports generated within the
/// same second share an ID; the persistence layer rejects the second one.
pub fn generate_report_id(instant: NaiveDateTime) -> String {
    format!("{}{}", REPORT_ID_PREFIX, instant.format(REPORT_ID_FORMAT))
}

/// Human-readable detection timestamp, e.g. "05 March 2026, 09:15 AM".
pub fn format_timestamp(instant: NaiveDateTime) -> String {
    instant.format(TIMESTAMP_FORMAT).to_string()
}

/// Stateless apart from the injected clock; cheap to clone and share.
#[derive(Clone)]
pub struct ReportPipeline {
    clock: Arc<dyn Clock>,
}

impl Default for ReportPipeline {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl ReportPipeline {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Builds the full report. Without a caller-supplied location the
    /// simulated demo fix is used.
    pub fn build_report(&self, label: &str, location: Option<Location>) -> Report {
        let instant = self.clock.now();
        let report_id = generate_report_id(instant);
        let timestamp = format_timestamp(instant);
        let location = location.unwrap_or_else(Location::simulated);

        let classification = classify(label);
        let severity = severity_of(classification.confidence);
        let (priority, timeline) = priority_of(&classification.issue_type, severity);

        let user_feedback =
            feedback_for(&classification.issue_type, priority, classification.confidence);
        let complaint = complaint_for(&ComplaintDetails {
            issue_type: &classification.issue_type,
            location: &location,
            severity,
            priority,
            timeline,
            confidence: classification.confidence,
            timestamp: &timestamp,
            report_id: &report_id,
        });
        let department = department_for(&classification.issue_type).to_string();

        Report {
            report_id,
            timestamp,
            image: label.to_string(),
            issue: IssueSummary {
                issue_type: classification.issue_type,
                category: classification.category,
                confidence: confidence_percent(classification.confidence),
                severity,
                priority,
            },
            location,
            resolution_timeline: timeline.to_string(),
            department,
            user_feedback,
            complaint,
        }
    }

    pub fn full_report(&self, label: &str, location: Option<Location>) -> Report {
        self.build_report(label, location)
    }

    pub fn complaint_only(&self, label: &str, location: Option<Location>) -> String {
        self.build_report(label, location).complaint
    }

    /// Classification and metrics only; skips feedback and complaint rendering.
    pub fn quick_classify(&self, label: &str) -> QuickClassification {
        let classification = classify(label);
        let severity = severity_of(classification.confidence);
        let (priority, timeline) = priority_of(&classification.issue_type, severity);

        QuickClassification {
            issue_type: classification.issue_type,
            confidence: confidence_percent(classification.confidence),
            severity,
            priority,
            timeline: timeline.to_string(),
        }
    }
}
