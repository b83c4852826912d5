//! # Severity & Priority Engine
//!
//! Severity buckets the classifier's confidence; priority and the resolution
//! timeline come from an ordered rule table over (issue type, severity).

use crate::models::{IssueType, Priority, Severity};

pub const HIGH_SEVERITY_THRESHOLD: f64 = 0.85;
pub const MEDIUM_SEVERITY_THRESHOLD: f64 = 0.70;

pub fn severity_of(confidence: f64) -> Severity {
    if confidence >= HIGH_SEVERITY_THRESHOLD {
        Severity::High
    } else if confidence >= MEDIUM_SEVERITY_THRESHOLD {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// One row of the priority table.
pub struct PriorityRule {
    pub applies: fn(&IssueType, Severity) -> bool,
    pub priority: Priority,
    pub timeline: &'static str,
}

/// Evaluated top to bottom, first match wins.
pub static PRIORITY_RULES: &[PriorityRule] = &[
    PriorityRule {
        applies: |issue, severity| *issue == IssueType::Pothole && severity == Severity::High,
        priority: Priority::Critical,
        timeline: "24 hours",
    },
    PriorityRule {
        applies: |issue, severity| {
            *issue == IssueType::FallenTreeBranch && severity == Severity::High
        },
        priority: Priority::Critical,
        timeline: "12 hours",
    },
    PriorityRule {
        applies: |issue, severity| {
            matches!(issue, IssueType::GarbageAccumulation | IssueType::DrainageIssue)
                && matches!(severity, Severity::High | Severity::Medium)
        },
        priority: Priority::High,
        timeline: "48 hours",
    },
    PriorityRule {
        applies: |issue, severity| {
            *issue == IssueType::BrokenStreetlight && severity == Severity::High
        },
        priority: Priority::High,
        timeline: "72 hours",
    },
    PriorityRule {
        applies: |_, severity| severity == Severity::Medium,
        priority: Priority::Medium,
        timeline: "7 days",
    },
];

pub const FALLBACK_PRIORITY: (Priority, &str) = (Priority::Low, "14 days");

/// Returns the dispatch priority and expected resolution timeline.
pub fn priority_of(issue_type: &IssueType, severity: Severity) -> (Priority, &'static str) {
    let decision = PRIORITY_RULES
        .iter()
        .find(|rule| (rule.applies)(issue_type, severity))
        .map(|rule| (rule.priority, rule.timeline))
        .unwrap_or(FALLBACK_PRIORITY);

    log::debug!(
        "{} at {} severity -> {} priority, {}",
        issue_type,
        severity,
        decision.0,
        decision.1
    );
    decision
}
