//! # Feedback & Complaint Generator
//!
//! Turns a classified, prioritised issue into the short acknowledgement shown
//! to the citizen and the formal complaint sent to the municipality.

use std::borrow::Cow;

use crate::models::{
    confidence_whole_percent, Feedback, IssueType, Location, Priority, Severity,
};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

pub const DEFAULT_ADDRESS: &str = "Location captured via GPS";
pub const DEFAULT_LATITUDE: &str = "17.3850";
pub const DEFAULT_LONGITUDE: &str = "78.4867";
pub const DEFAULT_WARD: &str = "Auto-detected";
pub const FALLBACK_DEPARTMENT: &str = "General Administration";

/// Responsible municipal department for an issue type.
pub fn department_for(issue_type: &IssueType) -> &'static str {
    match issue_type {
        IssueType::Pothole => "Roads & Highways Department",
        IssueType::GarbageAccumulation => "Sanitation & Waste Management",
        IssueType::BrokenStreetlight => "Electrical & Lighting Department",
        IssueType::DrainageIssue => "Water Works & Drainage",
        IssueType::DamagedProperty => "Public Works Department",
        IssueType::FallenTreeBranch => "Horticulture Department",
        IssueType::General | IssueType::Other(_) => FALLBACK_DEPARTMENT,
    }
}

/// Narrative sentence opening the complaint body (without the final period).
pub fn description_for(issue_type: &IssueType) -> Cow<'static, str> {
    match issue_type {
        IssueType::Pothole => Cow::Borrowed(
            "A significant road surface damage (pothole) has been detected, posing a risk to vehicular safety and pedestrian movement",
        ),
        IssueType::GarbageAccumulation => Cow::Borrowed(
            "Unsanitary waste accumulation has been identified, creating potential health hazards and environmental concerns",
        ),
        IssueType::BrokenStreetlight => Cow::Borrowed(
            "Non-functional street lighting infrastructure has been observed, compromising public safety during nighttime",
        ),
        IssueType::DrainageIssue => Cow::Borrowed(
            "A drainage system malfunction has been reported, with potential for waterlogging and sanitation issues",
        ),
        IssueType::DamagedProperty => Cow::Borrowed(
            "Public property damage has been identified, requiring maintenance intervention",
        ),
        IssueType::FallenTreeBranch => Cow::Borrowed(
            "A fallen tree or large branch has been detected, creating an obstruction and potential safety hazard",
        ),
        other @ (IssueType::General | IssueType::Other(_)) => Cow::Owned(format!(
            "A civic infrastructure issue ({}) has been identified requiring administrative attention",
            other
        )),
    }
}

struct FeedbackTemplate {
    marker: &'static str,
    headline: &'static str,
    action: &'static str,
}

fn feedback_template(priority: Priority) -> FeedbackTemplate {
    match priority {
        Priority::Critical => FeedbackTemplate {
            marker: "🚨",
            headline: "CRITICAL PRIORITY - Immediate attention required!",
            action: "Your report has been flagged for emergency response.",
        },
        Priority::High => FeedbackTemplate {
            marker: "⚠️",
            headline: "High priority issue logged.",
            action: "Authorities will be notified within 24 hours.",
        },
        Priority::Medium => FeedbackTemplate {
            marker: "ℹ️",
            headline: "Your report is being reviewed.",
            action: "Expected resolution within 7 days.",
        },
        Priority::Low => FeedbackTemplate {
            marker: "✅",
            headline: "Thank you for reporting.",
            action: "This will be addressed in the next maintenance cycle.",
        },
    }
}

/// Instant acknowledgement for the citizen, keyed on priority tier.
pub fn feedback_for(issue_type: &IssueType, priority: Priority, confidence: f64) -> Feedback {
    let template = feedback_template(priority);
    Feedback {
        message: format!(
            "{} {} detected ({}% confidence). {}",
            template.marker,
            issue_type,
            confidence_whole_percent(confidence),
            template.headline
        ),
        action: template.action.to_string(),
        marker: template.marker.to_string(),
    }
}

/// Everything the complaint document embeds.
#[derive(Debug, Clone, Copy)]
pub struct ComplaintDetails<'a> {
    pub issue_type: &'a IssueType,
    pub location: &'a Location,
    pub severity: Severity,
    pub priority: Priority,
    pub timeline: &'a str,
    pub confidence: f64,
    pub timestamp: &'a str,
    pub report_id: &'a str,
}

/// Renders the formal complaint. Callers should treat the result as opaque text.
pub fn complaint_for(details: &ComplaintDetails<'_>) -> String {
    let ComplaintDetails {
        issue_type,
        location,
        severity,
        priority,
        timeline,
        confidence,
        timestamp,
        report_id,
    } = *details;

    let address = location.address.as_deref().unwrap_or(DEFAULT_ADDRESS);
    let latitude = location
        .latitude
        .map_or(Cow::Borrowed(DEFAULT_LATITUDE), |lat| Cow::Owned(coordinate_text(lat)));
    let longitude = location
        .longitude
        .map_or(Cow::Borrowed(DEFAULT_LONGITUDE), |lng| Cow::Owned(coordinate_text(lng)));
    let ward = location.ward.as_deref().unwrap_or(DEFAULT_WARD);
    let priority_tag = priority.as_str().to_uppercase();
    let description = description_for(issue_type);
    let confidence = confidence_whole_percent(confidence);
    let department = department_for(issue_type);

    // Three lines below end in a single trailing space.
    format!(
        "{RULE}
                    AUTOMATED CIVIC ISSUE REPORT
{RULE}

To: Municipal Corporation / Public Works Department
Subject: [{priority_tag} PRIORITY] Civic Infrastructure Issue Report

Dear Sir/Madam,

{description}.

📍 LOCATION DETAILS:
   Address: {address}
   Coordinates: {latitude}°N, {longitude}°E
   Ward/Zone: {ward}

🔍 ISSUE ANALYSIS:
   • Issue Type: {issue_type}
   • Severity Level: {severity}
   • Priority Classification: {priority}
   • AI Confidence Score: {confidence}%
   • Detection Timestamp: {timestamp}

⚠️ RECOMMENDED ACTION:
   Suggested Resolution Timeline: {timeline}
   Department: {department}

📊 REPORT METADATA:
   Report ID: #{report_id}
   Reporting Method: AI-Powered Mobile Application
   Status: PENDING REVIEW

This report has been automatically generated and submitted through the 
AI Civic Issue Reporting System. The issue has been verified using 
computer vision and prioritized based on severity assessment algorithms.

For verification or additional information, please refer to the attached 
image evidence and geolocation data.

Respectfully submitted,
A Concerned Citizen (via AI Civic Reporting System)

{RULE}
                Generated on: {timestamp}
{RULE}"
    )
}

/// Shortest round-trip text with at least one fractional digit; magnitudes
/// below 1e-4 switch to a two-digit exponent ("1e-05").
fn coordinate_text(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude != 0.0 && (magnitude < 1e-4 || magnitude >= 1e16) {
        let sci = format!("{value:e}");
        return match sci.split_once('e') {
            Some((mantissa, exponent)) => {
                let (sign, digits) = match exponent.strip_prefix('-') {
                    Some(digits) => ('-', digits),
                    None => ('+', exponent),
                };
                format!("{mantissa}e{sign}{digits:0>2}")
            }
            None => sci,
        };
    }
    let text = value.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details<'a>(
        issue_type: &'a IssueType,
        location: &'a Location,
        priority: Priority,
    ) -> ComplaintDetails<'a> {
        ComplaintDetails {
            issue_type,
            location,
            severity: Severity::High,
            priority,
            timeline: "24 hours",
            confidence: 0.92,
            timestamp: "05 March 2026, 09:15 AM",
            report_id: "CIV20260305091500",
        }
    }

    #[test]
    fn departments() {
        assert_eq!(department_for(&IssueType::DrainageIssue), "Water Works & Drainage");
        assert_eq!(department_for(&IssueType::FallenTreeBranch), "Horticulture Department");
        assert_eq!(
            department_for(&IssueType::from_name("Unknown Type")),
            "General Administration"
        );
        assert_eq!(department_for(&IssueType::General), "General Administration");
    }

    #[test]
    fn unknown_types_get_generic_description() {
        assert_eq!(
            description_for(&IssueType::Other("Noise".into())),
            "A civic infrastructure issue (Noise) has been identified requiring administrative attention"
        );
        assert!(description_for(&IssueType::General).contains("(General Civic Issue)"));
    }

    #[test]
    fn feedback_per_tier() {
        let critical = feedback_for(&IssueType::Pothole, Priority::Critical, 0.92);
        assert_eq!(
            critical.message,
            "🚨 Pothole detected (92% confidence). CRITICAL PRIORITY - Immediate attention required!"
        );
        assert_eq!(critical.action, "Your report has been flagged for emergency response.");
        assert_eq!(critical.marker, "🚨");

        let high = feedback_for(&IssueType::BrokenStreetlight, Priority::High, 0.85);
        assert_eq!(
            high.message,
            "⚠️ Broken Streetlight detected (85% confidence). High priority issue logged."
        );
        assert_eq!(high.action, "Authorities will be notified within 24 hours.");

        let medium = feedback_for(&IssueType::DamagedProperty, Priority::Medium, 0.76);
        assert_eq!(medium.marker, "ℹ️");
        assert_eq!(medium.action, "Expected resolution within 7 days.");

        let low = feedback_for(&IssueType::General, Priority::Low, 0.65);
        assert_eq!(
            low.message,
            "✅ General Civic Issue detected (65% confidence). Thank you for reporting."
        );
        assert_eq!(low.action, "This will be addressed in the next maintenance cycle.");
    }

    #[test]
    fn feedback_truncates_confidence() {
        let fb = feedback_for(&IssueType::Pothole, Priority::Low, 0.879);
        assert!(fb.message.contains("(87% confidence)"));
    }

    #[test]
    fn complaint_sections_in_order() {
        let issue = IssueType::Pothole;
        let location = Location::simulated();
        let text = complaint_for(&details(&issue, &location, Priority::Critical));

        let markers = [
            "AUTOMATED CIVIC ISSUE REPORT",
            "Subject: [CRITICAL PRIORITY] Civic Infrastructure Issue Report",
            "Dear Sir/Madam,",
            "A significant road surface damage (pothole) has been detected",
            "📍 LOCATION DETAILS:",
            "   Address: Rajiv Gandhi International Airport Road, Shamshabad, Hyderabad",
            "   Coordinates: 17.385°N, 78.4867°E",
            "   Ward/Zone: Ward 12, Zone 3",
            "🔍 ISSUE ANALYSIS:",
            "   • AI Confidence Score: 92%",
            "⚠️ RECOMMENDED ACTION:",
            "   Department: Roads & Highways Department",
            "   Report ID: #CIV20260305091500",
            "   Status: PENDING REVIEW",
            "Respectfully submitted,",
            "                Generated on: 05 March 2026, 09:15 AM",
        ];
        let mut cursor = 0;
        for marker in markers {
            let found = text[cursor..]
                .find(marker)
                .unwrap_or_else(|| panic!("missing or out of order: {marker}"));
            cursor += found + marker.len();
        }
    }

    #[test]
    fn complaint_is_trimmed_and_framed() {
        let issue = IssueType::GarbageAccumulation;
        let location = Location::simulated();
        let text = complaint_for(&details(&issue, &location, Priority::High));
        assert!(text.starts_with(RULE));
        assert!(text.ends_with(RULE));
        assert_eq!(RULE.chars().count(), 65);
        assert_eq!(text.matches(RULE).count(), 4);
    }

    #[test]
    fn missing_location_fields_use_placeholders() {
        let issue = IssueType::DrainageIssue;
        let location = Location::default();
        let text = complaint_for(&details(&issue, &location, Priority::High));
        assert!(text.contains("   Address: Location captured via GPS\n"));
        assert!(text.contains("   Coordinates: 17.3850°N, 78.4867°E\n"));
        assert!(text.contains("   Ward/Zone: Auto-detected\n"));
    }

    #[test]
    fn whole_number_coordinates_keep_a_fraction() {
        let issue = IssueType::Pothole;
        let location = Location {
            latitude: Some(12.0),
            longitude: Some(77.0),
            ..Location::default()
        };
        let text = complaint_for(&details(&issue, &location, Priority::Critical));
        assert!(text.contains("   Coordinates: 12.0°N, 77.0°E\n"));
    }

    #[test]
    fn coordinate_text_forms() {
        assert_eq!(coordinate_text(17.385), "17.385");
        assert_eq!(coordinate_text(-33.8688), "-33.8688");
        assert_eq!(coordinate_text(0.0), "0.0");
        assert_eq!(coordinate_text(0.0001), "0.0001");
        assert_eq!(coordinate_text(0.00001), "1e-05");
        assert_eq!(coordinate_text(-1.5e-7), "-1.5e-07");
    }

    #[test]
    fn closing_lines_keep_trailing_space() {
        let issue = IssueType::Pothole;
        let location = Location::simulated();
        let text = complaint_for(&details(&issue, &location, Priority::Critical));
        assert!(text.contains("submitted through the \nAI Civic"));
        assert!(text.contains("refer to the attached \nimage evidence"));
    }
}
