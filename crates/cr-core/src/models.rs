//! # Domain Models
//!
//! These structs represent the records that flow through the report pipeline.
//! Everything here is created once per request and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The classified kind of civic problem.
///
/// Serialized as its display name ("Pothole", "Fallen Tree/Branch", ...).
/// Names outside the canonical set survive as `Other` so lookups can fall
/// back to the generic department and description.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IssueType {
    Pothole,
    GarbageAccumulation,
    BrokenStreetlight,
    DrainageIssue,
    DamagedProperty,
    FallenTreeBranch,
    /// Classifier fallback: "General Civic Issue"
    General,
    Other(String),
}

impl IssueType {
    pub fn name(&self) -> &str {
        match self {
            IssueType::Pothole => "Pothole",
            IssueType::GarbageAccumulation => "Garbage Accumulation",
            IssueType::BrokenStreetlight => "Broken Streetlight",
            IssueType::DrainageIssue => "Drainage Issue",
            IssueType::DamagedProperty => "Damaged Property",
            IssueType::FallenTreeBranch => "Fallen Tree/Branch",
            IssueType::General => "General Civic Issue",
            IssueType::Other(name) => name,
        }
    }

    /// Total: unknown names map to `Other`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Pothole" => IssueType::Pothole,
            "Garbage Accumulation" => IssueType::GarbageAccumulation,
            "Broken Streetlight" => IssueType::BrokenStreetlight,
            "Drainage Issue" => IssueType::DrainageIssue,
            "Damaged Property" => IssueType::DamagedProperty,
            "Fallen Tree/Branch" => IssueType::FallenTreeBranch,
            "General Civic Issue" => IssueType::General,
            other => IssueType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for IssueType {
    fn from(name: String) -> Self {
        IssueType::from_name(&name)
    }
}

impl From<IssueType> for String {
    fn from(issue: IssueType) -> Self {
        issue.name().to_string()
    }
}

/// Broad infrastructure bucket attached by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    RoadInfrastructure,
    Sanitation,
    Lighting,
    Drainage,
    Property,
    Vegetation,
    General,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::RoadInfrastructure => "road_infrastructure",
            Category::Sanitation => "sanitation",
            Category::Lighting => "lighting",
            Category::Drainage => "drainage",
            Category::Property => "property",
            Category::Vegetation => "vegetation",
            Category::General => "general",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Confidence-derived tier. Reflects classification certainty, not real-world danger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dispatch urgency tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Critical => "Critical",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the issue was observed. Absent fields are filled with placeholder
/// text only when rendered into the complaint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(rename = "lat", default)]
    pub latitude: Option<f64>,
    #[serde(rename = "lng", default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub ward: Option<String>,
    #[serde(default)]
    pub accuracy: Option<String>,
}

impl Location {
    /// The demo GPS fix used when a caller supplies no location at all.
    pub fn simulated() -> Self {
        Self {
            latitude: Some(17.3850),
            longitude: Some(78.4867),
            address: Some("Rajiv Gandhi International Airport Road, Shamshabad, Hyderabad".into()),
            ward: Some("Ward 12, Zone 3".into()),
            accuracy: Some("±10 meters".into()),
        }
    }
}

/// Output of the keyword classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub issue_type: IssueType,
    /// In [0, 1]
    pub confidence: f64,
    pub category: Category,
}

/// Instant user-facing acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub message: String,
    pub action: String,
    #[serde(rename = "emoji")]
    pub marker: String,
}

/// The `issue` block of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueSummary {
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub category: Category,
    /// Percentage rounded to one decimal (e.g. 92.0)
    pub confidence: f64,
    pub severity: Severity,
    pub priority: Priority,
}

/// The aggregate output record for one submitted issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub report_id: String,
    pub timestamp: String,
    pub image: String,
    pub issue: IssueSummary,
    pub location: Location,
    pub resolution_timeline: String,
    pub department: String,
    pub user_feedback: Feedback,
    pub complaint: String,
}

/// Classification plus metrics, without feedback or complaint text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickClassification {
    pub issue_type: IssueType,
    pub confidence: f64,
    pub severity: Severity,
    pub priority: Priority,
    pub timeline: String,
}

/// Flat row handed to the persistence port.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplaintRecord {
    pub report_id: String,
    pub issue_type: String,
    pub category: String,
    pub confidence: f64,
    pub severity: String,
    pub priority: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: Option<String>,
    pub resolution_timeline: String,
    pub department: String,
    pub complaint_text: String,
}

impl From<&Report> for ComplaintRecord {
    fn from(report: &Report) -> Self {
        Self {
            report_id: report.report_id.clone(),
            issue_type: report.issue.issue_type.to_string(),
            category: report.issue.category.to_string(),
            confidence: report.issue.confidence,
            severity: report.issue.severity.to_string(),
            priority: report.issue.priority.to_string(),
            latitude: report.location.latitude,
            longitude: report.location.longitude,
            address: report.location.address.clone(),
            resolution_timeline: report.resolution_timeline.clone(),
            department: report.department.clone(),
            complaint_text: report.complaint.clone(),
        }
    }
}

/// Confidence as a percentage rounded to one decimal place.
pub fn confidence_percent(confidence: f64) -> f64 {
    (confidence * 100.0 * 10.0).round() / 10.0
}

/// Confidence as a whole percentage, truncated rather than rounded.
pub fn confidence_whole_percent(confidence: f64) -> u32 {
    (confidence * 100.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn issue_type_names_are_total() {
        assert_eq!(IssueType::from_name("Fallen Tree/Branch"), IssueType::FallenTreeBranch);
        assert_eq!(IssueType::from_name("General Civic Issue"), IssueType::General);
        assert_eq!(
            IssueType::from_name("Unknown Type"),
            IssueType::Other("Unknown Type".into())
        );
        assert_eq!(IssueType::Other("Unknown Type".into()).name(), "Unknown Type");
    }

    #[test]
    fn issue_type_serializes_as_display_name() {
        let value = serde_json::to_value(IssueType::GarbageAccumulation).unwrap();
        assert_eq!(value, json!("Garbage Accumulation"));
        let back: IssueType = serde_json::from_value(json!("Broken Streetlight")).unwrap();
        assert_eq!(back, IssueType::BrokenStreetlight);
    }

    #[test]
    fn location_uses_short_coordinate_keys() {
        let value = serde_json::to_value(Location::simulated()).unwrap();
        assert_eq!(value["lat"], json!(17.385));
        assert_eq!(value["lng"], json!(78.4867));
        assert_eq!(value["ward"], json!("Ward 12, Zone 3"));

        let partial: Location = serde_json::from_value(json!({ "lat": 1.5 })).unwrap();
        assert_eq!(partial.latitude, Some(1.5));
        assert!(partial.longitude.is_none());
        assert!(partial.address.is_none());
    }

    #[test]
    fn category_serializes_snake_case() {
        let value = serde_json::to_value(Category::RoadInfrastructure).unwrap();
        assert_eq!(value, json!("road_infrastructure"));
    }

    #[test]
    fn confidence_percentages() {
        assert_eq!(confidence_percent(0.92), 92.0);
        assert_eq!(confidence_percent(0.79), 79.0);
        assert_eq!(confidence_percent(0.856), 85.6);
        assert_eq!(confidence_whole_percent(0.859), 85);
        assert_eq!(confidence_whole_percent(0.65), 65);
    }
}
