//! # Keyword Classifier
//!
//! Maps an opaque label (usually the uploaded filename) to an issue type.
//! There is no image analysis: the label is lower-cased and tested against an
//! ordered keyword table, first match wins.

use crate::models::{Category, Classification, IssueType};

/// One row of the classification table.
#[derive(Debug)]
pub struct KeywordRule {
    pub keywords: &'static [&'static str],
    pub issue_type: IssueType,
    pub confidence: f64,
    pub category: Category,
}

impl KeywordRule {
    fn matches(&self, label: &str) -> bool {
        self.keywords.iter().any(|kw| label.contains(kw))
    }

    fn classification(&self) -> Classification {
        Classification {
            issue_type: self.issue_type.clone(),
            confidence: self.confidence,
            category: self.category,
        }
    }
}

/// Precedence order matters: "damage" claims labels before "wall" or "paint"
/// are ever tested, and "light" beats "water".
pub static CLASSIFICATION_RULES: &[KeywordRule] = &[
    KeywordRule {
        keywords: &["pothole", "road", "crack", "damage"],
        issue_type: IssueType::Pothole,
        confidence: 0.92,
        category: Category::RoadInfrastructure,
    },
    KeywordRule {
        keywords: &["garbage", "trash", "waste", "dump"],
        issue_type: IssueType::GarbageAccumulation,
        confidence: 0.88,
        category: Category::Sanitation,
    },
    KeywordRule {
        keywords: &["streetlight", "light", "lamp", "bulb"],
        issue_type: IssueType::BrokenStreetlight,
        confidence: 0.85,
        category: Category::Lighting,
    },
    KeywordRule {
        keywords: &["drain", "water", "overflow", "flood"],
        issue_type: IssueType::DrainageIssue,
        confidence: 0.79,
        category: Category::Drainage,
    },
    KeywordRule {
        keywords: &["wall", "paint", "graffiti"],
        issue_type: IssueType::DamagedProperty,
        confidence: 0.76,
        category: Category::Property,
    },
    KeywordRule {
        keywords: &["tree", "branch", "fallen"],
        issue_type: IssueType::FallenTreeBranch,
        confidence: 0.82,
        category: Category::Vegetation,
    },
];

pub const FALLBACK_CONFIDENCE: f64 = 0.65;

/// Classifies a label. Total: anything unmatched is a general civic issue.
pub fn classify(label: &str) -> Classification {
    let label = label.to_lowercase();
    let classification = CLASSIFICATION_RULES
        .iter()
        .find(|rule| rule.matches(&label))
        .map(KeywordRule::classification)
        .unwrap_or(Classification {
            issue_type: IssueType::General,
            confidence: FALLBACK_CONFIDENCE,
            category: Category::General,
        });

    log::debug!(
        "classified {:?} as {} ({})",
        label,
        classification.issue_type,
        classification.confidence
    );
    classification
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pothole_in_any_case() {
        for label in ["pothole.jpg", "POTHOLE_main.PNG", "big-PotHole"] {
            let c = classify(label);
            assert_eq!(c.issue_type, IssueType::Pothole);
            assert_eq!(c.confidence, 0.92);
            assert_eq!(c.category, Category::RoadInfrastructure);
        }
    }

    #[test]
    fn every_keyword_classifies_alone() {
        let table: [(&[&str], IssueType, f64, Category); 6] = [
            (
                &["pothole", "road", "crack", "damage"],
                IssueType::Pothole,
                0.92,
                Category::RoadInfrastructure,
            ),
            (
                &["garbage", "trash", "waste", "dump"],
                IssueType::GarbageAccumulation,
                0.88,
                Category::Sanitation,
            ),
            (
                &["streetlight", "light", "lamp", "bulb"],
                IssueType::BrokenStreetlight,
                0.85,
                Category::Lighting,
            ),
            (
                &["drain", "water", "overflow", "flood"],
                IssueType::DrainageIssue,
                0.79,
                Category::Drainage,
            ),
            (
                &["wall", "paint", "graffiti"],
                IssueType::DamagedProperty,
                0.76,
                Category::Property,
            ),
            (
                &["tree", "branch", "fallen"],
                IssueType::FallenTreeBranch,
                0.82,
                Category::Vegetation,
            ),
        ];
        for (keywords, issue, confidence, category) in table {
            for keyword in keywords {
                let label = format!("IMG_{}.jpg", keyword.to_uppercase());
                let c = classify(&label);
                assert_eq!(c.issue_type, issue, "label {label}");
                assert_eq!(c.confidence, confidence, "label {label}");
                assert_eq!(c.category, category, "label {label}");
            }
        }
    }

    #[test]
    fn earlier_rules_shadow_later_ones() {
        // "damage" belongs to the road rule even though "wall" is present
        assert_eq!(classify("damaged_wall.jpg").issue_type, IssueType::Pothole);
        // "light" wins over "water"
        assert_eq!(classify("water_light.jpg").issue_type, IssueType::BrokenStreetlight);
        // "garbage" wins over "drain"
        assert_eq!(classify("drain_garbage.jpg").issue_type, IssueType::GarbageAccumulation);
        // "streetlight" also contains "tree"
        assert_eq!(classify("streetlight.jpg").issue_type, IssueType::BrokenStreetlight);
    }

    #[test]
    fn unmatched_labels_fall_back() {
        for label in ["IMG_0001.jpg", ""] {
            let c = classify(label);
            assert_eq!(c.issue_type, IssueType::General);
            assert_eq!(c.confidence, 0.65);
            assert_eq!(c.category, Category::General);
        }
    }

    #[test]
    fn table_order_is_stable() {
        let order: Vec<_> = CLASSIFICATION_RULES.iter().map(|r| r.issue_type.name()).collect();
        assert_eq!(
            order,
            [
                "Pothole",
                "Garbage Accumulation",
                "Broken Streetlight",
                "Drainage Issue",
                "Damaged Property",
                "Fallen Tree/Branch",
            ]
        );
    }
}
