//! Keyword rule engine that routes a service request.
//!
//! Rules are matched as lowercase substrings of `"{summary} {description}"`.
//! Both tables are ordered and the first rule with any hit wins, so a text
//! mentioning "urgent" and "broken" is High, and a text mentioning both
//! "road" and "permit" goes to Public Works.

use crate::domain::model::{ClassificationResult, Department, Priority};
use crate::domain::ports::Classifier;
use std::collections::BTreeSet;

pub struct PriorityRule {
    pub priority: Priority,
    pub keywords: &'static [&'static str],
}

pub struct DepartmentRule {
    pub department: Department,
    pub keywords: &'static [&'static str],
    pub reason: &'static str,
}

pub const PRIORITY_RULES: &[PriorityRule] = &[
    PriorityRule {
        priority: Priority::High,
        keywords: &["urgent", "emergency", "hazard", "safety", "dangerous"],
    },
    PriorityRule {
        priority: Priority::Medium,
        keywords: &["broken", "not working", "issue", "problem", "fault"],
    },
];

pub const DEPARTMENT_RULES: &[DepartmentRule] = &[
    DepartmentRule {
        department: Department::PublicWorks,
        keywords: &[
            "pothole",
            "streetlight",
            "sidewalk",
            "trash",
            "infrastructure",
            "road",
            "street",
        ],
        reason: "Infrastructure and public works keywords detected",
    },
    DepartmentRule {
        department: Department::Licensing,
        keywords: &["permit", "license", "zoning", "business permit", "application"],
        reason: "Permit and licensing keywords detected",
    },
    DepartmentRule {
        department: Department::It,
        keywords: &["email", "vpn", "laptop", "password", "computer", "network", "software"],
        reason: "Technology and IT support keywords detected",
    },
    DepartmentRule {
        department: Department::Hr,
        keywords: &["payroll", "benefits", "vacation", "insurance", "employee", "hr"],
        reason: "Human resources and employee services keywords detected",
    },
];

const LOW_PRIORITY_REASON: &str = "No high-priority indicators found. Classified as Low priority.";
const GENERAL_SERVICES_REASON: &str =
    "No specific department keywords found. Routed to General Services.";

/// At most this many matched keywords are quoted in the priority rationale.
const REASON_KEYWORD_LIMIT: usize = 3;

fn matches<'a>(text: &str, keywords: &[&'a str]) -> Vec<&'a str> {
    keywords.iter().copied().filter(|kw| text.contains(kw)).collect()
}

/// Maps the raw (non-deduplicated) match count to a confidence percentage.
pub fn confidence_for(matches: usize) -> u8 {
    match matches {
        0 => 60,
        1 => 65,
        2 => 75,
        n => 85usize.saturating_add((n - 3).saturating_mul(2)).min(95) as u8,
    }
}

/// Classifies a request from its text.
///
/// `channel` is part of the call shape but no rule reads it.
pub fn classify(summary: &str, description: &str, _channel: &str) -> ClassificationResult {
    let text = format!("{} {}", summary, description).to_lowercase();
    let mut matched: Vec<&'static str> = Vec::new();

    let (priority, priority_reason) = PRIORITY_RULES
        .iter()
        .find_map(|rule| {
            let found = matches(&text, rule.keywords);
            if found.is_empty() {
                return None;
            }
            let reason = format!(
                "Detected {} priority keywords: {}",
                rule.priority.as_str().to_lowercase(),
                found
                    .iter()
                    .take(REASON_KEYWORD_LIMIT)
                    .copied()
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            matched.extend(found);
            Some((rule.priority, reason))
        })
        .unwrap_or_else(|| (Priority::Low, LOW_PRIORITY_REASON.to_string()));

    let (department, department_reason) = DEPARTMENT_RULES
        .iter()
        .find_map(|rule| {
            let found = matches(&text, rule.keywords);
            if found.is_empty() {
                return None;
            }
            matched.extend(found);
            Some((rule.department, rule.reason))
        })
        .unwrap_or((Department::GeneralServices, GENERAL_SERVICES_REASON));

    // Confidence counts every hit; the returned set is deduplicated afterwards.
    let confidence = confidence_for(matched.len());
    let keywords_detected: BTreeSet<String> = matched.into_iter().map(str::to_string).collect();

    ClassificationResult {
        priority,
        department,
        category: department.category(),
        confidence,
        keywords_detected,
        department_reason: department_reason.to_string(),
        priority_reason,
    }
}

/// The rule-table classifier behind the [`Classifier`] port.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl Classifier for KeywordClassifier {
    fn classify(&self, summary: &str, description: &str, channel: &str) -> ClassificationResult {
        classify(summary, description, channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Category;

    fn keywords(result: &ClassificationResult) -> Vec<&str> {
        result.keywords_detected.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_empty_input_falls_back_to_defaults() {
        let result = classify("", "", "Phone");
        assert_eq!(result.priority, Priority::Low);
        assert_eq!(result.department, Department::GeneralServices);
        assert_eq!(result.category, Category::GeneralServices);
        assert_eq!(result.confidence, 60);
        assert!(result.keywords_detected.is_empty());
        assert_eq!(result.priority_reason, LOW_PRIORITY_REASON);
        assert_eq!(result.department_reason, GENERAL_SERVICES_REASON);
    }

    #[test]
    fn test_urgent_pothole() {
        let result = classify("Urgent pothole", "This is dangerous", "Resident Portal");
        assert_eq!(result.priority, Priority::High);
        assert_eq!(result.department, Department::PublicWorks);
        assert_eq!(result.category, Category::Infrastructure);
        assert_eq!(result.confidence, 85);
        assert_eq!(keywords(&result), vec!["dangerous", "pothole", "urgent"]);
        assert_eq!(
            result.priority_reason,
            "Detected high priority keywords: urgent, dangerous"
        );
        assert_eq!(
            result.department_reason,
            "Infrastructure and public works keywords detected"
        );
    }

    #[test]
    fn test_broken_laptop_routes_to_it() {
        let result = classify("My laptop is broken", "password issue", "Phone");
        assert_eq!(result.priority, Priority::Medium);
        assert_eq!(result.department, Department::It);
        assert_eq!(result.category, Category::Technology);
        assert_eq!(result.confidence, 87);
        assert_eq!(
            keywords(&result),
            vec!["broken", "issue", "laptop", "password"]
        );
        assert_eq!(
            result.priority_reason,
            "Detected medium priority keywords: broken, issue"
        );
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let upper = classify("URGENT", "EMERGENCY", "Walk-in");
        let lower = classify("urgent", "emergency", "Walk-in");
        assert_eq!(upper, lower);
        assert_eq!(keywords(&upper), vec!["emergency", "urgent"]);
    }

    #[test]
    fn test_high_takes_precedence_over_medium() {
        let result = classify("Broken signal", "urgent fault at crossing", "Phone");
        assert_eq!(result.priority, Priority::High);
        assert!(!result.keywords_detected.contains("broken"));
        assert!(!result.keywords_detected.contains("fault"));
    }

    #[test]
    fn test_priority_reason_quotes_first_three_matches() {
        let result = classify("urgent emergency", "hazard to safety, dangerous", "Phone");
        assert_eq!(
            result.priority_reason,
            "Detected high priority keywords: urgent, emergency, hazard"
        );
        // five priority hits, no department hits
        assert_eq!(result.confidence, 89);
    }

    #[test]
    fn test_department_order_is_first_match_wins() {
        let result = classify("Road closure", "need a permit", "Resident Portal");
        assert_eq!(result.department, Department::PublicWorks);
        assert!(!result.keywords_detected.contains("permit"));

        let result = classify("Zoning question", "vacation rental", "Phone");
        assert_eq!(result.department, Department::Licensing);
    }

    #[test]
    fn test_overlapping_keywords_all_count() {
        let result = classify("Business permit", "", "Walk-in");
        assert_eq!(result.department, Department::Licensing);
        assert_eq!(keywords(&result), vec!["business permit", "permit"]);
        assert_eq!(result.confidence, 75);
    }

    #[test]
    fn test_hr_department() {
        let result = classify("Payroll", "benefits enrollment", "Employee Portal");
        assert_eq!(result.department, Department::Hr);
        assert_eq!(result.category, Category::HumanResources);
        assert_eq!(result.priority, Priority::Low);
        assert_eq!(result.confidence, 75);
    }

    #[test]
    fn test_channel_does_not_change_outcome() {
        let a = classify("Streetlight out", "on Elm", "Phone");
        let b = classify("Streetlight out", "on Elm", "Walk-in");
        assert_eq!(a, b);
    }

    #[test]
    fn test_confidence_breakpoints() {
        assert_eq!(confidence_for(0), 60);
        assert_eq!(confidence_for(1), 65);
        assert_eq!(confidence_for(2), 75);
        assert_eq!(confidence_for(3), 85);
        assert_eq!(confidence_for(4), 87);
        assert_eq!(confidence_for(7), 93);
        assert_eq!(confidence_for(8), 95);
        assert_eq!(confidence_for(50), 95);
    }

    #[test]
    fn test_keyword_classifier_port() {
        let classifier = KeywordClassifier;
        let result = Classifier::classify(&classifier, "VPN down", "", "Phone");
        assert_eq!(result, classify("VPN down", "", "Phone"));
        assert_eq!(result.department, Department::It);
    }
}
