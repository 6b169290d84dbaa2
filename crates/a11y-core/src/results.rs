//! Audit results as reported by the engine

use serde::{Deserialize, Serialize};

/// Top-level audit report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditResults {
    #[serde(default)]
    pub violations: Vec<Violation>,
}

/// A failed accessibility rule and the nodes it failed on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// Rule id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Severity reported by the engine (minor, moderate, serious, critical)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub help: String,
    pub help_url: String,
    #[serde(default)]
    pub nodes: Vec<Node>,
}

/// A DOM node a rule failed on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub html: String,
    #[serde(default)]
    pub target: Vec<String>,
    #[serde(default)]
    pub failure_summary: String,
}

impl AuditResults {
    /// Parse the engine's JSON report
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }

    /// True when the audit found nothing
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::A11yError;

    const REPORT: &str = r##"{
        "url": "http://localhost/",
        "passes": [],
        "violations": [{
            "id": "image-alt",
            "impact": "critical",
            "help": "Images must have alternate text",
            "helpUrl": "https://example.test/rules/image-alt",
            "nodes": [{
                "html": "<img src=\"logo.png\">",
                "target": ["#logo"],
                "failureSummary": "Fix any of the following:\n  Element does not have an alt attribute"
            }]
        }]
    }"##;

    #[test]
    fn test_parse_report() {
        let results = AuditResults::from_json(REPORT).unwrap();
        assert_eq!(results.violation_count(), 1);
        assert!(!results.passed());

        let violation = &results.violations[0];
        assert_eq!(violation.id.as_deref(), Some("image-alt"));
        assert_eq!(violation.impact.as_deref(), Some("critical"));
        assert_eq!(violation.help_url, "https://example.test/rules/image-alt");
        assert_eq!(violation.nodes[0].target, vec!["#logo"]);
        assert!(violation.nodes[0].failure_summary.contains('\n'));
    }

    #[test]
    fn test_parse_empty_report() {
        let results = AuditResults::from_json(r#"{"violations": []}"#).unwrap();
        assert!(results.passed());
    }

    #[test]
    fn test_missing_summary_defaults_to_empty() {
        let json = r#"{"violations":[{"help":"h","helpUrl":"u","nodes":[{"html":"<a>"}]}]}"#;
        let results = AuditResults::from_json(json).unwrap();
        assert_eq!(results.violations[0].nodes[0].failure_summary, "");
        assert!(results.violations[0].nodes[0].target.is_empty());
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        let err = AuditResults::from_json("undefined").unwrap_err();
        assert!(matches!(err, A11yError::Serialization(_)));
    }
}
