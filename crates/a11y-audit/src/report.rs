//! Human-readable violation reports

use a11y_core::AuditResults;
use std::fmt::Write;

const INDENT: &str = "    ";

/// Render every violation and the nodes it failed on.
///
/// ```text
/// Found 1 accessibility violation:
///   1) Images must have alternate text: https://...
///     <img src="logo.png">
///     #logo
///     Fix any of the following:
///       Element does not have an alt attribute
/// ```
pub fn render(results: &AuditResults) -> String {
    let count = results.violation_count();
    let mut message = format!(
        "Found {} accessibility {}:\n",
        count,
        if count == 1 { "violation" } else { "violations" }
    );

    for (i, violation) in results.violations.iter().enumerate() {
        let _ = writeln!(message, "  {}) {}: {}", i + 1, violation.help, violation.help_url);
        for node in &violation.nodes {
            let _ = writeln!(message, "{}{}", INDENT, node.html);
            for target in &node.target {
                let _ = writeln!(message, "{}{}", INDENT, target);
            }
            let summary = node.failure_summary.replace('\n', &format!("\n{}", INDENT));
            let _ = writeln!(message, "{}{}", INDENT, summary);
        }
    }

    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use a11y_core::{Node, Violation};

    fn violation(help: &str, nodes: Vec<Node>) -> Violation {
        Violation {
            id: None,
            impact: None,
            description: None,
            help: help.to_string(),
            help_url: format!("https://example.test/{}", help.to_lowercase().replace(' ', "-")),
            nodes,
        }
    }

    #[test]
    fn test_render_single_violation() {
        let results = AuditResults {
            violations: vec![violation(
                "Images must have alternate text",
                vec![Node {
                    html: "<img src=\"logo.png\">".to_string(),
                    target: vec!["#logo".to_string()],
                    failure_summary: "Fix any of the following:\n  Element does not have an alt attribute"
                        .to_string(),
                }],
            )],
        };

        assert_eq!(
            render(&results),
            "Found 1 accessibility violation:\n\
             \x20 1) Images must have alternate text: https://example.test/images-must-have-alternate-text\n\
             \x20   <img src=\"logo.png\">\n\
             \x20   #logo\n\
             \x20   Fix any of the following:\n\
             \x20     Element does not have an alt attribute\n"
        );
    }

    #[test]
    fn test_render_pluralizes_and_numbers() {
        let results = AuditResults {
            violations: vec![violation("First", vec![]), violation("Second", vec![])],
        };

        let message = render(&results);
        assert!(message.starts_with("Found 2 accessibility violations:\n"));
        assert!(message.contains("  1) First: https://example.test/first\n"));
        assert!(message.contains("  2) Second: https://example.test/second\n"));
    }

    #[test]
    fn test_render_every_target() {
        let results = AuditResults {
            violations: vec![violation(
                "Frames",
                vec![Node {
                    html: "<button>".to_string(),
                    target: vec!["iframe".to_string(), "#inner button".to_string()],
                    failure_summary: String::new(),
                }],
            )],
        };

        let message = render(&results);
        assert!(message.contains("    iframe\n    #inner button\n"));
    }
}
