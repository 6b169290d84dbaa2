//! JavaScript generation for audit runs

use a11y_core::{AuditConfig, Result, RuleOptions};

/// Which part of the document the engine audits
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditContext {
    /// The whole document
    Document,
    /// Nodes matching one selector
    Within(String),
    /// The whole document minus nodes matching a selector
    Excluding(String),
    /// Nodes matching `include` minus nodes matching `exclude`
    WithinExcluding { include: String, exclude: String },
}

impl AuditContext {
    pub fn new(inclusion: Option<&str>, exclusion: Option<&str>) -> Self {
        match (inclusion, exclusion) {
            (None, None) => Self::Document,
            (Some(include), None) => Self::Within(include.to_string()),
            (None, Some(exclude)) => Self::Excluding(exclude.to_string()),
            (Some(include), Some(exclude)) => Self::WithinExcluding {
                include: include.to_string(),
                exclude: exclude.to_string(),
            },
        }
    }

    /// JavaScript expression passed as the engine's `context` argument
    pub fn to_js(&self) -> String {
        match self {
            Self::Document => "document".to_string(),
            Self::Within(include) => js_string(include),
            Self::Excluding(exclude) => {
                format!("{{include:document,exclude:[[{}]]}}", js_string(exclude))
            }
            Self::WithinExcluding { include, exclude } => format!(
                "{{include:[[{}]],exclude:[[{}]]}}",
                js_string(include),
                js_string(exclude)
            ),
        }
    }
}

/// Quote a selector as a JavaScript string literal
fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// Names of the engine entry point and the slot its callback fills
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditScript {
    pub entry_point: String,
    pub result_slot: String,
}

impl Default for AuditScript {
    fn default() -> Self {
        Self::from_config(&AuditConfig::default())
    }
}

impl AuditScript {
    pub fn from_config(config: &AuditConfig) -> Self {
        Self {
            entry_point: config.entry_point.clone(),
            result_slot: config.result_slot.clone(),
        }
    }

    /// Clear any result left by an earlier run
    pub fn reset(&self) -> String {
        format!("{} = null;", self.result_slot)
    }

    /// Start the audit; the callback stores the stringified result in the slot
    pub fn invocation(&self, context: &AuditContext, options: Option<&RuleOptions>) -> Result<String> {
        let config = match options {
            Some(options) => options.to_json()?,
            None => "null".to_string(),
        };

        Ok(format!(
            "{}({}, {}, function(result){{{} = JSON.stringify(result);}});",
            self.entry_point,
            context.to_js(),
            config,
            self.result_slot
        ))
    }

    /// Expression reading the slot back
    pub fn read(&self) -> String {
        format!("(function(){{return {};}})()", self.result_slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use a11y_core::Rules;

    #[test]
    fn test_context_document() {
        assert_eq!(AuditContext::new(None, None).to_js(), "document");
    }

    #[test]
    fn test_context_within() {
        let context = AuditContext::new(Some("#main"), None);
        assert_eq!(context, AuditContext::Within("#main".to_string()));
        assert_eq!(context.to_js(), "\"#main\"");
    }

    #[test]
    fn test_context_excluding() {
        let context = AuditContext::new(None, Some(".ads"));
        assert_eq!(context.to_js(), "{include:document,exclude:[[\".ads\"]]}");
    }

    #[test]
    fn test_context_within_excluding() {
        let context = AuditContext::new(Some("#main"), Some(".ads"));
        assert_eq!(
            context.to_js(),
            "{include:[[\"#main\"]],exclude:[[\".ads\"]]}"
        );
    }

    #[test]
    fn test_selector_quotes_are_escaped() {
        let context = AuditContext::new(Some("input[name=\"q\"]"), None);
        assert_eq!(context.to_js(), r#""input[name=\"q\"]""#);
    }

    #[test]
    fn test_invocation_without_options() {
        let script = AuditScript::default();
        let js = script.invocation(&AuditContext::Document, None).unwrap();
        assert_eq!(
            js,
            "dqre.a11yCheck(document, null, function(result){dqre.auditResult = JSON.stringify(result);});"
        );
    }

    #[test]
    fn test_invocation_with_options() {
        let mut rules = Rules::new();
        rules.run_only("label");

        let script = AuditScript::default();
        let js = script
            .invocation(&AuditContext::Within("form".to_string()), Some(&rules.to_options()))
            .unwrap();
        assert!(js.starts_with(
            "dqre.a11yCheck(\"form\", {\"runOnly\":{\"type\":\"rule\",\"values\":[\"label\"]}}, "
        ));
    }

    #[test]
    fn test_custom_slot() {
        let script = AuditScript {
            entry_point: "axe.run".to_string(),
            result_slot: "window.__audit".to_string(),
        };
        assert_eq!(script.reset(), "window.__audit = null;");
        assert_eq!(script.read(), "(function(){return window.__audit;})()");
    }
}
