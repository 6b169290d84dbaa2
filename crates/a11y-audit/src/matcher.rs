//! `be_accessible` matcher for test assertions

use a11y_core::{A11yError, AuditResults, Page, Result, Rules};
use tracing::info;

use crate::report;
use crate::runner::AuditRunner;
use crate::script::AuditContext;

/// Passes when the audited part of a page has no violations
///
/// # Example
/// ```no_run
/// use a11y_audit::be_accessible;
/// use a11y_core::{Page, Rules};
///
/// async fn check(page: &dyn Page) -> a11y_core::Result<()> {
///     let mut rules = Rules::new();
///     rules.by_tags("wcag2a");
///
///     let mut matcher = be_accessible().within("main").with_rules(rules);
///     assert!(matcher.matches(page).await?, "{}", matcher.failure_message());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct BeAccessible {
    inclusion: Option<String>,
    exclusion: Option<String>,
    rules: Option<Rules>,
    runner: AuditRunner,
    results: Option<AuditResults>,
}

/// Shorthand for [`BeAccessible::new`]
pub fn be_accessible() -> BeAccessible {
    BeAccessible::new()
}

impl BeAccessible {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only audit nodes matching `selector`
    pub fn within(mut self, selector: impl Into<String>) -> Self {
        self.inclusion = Some(selector.into());
        self
    }

    /// Leave nodes matching `selector` out of the audit
    pub fn excluding(mut self, selector: impl Into<String>) -> Self {
        self.exclusion = Some(selector.into());
        self
    }

    /// Pass these rule options to the engine instead of `null`
    pub fn with_rules(mut self, rules: Rules) -> Self {
        self.rules = Some(rules);
        self
    }

    pub fn with_runner(mut self, runner: AuditRunner) -> Self {
        self.runner = runner;
        self
    }

    pub fn context(&self) -> AuditContext {
        AuditContext::new(self.inclusion.as_deref(), self.exclusion.as_deref())
    }

    /// Run the audit and report whether it found no violations
    pub async fn matches(&mut self, page: &dyn Page) -> Result<bool> {
        let options = self.rules.as_ref().map(Rules::to_options);
        let results = self
            .runner
            .run(page, &self.context(), options.as_ref())
            .await?;

        let passed = results.passed();
        self.results = Some(results);
        Ok(passed)
    }

    /// Results of the last run
    pub fn results(&self) -> Option<&AuditResults> {
        self.results.as_ref()
    }

    /// Report for a failed `matches`
    pub fn failure_message(&self) -> String {
        match &self.results {
            Some(results) => report::render(results),
            None => "No accessibility audit has been run".to_string(),
        }
    }

    /// Report for a negated expectation that unexpectedly passed
    pub fn negated_failure_message(&self) -> String {
        "Expected to find accessibility violations, but found none".to_string()
    }
}

/// Run `matcher` against `page`, failing with the violation report
///
/// ```no_run
/// use a11y_audit::{assert_accessible, be_accessible};
/// use a11y_core::Page;
///
/// async fn signup_form_is_accessible(page: &dyn Page) -> a11y_core::Result<()> {
///     assert_accessible(page, be_accessible().within("#signup")).await
/// }
/// ```
pub async fn assert_accessible(page: &dyn Page, mut matcher: BeAccessible) -> Result<()> {
    if matcher.matches(page).await? {
        Ok(())
    } else {
        let message = matcher.failure_message();
        info!("Accessibility assertion failed");
        Err(A11yError::Inaccessible(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_from_selectors() {
        assert_eq!(be_accessible().context(), AuditContext::Document);
        assert_eq!(
            be_accessible().within("#main").context(),
            AuditContext::Within("#main".to_string())
        );
        assert_eq!(
            be_accessible().excluding(".ads").context(),
            AuditContext::Excluding(".ads".to_string())
        );
        assert_eq!(
            be_accessible().excluding(".ads").within("#main").context(),
            AuditContext::WithinExcluding {
                include: "#main".to_string(),
                exclude: ".ads".to_string(),
            }
        );
    }

    #[test]
    fn test_failure_message_before_run() {
        let matcher = be_accessible();
        assert!(matcher.results().is_none());
        assert_eq!(matcher.failure_message(), "No accessibility audit has been run");
    }

    #[test]
    fn test_negated_failure_message() {
        let matcher = be_accessible().within("#main");
        assert_eq!(
            matcher.negated_failure_message(),
            "Expected to find accessibility violations, but found none"
        );
    }
}
