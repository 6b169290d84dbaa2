//! Rule selection for audit runs
//!
//! [`Rules`] collects which rules the engine should run, skip, or run
//! exclusively, and which tags to filter by. [`Rules::to_options`] turns
//! that into the options object the engine accepts as its `config`
//! argument.
//!
//! ```
//! use a11y_core::{Rules, RunOnlyKind};
//!
//! let mut rules = Rules::new();
//! rules.by_tags("wcag2a").run(["label", "image-alt"]).skip("color-contrast");
//!
//! let options = rules.to_options();
//! assert_eq!(options.run_only.unwrap().kind, RunOnlyKind::Tag);
//! assert_eq!(options.rules.unwrap().len(), 3);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// One or more rule ids or tag names.
///
/// Lets every builder method take a single id, an array, a `Vec`, or a
/// slice.
pub trait IntoRuleIds {
    fn into_rule_ids(self) -> Vec<String>;
}

impl IntoRuleIds for &str {
    fn into_rule_ids(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl IntoRuleIds for String {
    fn into_rule_ids(self) -> Vec<String> {
        vec![self]
    }
}

impl IntoRuleIds for &String {
    fn into_rule_ids(self) -> Vec<String> {
        vec![self.clone()]
    }
}

impl<S: Into<String>, const N: usize> IntoRuleIds for [S; N] {
    fn into_rule_ids(self) -> Vec<String> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<S: Into<String>> IntoRuleIds for Vec<S> {
    fn into_rule_ids(self) -> Vec<String> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<S: AsRef<str>> IntoRuleIds for &[S] {
    fn into_rule_ids(self) -> Vec<String> {
        self.iter().map(|s| s.as_ref().to_string()).collect()
    }
}

impl<S: AsRef<str>, const N: usize> IntoRuleIds for &[S; N] {
    fn into_rule_ids(self) -> Vec<String> {
        self.as_slice().into_rule_ids()
    }
}

impl<S: AsRef<str>> IntoRuleIds for &Vec<S> {
    fn into_rule_ids(self) -> Vec<String> {
        self.as_slice().into_rule_ids()
    }
}

/// Accumulated rule selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rules {
    tags: Vec<String>,
    included: Vec<String>,
    excluded: Vec<String>,
    exclusive: Vec<String>,
}

/// Serialized options passed to the engine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_only: Option<RunOnly>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<BTreeMap<String, RuleToggle>>,
}

/// Restricts a run to the given tags or rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOnly {
    #[serde(rename = "type")]
    pub kind: RunOnlyKind,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunOnlyKind {
    Tag,
    Rule,
}

/// Per-rule switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleToggle {
    pub enabled: bool,
}

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only run rules carrying these tags
    pub fn by_tags(&mut self, tags: impl IntoRuleIds) -> &mut Self {
        self.tags.extend(tags.into_rule_ids());
        self
    }

    /// Run these rules and nothing else
    pub fn run_only(&mut self, rules: impl IntoRuleIds) -> &mut Self {
        self.exclusive.extend(rules.into_rule_ids());
        self
    }

    /// Enable these rules
    pub fn run(&mut self, rules: impl IntoRuleIds) -> &mut Self {
        self.included.extend(rules.into_rule_ids());
        self
    }

    /// Disable these rules
    pub fn skip(&mut self, rules: impl IntoRuleIds) -> &mut Self {
        self.excluded.extend(rules.into_rule_ids());
        self
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn included(&self) -> &[String] {
        &self.included
    }

    pub fn excluded(&self) -> &[String] {
        &self.excluded
    }

    pub fn exclusive(&self) -> &[String] {
        &self.exclusive
    }

    /// True if nothing has been selected
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
            && self.included.is_empty()
            && self.excluded.is_empty()
            && self.exclusive.is_empty()
    }

    /// Build the engine options object.
    ///
    /// Tags and exclusive rules share the single `runOnly` key; when both
    /// are set the exclusive rules replace the tags.
    pub fn to_options(&self) -> RuleOptions {
        let mut options = RuleOptions::default();

        if !self.tags.is_empty() && !self.exclusive.is_empty() {
            warn!(
                "Tags {:?} and exclusive rules {:?} are incompatible; running only the rules",
                self.tags, self.exclusive
            );
        }

        if !self.tags.is_empty() {
            options.run_only = Some(RunOnly {
                kind: RunOnlyKind::Tag,
                values: self.tags.clone(),
            });
        }
        if !self.exclusive.is_empty() {
            options.run_only = Some(RunOnly {
                kind: RunOnlyKind::Rule,
                values: self.exclusive.clone(),
            });
        }

        if !self.included.is_empty() || !self.excluded.is_empty() {
            let mut rules = BTreeMap::new();
            for id in &self.included {
                rules.insert(id.clone(), RuleToggle { enabled: true });
            }
            // Skips merge second so they win over runs of the same id
            for id in &self.excluded {
                rules.insert(id.clone(), RuleToggle { enabled: false });
            }
            options.rules = Some(rules);
        }

        options
    }
}

impl RuleOptions {
    /// JSON literal suitable for splicing into an audit script
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
