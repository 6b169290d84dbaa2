//! Shared helpers for audit integration tests

use a11y_core::{Page, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Install a test-friendly subscriber once; `RUST_LOG` controls verbosity
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Page that records scripts and answers reads from a queue
///
/// Reads past the end of the queue return `null`, like a result slot the
/// engine never filled.
#[derive(Default)]
pub struct ScriptedPage {
    scripts: Mutex<Vec<String>>,
    reads: Mutex<VecDeque<Value>>,
    read_count: Mutex<usize>,
}

impl ScriptedPage {
    pub fn answering(reads: impl IntoIterator<Item = Value>) -> Self {
        Self {
            reads: Mutex::new(reads.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Page whose audit reports this JSON on the first read
    pub fn reporting(json: &str) -> Self {
        Self::answering([Value::String(json.to_string())])
    }

    pub fn scripts(&self) -> Vec<String> {
        self.scripts.lock().unwrap().clone()
    }

    pub fn read_count(&self) -> usize {
        *self.read_count.lock().unwrap()
    }
}

#[async_trait]
impl Page for ScriptedPage {
    async fn visit(&self, _url: &str) -> Result<()> {
        Ok(())
    }

    async fn execute_script(&self, script: &str) -> Result<()> {
        self.scripts.lock().unwrap().push(script.to_string());
        Ok(())
    }

    async fn evaluate(&self, _expression: &str) -> Result<Value> {
        *self.read_count.lock().unwrap() += 1;
        Ok(self.reads.lock().unwrap().pop_front().unwrap_or(Value::Null))
    }

    async fn quit(&self) -> Result<()> {
        Ok(())
    }
}

pub const NO_VIOLATIONS: &str = r#"{"violations":[]}"#;

pub const ONE_VIOLATION: &str = r##"{
    "violations": [{
        "id": "label",
        "impact": "critical",
        "help": "Form elements must have labels",
        "helpUrl": "https://example.test/rules/label",
        "nodes": [{
            "html": "<input type=\"text\" id=\"email\">",
            "target": ["#signup", "#email"],
            "failureSummary": "Fix any of the following:\n  Form element does not have an implicit (wrapped) <label>\n  Form element does not have an explicit <label>"
        }]
    }]
}"##;
