//! Runs the audit engine inside a page and collects its report
//!
//! The engine reports through a callback that may fire after the script
//! that started it has returned. The runner clears the result slot, starts
//! the audit, then polls the slot until the callback has filled it or the
//! timeout runs out.

use a11y_core::{A11yError, AuditConfig, AuditResults, Page, Result, RuleOptions};
use serde_json::Value;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::script::{AuditContext, AuditScript};

/// Audit engine driver
#[derive(Debug, Clone)]
pub struct AuditRunner {
    script: AuditScript,
    /// Engine source injected before each run
    engine_source: Option<String>,
    timeout: Duration,
    poll_interval: Duration,
}

impl Default for AuditRunner {
    fn default() -> Self {
        let config = AuditConfig::default();
        Self {
            script: AuditScript::from_config(&config),
            engine_source: None,
            timeout: Duration::from_millis(config.timeout_ms),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        }
    }
}

impl AuditRunner {
    /// Build a runner from config, reading the engine source if one is named
    pub fn from_config(config: &AuditConfig) -> Result<Self> {
        let engine_source = match &config.engine_path {
            Some(path) => Some(std::fs::read_to_string(path).map_err(|e| {
                A11yError::Audit(format!(
                    "Failed to read engine script {}: {}",
                    path.display(),
                    e
                ))
            })?),
            None => None,
        };

        Ok(Self {
            script: AuditScript::from_config(config),
            engine_source,
            timeout: Duration::from_millis(config.timeout_ms),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        })
    }

    /// Inject this engine source before each run
    pub fn with_engine_source(mut self, source: impl Into<String>) -> Self {
        self.engine_source = Some(source.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn script(&self) -> &AuditScript {
        &self.script
    }

    /// Audit `context` in `page`
    pub async fn run(
        &self,
        page: &dyn Page,
        context: &AuditContext,
        options: Option<&RuleOptions>,
    ) -> Result<AuditResults> {
        if let Some(source) = &self.engine_source {
            debug!("Injecting audit engine ({} bytes)", source.len());
            page.execute_script(source).await?;
        }

        let invocation = self.script.invocation(context, options)?;
        page.execute_script(&self.script.reset()).await?;
        page.execute_script(&invocation).await?;

        let json = self.wait_for_result(page).await?;
        let results = AuditResults::from_json(&json)?;

        info!(
            "Audit of {} finished with {} violation(s)",
            context.to_js(),
            results.violation_count()
        );
        Ok(results)
    }

    /// Poll the result slot until the engine callback has stored a string
    async fn wait_for_result(&self, page: &dyn Page) -> Result<String> {
        let read = self.script.read();
        let started = Instant::now();
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            match page.evaluate(&read).await? {
                Value::String(json) => {
                    debug!("Audit result ready after {} read(s)", attempt);
                    return Ok(json);
                }
                Value::Null => {}
                other => {
                    return Err(A11yError::Audit(format!(
                        "Expected a JSON string in {}, found {}",
                        self.script.result_slot, other
                    )));
                }
            }

            if started.elapsed() >= self.timeout {
                return Err(A11yError::AuditTimeout {
                    slot: self.script.result_slot.clone(),
                    waited_ms: started.elapsed().as_millis() as u64,
                });
            }
            debug!("Audit result pending (read {})", attempt);
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
