//! Page driven over the Chrome DevTools Protocol

use crate::error::{A11yError, Result};
use a11y_core::{BrowserConfig, Page};
use async_trait::async_trait;
use headless_chrome::{Browser, LaunchOptions, Tab};
use serde::Deserialize;
use std::ffi::OsStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Chrome tab controlled through CDP
pub struct CdpPage {
    /// Underlying browser instance (kept alive for tab lifetime)
    #[allow(dead_code)]
    browser: Browser,
    /// Current active tab
    tab: Arc<Tab>,
}

#[derive(Deserialize)]
struct VersionInfo {
    #[serde(rename = "webSocketDebuggerUrl")]
    web_socket_debugger_url: String,
}

impl CdpPage {
    /// Launch a new browser instance with default configuration
    pub async fn launch() -> Result<Self> {
        Self::launch_with_config(&BrowserConfig::default()).await
    }

    /// Launch browser with custom configuration
    pub async fn launch_with_config(config: &BrowserConfig) -> Result<Self> {
        info!(
            "Launching browser (headless: {}, size: {}x{})",
            config.headless, config.window_width, config.window_height
        );

        let mut launch_options = LaunchOptions::default_builder()
            .headless(config.headless)
            .window_size(Some((config.window_width, config.window_height)))
            .build()
            .map_err(|e| A11yError::Browser(format!("Failed to launch browser: {}", e)))?;

        let user_agent_arg: Option<String> = config
            .user_agent
            .as_ref()
            .map(|ua| format!("--user-agent={}", ua));
        if let Some(ref ua_arg) = user_agent_arg {
            launch_options.args.push(OsStr::new(ua_arg));
        }

        let browser = Browser::new(launch_options)
            .map_err(|e| A11yError::Browser(format!("Failed to launch browser: {}", e)))?;

        let page = Self::open_tab(browser, config)?;
        info!("Browser launched successfully");
        Ok(page)
    }

    /// Connect to an existing browser instance
    ///
    /// # Arguments
    /// * `port` - Chrome DevTools Protocol port (typically 9222)
    pub async fn connect(port: u16, config: &BrowserConfig) -> Result<Self> {
        info!("Connecting to existing browser on port {}", port);

        let version_url = format!("http://127.0.0.1:{}/json/version", port);
        let version: VersionInfo = reqwest::get(&version_url)
            .await
            .map_err(|e| A11yError::Browser(format!("Failed to reach {}: {}", version_url, e)))?
            .json()
            .await
            .map_err(|e| {
                A11yError::Browser(format!("Invalid version info from {}: {}", version_url, e))
            })?;

        let browser = Browser::connect(version.web_socket_debugger_url)
            .map_err(|e| A11yError::Browser(format!("Failed to connect to browser: {}", e)))?;

        let page = Self::open_tab(browser, config)?;
        info!("Connected to browser successfully");
        Ok(page)
    }

    fn open_tab(browser: Browser, config: &BrowserConfig) -> Result<Self> {
        let tab = browser
            .new_tab()
            .map_err(|e| A11yError::Browser(format!("Failed to create tab: {}", e)))?;
        tab.set_default_timeout(Duration::from_secs(config.timeout_seconds));

        Ok(Self { browser, tab })
    }

    /// Get reference to the active tab
    pub fn tab(&self) -> &Arc<Tab> {
        &self.tab
    }

    async fn run_guarded(&self, source: &str) -> Result<serde_json::Value> {
        let result = self
            .tab
            .evaluate(&guarded(source), false)
            .map_err(|e| A11yError::Browser(format!("JavaScript evaluation failed: {}", e)))?;
        unguard(result.value)
    }
}

#[async_trait]
impl Page for CdpPage {
    async fn visit(&self, url: &str) -> Result<()> {
        debug!("Navigating to {}", url);

        self.tab
            .navigate_to(url)
            .map_err(|e| A11yError::Browser(format!("Failed to navigate to {}: {}", url, e)))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| A11yError::Browser(format!("Navigation timeout for {}: {}", url, e)))?;

        info!("Successfully navigated to {}", url);
        Ok(())
    }

    async fn execute_script(&self, script: &str) -> Result<()> {
        debug!("Executing JavaScript: {}", script);
        self.run_guarded(script).await?;
        Ok(())
    }

    async fn evaluate(&self, expression: &str) -> Result<serde_json::Value> {
        debug!("Evaluating JavaScript: {}", expression);
        self.run_guarded(expression).await
    }

    async fn quit(&self) -> Result<()> {
        info!("Closing browser tab");
        self.tab
            .close(true)
            .map_err(|e| A11yError::Browser(format!("Failed to close tab: {}", e)))?;
        Ok(())
    }
}

/// Wrap source so it runs at global scope and always hands back a JSON
/// string: `{"ok": value}` on success, `{"error": message}` if it throws.
///
/// `Tab::evaluate` drops the exception details of a failed evaluation, so
/// errors have to be caught on the page side.
fn guarded(source: &str) -> String {
    format!(
        "(function(){{try{{return JSON.stringify({{ok:(0,eval)({})}});}}\
         catch(e){{return JSON.stringify({{error:String((e&&e.stack)||e)}});}}}})()",
        serde_json::Value::String(source.to_string())
    )
}

#[derive(Deserialize)]
struct Guarded {
    #[serde(default)]
    ok: serde_json::Value,
    error: Option<String>,
}

/// Unpack the reply of a `guarded` evaluation
fn unguard(reply: Option<serde_json::Value>) -> Result<serde_json::Value> {
    let json = match reply {
        Some(serde_json::Value::String(json)) => json,
        other => {
            return Err(A11yError::Browser(format!(
                "JavaScript execution returned no result: {:?}",
                other
            )))
        }
    };

    let guarded: Guarded = serde_json::from_str(&json)?;
    match guarded.error {
        Some(message) => Err(A11yError::Browser(format!(
            "JavaScript execution failed: {}",
            message
        ))),
        None => Ok(guarded.ok),
    }
}
