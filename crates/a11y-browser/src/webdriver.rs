//! Page driven over the W3C WebDriver HTTP protocol
//!
//! Talks to any WebDriver server (chromedriver, geckodriver, a Selenium
//! grid). Only the handful of endpoints an audit needs are covered:
//! new session, navigate, synchronous script execution and delete session.

use crate::error::{A11yError, Result};
use a11y_core::{BrowserConfig, Page};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info};

/// Browser session held by a WebDriver server
pub struct WebDriverPage {
    client: reqwest::Client,
    /// Base URL of the session, `<server>/session/<id>`
    session_url: String,
    session_id: String,
}

/// Every WebDriver response wraps its payload in `value`
#[derive(Debug, Deserialize)]
struct Envelope {
    value: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewSession {
    session_id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorValue {
    error: String,
    #[serde(default)]
    message: String,
}

/// Capabilities requested for a new session
pub(crate) fn capabilities(config: &BrowserConfig) -> Value {
    let mut args = vec![format!(
        "--window-size={},{}",
        config.window_width, config.window_height
    )];
    if config.headless {
        args.push("--headless=new".to_string());
    }
    if let Some(ua) = &config.user_agent {
        args.push(format!("--user-agent={}", ua));
    }

    json!({
        "capabilities": {
            "alwaysMatch": {
                "browserName": "chrome",
                "goog:chromeOptions": { "args": args }
            }
        }
    })
}

/// `execute/sync` runs its script as a function body. Source is passed as
/// an argument and evaluated indirectly so it runs at global scope, the
/// same as on CDP: top-level declarations in an injected engine become
/// globals.
pub(crate) const GLOBAL_EXECUTE: &str = "(0, eval)(arguments[0]);";

/// Same as [`GLOBAL_EXECUTE`], handing the value back
pub(crate) const GLOBAL_EVALUATE: &str = "return (0, eval)(arguments[0]);";

impl WebDriverPage {
    /// Open a new session on the server named in `config.webdriver_url`
    pub async fn open(config: &BrowserConfig) -> Result<Self> {
        let server = config.webdriver_url.trim_end_matches('/').to_string();
        info!("Opening WebDriver session on {}", server);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| A11yError::WebDriver(format!("Failed to build HTTP client: {}", e)))?;

        let value = send(
            client
                .post(format!("{}/session", server))
                .json(&capabilities(config)),
        )
        .await?;
        let session: NewSession = serde_json::from_value(value)
            .map_err(|e| A11yError::WebDriver(format!("Unexpected new session reply: {}", e)))?;

        info!("WebDriver session {} opened", session.session_id);

        Ok(Self {
            client,
            session_url: format!("{}/session/{}", server, session.session_id),
            session_id: session.session_id,
        })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    async fn execute(&self, wrapper: &str, source: &str) -> Result<Value> {
        send(
            self.client
                .post(format!("{}/execute/sync", self.session_url))
                .json(&json!({ "script": wrapper, "args": [source] })),
        )
        .await
    }
}

/// Send a request and unwrap the WebDriver envelope, turning protocol
/// errors into `A11yError::WebDriver`
async fn send(request: reqwest::RequestBuilder) -> Result<Value> {
    let response = request
        .send()
        .await
        .map_err(|e| A11yError::WebDriver(format!("Request failed: {}", e)))?;
    let status = response.status();

    let envelope: Envelope = response
        .json()
        .await
        .map_err(|e| A11yError::WebDriver(format!("Invalid response ({}): {}", status, e)))?;

    if !status.is_success() {
        return Err(protocol_error(status.as_u16(), envelope.value));
    }
    Ok(envelope.value)
}

fn protocol_error(status: u16, value: Value) -> A11yError {
    match serde_json::from_value::<ErrorValue>(value) {
        Ok(err) => A11yError::WebDriver(format!("{} ({}): {}", err.error, status, err.message)),
        Err(_) => A11yError::WebDriver(format!("HTTP {}", status)),
    }
}

#[async_trait]
impl Page for WebDriverPage {
    async fn visit(&self, url: &str) -> Result<()> {
        debug!("Navigating to {}", url);

        send(
            self.client
                .post(format!("{}/url", self.session_url))
                .json(&json!({ "url": url })),
        )
        .await?;

        info!("Successfully navigated to {}", url);
        Ok(())
    }

    async fn execute_script(&self, script: &str) -> Result<()> {
        debug!("Executing JavaScript: {}", script);
        self.execute(GLOBAL_EXECUTE, script).await?;
        Ok(())
    }

    async fn evaluate(&self, expression: &str) -> Result<Value> {
        debug!("Evaluating JavaScript: {}", expression);
        self.execute(GLOBAL_EVALUATE, expression).await
    }

    async fn quit(&self) -> Result<()> {
        info!("Deleting WebDriver session {}", self.session_id);
        send(self.client.delete(&self.session_url)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capabilities_headless() {
        let caps = capabilities(&BrowserConfig::default());
        let args = &caps["capabilities"]["alwaysMatch"]["goog:chromeOptions"]["args"];
        assert_eq!(args[0], "--window-size=1920,1080");
        assert_eq!(args[1], "--headless=new");
    }

    #[test]
    fn test_capabilities_user_agent() {
        let config = BrowserConfig {
            headless: false,
            user_agent: Some("AuditBot/1.0".to_string()),
            ..BrowserConfig::default()
        };
        let caps = capabilities(&config);
        let args = caps["capabilities"]["alwaysMatch"]["goog:chromeOptions"]["args"]
            .as_array()
            .unwrap();
        assert_eq!(args.len(), 2);
        assert_eq!(args[1], "--user-agent=AuditBot/1.0");
    }

    #[test]
    fn test_protocol_error_message() {
        let err = protocol_error(
            404,
            json!({ "error": "invalid session id", "message": "session deleted" }),
        );
        assert_eq!(
            err.to_string(),
            "WebDriver error: invalid session id (404): session deleted"
        );
    }

    #[test]
    fn test_protocol_error_without_body() {
        let err = protocol_error(500, Value::Null);
        assert_eq!(err.to_string(), "WebDriver error: HTTP 500");
    }
}
