//! Configuration management for a11y
//!
//! This module provides configuration structures for project-level settings:
//! which browser driver to use and how the audit engine is invoked inside a page.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{A11yError, Result};

/// Project-level a11y configuration
///
/// Loaded from `.a11y/config.toml` in the project root.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct A11yConfig {
    /// Browser session settings
    #[serde(default)]
    pub browser: BrowserConfig,

    /// Audit engine settings
    #[serde(default)]
    pub audit: AuditConfig,
}

/// Automation driver family used to talk to the browser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriverKind {
    /// Chrome DevTools Protocol
    #[default]
    Cdp,
    /// W3C WebDriver over HTTP
    WebDriver,
}

/// Configuration for browser launch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Driver family
    #[serde(default)]
    pub driver: DriverKind,

    /// Run in headless mode (default: true)
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Browser window width
    #[serde(default = "default_window_width")]
    pub window_width: u32,

    /// Browser window height
    #[serde(default = "default_window_height")]
    pub window_height: u32,

    /// User agent string
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Navigation timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// WebDriver server endpoint
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Attach to a running Chrome on this debugging port instead of launching one
    #[serde(default)]
    pub debug_port: Option<u16>,
}

/// How the audit engine is injected and invoked
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Engine script to inject before auditing (None if the page already loads it)
    #[serde(default)]
    pub engine_path: Option<PathBuf>,

    /// Global function invoked as `entry_point(context, config, callback)`
    #[serde(default = "default_entry_point")]
    pub entry_point: String,

    /// Global property the callback stores the JSON result on
    #[serde(default = "default_result_slot")]
    pub result_slot: String,

    /// Maximum time to wait for the result slot to fill
    #[serde(default = "default_audit_timeout_ms")]
    pub timeout_ms: u64,

    /// Delay between result slot reads
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

// Default value providers
fn default_headless() -> bool {
    true
}

fn default_window_width() -> u32 {
    1920
}

fn default_window_height() -> u32 {
    1080
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_entry_point() -> String {
    "dqre.a11yCheck".to_string()
}

fn default_result_slot() -> String {
    "dqre.auditResult".to_string()
}

fn default_audit_timeout_ms() -> u64 {
    5000
}

fn default_poll_interval_ms() -> u64 {
    50
}

impl A11yConfig {
    /// Load configuration from `.a11y/config.toml` or use defaults
    pub fn load_or_default(project_root: &Path) -> Result<Self> {
        let config_path = project_root.join(".a11y/config.toml");

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)
                .map_err(|e| A11yError::Config(format!("Failed to parse config file: {}", e)))
        } else {
            Ok(Self::default())
        }
    }

    /// Write default configuration to `.a11y/config.toml`
    pub fn write_default(project_root: &Path) -> Result<()> {
        let config_dir = project_root.join(".a11y");
        std::fs::create_dir_all(&config_dir)?;

        let config_path = config_dir.join("config.toml");
        let content = toml::to_string_pretty(&Self::default())
            .map_err(|e| A11yError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            driver: DriverKind::default(),
            headless: default_headless(),
            window_width: default_window_width(),
            window_height: default_window_height(),
            user_agent: None,
            timeout_seconds: default_timeout_seconds(),
            webdriver_url: default_webdriver_url(),
            debug_port: None,
        }
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            engine_path: None,
            entry_point: default_entry_point(),
            result_slot: default_result_slot(),
            timeout_ms: default_audit_timeout_ms(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}
