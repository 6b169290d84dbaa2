//! Browser sessions for accessibility audits
//!
//! This crate provides the two [`Page`](a11y_core::Page) implementations the
//! audit runner drives, plus the per-scenario session glue.
//!
//! # Drivers
//!
//! - **CDP**: launch or attach to Chrome through the Chrome DevTools Protocol
//!   ([`CdpPage`])
//! - **WebDriver**: any W3C WebDriver server such as chromedriver or a
//!   Selenium grid ([`WebDriverPage`])
//!
//! The driver is chosen from [`BrowserConfig::driver`](a11y_core::BrowserConfig)
//! when [`BrowserSession::open`] runs.
//!
//! # Example
//!
//! ```no_run
//! use a11y_audit::be_accessible;
//! use a11y_browser::BrowserSession;
//! use a11y_core::A11yConfig;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = A11yConfig::load_or_default(Path::new("."))?;
//!     let session = BrowserSession::open(&config.browser).await?;
//!     session.visit("http://localhost:3000/signup").await?;
//!
//!     let mut matcher = be_accessible().within("#signup-form").excluding(".ad-banner");
//!     if !matcher.matches(session.page()).await? {
//!         println!("{}", matcher.failure_message());
//!     }
//!
//!     session.quit().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Requirements
//!
//! - Chrome or Chromium installed for the CDP driver
//! - For attaching to a running browser: `chrome --remote-debugging-port=9222`
//!   and `debug_port = 9222` in the `[browser]` config
//! - For the WebDriver driver: a server listening on `webdriver_url`

pub mod cdp;
pub mod error;
pub mod session;
pub mod webdriver;

// Re-export commonly used types
pub use cdp::CdpPage;
pub use error::{A11yError, Result};
pub use session::BrowserSession;
pub use webdriver::WebDriverPage;
