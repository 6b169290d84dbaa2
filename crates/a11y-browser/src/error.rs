//! Browser error types - re-exports unified A11yError from a11y-core
//!
//! Driver failures map onto two variants:
//! - Browser(String) - Chrome DevTools Protocol failures (launch, navigation, evaluation)
//! - WebDriver(String) - WebDriver HTTP or protocol failures
//!
//! Error messages should be descriptive and include context about the operation that failed.

pub use a11y_core::{A11yError, Result};
