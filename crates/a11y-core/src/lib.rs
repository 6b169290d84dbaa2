//! # a11y-core
//!
//! Core types for running accessibility audits from browser-driven tests.
//!
//! ## Pieces
//!
//! - [`Rules`] accumulates tag filters and rule toggles and serializes them
//!   into the audit engine's options object ([`RuleOptions`])
//! - [`Page`] is the capability a browser driver must provide for an audit
//!   to run inside a loaded page
//! - [`AuditResults`] is the violation report the engine hands back
//! - [`A11yConfig`] holds browser and audit settings, loaded from
//!   `.a11y/config.toml`

pub mod config;
mod error;
pub mod page;
pub mod results;
pub mod rules;

pub use config::{A11yConfig, AuditConfig, BrowserConfig, DriverKind};
pub use error::{A11yError, Result};
pub use page::Page;
pub use results::{AuditResults, Node, Violation};
pub use rules::{IntoRuleIds, RuleOptions, RuleToggle, Rules, RunOnly, RunOnlyKind};
