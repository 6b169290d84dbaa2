//! # a11y-audit
//!
//! Runs an accessibility audit engine inside a browser page and turns the
//! result into a test assertion.
//!
//! This crate provides:
//! - [`AuditContext`] and [`AuditScript`] for building the engine call
//! - [`AuditRunner`] for injecting the engine and waiting on its result
//! - [`BeAccessible`] matcher with a readable violation report

mod matcher;
pub mod report;
mod runner;
mod script;

pub use matcher::{assert_accessible, be_accessible, BeAccessible};
pub use runner::AuditRunner;
pub use script::{AuditContext, AuditScript};
