//! Smoke-tests a running Storybook through a WebDriver-controlled browser:
//! page landmarks, basic accessibility signals, search and keyboard focus,
//! and light-theme enforcement.

pub mod auditor;
pub mod browser;
pub mod config;
pub mod error;
pub mod inspect;
pub mod report;
pub mod results;
pub mod utils;

// Re-export commonly used types for convenience
pub use auditor::Auditor;
pub use browser::{Browser, WebDriverBrowser};
pub use config::{AuditConfig, AuditTarget};
pub use error::{AuditError, Result};
pub use results::{AuditStatus, PageAuditResult, RunSummary};
