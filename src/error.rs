use thiserror::Error;

/// Errors raised while setting up or running an audit
#[derive(Error, Debug)]
pub enum AuditError {
    /// Could not open a WebDriver session
    #[error("WebDriver session error: {0}")]
    Session(#[from] fantoccini::error::NewSessionError),

    /// A WebDriver command failed
    #[error("Browser command failed: {0}")]
    Command(#[from] fantoccini::error::CmdError),

    /// Navigation (including the wait for network idle) ran past the timeout
    #[error("Navigation to {url} timed out after {seconds}s")]
    NavigationTimeout { url: String, seconds: u64 },

    /// None of the known WebDriver endpoints accepted a session
    #[error("No WebDriver server reachable (tried {0})")]
    NoWebDriver(String),

    /// Invalid base URL or page path
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The browser returned something the auditor could not interpret
    #[error("Browser error: {0}")]
    Browser(String),

    /// IO errors (screenshots, report file, stdout)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON errors (config and report files)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AuditError {
    /// Create a browser error from anything printable
    pub fn browser(msg: impl Into<String>) -> Self {
        Self::Browser(msg.into())
    }
}

/// Convenience Result type for audit operations
pub type Result<T> = std::result::Result<T, AuditError>;
