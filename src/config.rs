use crate::error::{AuditError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// One documentation page to visit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTarget {
    /// Display name, also used to derive the screenshot filename
    pub name: String,

    /// Path relative to the base URL (e.g. `/?path=/docs/components-button--docs`)
    pub path: String,
}

impl AuditTarget {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Resolve this target against the base URL.
    ///
    /// The path is appended to the base rather than joined, so a base with a
    /// sub-path (`http://host/storybook`) keeps it.
    pub fn resolve(&self, base_url: &str) -> Result<Url> {
        let joined = format!("{}{}", base_url.trim_end_matches('/'), self.path);
        Ok(Url::parse(&joined)?)
    }
}

/// Browser window size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
        }
    }
}

/// Waits and timeouts used while auditing, in milliseconds unless noted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditTimings {
    /// Upper bound for navigation plus the wait for network idle
    #[serde(default = "default_navigation_timeout_secs")]
    pub navigation_timeout_secs: u64,

    /// How long the resource count must stay unchanged to count as idle
    #[serde(default = "default_network_idle_ms")]
    pub network_idle_ms: u64,

    /// Pause after navigation for late-rendering content
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,

    /// Pause between two targets
    #[serde(default = "default_between_targets_ms")]
    pub between_targets_ms: u64,

    /// Pause after typing into the search box
    #[serde(default = "default_search_settle_ms")]
    pub search_settle_ms: u64,

    /// Pause after sending the Tab key
    #[serde(default = "default_focus_settle_ms")]
    pub focus_settle_ms: u64,
}

impl Default for AuditTimings {
    fn default() -> Self {
        Self {
            navigation_timeout_secs: default_navigation_timeout_secs(),
            network_idle_ms: default_network_idle_ms(),
            settle_ms: default_settle_ms(),
            between_targets_ms: default_between_targets_ms(),
            search_settle_ms: default_search_settle_ms(),
            focus_settle_ms: default_focus_settle_ms(),
        }
    }
}

impl AuditTimings {
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }

    pub fn network_idle(&self) -> Duration {
        Duration::from_millis(self.network_idle_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn between_targets(&self) -> Duration {
        Duration::from_millis(self.between_targets_ms)
    }

    pub fn search_settle(&self) -> Duration {
        Duration::from_millis(self.search_settle_ms)
    }

    pub fn focus_settle(&self) -> Duration {
        Duration::from_millis(self.focus_settle_ms)
    }
}

/// What the theme check expects to find on the root element
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeExpectations {
    /// Class that signals dark mode; expected to be absent
    #[serde(default = "default_dark_class")]
    pub dark_class: String,

    /// Custom property read from the root element
    #[serde(default = "default_theme_variable")]
    pub variable: String,
}

impl Default for ThemeExpectations {
    fn default() -> Self {
        Self {
            dark_class: default_dark_class(),
            variable: default_theme_variable(),
        }
    }
}

/// Immutable configuration for one audit run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Root URL of the Storybook instance
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Pages to visit, in order
    #[serde(default = "default_targets")]
    pub targets: Vec<AuditTarget>,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Directory screenshots are written to
    #[serde(default = "default_screenshot_dir")]
    pub screenshot_dir: PathBuf,

    /// Run the browser without a visible window
    #[serde(default = "default_headless")]
    pub headless: bool,

    #[serde(default)]
    pub viewport: Viewport,

    #[serde(default)]
    pub timings: AuditTimings,

    /// Text typed into the search box during the interaction check
    #[serde(default = "default_search_query")]
    pub search_query: String,

    #[serde(default)]
    pub theme: ThemeExpectations,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            targets: default_targets(),
            webdriver_url: default_webdriver_url(),
            screenshot_dir: default_screenshot_dir(),
            headless: default_headless(),
            viewport: Viewport::default(),
            timings: AuditTimings::default(),
            search_query: default_search_query(),
            theme: ThemeExpectations::default(),
        }
    }
}

impl AuditConfig {
    /// Create a configuration with default values for the given base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the base URL parses and there is something to audit
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.base_url).map_err(|e| {
            AuditError::Config(format!("invalid base_url '{}': {}", self.base_url, e))
        })?;

        if self.targets.is_empty() {
            return Err(AuditError::Config("no targets configured".to_string()));
        }

        if self.timings.navigation_timeout_secs == 0 {
            return Err(AuditError::Config(
                "navigation_timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Where the screenshot for a target is written. The current directory
    /// yields the bare filename.
    pub fn screenshot_path(&self, target: &AuditTarget) -> PathBuf {
        let filename = crate::utils::screenshot_filename(&target.name);
        if self.screenshot_dir.as_os_str().is_empty() || self.screenshot_dir == Path::new(".") {
            PathBuf::from(filename)
        } else {
            self.screenshot_dir.join(filename)
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:6006".to_string()
}

/// The Educacross documentation pages
fn default_targets() -> Vec<AuditTarget> {
    vec![
        AuditTarget::new("Introdução", "/?path=/docs/getting-started-introdução--docs"),
        AuditTarget::new("Guia Rápido", "/?path=/docs/getting-started-guia-rápido--docs"),
        AuditTarget::new("Para IAs", "/?path=/docs/getting-started-para-ias--docs"),
        AuditTarget::new(
            "API Reference",
            "/?path=/docs/getting-started-api-reference--docs",
        ),
        AuditTarget::new("Button", "/?path=/docs/components-button--docs"),
        AuditTarget::new("Input", "/?path=/docs/components-input--docs"),
        AuditTarget::new("Card", "/?path=/docs/components-card--docs"),
    ]
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_screenshot_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_headless() -> bool {
    true
}

fn default_search_query() -> String {
    "button".to_string()
}

fn default_navigation_timeout_secs() -> u64 {
    15
}

fn default_network_idle_ms() -> u64 {
    500
}

fn default_settle_ms() -> u64 {
    2000
}

fn default_between_targets_ms() -> u64 {
    1000
}

fn default_search_settle_ms() -> u64 {
    1000
}

fn default_focus_settle_ms() -> u64 {
    500
}

fn default_dark_class() -> String {
    "dark".to_string()
}

fn default_theme_variable() -> String {
    "--educacross-primary".to_string()
}
