use clap::Parser;
use std::path::PathBuf;
use storybook_audit::AuditConfig;

#[derive(Parser, Debug)]
#[command(name = "storybook-audit")]
#[command(about = "Smoke-tests Storybook pages, accessibility signals and interactions")]
#[command(version)]
pub struct Args {
    /// JSON run configuration (targets, timings, theme expectations)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Storybook base URL
    #[arg(short, long)]
    pub base_url: Option<String>,

    /// WebDriver server URL (also read from WEBDRIVER_URL)
    #[arg(short, long)]
    pub webdriver_url: Option<String>,

    /// Directory for screenshots
    #[arg(short, long)]
    pub screenshot_dir: Option<PathBuf>,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,

    /// Also write results and summary as JSON to this file
    #[arg(short, long)]
    pub report: Option<PathBuf>,
}

impl Args {
    /// Build the run configuration: file (or defaults), then environment,
    /// then command-line overrides
    pub fn into_config(self) -> storybook_audit::Result<AuditConfig> {
        let mut config = match &self.config {
            Some(path) => AuditConfig::from_file(path)?,
            None => AuditConfig::default(),
        };

        // Override the WebDriver URL with an environment variable if provided
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                config.webdriver_url = webdriver_url;
            }
        }

        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if let Some(webdriver_url) = self.webdriver_url {
            config.webdriver_url = webdriver_url;
        }
        if let Some(dir) = self.screenshot_dir {
            config.screenshot_dir = dir;
        }
        if self.headed {
            config.headless = false;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_uses_defaults() {
        let args = Args::parse_from(["storybook-audit"]);
        assert!(args.config.is_none());
        assert!(!args.headed);

        let config = args.into_config().unwrap();
        assert_eq!(config.base_url, "http://localhost:6006");
        assert_eq!(config.targets.len(), 7);
        assert!(config.headless);
    }

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from([
            "storybook-audit",
            "--base-url",
            "http://storybook.internal:9009",
            "--screenshot-dir",
            "shots",
            "--headed",
        ]);
        let config = args.into_config().unwrap();

        assert_eq!(config.base_url, "http://storybook.internal:9009");
        assert_eq!(config.screenshot_dir, PathBuf::from("shots"));
        assert!(!config.headless);
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let args = Args::parse_from(["storybook-audit", "--base-url", "nope"]);
        assert!(args.into_config().is_err());
    }
}
