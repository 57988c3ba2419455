use crate::browser::{Browser, scripts};
use crate::config::{AuditConfig, Viewport};
use crate::error::{AuditError, Result};
use fantoccini::actions::{InputSource, KeyAction, KeyActions};
use fantoccini::key::Key;
use fantoccini::wd::TimeoutConfiguration;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::{Map, Value, json};
use std::time::Duration;

/// Tallest screenshot we resize the window to
const MAX_SCREENSHOT_HEIGHT: u64 = 16_384;

/// Common local WebDriver endpoints tried when the configured one fails
const FALLBACK_WEBDRIVER_URLS: [&str; 4] = [
    "http://localhost:9515", // ChromeDriver default
    "http://localhost:4444", // geckodriver / Selenium default
    "http://127.0.0.1:4444", // Try with IP instead of localhost
    "http://127.0.0.1:9515",
];

/// A single WebDriver session used for the whole run
pub struct WebDriverBrowser {
    client: Client,
    viewport: Viewport,
}

impl WebDriverBrowser {
    /// Open a session against the configured WebDriver, falling back to
    /// common local endpoints, and size the window to the viewport
    pub async fn connect(config: &AuditConfig) -> Result<Self> {
        let caps = capabilities(config);

        let client = match connect_to_webdriver(&config.webdriver_url, &caps).await {
            Some(client) => client,
            None => {
                ::log::error!(
                    "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
                );
                let mut tried = vec![config.webdriver_url.clone()];
                tried.extend(FALLBACK_WEBDRIVER_URLS.iter().map(|u| u.to_string()));
                return Err(AuditError::NoWebDriver(tried.join(", ")));
            }
        };

        client
            .set_window_size(config.viewport.width, config.viewport.height)
            .await?;

        Ok(Self {
            client,
            viewport: config.viewport,
        })
    }
}

/// Browser capabilities for a Chrome or Firefox driver
fn capabilities(config: &AuditConfig) -> Map<String, Value> {
    let window_size = format!(
        "--window-size={},{}",
        config.viewport.width, config.viewport.height
    );
    let mut chrome_args = vec![window_size];
    let mut firefox_args = Vec::new();
    if config.headless {
        chrome_args.push("--headless=new".to_string());
        firefox_args.push("-headless".to_string());
    }

    let mut caps = Map::new();
    caps.insert("goog:chromeOptions".to_string(), json!({ "args": chrome_args }));
    caps.insert("moz:firefoxOptions".to_string(), json!({ "args": firefox_args }));
    caps
}

/// Connects to the WebDriver instance
async fn connect_to_webdriver(webdriver_url: &str, caps: &Map<String, Value>) -> Option<Client> {
    match ClientBuilder::native()
        .capabilities(caps.clone())
        .connect(webdriver_url)
        .await
    {
        Ok(client) => {
            ::log::debug!("Connected to WebDriver at {}", webdriver_url);
            return Some(client);
        }
        Err(e) => {
            ::log::error!("Failed to connect to WebDriver at {}: {}", webdriver_url, e);
        }
    }

    for url in FALLBACK_WEBDRIVER_URLS.iter() {
        if *url == webdriver_url {
            continue;
        }

        ::log::info!("Trying fallback WebDriver URL: {}", url);
        match ClientBuilder::native()
            .capabilities(caps.clone())
            .connect(url)
            .await
        {
            Ok(client) => {
                ::log::debug!("Connected to fallback WebDriver at {}", url);
                return Some(client);
            }
            Err(_) => {
                // Don't log error for fallbacks to avoid log spam
            }
        }
    }

    ::log::error!("Failed to connect to any WebDriver servers");
    None
}

impl Browser for WebDriverBrowser {
    async fn set_command_timeouts(&mut self, limit: Duration) -> Result<()> {
        ::log::debug!("Setting page load and script timeouts to {:?}", limit);
        self.client
            .update_timeouts(TimeoutConfiguration::new(Some(limit), Some(limit), None))
            .await?;
        Ok(())
    }

    async fn goto(&mut self, url: &str) -> Result<()> {
        ::log::debug!("GOTO: {}", url);
        self.client.goto(url).await?;
        Ok(())
    }

    async fn title(&mut self) -> Result<String> {
        Ok(self.client.title().await?)
    }

    async fn source(&mut self) -> Result<String> {
        Ok(self.client.source().await?)
    }

    /// WebDriver only captures the viewport, so the window is stretched to
    /// the document height for the capture and restored afterwards.
    async fn screenshot_full_page(&mut self) -> Result<Vec<u8>> {
        let width = self.viewport.width;
        let height = u64::from(self.viewport.height);

        let document_height = self
            .client
            .execute(scripts::DOCUMENT_HEIGHT, vec![])
            .await?
            .as_u64()
            .unwrap_or(height)
            .min(MAX_SCREENSHOT_HEIGHT)
            .max(height);

        if document_height > height {
            ::log::debug!("Resizing window to {}x{} for screenshot", width, document_height);
            self.client
                .set_window_size(width, document_height as u32)
                .await?;
        }

        let png = self.client.screenshot().await;

        if document_height > height {
            self.client.set_window_size(width, height as u32).await?;
        }

        Ok(png?)
    }

    async fn execute(&mut self, script: &str, args: Vec<Value>) -> Result<Value> {
        Ok(self.client.execute(script, args).await?)
    }

    async fn type_into(&mut self, selector: &str, text: &str) -> Result<bool> {
        match self.client.find(Locator::Css(selector)).await {
            Ok(element) => {
                element.clear().await?;
                element.send_keys(text).await?;
                Ok(true)
            }
            Err(e) if e.is_no_such_element() => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn press_tab(&mut self) -> Result<()> {
        let tab = KeyActions::new("keyboard".to_string())
            .then(KeyAction::Down {
                value: Key::Tab.into(),
            })
            .then(KeyAction::Up {
                value: Key::Tab.into(),
            });
        self.client.perform_actions(tab).await?;
        Ok(())
    }

    async fn close(self) -> Result<()> {
        self.client.close().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_capabilities() {
        let config = AuditConfig::default();
        let caps = capabilities(&config);

        let chrome_args = caps["goog:chromeOptions"]["args"].as_array().unwrap();
        assert!(chrome_args.contains(&json!("--headless=new")));
        assert!(chrome_args.contains(&json!("--window-size=1280,800")));
        assert_eq!(caps["moz:firefoxOptions"]["args"], json!(["-headless"]));
    }

    #[test]
    fn test_headed_capabilities() {
        let mut config = AuditConfig::default();
        config.headless = false;
        let caps = capabilities(&config);

        let chrome_args = caps["goog:chromeOptions"]["args"].as_array().unwrap();
        assert!(!chrome_args.contains(&json!("--headless=new")));
        assert_eq!(caps["moz:firefoxOptions"]["args"], json!([]));
    }
}
