pub mod scripts;
pub mod webdriver;

pub use webdriver::WebDriverBrowser;

use crate::error::Result;
use serde_json::Value;
use std::time::Duration;

/// The browser operations the auditor relies on.
///
/// Every call is awaited before the next is issued; implementations never
/// see concurrent use.
#[allow(async_fn_in_trait)]
pub trait Browser {
    /// Have the driver abort page loads and scripts that run past `limit`.
    /// The session stays usable after such an abort.
    async fn set_command_timeouts(&mut self, limit: Duration) -> Result<()>;

    /// Navigate the current window to `url` and wait for the load event
    async fn goto(&mut self, url: &str) -> Result<()>;

    /// Title of the current document
    async fn title(&mut self) -> Result<String>;

    /// Serialised HTML of the current DOM
    async fn source(&mut self) -> Result<String>;

    /// PNG of the whole scrollable page
    async fn screenshot_full_page(&mut self) -> Result<Vec<u8>>;

    /// Run a script in the page and return its value
    async fn execute(&mut self, script: &str, args: Vec<Value>) -> Result<Value>;

    /// Type into the first element matching `selector`.
    /// Returns `false` when nothing matches.
    async fn type_into(&mut self, selector: &str, text: &str) -> Result<bool>;

    /// Send one Tab key press to the page
    async fn press_tab(&mut self) -> Result<()>;

    /// End the session
    async fn close(self) -> Result<()>
    where
        Self: Sized;
}
