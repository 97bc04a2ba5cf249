//! Session options
//!
//! Browser families and the launch-time configuration a session is created with.

use std::path::PathBuf;
use std::time::Duration;

use crate::config::Config;

/// Browser family a driver belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserFamily {
    Chrome,
    Firefox,
    Safari,
}

impl BrowserFamily {
    /// Driver executable name
    pub fn driver_binary(&self) -> &'static str {
        match self {
            BrowserFamily::Chrome => "chromedriver",
            BrowserFamily::Firefox => "geckodriver",
            BrowserFamily::Safari => "safaridriver",
        }
    }

    /// W3C `browserName`
    pub fn browser_name(&self) -> &'static str {
        match self {
            BrowserFamily::Chrome => "chrome",
            BrowserFamily::Firefox => "firefox",
            BrowserFamily::Safari => "safari",
        }
    }

    /// Command-line arguments that bind the driver to `port`
    pub fn port_args(&self, port: u16) -> Vec<String> {
        match self {
            BrowserFamily::Chrome | BrowserFamily::Firefox => vec![format!("--port={}", port)],
            BrowserFamily::Safari => vec!["-p".to_string(), port.to_string()],
        }
    }
}

impl std::fmt::Display for BrowserFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.browser_name())
    }
}

/// Options applied when a session is launched
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Headless mode (no GUI)
    pub headless: bool,
    /// Window width
    pub window_width: u32,
    /// Window height
    pub window_height: u32,
    /// Engine-wide element lookup timeout
    pub implicit_wait: Duration,
    /// User agent override
    pub user_agent: Option<String>,
    /// Hide the automation flag from page scripts
    pub hide_automation: bool,
    /// How long a launched driver gets to become ready
    pub startup_timeout: Duration,
    /// Where screenshots are written
    pub screenshot_dir: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for SessionConfig {
    fn from(config: &Config) -> Self {
        Self {
            headless: config.headless,
            window_width: config.window_width,
            window_height: config.window_height,
            implicit_wait: config.implicit_wait(),
            user_agent: config.hardening.user_agent.clone(),
            hide_automation: config.hardening.hide_automation,
            startup_timeout: Duration::from_secs(config.driver.startup_timeout_secs),
            screenshot_dir: config.screenshot_dir.clone(),
        }
    }
}
