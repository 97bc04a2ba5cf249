//! Configuration management for Discover-QA

use crate::{Error, Result};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default site under test
pub const DEFAULT_BASE_URL: &str = "https://tmdb-discover.surge.sh/";

/// Pinned Chrome-for-Testing driver version
pub const DEFAULT_DRIVER_VERSION: &str = "142.0.7444.175";

/// Chrome-for-Testing download root
pub const DEFAULT_DOWNLOAD_BASE: &str = "https://storage.googleapis.com/chrome-for-testing-public";

/// User agent reported to the site when hardening is on
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/142.0.0.0 Safari/537.36";

/// Harness configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site root every scenario starts from
    pub base_url: String,

    /// Render off-screen
    pub headless: bool,

    /// Browser window width
    pub window_width: u32,

    /// Browser window height
    pub window_height: u32,

    /// Engine-level element lookup timeout in seconds
    pub implicit_wait_secs: u64,

    /// Explicit wait applied by the element access layer in seconds
    pub explicit_wait_secs: u64,

    /// Poll interval for explicit waits in milliseconds
    pub poll_interval_ms: u64,

    /// Pause after a page action before scenarios read the result, in milliseconds
    pub settle_delay_ms: u64,

    /// Screenshot output directory
    pub screenshot_dir: PathBuf,

    /// JSON report output directory
    pub report_dir: PathBuf,

    /// Log file directory
    pub log_dir: PathBuf,

    /// Driver resolution settings
    pub driver: DriverConfig,

    /// Anti-automation-detection settings
    pub hardening: HardeningConfig,
}

/// Driver resolution settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Pinned driver version for downloads
    pub version: String,

    /// Download root (`{base}/{version}/{platform}/{archive}`)
    pub download_base: String,

    /// Where downloaded drivers are extracted
    pub cache_dir: PathBuf,

    /// Extra executable locations searched after the built-in list
    pub extra_paths: Vec<PathBuf>,

    /// WebDriver endpoint used as the last resort
    pub remote_url: String,

    /// How long a launched driver gets to report ready, in seconds
    pub startup_timeout_secs: u64,
}

/// Anti-automation-detection settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HardeningConfig {
    /// Reported user agent, `None` keeps the browser's own
    pub user_agent: Option<String>,

    /// Suppress the automation flag exposed to page scripts
    pub hide_automation: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            headless: false,
            window_width: 1920,
            window_height: 1080,
            implicit_wait_secs: 10,
            explicit_wait_secs: 15,
            poll_interval_ms: 500,
            settle_delay_ms: 2000,
            screenshot_dir: PathBuf::from("screenshots"),
            report_dir: PathBuf::from("reports"),
            log_dir: PathBuf::from("logs"),
            driver: DriverConfig::default(),
            hardening: HardeningConfig::default(),
        }
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            version: DEFAULT_DRIVER_VERSION.to_string(),
            download_base: DEFAULT_DOWNLOAD_BASE.to_string(),
            cache_dir: env::temp_dir().join("discover-qa-drivers"),
            extra_paths: Vec::new(),
            remote_url: "http://localhost:4444".to_string(),
            startup_timeout_secs: 20,
        }
    }
}

impl Default for HardeningConfig {
    fn default() -> Self {
        Self {
            user_agent: Some(DEFAULT_USER_AGENT.to_string()),
            hide_automation: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::configuration(format!("Failed to read config file: {}", e)))?;

        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text; missing keys keep their defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::configuration(format!("Failed to parse config: {}", e)))
    }

    /// Overlay `DISCOVER_QA_*` environment variables
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(url) = env::var("DISCOVER_QA_BASE_URL") {
            self.base_url = url;
        }

        if let Ok(headless) = env::var("DISCOVER_QA_HEADLESS") {
            self.headless = parse_var("DISCOVER_QA_HEADLESS", &headless)?;
        }

        if let Ok(wait) = env::var("DISCOVER_QA_IMPLICIT_WAIT") {
            self.implicit_wait_secs = parse_var("DISCOVER_QA_IMPLICIT_WAIT", &wait)?;
        }

        if let Ok(wait) = env::var("DISCOVER_QA_EXPLICIT_WAIT") {
            self.explicit_wait_secs = parse_var("DISCOVER_QA_EXPLICIT_WAIT", &wait)?;
        }

        if let Ok(dir) = env::var("DISCOVER_QA_SCREENSHOT_DIR") {
            self.screenshot_dir = PathBuf::from(dir);
        }

        if let Ok(dir) = env::var("DISCOVER_QA_REPORT_DIR") {
            self.report_dir = PathBuf::from(dir);
        }

        if let Ok(dir) = env::var("DISCOVER_QA_LOG_DIR") {
            self.log_dir = PathBuf::from(dir);
        }

        if let Ok(version) = env::var("DISCOVER_QA_DRIVER_VERSION") {
            self.driver.version = version;
        }

        if let Ok(url) = env::var("DISCOVER_QA_REMOTE_URL") {
            self.driver.remote_url = url;
        }

        Ok(())
    }

    /// Explicit wait used by page abstractions
    pub fn explicit_wait(&self) -> Duration {
        Duration::from_secs(self.explicit_wait_secs)
    }

    /// Poll interval used by page abstractions
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Engine-level implicit wait
    pub fn implicit_wait(&self) -> Duration {
        Duration::from_secs(self.implicit_wait_secs)
    }

    /// Pause scenarios take after a page action
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::configuration(format!("Invalid {}", name)))
}
