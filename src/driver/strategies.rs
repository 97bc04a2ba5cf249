//! Built-in driver acquisition strategies

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use super::capabilities;
use super::download::{is_executable, DriverDownload};
use super::service::DriverService;
use super::traits::AcquireStrategy;
use crate::config::{DriverConfig, DEFAULT_DRIVER_VERSION};
use crate::session::{BrowserFamily, Session, SessionConfig};
use crate::webdriver::WebDriverClient;
use crate::{Error, Result};

/// Spawn a local driver binary and open a configured session on it
pub async fn launch_local(binary: &Path, family: BrowserFamily, config: &SessionConfig) -> Result<Session> {
    let mut service = DriverService::start(binary, family, config.startup_timeout).await?;

    let caps = capabilities::for_family(family, config);
    let client = match WebDriverClient::new_session(service.endpoint(), caps).await {
        Ok(client) => client,
        Err(e) => {
            service.stop().await;
            return Err(e);
        }
    };

    let session = Session::start(Arc::new(client), family, config).await;
    Ok(session.with_service(service))
}

/// `chromedriver` resolved from `PATH`
#[derive(Debug, Default)]
pub struct SystemPathDriver;

#[async_trait]
impl AcquireStrategy for SystemPathDriver {
    fn name(&self) -> &str {
        "system-path"
    }

    async fn try_acquire(&self, config: &SessionConfig) -> Result<Session> {
        let family = BrowserFamily::Chrome;
        let binary = which::which(family.driver_binary())
            .map_err(|e| Error::driver_not_found(format!("{} not on PATH: {}", family.driver_binary(), e)))?;

        debug!("Found {} on PATH", binary.display());
        launch_local(&binary, family, config).await
    }
}

/// `chromedriver` at a fixed list of install locations
#[derive(Debug)]
pub struct WellKnownLocations {
    candidates: Vec<PathBuf>,
}

impl WellKnownLocations {
    /// Built-in locations followed by `extra`
    pub fn new(extra: &[PathBuf]) -> Self {
        let mut candidates = vec![
            PathBuf::from("/usr/local/bin/chromedriver"),
            PathBuf::from("/opt/homebrew/bin/chromedriver"),
        ];
        if let Some(home) = dirs::home_dir() {
            candidates.push(home.join("chromedriver"));
            candidates.push(webdriver_manager_cache(&home));
        }
        candidates.extend(extra.iter().cloned());

        Self { candidates }
    }

    /// Candidate locations, in order
    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// First candidate that is an executable file
    pub fn resolve(&self) -> Option<&Path> {
        self.candidates
            .iter()
            .map(PathBuf::as_path)
            .find(|path| is_executable(path))
    }
}

/// Where webdriver-manager leaves the pinned macOS arm64 build
fn webdriver_manager_cache(home: &Path) -> PathBuf {
    home.join(".wdm/drivers/chromedriver/mac64")
        .join(DEFAULT_DRIVER_VERSION)
        .join("chromedriver-mac-arm64/chromedriver")
}

#[async_trait]
impl AcquireStrategy for WellKnownLocations {
    fn name(&self) -> &str {
        "well-known-locations"
    }

    async fn try_acquire(&self, config: &SessionConfig) -> Result<Session> {
        let binary = self.resolve().ok_or_else(|| {
            Error::driver_not_found(format!(
                "none of {} locations holds an executable chromedriver",
                self.candidates.len()
            ))
        })?;

        debug!("Found chromedriver at {}", binary.display());
        launch_local(binary, BrowserFamily::Chrome, config).await
    }
}

/// Pinned Chrome-for-Testing driver fetched into a local cache
#[derive(Debug)]
pub struct DownloadedDriver {
    config: DriverConfig,
}

impl DownloadedDriver {
    pub fn new(config: DriverConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl AcquireStrategy for DownloadedDriver {
    fn name(&self) -> &str {
        "downloaded-driver"
    }

    async fn try_acquire(&self, config: &SessionConfig) -> Result<Session> {
        let download = DriverDownload::for_host(&self.config)?;
        let binary = download.ensure().await?;
        launch_local(&binary, BrowserFamily::Chrome, config).await
    }
}

/// Non-Chrome browsers: Safari on macOS, then Firefox
#[derive(Debug)]
pub struct AlternateBrowser {
    families: Vec<BrowserFamily>,
}

impl AlternateBrowser {
    /// Families available on the host, in preference order
    pub fn for_host() -> Self {
        let mut families = Vec::new();
        if cfg!(target_os = "macos") {
            families.push(BrowserFamily::Safari);
        }
        families.push(BrowserFamily::Firefox);
        Self { families }
    }

    /// Families tried, in order
    pub fn families(&self) -> &[BrowserFamily] {
        &self.families
    }
}

#[async_trait]
impl AcquireStrategy for AlternateBrowser {
    fn name(&self) -> &str {
        "alternate-browser"
    }

    async fn try_acquire(&self, config: &SessionConfig) -> Result<Session> {
        let mut reasons = Vec::new();

        for family in &self.families {
            let attempt = match which::which(family.driver_binary()) {
                Ok(binary) => launch_local(&binary, *family, config).await,
                Err(e) => Err(Error::driver_not_found(format!(
                    "{} not on PATH: {}",
                    family.driver_binary(),
                    e
                ))),
            };

            match attempt {
                Ok(session) => {
                    info!("Falling back to {}", family);
                    return Ok(session);
                }
                Err(e) => reasons.push(format!("{}: {}", family, e)),
            }
        }

        Err(Error::driver_not_found(reasons.join("; ")))
    }
}

/// Chrome session requested from an already running WebDriver endpoint
#[derive(Debug)]
pub struct RemoteEndpoint {
    url: String,
}

impl RemoteEndpoint {
    pub fn new<S: Into<String>>(url: S) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl AcquireStrategy for RemoteEndpoint {
    fn name(&self) -> &str {
        "remote-endpoint"
    }

    async fn try_acquire(&self, config: &SessionConfig) -> Result<Session> {
        let family = BrowserFamily::Chrome;
        let caps = capabilities::for_family(family, config);
        let client = WebDriverClient::new_session(self.url.as_str(), caps).await?;
        Ok(Session::start(Arc::new(client), family, config).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_known_locations_order() {
        let extra = PathBuf::from("/srv/drivers/chromedriver");
        let locations = WellKnownLocations::new(std::slice::from_ref(&extra));
        let candidates = locations.candidates();

        assert_eq!(candidates[0], PathBuf::from("/usr/local/bin/chromedriver"));
        assert_eq!(candidates[1], PathBuf::from("/opt/homebrew/bin/chromedriver"));
        assert_eq!(candidates.last(), Some(&extra));
    }

    #[test]
    fn test_webdriver_manager_cache_location() {
        let home = PathBuf::from("/home/qa");
        assert_eq!(
            webdriver_manager_cache(&home),
            PathBuf::from(
                "/home/qa/.wdm/drivers/chromedriver/mac64/142.0.7444.175/chromedriver-mac-arm64/chromedriver"
            )
        );

        let locations = WellKnownLocations::new(&[]);
        if let Some(home) = dirs::home_dir() {
            assert_eq!(locations.candidates().len(), 4);
            assert_eq!(locations.candidates()[3], webdriver_manager_cache(&home));
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_skips_non_executables() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("plain");
        let runnable = dir.path().join("runnable");
        std::fs::write(&plain, b"").unwrap();
        std::fs::write(&runnable, b"").unwrap();
        super::super::download::make_executable(&runnable).unwrap();

        let locations = WellKnownLocations {
            candidates: vec![dir.path().join("missing"), plain, runnable.clone()],
        };

        assert_eq!(locations.resolve(), Some(runnable.as_path()));
    }

    #[test]
    fn test_alternate_browser_ends_with_firefox() {
        let alternate = AlternateBrowser::for_host();
        assert_eq!(alternate.families().last(), Some(&BrowserFamily::Firefox));
    }

    #[tokio::test]
    async fn test_remote_endpoint_unreachable() {
        let strategy = RemoteEndpoint::new("http://127.0.0.1:1");
        let result = strategy.try_acquire(&SessionConfig::default()).await;
        assert!(matches!(result, Err(Error::Http(_))));
    }
}
