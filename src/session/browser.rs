//! Browser session implementation
//!
//! Owns one live browser and guarantees it is shut down exactly once.

use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::driver::DriverService;
use crate::session::options::{BrowserFamily, SessionConfig};
use crate::stealth;
use crate::webdriver::AutomationEngine;
use crate::{Error, Result};

/// One live browser, exclusively owned by a scenario
#[derive(Debug)]
pub struct Session {
    id: String,
    family: BrowserFamily,
    engine: Arc<dyn AutomationEngine>,
    service: tokio::sync::Mutex<Option<DriverService>>,
    screenshot_dir: PathBuf,
    closed: AtomicBool,
}

impl Session {
    /// Wrap an engine that is already connected
    pub fn new(engine: Arc<dyn AutomationEngine>, family: BrowserFamily) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            family,
            engine,
            service: tokio::sync::Mutex::new(None),
            screenshot_dir: PathBuf::from("screenshots"),
            closed: AtomicBool::new(false),
        }
    }

    /// Wrap a freshly created engine session and apply launch configuration
    ///
    /// Timeouts, window geometry and hardening are best-effort: a failure is
    /// logged and the session is still returned.
    pub async fn start(
        engine: Arc<dyn AutomationEngine>,
        family: BrowserFamily,
        config: &SessionConfig,
    ) -> Self {
        let session = Self::new(engine, family).with_screenshot_dir(&config.screenshot_dir);
        let engine = session.engine();

        if let Err(e) = engine.set_implicit_wait(config.implicit_wait).await {
            warn!("Failed to set implicit wait: {}", e);
        }

        let window = if config.headless {
            engine
                .set_window_size(config.window_width, config.window_height)
                .await
        } else {
            engine.maximize_window().await
        };
        if let Err(e) = window {
            warn!("Failed to size browser window: {}", e);
        }

        let applied = stealth::apply(engine, family, config).await;
        debug!("Hardening applied: {:?}", applied);

        info!("{} session {} ready", family, session.id);
        session
    }

    /// Attach the driver process this session runs on
    pub fn with_service(self, service: DriverService) -> Self {
        // Nothing else holds the lock before the session is handed out.
        if let Ok(mut slot) = self.service.try_lock() {
            *slot = Some(service);
        }
        self
    }

    /// Set the screenshot directory
    pub fn with_screenshot_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.screenshot_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Get session ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Browser family
    pub fn family(&self) -> BrowserFamily {
        self.family
    }

    /// Underlying engine
    pub fn engine(&self) -> &dyn AutomationEngine {
        self.engine.as_ref()
    }

    /// Whether `close` has run
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Navigate to URL
    pub async fn navigate(&self, url: &str) -> Result<()> {
        self.ensure_open()?;
        self.engine.navigate(url).await
    }

    /// Current URL
    pub async fn current_url(&self) -> Result<String> {
        self.ensure_open()?;
        self.engine.current_url().await
    }

    /// Page source
    pub async fn page_source(&self) -> Result<String> {
        self.ensure_open()?;
        self.engine.page_source().await
    }

    /// Document title
    pub async fn title(&self) -> Result<String> {
        self.ensure_open()?;
        self.engine.title().await
    }

    /// Go back in history
    pub async fn back(&self) -> Result<()> {
        self.ensure_open()?;
        self.engine.back().await
    }

    /// Go forward in history
    pub async fn forward(&self) -> Result<()> {
        self.ensure_open()?;
        self.engine.forward().await
    }

    /// Write a screenshot to `{screenshot_dir}/{label}_{timestamp}.png`
    pub async fn save_screenshot(&self, label: &str) -> Result<PathBuf> {
        self.ensure_open()?;
        let png = self.engine.screenshot().await?;

        tokio::fs::create_dir_all(&self.screenshot_dir).await?;
        let path = self
            .screenshot_dir
            .join(format!("{}_{}.png", label, crate::timestamp()));
        tokio::fs::write(&path, png).await?;

        info!("Screenshot saved: {}", path.display());
        Ok(path)
    }

    /// Quit the browser and stop its driver
    ///
    /// Only the first call reaches the engine; later calls return `Ok(())`.
    pub async fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::SeqCst) {
            debug!("Session {} already closed", self.id);
            return Ok(());
        }

        let quit = self.engine.quit().await;

        if let Some(mut service) = self.service.lock().await.take() {
            service.stop().await;
        }

        match quit {
            Ok(()) => {
                info!("Browser closed");
                Ok(())
            }
            Err(e) => {
                warn!("Browser quit reported an error: {}", e);
                Err(e)
            }
        }
    }

    /// Run `f` with this session and close it on every exit path
    ///
    /// The session is closed after `f` returns `Ok`, after it returns `Err`,
    /// and after it panics; a panic is resumed once the browser is gone.
    pub async fn scoped<T, F, Fut>(self, f: F) -> Result<T>
    where
        F: FnOnce(Arc<Session>) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let session = Arc::new(self);
        let handle = Arc::clone(&session);

        let outcome = AssertUnwindSafe(async move { f(handle).await })
            .catch_unwind()
            .await;

        if let Err(e) = session.close().await {
            warn!("Session teardown failed: {}", e);
        }

        match outcome {
            Ok(result) => result,
            Err(panic) => {
                error!("Scenario panicked; session {} closed before unwinding", session.id);
                std::panic::resume_unwind(panic)
            }
        }
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            return Err(Error::session_closed(&self.id));
        }
        Ok(())
    }
}
