//! Local driver process management
//!
//! Spawns a driver executable on a free loopback port and waits until its
//! `/status` endpoint reports ready.

use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::{Child, Command};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::session::BrowserFamily;
use crate::webdriver::WebDriverClient;
use crate::{Error, Result};

/// Interval between readiness checks
const STATUS_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// A running driver executable
#[derive(Debug)]
pub struct DriverService {
    binary: PathBuf,
    family: BrowserFamily,
    port: u16,
    child: Option<Child>,
}

impl DriverService {
    /// Spawn `binary` and wait up to `startup_timeout` for it to accept sessions
    pub async fn start(binary: &Path, family: BrowserFamily, startup_timeout: Duration) -> Result<Self> {
        let port = free_port()?;

        debug!("Spawning {} on port {}", binary.display(), port);
        let child = Command::new(binary)
            .args(family.port_args(port))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Error::driver_not_found(format!("{}: {}", binary.display(), e)))?;

        let mut service = Self {
            binary: binary.to_path_buf(),
            family,
            port,
            child: Some(child),
        };

        service.wait_ready(startup_timeout).await?;
        info!("{} ready at {}", family.driver_binary(), service.endpoint());
        Ok(service)
    }

    /// HTTP endpoint of the driver
    pub fn endpoint(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Driver executable path
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Browser family served
    pub fn family(&self) -> BrowserFamily {
        self.family
    }

    async fn wait_ready(&mut self, startup_timeout: Duration) -> Result<()> {
        let endpoint = self.endpoint();
        let deadline = Instant::now() + startup_timeout;

        loop {
            if let Some(child) = self.child.as_mut() {
                if let Some(status) = child.try_wait()? {
                    return Err(Error::driver_not_found(format!(
                        "{} exited during startup ({})",
                        self.binary.display(),
                        status
                    )));
                }
            }

            match WebDriverClient::status(&endpoint).await {
                Ok(status) if status.ready => return Ok(()),
                Ok(status) => debug!("Driver not ready yet: {}", status.message),
                Err(e) => debug!("Driver status check failed: {}", e),
            }

            if Instant::now() >= deadline {
                self.stop().await;
                return Err(Error::timeout(format!(
                    "{} not ready after {:?}",
                    self.binary.display(),
                    startup_timeout
                )));
            }

            tokio::time::sleep(STATUS_POLL_INTERVAL).await;
        }
    }

    /// Terminate the driver process
    pub async fn stop(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.kill().await {
                warn!("Failed to stop {}: {}", self.binary.display(), e);
            } else {
                debug!("Stopped {}", self.binary.display());
            }
        }
    }
}

/// Ask the OS for an unused loopback port
fn free_port() -> Result<u16> {
    let listener = TcpListener::bind(("127.0.0.1", 0))?;
    Ok(listener.local_addr()?.port())
}
