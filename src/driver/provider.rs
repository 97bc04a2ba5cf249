//! Session provider: ordered fallback across acquisition strategies

use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::strategies::{
    AlternateBrowser, DownloadedDriver, RemoteEndpoint, SystemPathDriver, WellKnownLocations,
};
use super::traits::AcquireStrategy;
use crate::config::Config;
use crate::error::AcquisitionFailure;
use crate::session::{Session, SessionConfig};
use crate::{Error, Result};

/// Produces configured sessions by trying each strategy in order
pub struct SessionProvider {
    config: SessionConfig,
    strategies: Vec<Box<dyn AcquireStrategy>>,
}

impl std::fmt::Debug for SessionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionProvider")
            .field("config", &self.config)
            .field("strategies", &self.strategy_names())
            .finish()
    }
}

impl SessionProvider {
    /// Create a provider with an explicit strategy list
    pub fn new(config: SessionConfig, strategies: Vec<Box<dyn AcquireStrategy>>) -> Self {
        Self { config, strategies }
    }

    /// Create a provider with the default fallback chain
    ///
    /// PATH, well-known locations, pinned download, alternate browsers, and
    /// finally a remote endpoint.
    pub fn from_config(config: &Config) -> Self {
        let strategies: Vec<Box<dyn AcquireStrategy>> = vec![
            Box::new(SystemPathDriver),
            Box::new(WellKnownLocations::new(&config.driver.extra_paths)),
            Box::new(DownloadedDriver::new(config.driver.clone())),
            Box::new(AlternateBrowser::for_host()),
            Box::new(RemoteEndpoint::new(config.driver.remote_url.clone())),
        ];

        Self::new(SessionConfig::from(config), strategies)
    }

    /// Launch configuration handed to every strategy
    pub fn session_config(&self) -> &SessionConfig {
        &self.config
    }

    /// Strategy names, in the order they are tried
    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Acquire a session from the first strategy that succeeds
    pub async fn acquire_session(&self) -> Result<Session> {
        let mut attempts = Vec::with_capacity(self.strategies.len());

        for strategy in &self.strategies {
            debug!("Trying driver strategy: {}", strategy.name());

            match strategy.try_acquire(&self.config).await {
                Ok(session) => {
                    info!(
                        "Session {} acquired via {}",
                        session.id(),
                        strategy.name()
                    );
                    return Ok(session);
                }
                Err(e) => {
                    warn!("Driver strategy {} failed: {}", strategy.name(), e);
                    attempts.push(AcquisitionFailure {
                        strategy: strategy.name().to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        let err = Error::SessionAcquisition { attempts };
        error!("Fatal: no browser session could be started. {}", err);
        Err(err)
    }

    /// Acquire a session, run `f` with it, and close it on every exit path
    pub async fn with_session<T, F, Fut>(&self, f: F) -> Result<T>
    where
        F: FnOnce(Arc<Session>) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let session = self.acquire_session().await?;
        session.scoped(f).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::BrowserFamily;
    use crate::webdriver::MockEngine;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Failing {
        name: &'static str,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl AcquireStrategy for Failing {
        fn name(&self) -> &str {
            self.name
        }

        async fn try_acquire(&self, _config: &SessionConfig) -> Result<Session> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(Error::driver_not_found(format!("{} unavailable", self.name)))
        }
    }

    struct Succeeding {
        engine: Arc<MockEngine>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl AcquireStrategy for Succeeding {
        fn name(&self) -> &str {
            "mock"
        }

        async fn try_acquire(&self, config: &SessionConfig) -> Result<Session> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Session::start(self.engine.clone(), BrowserFamily::Chrome, config).await)
        }
    }

    fn failing(name: &'static str, calls: &Arc<AtomicUsize>) -> Box<dyn AcquireStrategy> {
        Box::new(Failing {
            name,
            calls: calls.clone(),
        })
    }

    #[test]
    fn test_default_chain_order() {
        let provider = SessionProvider::from_config(&Config::default());
        assert_eq!(
            provider.strategy_names(),
            vec![
                "system-path",
                "well-known-locations",
                "downloaded-driver",
                "alternate-browser",
                "remote-endpoint",
            ]
        );
    }

    #[tokio::test]
    async fn test_first_success_stops_the_chain() {
        let calls = Arc::new(AtomicUsize::new(0));
        let after = Arc::new(AtomicUsize::new(0));
        let engine = Arc::new(MockEngine::new());

        let provider = SessionProvider::new(
            SessionConfig::default(),
            vec![
                failing("first", &calls),
                Box::new(Succeeding {
                    engine: engine.clone(),
                    calls: calls.clone(),
                }),
                failing("never", &after),
            ],
        );

        let session = provider.acquire_session().await.unwrap();

        assert!(!session.is_closed());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(after.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_exhaustion_reports_every_attempt() {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = SessionProvider::new(
            SessionConfig::default(),
            vec![failing("system-path", &calls), failing("remote-endpoint", &calls)],
        );

        let err = provider.acquire_session().await.unwrap_err();

        match err {
            Error::SessionAcquisition { attempts } => {
                assert_eq!(attempts.len(), 2);
                assert_eq!(attempts[0].strategy, "system-path");
                assert!(attempts[0].reason.contains("system-path unavailable"));
                assert_eq!(attempts[1].strategy, "remote-endpoint");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn test_with_session_closes_afterwards() {
        let engine = Arc::new(MockEngine::new());
        let provider = SessionProvider::new(
            SessionConfig::default(),
            vec![Box::new(Succeeding {
                engine: engine.clone(),
                calls: Arc::new(AtomicUsize::new(0)),
            })],
        );

        let url = provider
            .with_session(|session| async move {
                session.navigate("https://tmdb-discover.surge.sh/").await?;
                session.current_url().await
            })
            .await
            .unwrap();

        assert_eq!(url, "https://tmdb-discover.surge.sh/");
        assert_eq!(engine.quit_count(), 1);
    }
}
