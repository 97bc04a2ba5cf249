//! Wait-and-fetch element access
//!
//! Every lookup polls until a match appears or the explicit wait elapses.
//! Single-element lookups fail with `ElementNotFound` on timeout; multi-element
//! lookups degrade to an empty list instead.

use std::path::PathBuf;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, error, info, instrument, warn};

use super::handle::Element;
use super::locator::Locator;
use crate::config::Config;
use crate::outcome::Outcome;
use crate::session::Session;
use crate::webdriver::ElementId;
use crate::{Error, Result};

/// Explicit wait parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitConfig {
    /// Upper bound for one lookup
    pub timeout: Duration,
    /// Delay between polls
    pub poll_interval: Duration,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for WaitConfig {
    fn from(config: &Config) -> Self {
        Self {
            timeout: config.explicit_wait(),
            poll_interval: config.poll_interval(),
        }
    }
}

impl WaitConfig {
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }
}

/// Element access layer over one session
#[derive(Debug, Clone, Copy)]
pub struct ElementAccess<'s> {
    session: &'s Session,
    wait: WaitConfig,
}

impl<'s> ElementAccess<'s> {
    pub fn new(session: &'s Session, wait: WaitConfig) -> Self {
        Self { session, wait }
    }

    pub fn session(&self) -> &'s Session {
        self.session
    }

    pub fn wait(&self) -> WaitConfig {
        self.wait
    }

    /// Poll until at least one element matches, or the wait elapses
    async fn poll(&self, locator: &Locator) -> Result<Vec<ElementId>> {
        let selector = locator.selector();
        let deadline = Instant::now() + self.wait.timeout;

        loop {
            match self.session.engine().find_elements(&selector).await {
                Ok(ids) if !ids.is_empty() => return Ok(ids),
                Ok(_) => {}
                Err(e) if e.is_not_found() => {}
                Err(e) => return Err(e),
            }

            if Instant::now() >= deadline {
                return Err(Error::timeout(format!(
                    "{} not present after {:?}",
                    locator, self.wait.timeout
                )));
            }

            tokio::time::sleep(self.wait.poll_interval).await;
        }
    }

    /// First element matching `locator`
    #[instrument(skip_all, fields(locator = %locator))]
    pub async fn find_required(&self, locator: &Locator) -> Result<Element<'s>> {
        match self.poll(locator).await {
            Ok(mut ids) => Ok(Element::new(self.session, ids.swap_remove(0))),
            Err(Error::Timeout(_)) => {
                error!("Element not found: {}", locator);
                Err(Error::element_not_found(locator.to_string()))
            }
            Err(e) => Err(e),
        }
    }

    /// Every element matching `locator`; degrades to an empty list
    #[instrument(skip_all, fields(locator = %locator))]
    pub async fn find_all(&self, locator: &Locator) -> Outcome<Vec<Element<'s>>> {
        match self.poll(locator).await {
            Ok(ids) => {
                debug!("Found {} elements", ids.len());
                Outcome::Complete(
                    ids.into_iter()
                        .map(|id| Element::new(self.session, id))
                        .collect(),
                )
            }
            Err(cause) => {
                error!("Elements not found: {} ({})", locator, cause);
                Outcome::degraded(Vec::new(), cause)
            }
        }
    }

    /// Click the first element matching `locator`
    pub async fn click(&self, locator: &Locator) -> Result<()> {
        let element = self.find_required(locator).await?;
        element.click().await?;
        info!("Clicked element: {}", locator);
        Ok(())
    }

    /// Replace the content of the first element matching `locator`
    pub async fn send_keys(&self, locator: &Locator, text: &str) -> Result<()> {
        let element = self.find_required(locator).await?;
        element.clear().await?;
        element.send_keys(text).await?;
        info!("Sent keys '{}' to element: {}", text, locator);
        Ok(())
    }

    /// Text of the first element matching `locator`
    pub async fn get_text(&self, locator: &Locator) -> Result<String> {
        self.find_required(locator).await?.text().await
    }

    /// Whether the first element matching `locator` is displayed
    ///
    /// Waits only for presence; visibility is checked once.
    pub async fn is_displayed(&self, locator: &Locator) -> bool {
        match self.find_required(locator).await {
            Ok(element) => element.is_displayed().await.unwrap_or(false),
            Err(e) => {
                debug!("Element not displayed: {} ({})", locator, e);
                false
            }
        }
    }

    /// Save a screenshot as `{name}_{timestamp}.png`
    pub async fn take_screenshot(&self, name: &str) -> Option<PathBuf> {
        match self.session.save_screenshot(name).await {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("Failed to take screenshot: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::BrowserFamily;
    use crate::webdriver::{MockElement, MockEngine};
    use std::sync::Arc;

    const TITLE: Locator = Locator::css("p.title");
    const SEARCH: Locator = Locator::css("input[name='search']");

    fn fast() -> WaitConfig {
        WaitConfig::new(Duration::from_millis(50), Duration::from_millis(10))
    }

    fn setup() -> (Arc<MockEngine>, Session) {
        let engine = Arc::new(MockEngine::new());
        let session = Session::new(engine.clone(), BrowserFamily::Chrome);
        (engine, session)
    }

    #[tokio::test]
    async fn test_find_required_times_out_as_not_found() {
        let (_engine, session) = setup();
        let access = ElementAccess::new(&session, fast());

        let err = access.find_required(&TITLE).await.unwrap_err();
        assert!(matches!(err, Error::ElementNotFound(ref l) if l == "css=p.title"));
    }

    #[tokio::test]
    async fn test_find_required_propagates_engine_errors() {
        let (engine, session) = setup();
        engine.fail_queries(&TITLE.selector());
        let access = ElementAccess::new(&session, fast());

        let err = access.find_required(&TITLE).await.unwrap_err();
        assert!(matches!(err, Error::WebDriver { .. }));
    }

    #[tokio::test]
    async fn test_find_all_counts() {
        let (engine, session) = setup();
        let access = ElementAccess::new(&session, fast());

        let none = access.find_all(&TITLE).await;
        assert!(none.value().is_empty());
        assert!(none.is_degraded());

        engine.add(&TITLE.selector(), MockElement::new("One"));
        let one = access.find_all(&TITLE).await;
        assert_eq!(one.value().len(), 1);
        assert!(one.is_complete());

        engine.add(&TITLE.selector(), MockElement::new("Two"));
        engine.add(&TITLE.selector(), MockElement::new("Three"));
        assert_eq!(access.find_all(&TITLE).await.value().len(), 3);
    }

    #[tokio::test]
    async fn test_find_all_degrades_on_engine_error() {
        let (engine, session) = setup();
        engine.fail_queries(&TITLE.selector());
        let access = ElementAccess::new(&session, fast());

        let outcome = access.find_all(&TITLE).await;
        assert!(outcome.value().is_empty());
        assert!(matches!(outcome.cause(), Some(Error::WebDriver { .. })));
    }

    #[tokio::test]
    async fn test_send_keys_clears_first() {
        let (engine, session) = setup();
        let input = engine.add(
            &SEARCH.selector(),
            MockElement::new("").with_attribute("value", "stale"),
        );
        let access = ElementAccess::new(&session, fast());

        access.send_keys(&SEARCH, "Laberinto").await.unwrap();

        assert_eq!(engine.cleared(), vec![input.clone()]);
        assert_eq!(engine.typed(), vec![(input, "Laberinto".to_string())]);
    }

    #[tokio::test]
    async fn test_is_displayed_false_instead_of_error() {
        let (engine, session) = setup();
        let access = ElementAccess::new(&session, fast());
        assert!(!access.is_displayed(&TITLE).await);

        engine.add(&TITLE.selector(), MockElement::new("hidden").hidden());
        assert!(!access.is_displayed(&TITLE).await);

        engine.clear_matches(&TITLE.selector());
        engine.add(&TITLE.selector(), MockElement::new("shown"));
        assert!(access.is_displayed(&TITLE).await);
    }

    #[tokio::test]
    async fn test_hidden_element_does_not_wait_out_the_timeout() {
        let (engine, session) = setup();
        engine.add(&TITLE.selector(), MockElement::new("hidden").hidden());
        let access = ElementAccess::new(
            &session,
            WaitConfig::new(Duration::from_secs(5), Duration::from_millis(10)),
        );

        let started = std::time::Instant::now();
        assert!(!access.is_displayed(&TITLE).await);
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_take_screenshot_failure_is_none() {
        let (engine, session) = setup();
        engine.fail_screenshot();
        let access = ElementAccess::new(&session, fast());

        assert!(access.take_screenshot("broken").await.is_none());
    }
}
