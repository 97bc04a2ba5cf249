//! Common test utilities
//!
//! This module provides shared fixtures for all integration tests: a mock
//! engine scripted with the Discover page markup, fast waits, and a config
//! that writes artifacts to a temporary directory.

#![allow(dead_code)]

use discover_qa::config::Config;
use discover_qa::element::{Locator, WaitConfig};
use discover_qa::pages::{DiscoverPage, FilterPanel};
use discover_qa::session::{BrowserFamily, Session};
use discover_qa::webdriver::{AutomationEngine, ElementId, MockElement, MockEngine};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Short waits so missing elements time out quickly
pub fn fast_wait() -> WaitConfig {
    WaitConfig::new(Duration::from_millis(60), Duration::from_millis(10))
}

/// Config with no settle delay and artifacts under `dir`
pub fn test_config(dir: &Path) -> Config {
    let mut config = Config::default();
    config.base_url = "https://discover.test/".to_string();
    config.explicit_wait_secs = 0;
    config.poll_interval_ms = 10;
    config.settle_delay_ms = 0;
    config.screenshot_dir = dir.join("screenshots");
    config.report_dir = dir.join("reports");
    config.log_dir = dir.join("logs");
    config
}

/// Session over `engine` writing screenshots under `dir`
pub fn session_on(engine: &Arc<MockEngine>, dir: &Path) -> Session {
    Session::new(engine.clone(), BrowserFamily::Chrome).with_screenshot_dir(dir.join("screenshots"))
}

/// Which indicator marks a pager link as disabled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disabled {
    No,
    LinkClass,
    AriaDisabled,
    ItemClass,
}

/// Mock engine scripted with Discover page markup
pub struct DiscoverFixture {
    pub engine: Arc<MockEngine>,
}

impl DiscoverFixture {
    pub fn new() -> Self {
        Self {
            engine: Arc::new(MockEngine::new()),
        }
    }

    /// Movie cards with their title and details lines
    pub fn with_movies(self, movies: &[(&str, &str)]) -> Self {
        let cards = DiscoverPage::MOVIE_CARDS;
        let titles = DiscoverPage::MOVIE_TITLES;
        let details = DiscoverPage::MOVIE_DETAILS;
        let posters = DiscoverPage::MOVIE_POSTERS;

        for (title, detail) in movies {
            let card = self.engine.add(&cards.selector(), MockElement::new(""));
            self.engine
                .add_child(&card, &titles.selector(), MockElement::new(*title));
            self.engine
                .add_child(&card, &details.selector(), MockElement::new(*detail));

            self.engine.add(&titles.selector(), MockElement::new(*title));
            self.engine.add(&details.selector(), MockElement::new(*detail));
            self.engine.add(&posters.selector(), MockElement::new(""));
        }
        self
    }

    /// Pagination control showing `pages`, with `current` selected
    pub fn with_pagination(self, current: u32, pages: &[u32], previous: Disabled, next: Disabled) -> Self {
        self.engine.add(
            &DiscoverPage::PAGINATION_CONTAINER.selector(),
            MockElement::new(""),
        );

        for page in pages {
            self.engine.add(
                &DiscoverPage::PAGINATION_PAGES.selector(),
                MockElement::new(page.to_string()),
            );
        }
        self.engine.add(
            &DiscoverPage::SELECTED_PAGE.selector(),
            MockElement::new(current.to_string()),
        );

        self.add_pager("previous", previous);
        self.add_pager("next", next);
        self
    }

    fn add_pager(&self, kind: &str, disabled: Disabled) {
        let (anchor, item) = if kind == "next" {
            (DiscoverPage::PAGINATION_NEXT, DiscoverPage::PAGINATION_NEXT_ITEM)
        } else {
            (DiscoverPage::PAGINATION_PREV, DiscoverPage::PAGINATION_PREV_ITEM)
        };

        let mut link = MockElement::new(kind);
        match disabled {
            Disabled::LinkClass => link = link.with_attribute("class", "disabled"),
            Disabled::AriaDisabled => link = link.with_attribute("aria-disabled", "true"),
            Disabled::No | Disabled::ItemClass => {
                link = link.with_attribute("aria-disabled", "false")
            }
        }
        self.engine.add(&anchor.selector(), link);

        let item_class = if disabled == Disabled::ItemClass {
            format!("{} disabled", kind)
        } else {
            kind.to_string()
        };
        self.engine
            .add(&item.selector(), MockElement::new("").with_attribute("class", item_class));
    }

    /// Page links labelled `Page N`
    pub fn with_page_labels(self, pages: &[u32]) -> Self {
        for page in pages {
            let link = || {
                MockElement::new(page.to_string())
                    .with_attribute("aria-label", format!("Page {}", page))
            };
            self.engine
                .add(&DiscoverPage::PAGE_LABEL_LINKS.selector(), link());
            self.engine
                .add(&DiscoverPage::page_label_link(*page).selector(), link());
        }
        self
    }

    /// Search input
    pub fn with_search(self) -> Self {
        self.engine.add(
            &DiscoverPage::SEARCH_INPUT.selector(),
            MockElement::new("").with_attribute("value", "old query"),
        );
        self
    }

    /// Type dropdown offering `options`
    pub fn with_type_dropdown(self, options: &[&str]) -> Self {
        self.engine
            .add(&FilterPanel::TYPE_DROPDOWN.selector(), MockElement::new("Type"));
        for option in options {
            self.engine.add(
                &FilterPanel::DROPDOWN_OPTIONS.selector(),
                MockElement::new(*option),
            );
        }
        self
    }

    /// `count` rating stars
    pub fn with_rating_stars(&self, count: usize) -> Vec<ElementId> {
        (0..count)
            .map(|_| {
                self.engine
                    .add(&FilterPanel::RATING_STARS.selector(), MockElement::new(""))
            })
            .collect()
    }

    pub async fn next_link(&self) -> Option<ElementId> {
        self.first(&DiscoverPage::PAGINATION_NEXT).await
    }

    pub async fn previous_link(&self) -> Option<ElementId> {
        self.first(&DiscoverPage::PAGINATION_PREV).await
    }

    async fn first(&self, locator: &Locator) -> Option<ElementId> {
        self.engine
            .find_elements(&locator.selector())
            .await
            .ok()?
            .into_iter()
            .next()
    }
}

impl Default for DiscoverFixture {
    fn default() -> Self {
        Self::new()
    }
}
