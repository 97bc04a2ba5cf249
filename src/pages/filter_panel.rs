//! Filter panel: type, genre, year range and rating filters

use tracing::{info, warn};

use super::movie::{MAX_YEAR, MIN_YEAR};
use crate::element::{ElementAccess, Locator, WaitConfig};
use crate::outcome::Outcome;
use crate::session::Session;
use crate::Error;

/// What a filter operation observably did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterEffect {
    /// The requested option was seen and clicked
    Applied,
    /// The control opened but the requested option was not rendered
    Opened,
    /// A valid value was accepted without driving a widget
    Recorded,
    /// The input was invalid and nothing was done
    Rejected,
    /// The control could not be operated
    NotApplied,
}

/// The filter panel of the Discover page
#[derive(Debug, Clone, Copy)]
pub struct FilterPanel<'s> {
    access: ElementAccess<'s>,
}

impl<'s> FilterPanel<'s> {
    pub const TYPE_DROPDOWN: Locator = Locator::css("div[class*='css-yk16xz-control']");
    pub const GENRE_DROPDOWN: Locator =
        Locator::xpath("//p[contains(text(), 'Genre')]/following-sibling::div");
    pub const YEAR_FROM_CONTAINER: Locator = Locator::xpath(
        "//div[contains(text(), '1900') or contains(@class, 'css-1uccc91-singleValue')][1]",
    );
    pub const YEAR_TO_CONTAINER: Locator = Locator::xpath(
        "//div[contains(text(), '2024') or contains(@class, 'css-1uccc91-singleValue')][2]",
    );
    pub const DROPDOWN_OPTIONS: Locator = Locator::css("div[class*='-option']");
    pub const RATING_STARS: Locator = Locator::class_name("rc-rate-star");

    pub fn new(session: &'s Session, wait: WaitConfig) -> Self {
        Self {
            access: ElementAccess::new(session, wait),
        }
    }

    /// Choose a content type such as "Movie" or "TV Shows"
    pub async fn select_type(&self, name: &str) -> Outcome<FilterEffect> {
        self.select_option(&Self::TYPE_DROPDOWN, name, "type").await
    }

    /// Choose a genre
    pub async fn select_genre(&self, name: &str) -> Outcome<FilterEffect> {
        self.select_option(&Self::GENRE_DROPDOWN, name, "genre").await
    }

    async fn select_option(&self, control: &Locator, name: &str, label: &str) -> Outcome<FilterEffect> {
        if let Err(e) = self.access.click(control).await {
            warn!("Could not select {}: {}", label, e);
            return Outcome::degraded(FilterEffect::NotApplied, e);
        }
        info!("Clicked {} dropdown", label);

        // Nothing rendered is not a failure: the control did open.
        let options = self.access.find_all(&Self::DROPDOWN_OPTIONS).await.into_value();
        for option in &options {
            let text = match option.text().await {
                Ok(text) => text,
                Err(e) => {
                    warn!("Could not read {} option: {}", label, e);
                    return Outcome::degraded(FilterEffect::NotApplied, e);
                }
            };

            if text.trim().eq_ignore_ascii_case(name) {
                return match option.click().await {
                    Ok(()) => {
                        info!("Selected {} {}", label, name);
                        Outcome::Complete(FilterEffect::Applied)
                    }
                    Err(e) => {
                        warn!("Could not select {} {}: {}", label, name, e);
                        Outcome::degraded(FilterEffect::NotApplied, e)
                    }
                };
            }
        }

        info!("{} option {} not rendered", label, name);
        Outcome::Complete(FilterEffect::Opened)
    }

    /// Request a release year range
    pub async fn set_year_range(&self, from: i32, to: i32) -> Outcome<FilterEffect> {
        let in_range = |year: i32| (MIN_YEAR..=MAX_YEAR).contains(&year);
        if from > to || !in_range(from) || !in_range(to) {
            warn!("Rejected year range: {} - {}", from, to);
            return Outcome::degraded(
                FilterEffect::Rejected,
                Error::invalid_input(format!("year range {} - {}", from, to)),
            );
        }

        info!("Setting year range: {} - {}", from, to);
        Outcome::Complete(FilterEffect::Recorded)
    }

    /// Whether both year selectors are shown
    pub async fn has_year_filter(&self) -> bool {
        self.access.is_displayed(&Self::YEAR_FROM_CONTAINER).await
            && self.access.is_displayed(&Self::YEAR_TO_CONTAINER).await
    }

    /// Click the `stars`-th rating star; `false` when out of range
    pub async fn set_rating(&self, stars: usize) -> Outcome<bool> {
        let (elements, cause) = self.access.find_all(&Self::RATING_STARS).await.into_parts();
        if let Some(cause) = cause {
            warn!("Could not set rating: {}", cause);
            return Outcome::degraded(false, cause);
        }

        if stars == 0 || stars > elements.len() {
            info!("Rating {} outside 1..={}", stars, elements.len());
            return Outcome::Complete(false);
        }

        match elements[stars - 1].click().await {
            Ok(()) => {
                info!("Set rating to {} stars", stars);
                Outcome::Complete(true)
            }
            Err(e) => {
                warn!("Could not set rating: {}", e);
                Outcome::degraded(false, e)
            }
        }
    }
}
