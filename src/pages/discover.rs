//! Discover page: category navigation, search, movie listing and pagination

use serde::Serialize;
use tracing::{info, warn};

use super::movie::{extract_year, MovieCard};
use crate::element::{Element, ElementAccess, Locator, Strategy, WaitConfig};
use crate::outcome::Outcome;
use crate::session::Session;
use crate::{Error, Result};

/// Listing category reachable from the top navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Popular,
    Trend,
    New,
    TopRated,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Popular,
        Category::Trend,
        Category::New,
        Category::TopRated,
    ];

    /// Navigation link for the category
    pub fn locator(&self) -> Locator {
        match self {
            Category::Popular => DiscoverPage::NAV_POPULAR,
            Category::Trend => DiscoverPage::NAV_TREND,
            Category::New => DiscoverPage::NAV_NEW,
            Category::TopRated => DiscoverPage::NAV_TOP_RATED,
        }
    }

    /// Path segment of the category route
    pub fn path(&self) -> &'static str {
        match self {
            Category::Popular => "popular",
            Category::Trend => "trend",
            Category::New => "new",
            Category::TopRated => "top",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Category::Popular => "Popular",
            Category::Trend => "Trend",
            Category::New => "New",
            Category::TopRated => "Top Rated",
        })
    }
}

/// Pagination control as currently rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationState {
    pub current_page: u32,
    pub visible_pages: Vec<u32>,
    pub next_enabled: bool,
    pub previous_enabled: bool,
}

/// The Discover page
#[derive(Debug, Clone, Copy)]
pub struct DiscoverPage<'s> {
    access: ElementAccess<'s>,
}

impl<'s> DiscoverPage<'s> {
    pub const NAV_POPULAR: Locator =
        Locator::xpath("//a[contains(@href, '/popular') or contains(text(), 'Popular')]");
    pub const NAV_TREND: Locator =
        Locator::xpath("//a[contains(@href, '/trend') or contains(text(), 'Trend')]");
    pub const NAV_NEW: Locator =
        Locator::xpath("//a[contains(@href, '/new') or contains(text(), 'New')]");
    pub const NAV_TOP_RATED: Locator =
        Locator::xpath("//a[contains(@href, '/top') or contains(text(), 'Top')]");

    pub const MOVIE_CARDS: Locator =
        Locator::xpath("//div[contains(@class, 'flex-col') and contains(@class, 'items-center')]");
    pub const MOVIE_TITLES: Locator = Locator::css("p.text-blue-500.font-bold.py-1");
    pub const MOVIE_DETAILS: Locator = Locator::css("p.text-gray-500.font-light.text-sm");
    pub const MOVIE_POSTERS: Locator = Locator::css("img.w-60.h-96.object-contain");

    pub const SEARCH_INPUT: Locator = Locator::css("input[name='search']");

    pub const PAGINATION_CONTAINER: Locator = Locator::id("react-paginate");
    pub const PAGINATION_NEXT: Locator = Locator::css("li.next a");
    pub const PAGINATION_NEXT_ITEM: Locator = Locator::xpath("//li[contains(@class, 'next')]");
    pub const PAGINATION_PREV: Locator = Locator::css("li.previous a");
    pub const PAGINATION_PREV_ITEM: Locator =
        Locator::xpath("//li[contains(@class, 'previous')]");
    pub const PAGINATION_PAGES: Locator =
        Locator::css("#react-paginate li:not(.previous):not(.next) a");
    pub const SELECTED_PAGE: Locator = Locator::css("li.selected a");
    pub const PAGE_LABEL_LINKS: Locator = Locator::xpath("//a[contains(@aria-label, 'Page')]");

    pub fn new(session: &'s Session, wait: WaitConfig) -> Self {
        Self {
            access: ElementAccess::new(session, wait),
        }
    }

    pub fn access(&self) -> &ElementAccess<'s> {
        &self.access
    }

    /// Load the site root
    pub async fn open(&self, base_url: &str) -> Outcome<()> {
        match self.access.session().navigate(base_url).await {
            Ok(()) => {
                info!("Opened {}", base_url);
                Outcome::Complete(())
            }
            Err(e) => {
                warn!("Could not open {}: {}", base_url, e);
                Outcome::degraded((), e)
            }
        }
    }

    /// Follow the navigation link for `category`
    pub async fn navigate_to(&self, category: Category) -> Outcome<()> {
        match self.access.click(&category.locator()).await {
            Ok(()) => {
                info!("Navigated to {} section", category);
                Outcome::Complete(())
            }
            Err(e) => {
                warn!("Could not navigate to {}: {}", category, e);
                Outcome::degraded((), e)
            }
        }
    }

    pub async fn navigate_to_popular(&self) -> Outcome<()> {
        self.navigate_to(Category::Popular).await
    }

    pub async fn navigate_to_trending(&self) -> Outcome<()> {
        self.navigate_to(Category::Trend).await
    }

    pub async fn navigate_to_new(&self) -> Outcome<()> {
        self.navigate_to(Category::New).await
    }

    pub async fn navigate_to_top_rated(&self) -> Outcome<()> {
        self.navigate_to(Category::TopRated).await
    }

    /// Type `query` into the search box
    pub async fn search_movie(&self, query: &str) -> Outcome<()> {
        match self.access.send_keys(&Self::SEARCH_INPUT, query).await {
            Ok(()) => {
                info!("Searched for: {}", query);
                Outcome::Complete(())
            }
            Err(e) => {
                warn!("Could not search: {}", e);
                Outcome::degraded((), e)
            }
        }
    }

    /// Titles of the listed movies
    pub async fn get_movie_titles(&self) -> Outcome<Vec<String>> {
        let outcome = self
            .collect_texts(&Self::MOVIE_TITLES, |text| Some(text.to_string()))
            .await;
        info!("Found {} movie titles", outcome.value().len());
        outcome
    }

    /// Release years of the listed movies; entries without a year are skipped
    pub async fn get_movie_years(&self) -> Outcome<Vec<i32>> {
        let outcome = self.collect_texts(&Self::MOVIE_DETAILS, extract_year).await;
        if let Some(cause) = outcome.cause() {
            warn!("Could not extract years: {}", cause);
        }
        outcome
    }

    /// Number of movie cards
    pub async fn get_movie_count(&self) -> Outcome<usize> {
        self.access.find_all(&Self::MOVIE_CARDS).await.map(|cards| cards.len())
    }

    /// Number of poster images
    pub async fn get_poster_count(&self) -> Outcome<usize> {
        self.access.find_all(&Self::MOVIE_POSTERS).await.map(|posters| posters.len())
    }

    /// Parsed movie cards; cards without a title line are skipped
    pub async fn get_movie_cards(&self) -> Outcome<Vec<MovieCard>> {
        let (containers, cause) = self.access.find_all(&Self::MOVIE_CARDS).await.into_parts();
        if let Some(cause) = cause {
            return Outcome::degraded(Vec::new(), cause);
        }

        let mut cards = Vec::with_capacity(containers.len());
        for container in &containers {
            match Self::read_card(container).await {
                Ok(Some(card)) => cards.push(card),
                Ok(None) => {}
                Err(e) => {
                    warn!("Could not read movie card: {}", e);
                    return Outcome::degraded(cards, e);
                }
            }
        }

        info!("Parsed {} movie cards", cards.len());
        Outcome::Complete(cards)
    }

    async fn read_card(container: &Element<'s>) -> Result<Option<MovieCard>> {
        let Some(title) = container.find_all(&Self::MOVIE_TITLES).await?.into_iter().next() else {
            return Ok(None);
        };
        let title = title.text().await?;

        let details = match container.find_all(&Self::MOVIE_DETAILS).await?.into_iter().next() {
            Some(details) => details.text().await?,
            None => String::new(),
        };

        Ok(Some(MovieCard::parse(&title, &details)))
    }

    /// Advance one page; `false` when the control is disabled
    pub async fn click_next_page(&self) -> Outcome<bool> {
        self.click_pager(&Self::PAGINATION_NEXT, &Self::PAGINATION_NEXT_ITEM, "Next")
            .await
    }

    /// Go back one page; `false` when the control is disabled
    pub async fn click_previous_page(&self) -> Outcome<bool> {
        self.click_pager(&Self::PAGINATION_PREV, &Self::PAGINATION_PREV_ITEM, "Previous")
            .await
    }

    async fn click_pager(&self, anchor: &Locator, item: &Locator, label: &str) -> Outcome<bool> {
        let attempt = async {
            let link = self.access.find_required(anchor).await?;
            if self.pager_disabled(&link, item).await? {
                info!("{} button is disabled", label);
                return Ok(false);
            }
            link.click().await?;
            info!("Clicked {} page", label);
            Ok::<_, Error>(true)
        };

        match attempt.await {
            Ok(clicked) => Outcome::Complete(clicked),
            Err(e) => {
                warn!("Could not click {} page: {}", label.to_lowercase(), e);
                Outcome::degraded(false, e)
            }
        }
    }

    /// Any disabled indicator on the link or its list item
    async fn pager_disabled(&self, link: &Element<'s>, item: &Locator) -> Result<bool> {
        let class = link.attribute("class").await?.unwrap_or_default();
        if class.contains("disabled") {
            return Ok(true);
        }

        if link.attribute("aria-disabled").await?.as_deref() == Some("true") {
            return Ok(true);
        }

        let item_class = self
            .access
            .find_required(item)
            .await?
            .attribute("class")
            .await?
            .unwrap_or_default();
        Ok(item_class.contains("disabled"))
    }

    async fn pager_enabled(&self, anchor: &Locator, item: &Locator) -> Result<bool> {
        let link = self.access.find_required(anchor).await?;
        Ok(!self.pager_disabled(&link, item).await?)
    }

    /// Selected page; 1 when none is marked or the label is not a number
    pub async fn get_current_page_number(&self) -> Outcome<u32> {
        let text = match self.access.get_text(&Self::SELECTED_PAGE).await {
            Ok(text) => text,
            Err(e) => return Outcome::degraded(1, e),
        };

        match text.trim().parse() {
            Ok(page) => Outcome::Complete(page),
            Err(_) => Outcome::degraded(
                1,
                Error::invalid_input(format!("selected page label {:?}", text)),
            ),
        }
    }

    /// Numeric page links, in document order
    pub async fn get_available_pages(&self) -> Outcome<Vec<u32>> {
        self.collect_texts(&Self::PAGINATION_PAGES, |text| {
            if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
                text.parse().ok()
            } else {
                None
            }
        })
        .await
    }

    /// Click the page link labelled `page`
    pub async fn click_page(&self, page: u32) -> Outcome<bool> {
        let link = Locator::dynamic(
            Strategy::XPath,
            format!("//*[@id='react-paginate']//li/a[normalize-space(text())='{}']", page),
        );

        match self.access.click(&link).await {
            Ok(()) => {
                info!("Clicked page {}", page);
                Outcome::Complete(true)
            }
            Err(e) => {
                warn!("Could not click page {}: {}", page, e);
                Outcome::degraded(false, e)
            }
        }
    }

    /// Link whose accessible label is `Page {page}`
    pub fn page_label_link(page: u32) -> Locator {
        Locator::dynamic(Strategy::XPath, format!("//a[@aria-label='Page {}']", page))
    }

    /// Page numbers of the links labelled `Page N`
    pub async fn get_labelled_pages(&self) -> Outcome<Vec<u32>> {
        self.collect_texts(&Self::PAGE_LABEL_LINKS, |text| {
            if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
                text.parse().ok()
            } else {
                None
            }
        })
        .await
    }

    /// Click the link labelled `Page {page}`
    pub async fn click_labelled_page(&self, page: u32) -> Outcome<bool> {
        match self.access.click(&Self::page_label_link(page)).await {
            Ok(()) => {
                info!("Clicked page {} by label", page);
                Outcome::Complete(true)
            }
            Err(e) => {
                warn!("Could not click page {} by label: {}", page, e);
                Outcome::degraded(false, e)
            }
        }
    }

    /// Whether the pagination control is shown
    pub async fn has_pagination(&self) -> bool {
        self.access.is_displayed(&Self::PAGINATION_CONTAINER).await
    }

    /// Current pagination state, queried fresh
    pub async fn pagination_state(&self) -> PaginationState {
        let current_page = self.get_current_page_number().await.into_value();
        let visible_pages = self.get_available_pages().await.into_value();
        let next_enabled = self
            .pager_enabled(&Self::PAGINATION_NEXT, &Self::PAGINATION_NEXT_ITEM)
            .await
            .unwrap_or(false);
        let previous_enabled = self
            .pager_enabled(&Self::PAGINATION_PREV, &Self::PAGINATION_PREV_ITEM)
            .await
            .unwrap_or(false);

        PaginationState {
            current_page,
            visible_pages,
            next_enabled,
            previous_enabled,
        }
    }

    /// Read the text of every element matching `locator`, keeping what `parse` accepts
    ///
    /// A read failure degrades with whatever was collected before it.
    async fn collect_texts<T, F>(&self, locator: &Locator, parse: F) -> Outcome<Vec<T>>
    where
        F: Fn(&str) -> Option<T>,
    {
        let (elements, cause) = self.access.find_all(locator).await.into_parts();
        if let Some(cause) = cause {
            return Outcome::degraded(Vec::new(), cause);
        }

        let mut values = Vec::with_capacity(elements.len());
        for element in &elements {
            match element.text().await {
                Ok(text) => values.extend(parse(text.trim())),
                Err(e) => return Outcome::degraded(values, e),
            }
        }
        Outcome::Complete(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_locators_are_distinct() {
        let expressions: std::collections::HashSet<_> = Category::ALL
            .iter()
            .map(|c| c.locator().expression().to_string())
            .collect();
        assert_eq!(expressions.len(), 4);
        assert!(Category::Popular.locator().expression().contains("/popular"));
    }

    #[test]
    fn test_page_label_link() {
        let link = DiscoverPage::page_label_link(100);
        assert_eq!(link.strategy(), Strategy::XPath);
        assert_eq!(link.expression(), "//a[@aria-label='Page 100']");
    }

    #[test]
    fn test_category_display() {
        assert_eq!(Category::TopRated.to_string(), "Top Rated");
        assert_eq!(Category::Trend.path(), "trend");
    }
}
