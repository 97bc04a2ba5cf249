//! Page object tests
//!
//! These drive the Discover page and filter panel against scripted markup.

mod common;

use common::{fast_wait, session_on, Disabled, DiscoverFixture};
use discover_qa::pages::{Category, DiscoverPage, FilterEffect, FilterPanel, PaginationState};
use discover_qa::webdriver::AutomationEngine;
use discover_qa::Error;

const MOVIES: &[(&str, &str)] = &[
    ("El laberinto del fauno", "Drama, Fantasy | 2006"),
    ("Dune: Part Two", "2024-02-27"),
    ("Untitled", "Coming soon"),
];

#[tokio::test]
async fn test_next_page_disabled_indicators() {
    for indicator in [Disabled::LinkClass, Disabled::AriaDisabled, Disabled::ItemClass] {
        let dir = tempfile::tempdir().unwrap();
        let fixture = DiscoverFixture::new().with_pagination(3, &[1, 2, 3], Disabled::No, indicator);
        let session = session_on(&fixture.engine, dir.path());
        let page = DiscoverPage::new(&session, fast_wait());

        let clicked = page.click_next_page().await;
        assert!(clicked.is_complete(), "{:?}", indicator);
        assert!(!clicked.into_value(), "{:?}", indicator);
        assert!(fixture.engine.clicks().is_empty(), "{:?}", indicator);
    }
}

#[tokio::test]
async fn test_previous_page_disabled_indicators() {
    for indicator in [Disabled::LinkClass, Disabled::AriaDisabled, Disabled::ItemClass] {
        let dir = tempfile::tempdir().unwrap();
        let fixture = DiscoverFixture::new().with_pagination(1, &[1, 2, 3], indicator, Disabled::No);
        let session = session_on(&fixture.engine, dir.path());
        let page = DiscoverPage::new(&session, fast_wait());

        assert!(!page.click_previous_page().await.into_value(), "{:?}", indicator);
        assert!(fixture.engine.clicks().is_empty(), "{:?}", indicator);
    }
}

#[tokio::test]
async fn test_enabled_pager_clicks_once() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = DiscoverFixture::new().with_pagination(2, &[1, 2, 3], Disabled::No, Disabled::No);
    let session = session_on(&fixture.engine, dir.path());
    let page = DiscoverPage::new(&session, fast_wait());

    assert!(page.click_next_page().await.into_value());
    let next = fixture.next_link().await.unwrap();
    assert_eq!(fixture.engine.click_count(&next), 1);

    assert!(page.click_previous_page().await.into_value());
    let previous = fixture.previous_link().await.unwrap();
    assert_eq!(fixture.engine.click_count(&previous), 1);
    assert_eq!(fixture.engine.clicks().len(), 2);
}

#[tokio::test]
async fn test_missing_pager_degrades() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = DiscoverFixture::new();
    let session = session_on(&fixture.engine, dir.path());
    let page = DiscoverPage::new(&session, fast_wait());

    let clicked = page.click_next_page().await;
    assert!(clicked.is_degraded());
    assert!(matches!(clicked.cause(), Some(Error::ElementNotFound(_))));
    assert!(!clicked.into_value());
    assert!(!page.has_pagination().await);
}

#[tokio::test]
async fn test_pagination_state() {
    let dir = tempfile::tempdir().unwrap();
    let fixture =
        DiscoverFixture::new().with_pagination(1, &[1, 2, 3, 4], Disabled::ItemClass, Disabled::No);
    let session = session_on(&fixture.engine, dir.path());
    let page = DiscoverPage::new(&session, fast_wait());

    assert!(page.has_pagination().await);
    assert_eq!(
        page.pagination_state().await,
        PaginationState {
            current_page: 1,
            visible_pages: vec![1, 2, 3, 4],
            next_enabled: true,
            previous_enabled: false,
        }
    );
    assert_eq!(page.get_available_pages().await.into_value(), vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn test_current_page_defaults_to_one() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = DiscoverFixture::new();
    let session = session_on(&fixture.engine, dir.path());
    let page = DiscoverPage::new(&session, fast_wait());

    let current = page.get_current_page_number().await;
    assert!(current.is_degraded());
    assert_eq!(current.into_value(), 1);
}

#[tokio::test]
async fn test_movie_listing_counts() {
    let dir = tempfile::tempdir().unwrap();

    let empty = DiscoverFixture::new();
    let session = session_on(&empty.engine, dir.path());
    let page = DiscoverPage::new(&session, fast_wait());
    let titles = page.get_movie_titles().await;
    assert!(titles.is_degraded());
    assert!(titles.value().is_empty());
    assert_eq!(page.get_movie_count().await.into_value(), 0);

    let one = DiscoverFixture::new().with_movies(&MOVIES[..1]);
    let session = session_on(&one.engine, dir.path());
    let page = DiscoverPage::new(&session, fast_wait());
    assert_eq!(
        page.get_movie_titles().await.into_value(),
        vec!["El laberinto del fauno"]
    );
    assert_eq!(page.get_movie_count().await.into_value(), 1);

    let many = DiscoverFixture::new().with_movies(MOVIES);
    let session = session_on(&many.engine, dir.path());
    let page = DiscoverPage::new(&session, fast_wait());
    let titles = page.get_movie_titles().await;
    assert!(titles.is_complete());
    assert_eq!(titles.into_value().len(), 3);
    assert_eq!(page.get_movie_count().await.into_value(), 3);
    assert_eq!(page.get_poster_count().await.into_value(), 3);
}

#[tokio::test]
async fn test_movie_years_skip_undated_entries() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = DiscoverFixture::new().with_movies(MOVIES);
    let session = session_on(&fixture.engine, dir.path());
    let page = DiscoverPage::new(&session, fast_wait());

    assert_eq!(page.get_movie_years().await.into_value(), vec![2006, 2024]);
}

#[tokio::test]
async fn test_movie_cards() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = DiscoverFixture::new().with_movies(MOVIES);
    let session = session_on(&fixture.engine, dir.path());
    let page = DiscoverPage::new(&session, fast_wait());

    let cards = page.get_movie_cards().await;
    assert!(cards.is_complete());
    let cards = cards.into_value();
    assert_eq!(cards.len(), 3);
    assert_eq!(cards[0].title, "El laberinto del fauno");
    assert_eq!(cards[0].year, Some(2006));
    assert_eq!(cards[2].year, None);
    assert_eq!(cards[2].details, "Coming soon");
}

#[tokio::test]
async fn test_search_replaces_query() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = DiscoverFixture::new().with_search();
    let session = session_on(&fixture.engine, dir.path());
    let page = DiscoverPage::new(&session, fast_wait());

    assert!(page.search_movie("Laberinto").await.is_complete());
    assert_eq!(fixture.engine.cleared().len(), 1);

    let typed = fixture.engine.typed();
    assert_eq!(typed.len(), 1);
    assert_eq!(typed[0].1, "Laberinto");

    let input = &typed[0].0;
    assert_eq!(
        fixture.engine.element_attribute(input, "value").await.unwrap(),
        Some("Laberinto".to_string())
    );
}

#[tokio::test]
async fn test_search_without_input_degrades() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = DiscoverFixture::new();
    let session = session_on(&fixture.engine, dir.path());
    let page = DiscoverPage::new(&session, fast_wait());

    let outcome = page.search_movie("Laberinto").await;
    assert!(matches!(outcome.cause(), Some(Error::ElementNotFound(_))));
    assert!(fixture.engine.typed().is_empty());
}

#[tokio::test]
async fn test_category_navigation_follows_link() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = DiscoverFixture::new();
    fixture.engine.add(
        &Category::TopRated.locator().selector(),
        discover_qa::webdriver::MockElement::new("Top Rated").navigates_to("https://discover.test/top"),
    );
    let session = session_on(&fixture.engine, dir.path());
    let page = DiscoverPage::new(&session, fast_wait());

    assert!(page.navigate_to_top_rated().await.is_complete());
    assert_eq!(session.current_url().await.unwrap(), "https://discover.test/top");

    let missing = page.navigate_to_trending().await;
    assert!(missing.is_degraded());
}

#[tokio::test]
async fn test_select_type_applied() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = DiscoverFixture::new().with_type_dropdown(&["TV Shows", "Movie"]);
    let session = session_on(&fixture.engine, dir.path());
    let panel = FilterPanel::new(&session, fast_wait());

    let effect = panel.select_type("movie").await;
    assert!(effect.is_complete());
    assert_eq!(effect.into_value(), FilterEffect::Applied);
    // dropdown, then the option
    assert_eq!(fixture.engine.clicks().len(), 2);
}

#[tokio::test]
async fn test_select_type_opened_without_option() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = DiscoverFixture::new().with_type_dropdown(&[]);
    let session = session_on(&fixture.engine, dir.path());
    let panel = FilterPanel::new(&session, fast_wait());

    assert_eq!(panel.select_type("Movie").await.into_value(), FilterEffect::Opened);
    assert_eq!(fixture.engine.clicks().len(), 1);
}

#[tokio::test]
async fn test_select_type_without_dropdown() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = DiscoverFixture::new();
    let session = session_on(&fixture.engine, dir.path());
    let panel = FilterPanel::new(&session, fast_wait());

    let effect = panel.select_type("Movie").await;
    assert!(effect.is_degraded());
    assert_eq!(effect.into_value(), FilterEffect::NotApplied);
}

#[tokio::test]
async fn test_set_rating_in_range() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = DiscoverFixture::new();
    let stars = fixture.with_rating_stars(5);
    let session = session_on(&fixture.engine, dir.path());
    let panel = FilterPanel::new(&session, fast_wait());

    assert!(panel.set_rating(3).await.into_value());
    assert_eq!(fixture.engine.clicks(), vec![stars[2].clone()]);
}

#[tokio::test]
async fn test_set_rating_out_of_range() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = DiscoverFixture::new();
    fixture.with_rating_stars(2);
    let session = session_on(&fixture.engine, dir.path());
    let panel = FilterPanel::new(&session, fast_wait());

    let outcome = panel.set_rating(3).await;
    assert!(outcome.is_complete());
    assert!(!outcome.into_value());
    assert!(!panel.set_rating(0).await.into_value());
    assert!(fixture.engine.clicks().is_empty());
}

#[tokio::test]
async fn test_set_rating_without_stars_degrades() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = DiscoverFixture::new();
    let session = session_on(&fixture.engine, dir.path());
    let panel = FilterPanel::new(&session, fast_wait());

    let outcome = panel.set_rating(3).await;
    assert!(outcome.is_degraded());
    assert!(!outcome.into_value());
}
