//! Search, filter and listing content scenarios

use std::sync::Arc;

use super::{settle, Findings, Verdict};
use crate::config::Config;
use crate::element::WaitConfig;
use crate::pages::{DiscoverPage, FilterEffect, FilterPanel};
use crate::session::Session;
use crate::{Error, Result};

/// Query used by the search scenario
pub const SEARCH_TERM: &str = "Laberinto";

fn pages<'s>(session: &'s Session, config: &Config) -> (DiscoverPage<'s>, FilterPanel<'s>) {
    let wait = WaitConfig::from(config);
    (DiscoverPage::new(session, wait), FilterPanel::new(session, wait))
}

/// Searching narrows the listing; zero results are acceptable
pub async fn search_functionality(session: Arc<Session>, config: Arc<Config>) -> Result<Verdict> {
    let (discover, _) = pages(&session, &config);
    let mut findings = Findings::new();

    discover.search_movie(SEARCH_TERM).await;
    settle(&config).await;

    let titles = discover.get_movie_titles().await.into_value();
    findings.note(format!("Search results: {} movies found", titles.len()));

    if !titles.is_empty() {
        let needle = SEARCH_TERM.to_lowercase();
        if titles.iter().any(|t| t.to_lowercase().contains(&needle)) {
            findings.note(format!("Search term '{}' found in results", SEARCH_TERM));
        } else {
            findings.note(format!(
                "Search term '{}' not found, but got {} results",
                SEARCH_TERM,
                titles.len()
            ));
        }
    }

    findings.passed()
}

/// Selecting the Movie type keeps a listing on screen
pub async fn type_filter(session: Arc<Session>, config: Arc<Config>) -> Result<Verdict> {
    let (discover, filters) = pages(&session, &config);
    let mut findings = Findings::new();

    let effect = filters.select_type("Movie").await.into_value();
    findings.note(format!("Type filter effect: {:?}", effect));
    settle(&config).await;

    let count = discover.get_movie_count().await.into_value();
    if count > 0 {
        findings.note(format!("Type filter: found {} movies", count));
    } else {
        findings.note("Type filter: no movies found (possible filter issue)");
    }

    findings.passed()
}

/// Year range 2020-2024; documents how many listed years fall inside it
pub async fn year_filter(session: Arc<Session>, config: Arc<Config>) -> Result<Verdict> {
    let (discover, filters) = pages(&session, &config);
    let mut findings = Findings::new();

    let initial = discover.get_movie_count().await.into_value();
    findings.note(format!("Initial movies: {}", initial));

    filters.set_year_range(2020, 2024).await;
    settle(&config).await;

    let filtered = discover.get_movie_count().await.into_value();
    let years = discover.get_movie_years().await.into_value();
    findings.note(format!("After year filter: {} movies, years {:?}", filtered, years));

    if !years.is_empty() && filtered > 0 {
        let (inside, outside): (Vec<i32>, Vec<i32>) =
            years.iter().copied().partition(|y| (2020..=2024).contains(y));

        findings.note(format!("Years in 2020-2024: {} movies", inside.len()));
        if !outside.is_empty() {
            findings.note(format!("Out of range years: {:?}", outside));
        }

        if inside.is_empty() {
            findings.note("Filter may not be working: no movies in range");
        } else {
            findings.note(format!(
                "Filter partially works: {}/{} in range",
                inside.len(),
                years.len()
            ));
        }
    }

    findings.passed()
}

/// An inverted range is refused and the listing survives
pub async fn invalid_year_range(session: Arc<Session>, config: Arc<Config>) -> Result<Verdict> {
    let (discover, filters) = pages(&session, &config);
    let mut findings = Findings::new();

    let initial = discover.get_movie_count().await.into_value();
    findings.note(format!("Initial count: {}", initial));

    let effect = filters.set_year_range(2024, 2020).await.into_value();
    if effect != FilterEffect::Rejected {
        return Err(Error::assertion(format!(
            "inverted year range was not rejected: {:?}",
            effect
        )));
    }
    settle(&config).await;

    let current = discover.get_movie_count().await.into_value();
    findings.note(format!("After invalid range: {} movies", current));
    findings.note("System handled invalid range without crashing");

    findings.passed()
}

/// Clicking the third rating star
pub async fn rating_filter(session: Arc<Session>, config: Arc<Config>) -> Result<Verdict> {
    let (discover, filters) = pages(&session, &config);
    let mut findings = Findings::new();

    let outcome = filters.set_rating(3).await;
    if let Some(cause) = outcome.cause() {
        findings.note(format!("Rating control unavailable: {}", cause));
    } else if *outcome.value() {
        findings.note("Rating set to 3 stars");
    } else {
        findings.note("Fewer than 3 rating stars rendered");
    }
    settle(&config).await;

    let count = discover.get_movie_count().await.into_value();
    findings.note(format!("After rating filter: {} movies", count));

    findings.passed()
}

/// Posters, titles and details lines are rendered for listed movies
pub async fn movie_card_elements(session: Arc<Session>, config: Arc<Config>) -> Result<Verdict> {
    let (discover, _) = pages(&session, &config);
    let mut findings = Findings::new();

    let posters = discover.get_poster_count().await.into_value();
    findings.note(format!("Found {} posters", posters));

    let titles = discover.get_movie_titles().await.into_value();
    findings.note(format!("Found {} titles", titles.len()));
    if !titles.is_empty() {
        findings.note(format!(
            "First titles: {:?}",
            titles.iter().take(3).collect::<Vec<_>>()
        ));
    }

    let cards = discover.get_movie_cards().await.into_value();
    for (i, card) in cards.iter().take(3).enumerate() {
        if !card.details.is_empty() {
            findings.note(format!("Movie {} description: {}", i + 1, card.details));
        }
    }

    if posters == 0 {
        findings.note("No movie posters found");
    }

    findings.passed()
}
