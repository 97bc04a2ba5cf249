//! Pagination scenarios

use std::sync::Arc;

use super::{settle, Findings, Verdict};
use crate::config::Config;
use crate::element::WaitConfig;
use crate::pages::DiscoverPage;
use crate::session::Session;
use crate::Result;

/// Next then previous; page contents are compared
pub async fn pagination_navigation(session: Arc<Session>, config: Arc<Config>) -> Result<Verdict> {
    let discover = DiscoverPage::new(&session, WaitConfig::from(config.as_ref()));
    let mut findings = Findings::new();

    let first_page = discover.get_movie_titles().await.into_value();
    findings.note(format!("Page 1: {} movies", first_page.len()));

    if !discover.has_pagination().await {
        findings.note("No pagination found; single page listing");
        return findings.passed();
    }

    if !discover.click_next_page().await.into_value() {
        findings.note("Next button not available or disabled");
        return findings.passed();
    }
    settle(&config).await;

    let second_page = discover.get_movie_titles().await.into_value();
    findings.note(format!("Page 2: {} movies", second_page.len()));

    if second_page.is_empty() {
        findings.note("No movies found on page 2");
        return findings.passed();
    }

    if first_page.is_empty() {
        findings.note("Could not compare page content");
    } else if first_page != second_page {
        findings.note("Page 1 and page 2 have different content");
    } else {
        findings.note("Page 1 and page 2 have the same content");
    }

    if discover.click_previous_page().await.into_value() {
        settle(&config).await;
        findings.note("Returned to page 1");
    }

    findings.passed()
}

/// Previous is disabled on the first page and enabled after moving forward
pub async fn pagination_state(session: Arc<Session>, config: Arc<Config>) -> Result<Verdict> {
    let discover = DiscoverPage::new(&session, WaitConfig::from(config.as_ref()));
    let mut findings = Findings::new();

    if !discover.has_pagination().await {
        findings.note("No pagination found");
        return findings.passed();
    }

    let state = discover.pagination_state().await;
    findings.note(format!(
        "Page {} of visible {:?}",
        state.current_page, state.visible_pages
    ));
    if state.previous_enabled {
        findings.note("Previous button not disabled on first page");
    } else {
        findings.note("Previous button correctly disabled on first page");
    }

    for target in 2..=3 {
        if !discover.click_next_page().await.into_value() {
            findings.note(format!("Could not navigate to page {}", target));
            break;
        }
        settle(&config).await;
        findings.note(format!("Navigated to page {}", target));

        if discover.pagination_state().await.previous_enabled {
            findings.note("Previous button enabled after navigation");
        } else {
            findings.note("Previous button still disabled");
        }
    }

    session.navigate(&config.base_url).await?;
    findings.passed()
}

/// Jump to the highest numbered page link
pub async fn last_page_navigation(session: Arc<Session>, config: Arc<Config>) -> Result<Verdict> {
    let discover = DiscoverPage::new(&session, WaitConfig::from(config.as_ref()));
    let mut findings = Findings::new();

    if !discover.has_pagination().await {
        return Ok(Verdict::Skipped("No pagination found".to_string()));
    }

    let pages = discover.get_available_pages().await.into_value();
    let last = pages.iter().copied().max().unwrap_or(1);
    findings.note(format!("Found pages up to: {}", last));

    if last <= 1 {
        return Ok(Verdict::Skipped("Only one page available".to_string()));
    }

    let (_, cause) = discover.click_page(last).await.into_parts();
    if let Some(cause) = cause {
        return Err(cause);
    }
    settle(&config).await;

    let titles = discover.get_movie_titles().await.into_value();
    if titles.is_empty() {
        findings.note(format!("Page {} might be empty", last));
    } else {
        findings.note(format!("Navigated to page {}: {} movies", last, titles.len()));
    }

    findings.passed()
}
