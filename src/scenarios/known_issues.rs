//! Scenarios for documented site defects
//!
//! These assert the behavior the site should have. They are registered with a
//! known issue, so a failure is reported as expected.

use std::sync::Arc;

use super::navigation::category_url;
use super::{settle, Findings, Verdict};
use crate::config::Config;
use crate::element::WaitConfig;
use crate::pages::{Category, DiscoverPage};
use crate::session::Session;
use crate::{Error, Result};

/// Share of listed movies from 2020 on below which the year filter is considered broken
const RECENT_SHARE_THRESHOLD: f64 = 50.0;

/// Listings with at most this many labelled pages are too short to test deep pages
const MIN_DEEP_PAGES: u32 = 10;

/// Deepest page requested, however many the listing advertises
const MAX_DEEP_PAGE: u32 = 100;

/// A category route opened directly shows that category
pub async fn direct_url_access_issue(session: Arc<Session>, config: Arc<Config>) -> Result<Verdict> {
    let mut findings = Findings::new();

    session
        .navigate(&category_url(&config.base_url, Category::Popular))
        .await?;
    settle(&config).await;

    let current_url = session.current_url().await?;
    let source = session.page_source().await?.to_lowercase();

    if !source.contains("popular") && !current_url.contains("popular") {
        return Err(Error::assertion(format!(
            "direct route {} did not render the Popular listing",
            current_url
        )));
    }

    findings.note("Direct URL access rendered the Popular listing");
    findings.passed()
}

/// Most listed movies are recent
pub async fn year_filter_issue(session: Arc<Session>, config: Arc<Config>) -> Result<Verdict> {
    let discover = DiscoverPage::new(&session, WaitConfig::from(config.as_ref()));
    let mut findings = Findings::new();

    let years = discover.get_movie_years().await.into_value();
    if years.is_empty() {
        findings.note("No years listed");
        return findings.passed();
    }

    let recent = years.iter().filter(|y| **y >= 2020).count();
    let share = recent as f64 / years.len() as f64 * 100.0;
    findings.note(format!("Recent movies (2020+): {:.1}%", share));

    if share < RECENT_SHARE_THRESHOLD {
        return Err(Error::assertion(format!(
            "many old movies shown: {:.1}% recent",
            share
        )));
    }

    findings.passed()
}

/// A deep page of the listing opens from its labelled link
pub async fn last_page_pagination_issue(session: Arc<Session>, config: Arc<Config>) -> Result<Verdict> {
    let discover = DiscoverPage::new(&session, WaitConfig::from(config.as_ref()));
    let mut findings = Findings::new();

    let (pages, cause) = discover.get_labelled_pages().await.into_parts();
    if let Some(cause) = cause {
        if pages.is_empty() {
            return Ok(Verdict::Skipped("No page elements found".to_string()));
        }
        return Err(cause);
    }

    let highest = pages.iter().copied().max().unwrap_or(0);
    findings.note(format!("Highest labelled page: {}", highest));
    if highest <= MIN_DEEP_PAGES {
        return Ok(Verdict::Skipped("Not enough pages to test".to_string()));
    }

    let target = highest.min(MAX_DEEP_PAGE);
    let (_, cause) = discover.click_labelled_page(target).await.into_parts();
    if let Some(cause) = cause {
        return Err(Error::assertion(format!("page navigation issue: {}", cause)));
    }
    settle(&config).await;

    let title = session.title().await?;
    if title.is_empty() && session.page_source().await?.is_empty() {
        return Err(Error::assertion(format!("page {} rendered nothing", target)));
    }

    findings.note(format!("Opened page {}", target));
    findings.passed()
}
