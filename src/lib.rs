//! Discover-QA: browser test harness for the TMDB Discover site
//!
//! This library provides driver acquisition, a scoped browser session, page objects
//! for the Discover listing, and a scenario runner that produces console and JSON reports.

pub mod error;
pub mod config;
pub mod logging;

pub mod webdriver;
pub mod session;
pub mod stealth;
pub mod driver;
pub mod element;
pub mod outcome;
pub mod pages;
pub mod report;
pub mod scenarios;

// Re-exports
pub use error::{Error, Result};

/// Discover-QA library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Local time as `YYYYMMDD_HHMMSS`, used in artifact file names
pub fn timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}
