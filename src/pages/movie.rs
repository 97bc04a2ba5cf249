//! Movie card parsing
//!
//! Each card renders a title line and a details line such as `"Horror, 2024"`
//! or just `"2024"`.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Earliest year accepted
pub const MIN_YEAR: i32 = 1900;

/// Latest year accepted
pub const MAX_YEAR: i32 = 2100;

static YEAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(19|20)\d{2}\b").expect("year pattern is valid"));

/// A movie card as rendered on the Discover page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieCard {
    pub title: String,
    pub year: Option<i32>,
    pub genre: Option<String>,
    pub details: String,
}

impl MovieCard {
    /// Build a card from its title and details lines
    pub fn parse(title: &str, details: &str) -> Self {
        let genre = details
            .split_once(',')
            .map(|(genre, _)| genre.trim())
            .filter(|genre| !genre.is_empty())
            .map(str::to_string);

        Self {
            title: title.trim().to_string(),
            year: extract_year(details),
            genre,
            details: details.trim().to_string(),
        }
    }
}

/// First `19xx`/`20xx` word anywhere in `text`
pub fn year_from_text_anywhere(text: &str) -> Option<i32> {
    YEAR_PATTERN
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
}

/// `text` that is exactly a four-digit year in range
pub fn year_from_bare_text(text: &str) -> Option<i32> {
    let trimmed = text.trim();
    if trimmed.len() != 4 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    trimmed
        .parse()
        .ok()
        .filter(|year| (MIN_YEAR..=MAX_YEAR).contains(year))
}

/// Year shown on a card, if any
pub fn extract_year(text: &str) -> Option<i32> {
    year_from_text_anywhere(text).or_else(|| year_from_bare_text(text))
}
