//! SubjectSummary struct - the normalized record produced by the aggregator.

use serde::{Deserialize, Serialize};

/// Extract used when Wikipedia has nothing for a title.
pub const NOT_FOUND_EXTRACT: &str = "No information found on Wikipedia.";

/// Geographic position reported by the query endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Merged view of one Wikipedia page.
///
/// Every field is always populated with something renderable: missing URLs
/// are empty strings and missing optional data is `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectSummary {
    /// Canonical title as resolved by Wikipedia
    pub title: String,
    /// Short description, e.g. "Football stadium in London"
    pub description: Option<String>,
    /// Plain-text intro paragraph
    pub extract: String,
    /// Thumbnail image URL
    pub image: String,
    /// Full-resolution image URL
    pub original_image: String,
    /// Desktop page URL
    pub url: String,
    pub coordinates: Option<Coordinates>,
    /// Page language code
    pub lang: Option<String>,
    /// Set only by the aggregator when the summary endpoint answered
    #[serde(default)]
    pub(crate) found: bool,
}

impl SubjectSummary {
    /// The record returned when no summary could be retrieved for `title`.
    pub fn not_found(title: &str) -> Self {
        Self {
            title: title.to_string(),
            description: None,
            extract: NOT_FOUND_EXTRACT.to_string(),
            image: String::new(),
            original_image: String::new(),
            url: String::new(),
            coordinates: None,
            lang: None,
            found: false,
        }
    }

    /// Whether this record came from Wikipedia rather than the fallback.
    pub fn is_found(&self) -> bool {
        self.found
    }
}
