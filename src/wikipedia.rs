//! Wikipedia summary aggregation.
//!
//! Uses reqwest against two endpoints: the REST summary endpoint for the
//! synopsis and the legacy query endpoint for coordinates, full-size images
//! and page language. The two responses are merged into a [`SubjectSummary`].

use crate::config::WikipediaConfig;
use crate::subject::{Coordinates, SubjectSummary};
use reqwest::{header, Client, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Fixed parameters of the details query; `titles` is appended per call.
const DETAILS_PARAMS: [(&str, &str); 9] = [
    ("action", "query"),
    ("format", "json"),
    ("formatversion", "2"),
    ("prop", "coordinates|pageimages|info|extracts"),
    ("inprop", "url"),
    ("exintro", "1"),
    ("explaintext", "1"),
    ("piprop", "thumbnail|original"),
    ("pithumbsize", "1200"),
];

#[derive(Error, Debug)]
pub enum WikiError {
    #[error("invalid endpoint URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {0}")]
    Status(u16),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Response of the REST summary endpoint (only the fields we read).
///
/// Every field decodes leniently: a value of the wrong type reads as absent
/// instead of failing the whole response.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RestSummary {
    #[serde(deserialize_with = "lenient")]
    title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    description: Option<String>,
    #[serde(deserialize_with = "lenient")]
    extract: Option<String>,
    #[serde(deserialize_with = "lenient")]
    thumbnail: Option<ImageSource>,
    #[serde(deserialize_with = "lenient")]
    content_urls: Option<ContentUrls>,
}

impl RestSummary {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.extract.is_none()
            && self.thumbnail.is_none()
            && self.content_urls.is_none()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ImageSource {
    #[serde(deserialize_with = "lenient")]
    source: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ContentUrls {
    #[serde(deserialize_with = "lenient")]
    desktop: Option<PageLink>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PageLink {
    #[serde(deserialize_with = "lenient")]
    page: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct QueryResponse {
    #[serde(deserialize_with = "lenient")]
    query: Option<QueryPages>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct QueryPages {
    /// Kept raw so only the first page is ever decoded
    #[serde(deserialize_with = "raw_list")]
    pages: Vec<Value>,
}

/// One page of the query endpoint's `query.pages` list
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PageDetails {
    /// Raw entries; only the first is decoded
    #[serde(deserialize_with = "raw_list")]
    coordinates: Vec<Value>,
    #[serde(deserialize_with = "lenient")]
    original: Option<ImageSource>,
    #[serde(deserialize_with = "lenient")]
    thumbnail: Option<ImageSource>,
    #[serde(deserialize_with = "lenient")]
    extract: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pagelanguage: Option<String>,
}

/// Decode a field, reading any value of the wrong shape as `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// Decode a list without looking at its entries. A non-list reads as empty.
fn raw_list<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items),
        _ => Ok(Vec::new()),
    }
}

/// Outcome of the summary step
#[derive(Debug)]
enum Lookup {
    Found(RestSummary),
    NotFound,
}

/// Client for the two Wikipedia endpoints.
///
/// Holds no per-call state; one instance can serve any number of lookups.
#[derive(Debug, Clone)]
pub struct WikiClient {
    client: Client,
    summary_url: Url,
    query_url: Url,
}

impl WikiClient {
    /// Build a client with the configured endpoints, user agent and timeout.
    pub fn new(config: &WikipediaConfig) -> Result<Self, WikiError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let summary_url = parse_base(&config.summary_url)?;
        if summary_url.cannot_be_a_base() {
            return Err(WikiError::InvalidUrl {
                url: config.summary_url.clone(),
                reason: "summary URL cannot take path segments".to_string(),
            });
        }

        Ok(Self {
            client,
            summary_url,
            query_url: parse_base(&config.query_url)?,
        })
    }

    /// Fetch and merge everything Wikipedia knows about `title`.
    ///
    /// Never fails: an unreachable or unknown page yields
    /// [`SubjectSummary::not_found`], and a failed details query only drops
    /// the details-only fields.
    pub async fn get_summary(&self, title: &str) -> SubjectSummary {
        let summary = match self.lookup_summary(title).await {
            Lookup::Found(summary) => summary,
            Lookup::NotFound => return SubjectSummary::not_found(title),
        };

        let page_title = non_empty(summary.title.clone()).unwrap_or_else(|| title.to_string());

        let details = match self.fetch_details(&page_title).await {
            Ok(Some(details)) => details,
            Ok(None) => {
                debug!(title = %page_title, "query endpoint returned no pages");
                PageDetails::default()
            }
            Err(e) => {
                warn!(title = %page_title, error = %e, "details lookup failed");
                PageDetails::default()
            }
        };

        merge(page_title, summary, details)
    }

    /// Aggregate several titles one after another, preserving order.
    pub async fn get_summaries<S: AsRef<str>>(&self, titles: &[S]) -> Vec<SubjectSummary> {
        let mut results = Vec::with_capacity(titles.len());
        for title in titles {
            results.push(self.get_summary(title.as_ref()).await);
        }
        results
    }

    async fn lookup_summary(&self, title: &str) -> Lookup {
        match self.fetch_summary(title).await {
            Ok(summary) if summary.is_empty() => {
                debug!(title, "summary endpoint returned an empty object");
                Lookup::NotFound
            }
            Ok(summary) => Lookup::Found(summary),
            Err(e) => {
                warn!(title, error = %e, "summary lookup failed");
                Lookup::NotFound
            }
        }
    }

    async fn fetch_summary(&self, title: &str) -> Result<RestSummary, WikiError> {
        let url = self.summary_url_for(title)?;
        debug!(url = %url, "fetching summary");

        let body = self.get_text(url).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn fetch_details(&self, title: &str) -> Result<Option<PageDetails>, WikiError> {
        let mut url = self.query_url.clone();
        url.query_pairs_mut()
            .extend_pairs(DETAILS_PARAMS)
            .append_pair("titles", title);
        debug!(url = %url, "fetching details");

        let body = self.get_text(url).await?;
        let response: QueryResponse = serde_json::from_str(&body)?;
        let first = response.query.and_then(|q| q.pages.into_iter().next());
        // A first page that is not an object still counts as a page with no data.
        Ok(first.map(|page| PageDetails::deserialize(page).unwrap_or_default()))
    }

    async fn get_text(&self, url: Url) -> Result<String, WikiError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(WikiError::Status(status.as_u16()));
        }
        Ok(response.text().await?)
    }

    fn summary_url_for(&self, title: &str) -> Result<Url, WikiError> {
        let mut url = self.summary_url.clone();
        url.path_segments_mut()
            .map_err(|()| WikiError::InvalidUrl {
                url: self.summary_url.to_string(),
                reason: "summary URL cannot take path segments".to_string(),
            })?
            .pop_if_empty()
            .push(&title.replace(' ', "_"));
        Ok(url)
    }
}

fn parse_base(raw: &str) -> Result<Url, WikiError> {
    Url::parse(raw).map_err(|e| WikiError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

/// Combine both responses, preferring the summary endpoint where both have a field.
fn merge(title: String, summary: RestSummary, details: PageDetails) -> SubjectSummary {
    let source = |image: Option<ImageSource>| image.and_then(|i| non_empty(i.source));

    SubjectSummary {
        title,
        description: summary.description,
        extract: non_empty(summary.extract)
            .or(details.extract)
            .unwrap_or_default(),
        image: source(summary.thumbnail)
            .or_else(|| source(details.thumbnail))
            .unwrap_or_default(),
        original_image: source(details.original).unwrap_or_default(),
        url: summary
            .content_urls
            .and_then(|c| c.desktop)
            .and_then(|d| d.page)
            .unwrap_or_default(),
        coordinates: details
            .coordinates
            .into_iter()
            .next()
            .and_then(|first| Coordinates::deserialize(first).ok()),
        lang: details.pagelanguage,
        found: true,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
