//! Menu extraction service client
//!
//! This module fetches the daily cafeteria menu from the configured
//! extraction endpoint and parses it into our menu data structures.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::icons::attribute_code;
use super::{FetchReason, FetchResult, MenuItem};

/// Default bound on a single fetch request, in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Sentinel code the extraction service returns when its monthly
/// request quota is exhausted
const QUOTA_EXCEEDED_CODE: i64 = 1001;

/// Errors that can occur when fetching the menu
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed (includes timeouts)
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse the response body as extractor JSON
    #[error("Failed to parse extractor response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Response parsed but lacks an expected structural field
    #[error("Missing expected field in response: {0}")]
    MissingField(String),

    /// An item record is missing its text entries
    #[error("Malformed menu record: {0}")]
    MalformedRecord(String),
}

/// Source of menu fetches
///
/// The cache refreshes through this trait so tests can substitute a stub
/// and count upstream calls.
#[async_trait]
pub trait MenuSource: Send + Sync {
    /// Performs one fetch against the extraction service
    async fn fetch_menu(&self) -> Result<FetchResult, FetchError>;
}

/// Client for fetching the menu from the extraction service
#[derive(Debug, Clone)]
pub struct MenuClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Extraction service endpoint URL
    endpoint_url: String,
    /// Bound on a single request
    timeout: Duration,
}

impl MenuClient {
    /// Creates a new MenuClient for the given endpoint URL
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            endpoint_url: endpoint_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Creates a new MenuClient with a custom request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fetches and parses the menu from the extraction service
    ///
    /// # Returns
    /// * `Ok(FetchResult)` - A parsed menu, or an empty one with
    ///   `FetchReason::QuotaExceeded` when the service reports quota
    ///   exhaustion
    /// * `Err(FetchError)` - If the request fails, times out, or the body
    ///   cannot be parsed
    pub async fn fetch(&self) -> Result<FetchResult, FetchError> {
        let response = self
            .http_client
            .get(&self.endpoint_url)
            .timeout(self.timeout)
            .send()
            .await?;
        let body = response.text().await?;

        parse_response(&body)
    }
}

#[async_trait]
impl MenuSource for MenuClient {
    async fn fetch_menu(&self) -> Result<FetchResult, FetchError> {
        self.fetch().await
    }
}

/// Parses an extractor response body into a FetchResult
///
/// Split out from the HTTP call so the parsing can be tested against
/// fixture bodies.
fn parse_response(body: &str) -> Result<FetchResult, FetchError> {
    let response: ExtractorResponse = serde_json::from_str(body)?;

    if response.code == Some(QUOTA_EXCEEDED_CODE) {
        return Ok(FetchResult {
            items: Vec::new(),
            reason: FetchReason::QuotaExceeded,
        });
    }

    let data = response
        .extractor_data
        .ok_or_else(|| FetchError::MissingField("extractorData".to_string()))?;
    let page = data
        .data
        .first()
        .ok_or_else(|| FetchError::MissingField("extractorData.data".to_string()))?;

    let items = page
        .group
        .iter()
        .map(map_record)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FetchResult {
        items,
        reason: FetchReason::Success,
    })
}

/// Maps a raw extractor record to a MenuItem
///
/// A record missing its text entries fails the whole fetch rather than
/// being dropped from the menu.
fn map_record(record: &RawMenuRecord) -> Result<MenuItem, FetchError> {
    let name = first_text(&record.item, "Item")?;
    let price = first_text(&record.price, "Price")?;
    let description = first_text(&record.description, "Description")?;

    // Unmapped icon URLs contribute nothing; order of the rest is preserved.
    let attributes = record
        .attributes
        .iter()
        .filter_map(|attr| attribute_code(&attr.src))
        .map(str::to_string)
        .collect();

    Ok(MenuItem {
        name,
        price,
        description,
        attributes,
    })
}

/// Takes the first text entry of a record field
fn first_text(entries: &[TextEntry], field: &str) -> Result<String, FetchError> {
    entries
        .first()
        .map(|entry| entry.text.clone())
        .ok_or_else(|| FetchError::MalformedRecord(format!("no text entries for {}", field)))
}

/// Top-level extractor response
#[derive(Debug, Deserialize)]
struct ExtractorResponse {
    /// Error code; 1001 means the monthly quota is exhausted
    #[serde(default)]
    code: Option<i64>,
    #[serde(rename = "extractorData", default)]
    extractor_data: Option<ExtractorData>,
}

/// Extractor payload wrapper
#[derive(Debug, Deserialize)]
struct ExtractorData {
    #[serde(default)]
    data: Vec<ExtractorPage>,
}

/// A single extracted page; the menu lives in its `group` array
#[derive(Debug, Deserialize)]
struct ExtractorPage {
    #[serde(default)]
    group: Vec<RawMenuRecord>,
}

/// A raw menu item record from the extractor
#[derive(Debug, Deserialize)]
struct RawMenuRecord {
    #[serde(rename = "Item", default)]
    item: Vec<TextEntry>,
    #[serde(rename = "Price", default)]
    price: Vec<TextEntry>,
    #[serde(rename = "Description", default)]
    description: Vec<TextEntry>,
    #[serde(rename = "Attributes", default)]
    attributes: Vec<IconEntry>,
}

/// A text payload entry within a record field
#[derive(Debug, Deserialize)]
struct TextEntry {
    text: String,
}

/// An attribute icon reference on a record
#[derive(Debug, Deserialize)]
struct IconEntry {
    src: String,
}
