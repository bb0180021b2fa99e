//! Open Brewery DB HTTP Client
//!
//! Typed client for the brewery listing endpoint:
//! `GET /v1/breweries?by_state={state}&per_page={n}&page={p}`

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

use super::source::PageSource;
use super::types::{Brewery, PageResponse, StateQuery};

/// Default listing endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.openbrewerydb.org/v1/breweries";

/// Per-request timeout; bounds a single page call, not a whole state
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Errors that can occur when talking to the brewery API
#[derive(Debug, Error)]
pub enum BreweryError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to decode page: {0}")]
    Decode(String),
}

/// Result type for brewery API operations
pub type BreweryResult<T> = Result<T, BreweryError>;

/// Client for the brewery listing endpoint
///
/// # Example
/// ```no_run
/// use brewcount::client::{BreweryClient, PageSource, StateQuery};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = BreweryClient::new("https://api.openbrewerydb.org/v1/breweries")?;
/// let page = client.fetch_page(&StateQuery::from("maryland"), 1, 200).await?;
/// println!("{} breweries on page 1", page.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BreweryClient {
    /// Listing endpoint (e.g., https://api.openbrewerydb.org/v1/breweries)
    base_url: Url,
    client: Client,
    timeout: Duration,
}

impl BreweryClient {
    /// Create a client for the given listing endpoint with the default timeout
    pub fn new(base_url: &str) -> BreweryResult<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom per-request timeout
    pub fn with_timeout(base_url: &str, timeout: Duration) -> BreweryResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: Url::parse(base_url)?,
            client,
            timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Build the URL for one page of a state's listing
    pub fn page_url(&self, state: &StateQuery, page: u32, per_page: u32) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("by_state", state.as_str())
            .append_pair("per_page", &per_page.to_string())
            .append_pair("page", &page.to_string());
        url
    }
}

#[async_trait]
impl PageSource for BreweryClient {
    async fn fetch_page(
        &self,
        state: &StateQuery,
        page: u32,
        per_page: u32,
    ) -> BreweryResult<PageResponse> {
        let url = self.page_url(state, page, per_page);
        let response = self.client.get(url).send().await?;
        let status = response.status();

        // Only a 200 carries a page of records; any other status ends the listing
        if status != StatusCode::OK {
            debug!(state = %state, page, status = status.as_u16(), "Non-200 page status");
            return Ok(PageResponse::with_status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let breweries: Vec<Brewery> =
            serde_json::from_slice(&body).map_err(|e| BreweryError::Decode(e.to_string()))?;

        debug!(state = %state, page, records = breweries.len(), "Fetched page");
        Ok(PageResponse {
            status: status.as_u16(),
            breweries,
        })
    }
}
