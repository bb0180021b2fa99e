//! Mock brewery API for tests
//!
//! Serves the brewery listing endpoint over real HTTP with `wiremock`, so
//! tests can drive the client and counter end to end without the network.
//!
//! Each mounted page expects a fixed number of requests (one unless stated);
//! the server checks those expectations when it is dropped.
//!
//! # Example
//!
//! ```no_run
//! use brewcount_testkit::mock::MockBreweryApi;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let api = MockBreweryApi::start().await;
//! // 200 records, then 30, then an empty page
//! api.mount_pages("maryland", &[200, 30]).await;
//! assert!(api.base_url().ends_with("/v1/breweries"));
//! # }
//! ```

use serde_json::Value;
use std::time::Duration;
use tokio::sync::Mutex;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::random::PseudoGenerator;

/// Path of the listing endpoint on the mock server
pub const LIST_PATH: &str = "/v1/breweries";

/// A page request seen by the mock server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub state: String,
    pub page: u32,
    pub per_page: u32,
}

/// Mock Open Brewery DB listing endpoint
pub struct MockBreweryApi {
    server: MockServer,
    rng: Mutex<PseudoGenerator>,
}

impl MockBreweryApi {
    /// Start a mock server with the default record seed
    pub async fn start() -> Self {
        Self::start_with_seed(42).await
    }

    /// Start a mock server whose records come from `seed`
    pub async fn start_with_seed(seed: u64) -> Self {
        Self {
            server: MockServer::start().await,
            rng: Mutex::new(PseudoGenerator::new(seed)),
        }
    }

    /// Listing endpoint URL to hand to the client
    pub fn base_url(&self) -> String {
        format!("{}{}", self.server.uri(), LIST_PATH)
    }

    /// The underlying wiremock server, for custom mocks
    pub fn server(&self) -> &MockServer {
        &self.server
    }

    /// Serve `pages` (record counts) for `state`, followed by an empty page
    pub async fn mount_pages(&self, state: &str, pages: &[usize]) {
        self.mount_pages_delayed(state, pages, Duration::ZERO).await;
    }

    /// Like `mount_pages`, with every response (including the final empty page) delayed
    pub async fn mount_pages_delayed(&self, state: &str, pages: &[usize], delay: Duration) {
        self.mount_pages_for_passes(state, pages, delay, 1).await;
    }

    /// Serve the same pages for `passes` full walks of the state's listing
    ///
    /// Each page (and the final empty page) expects exactly `passes` requests.
    pub async fn mount_pages_for_passes(
        &self,
        state: &str,
        pages: &[usize],
        delay: Duration,
        passes: u64,
    ) {
        for (i, &count) in pages.iter().enumerate() {
            let records = self.rng.lock().await.breweries(state, count);
            self.mount_json(state, i as u32 + 1, records, delay, passes)
                .await;
        }
        self.mount_json(state, pages.len() as u32 + 1, Vec::new(), delay, passes)
            .await;
    }

    /// Serve a single page of `count` records without a terminating empty page
    pub async fn mount_page(&self, state: &str, page: u32, count: usize) {
        let records = self.rng.lock().await.breweries(state, count);
        self.mount_json(state, page, records, Duration::ZERO, 1).await;
    }

    /// Answer one page with a bare status code
    pub async fn mount_status(&self, state: &str, page: u32, status: u16) {
        page_mock(state, page)
            .respond_with(ResponseTemplate::new(status))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Answer one page with a 200 whose body is not a JSON array of records
    pub async fn mount_malformed(&self, state: &str, page: u32) {
        page_mock(state, page)
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Answer one page only after `delay` (longer than the client timeout to simulate a hang)
    pub async fn mount_stalled(&self, state: &str, page: u32, delay: Duration) {
        page_mock(state, page)
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(Vec::<Value>::new())
                    .set_delay(delay),
            )
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Every listing request received so far, in arrival order
    pub async fn page_requests(&self) -> Vec<PageRequest> {
        let requests = self.server.received_requests().await.unwrap_or_default();

        requests
            .iter()
            .filter(|r| r.url.path() == LIST_PATH)
            .map(|r| {
                let mut req = PageRequest {
                    state: String::new(),
                    page: 0,
                    per_page: 0,
                };
                for (key, value) in r.url.query_pairs() {
                    match key.as_ref() {
                        "by_state" => req.state = value.into_owned(),
                        "page" => req.page = value.parse().unwrap_or(0),
                        "per_page" => req.per_page = value.parse().unwrap_or(0),
                        _ => {}
                    }
                }
                req
            })
            .collect()
    }

    /// Pages requested for `state`, in arrival order
    pub async fn pages_requested(&self, state: &str) -> Vec<u32> {
        self.page_requests()
            .await
            .into_iter()
            .filter(|r| r.state == state)
            .map(|r| r.page)
            .collect()
    }

    async fn mount_json(
        &self,
        state: &str,
        page: u32,
        records: Vec<Value>,
        delay: Duration,
        expected: u64,
    ) {
        page_mock(state, page)
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(records)
                    .set_delay(delay),
            )
            .expect(expected)
            .mount(&self.server)
            .await;
    }
}

fn page_mock(state: &str, page: u32) -> wiremock::MockBuilder {
    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .and(query_param("by_state", state))
        .and(query_param("page", page.to_string()))
}
