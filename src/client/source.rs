//! Page source trait
//!
//! The paginated counter only needs "give me page N for this state". Anything
//! that can answer that (the HTTP client, or an in-memory table in tests)
//! implements `PageSource`.

use async_trait::async_trait;

use super::brewery::BreweryResult;
use super::types::{PageResponse, StateQuery};

/// A paginated listing of breweries filtered by state
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch one page (1-based) of at most `per_page` records
    ///
    /// A non-success status is *not* an error: it is returned as a
    /// `PageResponse` so the caller can treat it as end of data.
    async fn fetch_page(
        &self,
        state: &StateQuery,
        page: u32,
        per_page: u32,
    ) -> BreweryResult<PageResponse>;
}
