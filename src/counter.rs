//! Paginated brewery counter
//!
//! Walks a state's listing page by page, summing record counts until the
//! upstream signals the end of data (an empty page or a non-success status).
//! Transport and decoding failures stop the walk early and keep the partial
//! count; they are never propagated to the caller.
//!
//! Pages are requested strictly in order: page N+1 is only requested once
//! page N is known to be non-terminal.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

use crate::client::{MAX_PER_PAGE, PageSource, StateQuery};

/// Brewery count for one state
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BreweryCountResult {
    pub state: String,
    pub brewery_count: u64,
}

/// Why pagination for a state stopped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum StopReason {
    /// The upstream returned an empty page
    EmptyPage,
    /// The upstream returned a non-success status
    Status { code: u16 },
    /// A request or decode failed; the count is partial
    Failed { error: String },
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::EmptyPage => write!(f, "empty page"),
            StopReason::Status { code } => write!(f, "status {code}"),
            StopReason::Failed { error } => write!(f, "failed: {error}"),
        }
    }
}

/// Outcome of counting one state
///
/// `result` always holds a usable count. `stop` tells a complete count apart
/// from one truncated by a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateCount {
    pub result: BreweryCountResult,
    /// Number of non-empty pages summed into the count
    pub pages_fetched: u32,
    pub stop: StopReason,
}

impl StateCount {
    /// A zero count for a state whose task never produced a result
    pub fn failed(state: &StateQuery, error: impl Into<String>) -> Self {
        Self {
            result: BreweryCountResult {
                state: state.to_string(),
                brewery_count: 0,
            },
            pages_fetched: 0,
            stop: StopReason::Failed {
                error: error.into(),
            },
        }
    }

    /// True unless a failure cut pagination short
    pub fn is_complete(&self) -> bool {
        !matches!(self.stop, StopReason::Failed { .. })
    }

    pub fn brewery_count(&self) -> u64 {
        self.result.brewery_count
    }

    pub fn into_result(self) -> BreweryCountResult {
        self.result
    }
}

/// Count breweries for `state` using the maximum page size
pub async fn count_breweries<S>(source: &S, state: &StateQuery) -> StateCount
where
    S: PageSource + ?Sized,
{
    count_breweries_paged(source, state, MAX_PER_PAGE).await
}

/// Count breweries for `state`, requesting `per_page` records per call
pub async fn count_breweries_paged<S>(
    source: &S,
    state: &StateQuery,
    per_page: u32,
) -> StateCount
where
    S: PageSource + ?Sized,
{
    info!(state = %state, per_page, "Counting breweries");

    let mut count: u64 = 0;
    let mut page: u32 = 1;

    let stop = loop {
        match source.fetch_page(state, page, per_page).await {
            Ok(response) if !response.is_success() => {
                warn!(
                    state = %state,
                    page,
                    status = response.status,
                    "Upstream returned non-success status"
                );
                break StopReason::Status {
                    code: response.status,
                };
            }
            Ok(response) if response.is_empty() => {
                debug!(state = %state, page, "Empty page, done");
                break StopReason::EmptyPage;
            }
            Ok(response) => {
                count += response.len() as u64;
                debug!(
                    state = %state,
                    page,
                    records = response.len(),
                    total = count,
                    "Page counted"
                );
                page += 1;
            }
            Err(e) => {
                warn!(
                    state = %state,
                    page,
                    error = %e,
                    partial_count = count,
                    "Failed to fetch page"
                );
                break StopReason::Failed {
                    error: e.to_string(),
                };
            }
        }
    };

    info!(state = %state, brewery_count = count, stop = %stop, "Finished counting");

    StateCount {
        result: BreweryCountResult {
            state: state.to_string(),
            brewery_count: count,
        },
        pages_fetched: page - 1,
        stop,
    }
}
