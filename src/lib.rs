//! brewcount - Brewery counts per US state
//!
//! Counts breweries per state from the [Open Brewery DB](https://www.openbrewerydb.org/)
//! listing API, and measures how much faster counting a list of states is
//! when every state is fetched concurrently instead of one at a time.
//!
//! ## Modules
//!
//! - [`client`] - HTTP client for the brewery listing endpoint
//! - [`counter`] - Paginated count for a single state
//! - [`fanout`] - Concurrent and sequential passes over a state list
//! - [`report`] - The `async.json` run report
//! - [`busywork`] - Standalone blocking sleep demo
//! - `config` - Configuration parsing
//! - `utils` - Concurrent task helpers

pub mod busywork;
pub mod client;
pub mod config;
pub mod counter;
pub mod fanout;
pub mod report;
pub mod utils;

#[cfg(test)]
mod test_utils;
