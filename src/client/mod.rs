//! Brewery API Client
//!
//! Hand-written client for the Open Brewery DB listing endpoint, plus the
//! `PageSource` seam the counter is written against.

mod brewery;
mod source;
mod types;

pub use brewery::{BreweryClient, BreweryError, BreweryResult, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use source::PageSource;
pub use types::*;
