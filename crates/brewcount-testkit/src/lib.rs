//! brewcount Test Kit
//!
//! Test infrastructure for the brewery counter.
//!
//! This crate provides:
//! - A mock brewery listing API served over HTTP (`wiremock`)
//! - Seeded fake brewery records for reproducible pages
//!
//! # Example
//!
//! ```rust
//! use brewcount_testkit::random::PseudoGenerator;
//!
//! // Create reproducible random generator
//! let mut rng = PseudoGenerator::new(12345);
//!
//! // Generate one page of records
//! let page = rng.breweries("maryland", 200);
//! assert_eq!(page.len(), 200);
//! ```

pub mod mock;
pub mod random;

// Re-exports for convenience
pub use mock::{MockBreweryApi, PageRequest};
pub use random::PseudoGenerator;
