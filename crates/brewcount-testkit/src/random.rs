//! Seeded brewery record generation
//!
//! Produces reproducible fake brewery records for mock API pages.
//! Using the same seed produces identical records, making tests
//! deterministic and failures reproducible.
//!
//! # Example
//!
//! ```rust
//! use brewcount_testkit::random::PseudoGenerator;
//!
//! let mut rng1 = PseudoGenerator::new(42);
//! let mut rng2 = PseudoGenerator::new(42);
//!
//! // Same seed produces same output
//! assert_eq!(rng1.breweries("maryland", 10), rng2.breweries("maryland", 10));
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{Value, json};

const BREWERY_TYPES: [&str; 6] = ["micro", "nano", "regional", "brewpub", "planning", "contract"];

const NAME_PARTS: [&str; 8] = [
    "Hop", "Barrel", "Anchor", "Granite", "Copper", "Harbor", "Foggy", "Union",
];

/// Seeded pseudo-random generator for reproducible test data
#[derive(Debug)]
pub struct PseudoGenerator {
    rng: StdRng,
    seed: u64,
    next_id: u64,
}

impl PseudoGenerator {
    /// Create a new generator with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
            next_id: 0,
        }
    }

    /// Get the seed used to create this generator
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random usize in the given range
    pub fn random_range(&mut self, range: std::ops::Range<usize>) -> usize {
        self.rng.random_range(range)
    }

    /// One brewery record in the upstream JSON shape
    pub fn brewery(&mut self, state: &str) -> Value {
        self.next_id += 1;
        let first = NAME_PARTS[self.rng.random_range(0..NAME_PARTS.len())];
        let second = NAME_PARTS[self.rng.random_range(0..NAME_PARTS.len())];
        let brewery_type = BREWERY_TYPES[self.rng.random_range(0..BREWERY_TYPES.len())];
        let latitude: f64 = self.rng.random_range(25.0..49.0);
        let longitude: f64 = self.rng.random_range(-124.0..-67.0);

        json!({
            "id": format!("{:016x}-{}", self.seed, self.next_id),
            "name": format!("{first} {second} Brewing"),
            "brewery_type": brewery_type,
            "address_1": format!("{} Main St", self.rng.random_range(1..9999)),
            "city": "Springfield",
            "state_province": state,
            "postal_code": format!("{:05}", self.rng.random_range(10000..99999)),
            "country": "United States",
            "longitude": longitude,
            "latitude": latitude,
            "phone": null,
            "website_url": null,
            "state": state,
            "street": null,
        })
    }

    /// `count` brewery records for one page
    pub fn breweries(&mut self, state: &str, count: usize) -> Vec<Value> {
        (0..count).map(|_| self.brewery(state)).collect()
    }

    /// Split `total` records into page sizes of at most `per_page`
    ///
    /// `page_sizes(430, 200)` is `[200, 200, 30]`.
    pub fn page_sizes(total: usize, per_page: usize) -> Vec<usize> {
        let mut sizes = vec![per_page; total / per_page];
        if total % per_page != 0 {
            sizes.push(total % per_page);
        }
        sizes
    }

    /// A random total split into full pages of `per_page`
    pub fn random_pages(&mut self, max_total: usize, per_page: usize) -> Vec<usize> {
        let total = self.random_range(0..max_total + 1);
        Self::page_sizes(total, per_page)
    }
}
