//! Configuration parsing
//!
//! Handles parsing of the brewcount configuration file.
//!
//! ## Configuration Format
//!
//! ```yaml
//! api:
//!   base_url: https://api.openbrewerydb.org/v1/breweries
//!   per_page: 200
//!   timeout: 15s
//!
//! states:
//!   - district_of_columbia
//!   - maryland
//!   - new_york
//!   - virginia
//!
//! output: async.json
//! ```
//!
//! Every key is optional; missing keys take the values shown above.

mod settings;

pub use settings::{ApiConfig, Config, ConfigError};
