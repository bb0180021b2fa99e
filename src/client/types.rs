//! Brewery API Types
//!
//! Records returned by the Open Brewery DB listing endpoint.
//! Only the number of records on a page is consumed; fields are decoded
//! leniently so schema drift upstream never breaks a count.

use serde::{Deserialize, Deserializer, Serialize};

/// Maximum number of records the upstream API returns per call
pub const MAX_PER_PAGE: u32 = 200;

/// A US state name as accepted by the `by_state` filter
///
/// Free-form and case-insensitive upstream; not validated against a list of
/// states. Underscores or spaces both work (`new_york`, `New York`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateQuery(String);

impl StateQuery {
    pub fn new(state: impl Into<String>) -> Self {
        Self(state.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse a comma-separated list, skipping blank entries
    pub fn parse_list(list: &str) -> Vec<Self> {
        Self::from_args(list.split(','))
    }

    /// Trim each name and drop blank ones
    ///
    /// An empty `by_state` filter would page through every brewery, so blank
    /// names never become queries.
    pub fn from_args<I, S>(names: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .filter_map(|name| {
                let name = name.as_ref().trim();
                (!name.is_empty()).then(|| Self::new(name))
            })
            .collect()
    }
}

impl std::fmt::Display for StateQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StateQuery {
    fn from(state: &str) -> Self {
        Self::new(state)
    }
}

impl From<String> for StateQuery {
    fn from(state: String) -> Self {
        Self(state)
    }
}

/// A single brewery record
///
/// Every field is optional and unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Brewery {
    pub id: Option<String>,
    pub name: Option<String>,
    /// micro, nano, regional, brewpub, planning, closed, ...
    pub brewery_type: Option<String>,
    pub address_1: Option<String>,
    pub city: Option<String>,
    pub state_province: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    #[serde(deserialize_with = "lenient_coordinate")]
    pub longitude: Option<f64>,
    #[serde(deserialize_with = "lenient_coordinate")]
    pub latitude: Option<f64>,
    pub phone: Option<String>,
    pub website_url: Option<String>,
    pub state: Option<String>,
    pub street: Option<String>,
}

/// Coordinates arrive as numbers or as numeric strings depending on API version
fn lenient_coordinate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Coordinate {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<Coordinate>::deserialize(deserializer)? {
        Some(Coordinate::Number(n)) => Some(n),
        Some(Coordinate::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

/// One page of the listing, as seen by the paginated counter
#[derive(Debug, Clone, PartialEq)]
pub struct PageResponse {
    /// HTTP status code of the response
    pub status: u16,
    /// Decoded records (always empty for non-success statuses)
    pub breweries: Vec<Brewery>,
}

impl PageResponse {
    /// A successful page carrying the given records
    pub fn ok(breweries: Vec<Brewery>) -> Self {
        Self {
            status: 200,
            breweries,
        }
    }

    /// A page that came back with a non-success status
    pub fn with_status(status: u16) -> Self {
        Self {
            status,
            breweries: Vec::new(),
        }
    }

    /// Whether the status is 200, the only status that carries records
    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    /// Number of records on this page
    pub fn len(&self) -> usize {
        self.breweries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.breweries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_state_list() {
        let states = StateQuery::parse_list(" maryland, new_york ,,virginia ");
        assert_eq!(
            states,
            vec![
                StateQuery::from("maryland"),
                StateQuery::from("new_york"),
                StateQuery::from("virginia"),
            ]
        );
        assert!(StateQuery::parse_list("").is_empty());
    }

    #[test]
    fn test_from_args_skips_blank_names() {
        let states = StateQuery::from_args(["  maryland ", " ", "", "New York"]);
        assert_eq!(
            states,
            vec![StateQuery::from("maryland"), StateQuery::from("New York")]
        );
        assert!(StateQuery::from_args(vec![" ".to_string()]).is_empty());
    }

    #[test]
    fn test_state_query_serializes_as_string() {
        let state = StateQuery::from("district_of_columbia");
        assert_eq!(
            serde_json::to_string(&state).unwrap(),
            "\"district_of_columbia\""
        );
    }

    #[test]
    fn test_brewery_lenient_decode() {
        let json = r#"[
            {"id": "b-1", "name": "Atlas Brew Works", "brewery_type": "micro", "state": "District of Columbia"},
            {"id": "b-2", "unexpected": {"nested": true}},
            {}
        ]"#;
        let breweries: Vec<Brewery> = serde_json::from_str(json).unwrap();
        assert_eq!(breweries.len(), 3);
        assert_eq!(breweries[0].name.as_deref(), Some("Atlas Brew Works"));
        assert_eq!(breweries[1].name, None);
    }

    #[test]
    fn test_brewery_null_fields() {
        let json = r#"[{"id": "b-1", "longitude": null, "phone": null}]"#;
        let breweries: Vec<Brewery> = serde_json::from_str(json).unwrap();
        assert_eq!(breweries[0].longitude, None);
    }

    #[test]
    fn test_coordinates_as_strings_or_numbers() {
        let json = r#"[
            {"longitude": "-77.0369", "latitude": "38.9072"},
            {"longitude": -76.6122, "latitude": 39.2904},
            {"longitude": "", "latitude": null}
        ]"#;
        let breweries: Vec<Brewery> = serde_json::from_str(json).unwrap();
        assert_eq!(breweries[0].longitude, Some(-77.0369));
        assert_eq!(breweries[1].latitude, Some(39.2904));
        assert_eq!(breweries[2].longitude, None);
        assert_eq!(breweries[2].latitude, None);
    }

    #[test]
    fn test_page_response_status() {
        assert!(PageResponse::ok(Vec::new()).is_success());
        assert!(!PageResponse::with_status(204).is_success());
        assert!(!PageResponse::with_status(404).is_success());
        assert!(!PageResponse::with_status(500).is_success());
        assert!(PageResponse::with_status(500).is_empty());
    }
}
