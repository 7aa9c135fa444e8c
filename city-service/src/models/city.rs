use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A city record as persisted in the store, keyed by [`crate::utils::city_id`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub city: String,
    pub population: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl City {
    /// Build a fresh record from raw input, trimming text fields and
    /// stamping the write time. An empty country is treated as absent.
    pub fn new(city: &str, population: i64, country: Option<&str>) -> Self {
        Self {
            city: city.trim().to_string(),
            population,
            country: country
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
            updated_at: Utc::now(),
        }
    }
}

/// One page of a sorted full-collection scan.
#[derive(Debug, Clone, PartialEq)]
pub struct CityPage {
    /// Number of records in the whole collection, not just this page.
    pub total: u64,
    pub cities: Vec<City>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_fields() {
        let city = City::new("  Abu Dhabi ", 1_480_000, Some(" UAE "));
        assert_eq!(city.city, "Abu Dhabi");
        assert_eq!(city.country.as_deref(), Some("UAE"));
    }

    #[test]
    fn blank_country_is_dropped() {
        let city = City::new("Dubai", 3_500_000, Some("   "));
        assert!(city.country.is_none());

        let json = serde_json::to_value(&city).unwrap();
        assert!(json.get("country").is_none());
        assert!(json.get("updated_at").is_some());
    }
}
