use crate::models::City;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Debug, Deserialize, Validate)]
pub struct UpsertCityRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub city: String,
    #[validate(range(min = 0))]
    pub population: i64,
    pub country: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpsertCityResponse {
    pub message: String,
    pub city: String,
    pub population: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CityResponse {
    pub city: String,
    pub population: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl From<City> for CityResponse {
    fn from(city: City) -> Self {
        Self {
            city: city.city,
            population: city.population,
            country: city.country,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ListCitiesQuery {
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: i64,
    #[serde(default = "default_size")]
    #[validate(range(min = 1, max = 100))]
    pub size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    20
}

impl ListCitiesQuery {
    /// Records to skip: `(page - 1) * size`. Only meaningful once validated.
    pub fn offset(&self) -> u64 {
        let page = u64::try_from(self.page - 1).unwrap_or(0);
        let size = u64::try_from(self.size).unwrap_or(0);
        page.saturating_mul(size)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListCitiesResponse {
    pub total: u64,
    pub page: i64,
    pub size: i64,
    pub cities: Vec<City>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub elasticsearch: String,
}

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be empty".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upsert(city: &str, population: i64) -> UpsertCityRequest {
        UpsertCityRequest {
            city: city.to_string(),
            population,
            country: None,
        }
    }

    #[test]
    fn accepts_zero_population() {
        assert!(upsert("Ghost Town", 0).validate().is_ok());
    }

    #[test]
    fn rejects_negative_population() {
        let errors = upsert("Dubai", -1).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("population"));
    }

    #[test]
    fn rejects_blank_city() {
        for city in ["", "   ", "\t"] {
            let errors = upsert(city, 10).validate().unwrap_err();
            assert!(errors.field_errors().contains_key("city"));
        }
    }

    #[test]
    fn list_defaults_and_offset() {
        let query: ListCitiesQuery = serde_json::from_str("{}").unwrap();
        assert_eq!((query.page, query.size), (1, 20));
        assert_eq!(query.offset(), 0);

        let query = ListCitiesQuery { page: 3, size: 10 };
        assert_eq!(query.offset(), 20);
    }

    #[test]
    fn list_bounds() {
        assert!(ListCitiesQuery { page: 0, size: 10 }.validate().is_err());
        assert!(ListCitiesQuery { page: 1, size: 0 }.validate().is_err());
        assert!(ListCitiesQuery { page: 1, size: 101 }.validate().is_err());
        assert!(ListCitiesQuery { page: 1, size: 100 }.validate().is_ok());
    }
}
