pub mod cities;

pub use cities::{
    CityResponse, HealthResponse, ListCitiesQuery, ListCitiesResponse, MessageResponse,
    UpsertCityRequest, UpsertCityResponse,
};
