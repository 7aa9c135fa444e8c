pub mod cities;
pub mod health;

pub use cities::{delete_city, get_city, list_cities, upsert_city};
pub use health::{health_check, metrics_endpoint, readiness_check};
