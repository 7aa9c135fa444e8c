mod validation;

pub use validation::{invalid, ValidatedJson, ValidatedQuery};

/// Storage key for a city name: trimmed, lowercased, spaces as underscores.
///
/// `"Abu Dhabi"`, `"abu dhabi"` and `"ABU DHABI "` all map to `abu_dhabi`.
/// Callers reject blank names before getting here.
pub fn city_id(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}
