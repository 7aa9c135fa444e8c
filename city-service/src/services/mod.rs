pub mod bootstrap;
pub mod metrics;
pub mod store;

pub use bootstrap::{connect, BootstrapError, Bootstrapper, IndexStatus, ProbeState};
pub use self::metrics::{get_metrics, init_metrics, record_city_operation};
pub use store::{CityStore, ElasticsearchStore, InMemoryStore, StoreError};
