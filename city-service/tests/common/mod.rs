#![allow(dead_code)]

use city_service::config::CityConfig;
use city_service::services::{CityStore, InMemoryStore};
use city_service::startup::Application;
use service_core::config::Config as CoreConfig;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store: Arc<InMemoryStore>,
    pub client: reqwest::Client,
}

pub fn test_config() -> CityConfig {
    let common = CoreConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0, // Random port for testing
    };
    CityConfig::from_lookup(common, |_| None).expect("Failed to build test configuration")
}

impl TestApp {
    pub async fn spawn() -> Self {
        let store = Arc::new(InMemoryStore::with_index());
        let shared: Arc<dyn CityStore> = store.clone();

        let app = Application::build_with_store(test_config(), shared)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        TestApp {
            address,
            port,
            store,
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn put_city(&self, body: serde_json::Value) -> reqwest::Response {
        self.client
            .put(self.url("/cities"))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_city(&self, name: &str) -> reqwest::Response {
        self.client
            .get(self.url(&format!("/cities/{}", name)))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete_city(&self, name: &str) -> reqwest::Response {
        self.client
            .delete(self.url(&format!("/cities/{}", name)))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn list_cities(&self, query: &str) -> reqwest::Response {
        self.client
            .get(self.url(&format!("/cities{}", query)))
            .send()
            .await
            .expect("Failed to execute request")
    }
}
