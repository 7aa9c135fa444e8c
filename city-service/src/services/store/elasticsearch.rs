//! Elasticsearch REST client for the city index.
//!
//! Speaks the handful of index and document APIs the service needs over
//! `reqwest`. Every data call goes through a bounded transport-level retry;
//! the liveness ping does not, callers that poll it have their own cadence.
//!
//! Document ids travel in request bodies (`_bulk`, `_mget`) rather than URL
//! paths: URL parsing drops `.` and `..` segments, and both are valid keys.

use super::{CityStore, StoreError};
use crate::config::ElasticsearchConfig;
use crate::models::{City, CityPage};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use service_core::retry::{retry_call, RetryConfig};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

const REFRESH_WAIT_FOR: (&str, &str) = ("refresh", "wait_for");
const NDJSON: &str = "application/x-ndjson";

pub struct ElasticsearchStore {
    /// `None` once closed.
    client: RwLock<Option<Client>>,
    base_url: Url,
    index: String,
    credentials: Option<(String, String)>,
    retry: RetryConfig,
    probe_retry: RetryConfig,
}

#[derive(Debug, Clone, Copy)]
enum BulkAction {
    Index,
    Delete,
}

impl BulkAction {
    fn as_str(self) -> &'static str {
        match self {
            BulkAction::Index => "index",
            BulkAction::Delete => "delete",
        }
    }
}

#[derive(Deserialize)]
struct Hit<T> {
    #[serde(rename = "_source")]
    source: T,
}

#[derive(Deserialize)]
struct SearchResponse {
    hits: SearchHits,
}

#[derive(Deserialize)]
struct SearchHits {
    total: TotalHits,
    hits: Vec<Hit<City>>,
}

#[derive(Deserialize)]
struct TotalHits {
    value: u64,
}

#[derive(Deserialize)]
struct MgetResponse {
    docs: Vec<MgetDoc>,
}

#[derive(Deserialize)]
struct MgetDoc {
    #[serde(default)]
    found: bool,
    #[serde(rename = "_source")]
    source: Option<City>,
    error: Option<Value>,
}

#[derive(Deserialize)]
struct BulkResponse {
    items: Vec<HashMap<String, BulkItem>>,
}

#[derive(Deserialize)]
struct BulkItem {
    status: u16,
    error: Option<Value>,
}

impl BulkItem {
    fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn into_error(self) -> StoreError {
        StoreError::Status {
            status: self.status,
            body: self.error.map(|e| e.to_string()).unwrap_or_default(),
        }
    }
}

impl ElasticsearchStore {
    /// Build the client. No network traffic happens here.
    pub fn new(config: &ElasticsearchConfig) -> Result<Self, StoreError> {
        let base_url = Url::parse(&config.base_url())
            .map_err(|e| StoreError::Client(format!("invalid address {}: {}", config.base_url(), e)))?;

        let mut builder = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.request_timeout.min(Duration::from_secs(5)));

        if config.insecure_tls() {
            tracing::warn!(
                target_url = %base_url,
                "TLS certificate and hostname verification DISABLED for Elasticsearch (ELASTICSEARCH_VERIFY_CERTS=false)"
            );
            builder = builder
                .danger_accept_invalid_certs(true)
                .danger_accept_invalid_hostnames(true);
        }

        let client = builder
            .build()
            .map_err(|e| StoreError::Client(e.to_string()))?;

        Ok(Self {
            client: RwLock::new(Some(client)),
            base_url,
            index: config.index.clone(),
            credentials: config
                .credentials()
                .map(|(user, password)| (user.to_string(), password.to_string())),
            retry: RetryConfig::with_max_retries(config.max_retries),
            probe_retry: RetryConfig::no_retry(),
        })
    }

    pub fn is_closed(&self) -> bool {
        self.client.read().map(|c| c.is_none()).unwrap_or(true)
    }

    fn client(&self) -> Result<Client, StoreError> {
        self.client
            .read()
            .map_err(|_| StoreError::Client("client lock poisoned".to_string()))?
            .clone()
            .ok_or_else(|| StoreError::Unavailable("client closed".to_string()))
    }

    /// URL for `segments` below the base address, each segment percent-encoded.
    fn url(&self, segments: &[&str]) -> Result<Url, StoreError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::Client(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, client: &Client, method: Method, url: Url) -> RequestBuilder {
        let request = client.request(method, url);
        match &self.credentials {
            Some((user, password)) => request.basic_auth(user, Some(password)),
            None => request,
        }
    }

    /// Send with transport-level retry. Connection errors, timeouts and
    /// gateway statuses are retried; everything else is returned as is.
    async fn send<B>(
        &self,
        retry: &RetryConfig,
        operation: &str,
        build: B,
    ) -> Result<Response, StoreError>
    where
        B: Fn(&Client) -> RequestBuilder,
    {
        let client = self.client()?;
        retry_call(retry, operation, StoreError::is_unavailable, || {
            let request = build(&client);
            async move {
                let response = request
                    .send()
                    .await
                    .map_err(|e| StoreError::Unavailable(e.to_string()))?;

                match response.status() {
                    StatusCode::BAD_GATEWAY
                    | StatusCode::SERVICE_UNAVAILABLE
                    | StatusCode::GATEWAY_TIMEOUT => Err(StoreError::Unavailable(format!(
                        "cluster responded with {}",
                        response.status()
                    ))),
                    _ => Ok(response),
                }
            }
        })
        .await
    }

    /// Run a single-document bulk action and return its item result.
    async fn bulk(
        &self,
        action: BulkAction,
        id: &str,
        source: Option<&City>,
    ) -> Result<BulkItem, StoreError> {
        let url = self.url(&[self.index.as_str(), "_bulk"])?;
        let body = bulk_body(action, id, source)?;
        let response = self
            .send(&self.retry, action.as_str(), |client| {
                self.request(client, Method::POST, url.clone())
                    .query(&[REFRESH_WAIT_FOR])
                    .header(CONTENT_TYPE, NDJSON)
                    .body(body.clone())
            })
            .await?;

        if !response.status().is_success() {
            return Err(Self::unexpected(response).await);
        }

        let result: BulkResponse = Self::decode(response).await?;
        result
            .items
            .into_iter()
            .next()
            .and_then(|item| item.into_values().next())
            .ok_or_else(|| StoreError::Decode("bulk response has no items".to_string()))
    }

    async fn unexpected(response: Response) -> StoreError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        StoreError::Status { status, body }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
        response
            .json::<T>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }
}

/// Index settings sized for a low-volume workload, with `city.keyword`
/// available for sorting.
pub fn index_definition() -> Value {
    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 1
        },
        "mappings": {
            "properties": {
                "city": {
                    "type": "text",
                    "fields": {
                        "keyword": { "type": "keyword", "ignore_above": 256 }
                    }
                },
                "population": { "type": "long" },
                "country": { "type": "keyword" },
                "updated_at": { "type": "date" }
            }
        }
    })
}

pub fn search_body(from: u64, size: u64) -> Value {
    json!({
        "query": { "match_all": {} },
        "sort": [{ "city.keyword": "asc" }],
        "from": from,
        "size": size,
        "track_total_hits": true
    })
}

/// Newline-delimited action line, plus the document for `index`.
fn bulk_body(action: BulkAction, id: &str, source: Option<&City>) -> Result<String, StoreError> {
    let mut header = Map::new();
    header.insert(action.as_str().to_string(), json!({ "_id": id }));

    let mut body = Value::Object(header).to_string();
    body.push('\n');
    if let Some(doc) = source {
        let doc = serde_json::to_string(doc)
            .map_err(|e| StoreError::Client(format!("failed to encode document: {}", e)))?;
        body.push_str(&doc);
        body.push('\n');
    }
    Ok(body)
}

#[async_trait]
impl CityStore for ElasticsearchStore {
    fn describe(&self) -> String {
        format!("{}{}", self.base_url, self.index)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let url = self.base_url.clone();
        let response = self
            .send(&self.probe_retry, "ping", |client| {
                self.request(client, Method::HEAD, url.clone())
            })
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::unexpected(response).await)
        }
    }

    async fn index_exists(&self) -> Result<bool, StoreError> {
        let url = self.url(&[self.index.as_str()])?;
        let response = self
            .send(&self.retry, "index_exists", |client| {
                self.request(client, Method::HEAD, url.clone())
            })
            .await?;

        match response.status() {
            s if s.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            _ => Err(Self::unexpected(response).await),
        }
    }

    async fn create_index(&self) -> Result<(), StoreError> {
        let url = self.url(&[self.index.as_str()])?;
        let body = index_definition();
        let response = self
            .send(&self.retry, "create_index", |client| {
                self.request(client, Method::PUT, url.clone()).json(&body)
            })
            .await?;

        if response.status().is_success() {
            return Ok(());
        }

        // Another replica of this service may have won the race.
        match Self::unexpected(response).await {
            StoreError::Status { status: 400, body }
                if body.contains("resource_already_exists_exception") =>
            {
                Ok(())
            }
            err => Err(err),
        }
    }

    async fn put(&self, id: &str, city: &City) -> Result<(), StoreError> {
        let item = self.bulk(BulkAction::Index, id, Some(city)).await?;
        if item.is_success() {
            Ok(())
        } else {
            Err(item.into_error())
        }
    }

    async fn get(&self, id: &str) -> Result<Option<City>, StoreError> {
        let url = self.url(&[self.index.as_str(), "_mget"])?;
        let body = json!({ "ids": [id] });
        let response = self
            .send(&self.retry, "get", |client| {
                self.request(client, Method::POST, url.clone()).json(&body)
            })
            .await?;

        if !response.status().is_success() {
            return Err(Self::unexpected(response).await);
        }

        let result: MgetResponse = Self::decode(response).await?;
        let doc = result
            .docs
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Decode("mget response has no docs".to_string()))?;

        if let Some(error) = doc.error {
            return Err(StoreError::Status {
                status: StatusCode::OK.as_u16(),
                body: error.to_string(),
            });
        }
        if !doc.found {
            return Ok(None);
        }
        doc.source
            .map(Some)
            .ok_or_else(|| StoreError::Decode("found document has no _source".to_string()))
    }

    async fn search(&self, from: u64, size: u64) -> Result<CityPage, StoreError> {
        let url = self.url(&[self.index.as_str(), "_search"])?;
        let body = search_body(from, size);
        let response = self
            .send(&self.retry, "search", |client| {
                self.request(client, Method::POST, url.clone()).json(&body)
            })
            .await?;

        if !response.status().is_success() {
            return Err(Self::unexpected(response).await);
        }

        let result: SearchResponse = Self::decode(response).await?;
        Ok(CityPage {
            total: result.hits.total.value,
            cities: result.hits.hits.into_iter().map(|hit| hit.source).collect(),
        })
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let item = self.bulk(BulkAction::Delete, id, None).await?;
        match item.status {
            404 => Ok(false),
            _ if item.is_success() => Ok(true),
            _ => Err(item.into_error()),
        }
    }

    /// Drop this store's client handle. The connection pool goes with the
    /// last in-flight request still holding a clone; later calls fail as
    /// unavailable.
    async fn close(&self) {
        let client = match self.client.write() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if client.is_some() {
            tracing::debug!(target_url = %self.base_url, "Elasticsearch client closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Scheme;
    use axum::{
        body::Bytes,
        extract::State,
        http::{HeaderMap, Uri},
        routing::{head, post},
        Json, Router,
    };
    use secrecy::Secret;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};
    use tokio::net::TcpListener;

    #[derive(Debug, Clone)]
    struct Seen {
        method: String,
        uri: String,
        authorization: Option<String>,
        content_type: Option<String>,
        body: String,
    }

    impl Seen {
        fn json(&self) -> Value {
            serde_json::from_str(&self.body).unwrap()
        }

        /// Parsed lines of an NDJSON body.
        fn lines(&self) -> Vec<Value> {
            self.body
                .lines()
                .map(|line| serde_json::from_str(line).unwrap())
                .collect()
        }
    }

    type Log = Arc<Mutex<Vec<Seen>>>;

    fn record(log: &Log, method: &str, uri: &Uri, headers: &HeaderMap, body: &[u8]) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        log.lock().unwrap().push(Seen {
            method: method.to_string(),
            uri: uri.to_string(),
            authorization: header("authorization"),
            content_type: header("content-type"),
            body: String::from_utf8_lossy(body).into_owned(),
        });
    }

    async fn serve(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });
        format!("127.0.0.1:{}", port)
    }

    /// Minimal stand-in for the Elasticsearch index and document APIs.
    /// Only `abu_dhabi` and `.` exist; every delete misses.
    async fn spawn_fake_cluster() -> (String, Log) {
        let log: Log = Arc::default();

        let app = Router::new()
            .route(
                "/",
                head(|State(log): State<Log>, uri: Uri, headers: HeaderMap| async move {
                    record(&log, "HEAD", &uri, &headers, &[]);
                    StatusCode::OK
                }),
            )
            .route(
                "/cities",
                head(|State(log): State<Log>, uri: Uri, headers: HeaderMap| async move {
                    record(&log, "HEAD", &uri, &headers, &[]);
                    StatusCode::NOT_FOUND
                })
                .put(
                    |State(log): State<Log>, uri: Uri, headers: HeaderMap, body: Bytes| async move {
                        record(&log, "PUT", &uri, &headers, &body);
                        Json(json!({ "acknowledged": true }))
                    },
                ),
            )
            .route(
                "/cities/_bulk",
                post(
                    |State(log): State<Log>, uri: Uri, headers: HeaderMap, body: Bytes| async move {
                        record(&log, "POST", &uri, &headers, &body);
                        let first_line = String::from_utf8_lossy(&body)
                            .lines()
                            .next()
                            .unwrap_or_default()
                            .to_string();
                        let item = if first_line.contains("\"delete\"") {
                            json!({ "delete": { "status": 404, "result": "not_found" } })
                        } else {
                            json!({ "index": { "status": 201, "result": "created" } })
                        };
                        Json(json!({ "errors": false, "items": [item] }))
                    },
                ),
            )
            .route(
                "/cities/_mget",
                post(
                    |State(log): State<Log>, uri: Uri, headers: HeaderMap, body: Bytes| async move {
                        record(&log, "POST", &uri, &headers, &body);
                        let request: Value = serde_json::from_slice(&body).unwrap();
                        let id = request["ids"][0].as_str().unwrap_or_default().to_string();
                        let doc = match id.as_str() {
                            "abu_dhabi" => json!({
                                "_id": id,
                                "found": true,
                                "_source": {
                                    "city": "Abu Dhabi",
                                    "population": 1480000,
                                    "country": "UAE",
                                    "updated_at": "2026-01-01T00:00:00Z"
                                }
                            }),
                            "." => json!({
                                "_id": id,
                                "found": true,
                                "_source": {
                                    "city": ".",
                                    "population": 1,
                                    "updated_at": "2026-01-01T00:00:00Z"
                                }
                            }),
                            _ => json!({ "_id": id, "found": false }),
                        };
                        Json(json!({ "docs": [doc] }))
                    },
                ),
            )
            .route(
                "/cities/_search",
                post(
                    |State(log): State<Log>, uri: Uri, headers: HeaderMap, body: Bytes| async move {
                        record(&log, "POST", &uri, &headers, &body);
                        Json(json!({
                            "hits": {
                                "total": { "value": 42, "relation": "eq" },
                                "hits": [
                                    { "_id": "cairo", "_source": {
                                        "city": "Cairo",
                                        "population": 9500000,
                                        "updated_at": "2026-01-01T00:00:00Z"
                                    }}
                                ]
                            }
                        }))
                    },
                ),
            )
            .with_state(log.clone());

        (serve(app).await, log)
    }

    fn config_for(addr: &str) -> ElasticsearchConfig {
        let (host, port) = addr.split_once(':').unwrap();
        ElasticsearchConfig {
            host: host.to_string(),
            port: port.parse().unwrap(),
            user: "elastic".to_string(),
            password: Secret::new("changeme".to_string()),
            max_retries: 0,
            ..Default::default()
        }
    }

    #[test]
    fn bulk_body_carries_dot_ids_verbatim() {
        for id in [".", "..", "a/b?c#d", "st._louis"] {
            let body = bulk_body(BulkAction::Delete, id, None).unwrap();
            assert!(body.ends_with('\n'));

            let header: Value = serde_json::from_str(body.trim_end()).unwrap();
            assert_eq!(header["delete"]["_id"], id);
        }
    }

    #[test]
    fn bulk_index_body_has_action_and_document_lines() {
        let city = City::new("Dubai", 3_500_000, None);
        let body = bulk_body(BulkAction::Index, "dubai", Some(&city)).unwrap();

        let lines: Vec<Value> = body
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["index"]["_id"], "dubai");
        assert_eq!(lines[1]["city"], "Dubai");
    }

    #[test]
    fn search_body_sorts_by_keyword_and_pages() {
        let body = search_body(20, 10);
        assert_eq!(body["from"], 20);
        assert_eq!(body["size"], 10);
        assert_eq!(body["sort"][0]["city.keyword"], "asc");
        assert_eq!(body["track_total_hits"], true);
    }

    #[test]
    fn index_uses_single_shard_and_one_replica() {
        let definition = index_definition();
        assert_eq!(definition["settings"]["number_of_shards"], 1);
        assert_eq!(definition["settings"]["number_of_replicas"], 1);
    }

    #[test]
    fn builds_client_with_verification_disabled() {
        let config = ElasticsearchConfig {
            scheme: Scheme::Https,
            verify_certs: false,
            ..Default::default()
        };
        assert!(config.insecure_tls());

        let store = ElasticsearchStore::new(&config).unwrap();
        assert_eq!(store.describe(), "https://elasticsearch:9200/cities");
        assert!(!store.is_closed());
    }

    #[tokio::test]
    async fn talks_to_document_apis() {
        let (addr, log) = spawn_fake_cluster().await;
        let store = ElasticsearchStore::new(&config_for(&addr)).unwrap();

        store.ping().await.unwrap();
        assert!(!store.index_exists().await.unwrap());
        store.create_index().await.unwrap();

        store
            .put("abu_dhabi", &City::new("Abu Dhabi", 1_480_000, Some("UAE")))
            .await
            .unwrap();

        let found = store.get("abu_dhabi").await.unwrap().unwrap();
        assert_eq!(found.city, "Abu Dhabi");
        assert_eq!(found.country.as_deref(), Some("UAE"));
        assert!(store.get("atlantis").await.unwrap().is_none());

        let page = store.search(0, 1).await.unwrap();
        assert_eq!(page.total, 42);
        assert_eq!(page.cities[0].city, "Cairo");

        assert!(!store.delete("atlantis").await.unwrap());

        let seen = log.lock().unwrap().clone();
        assert!(seen
            .iter()
            .all(|s| s.authorization.as_deref().is_some_and(|a| a.starts_with("Basic "))));

        let create = seen.iter().find(|s| s.method == "PUT" && s.uri == "/cities").unwrap();
        assert_eq!(create.json()["settings"]["number_of_shards"], 1);

        let bulk: Vec<&Seen> = seen.iter().filter(|s| s.uri.starts_with("/cities/_bulk")).collect();
        assert_eq!(bulk.len(), 2);
        for request in &bulk {
            assert_eq!(request.uri, "/cities/_bulk?refresh=wait_for");
            assert_eq!(request.content_type.as_deref(), Some(NDJSON));
        }

        let write = bulk[0].lines();
        assert_eq!(write[0]["index"]["_id"], "abu_dhabi");
        assert_eq!(write[1]["population"], 1480000);

        let delete = bulk[1].lines();
        assert_eq!(delete, vec![json!({ "delete": { "_id": "atlantis" } })]);
    }

    #[tokio::test]
    async fn dot_ids_are_addressable() {
        let (addr, log) = spawn_fake_cluster().await;
        let store = ElasticsearchStore::new(&config_for(&addr)).unwrap();

        store.put(".", &City::new(".", 1, None)).await.unwrap();
        assert_eq!(store.get(".").await.unwrap().unwrap().city, ".");
        assert!(store.get("..").await.unwrap().is_none());
        assert!(!store.delete("..").await.unwrap());

        let seen = log.lock().unwrap().clone();
        assert_eq!(seen[0].lines()[0]["index"]["_id"], ".");
        assert_eq!(seen[1].uri, "/cities/_mget");
        assert_eq!(seen[1].json()["ids"][0], ".");
        assert_eq!(seen[2].json()["ids"][0], "..");
        assert_eq!(seen[3].lines()[0]["delete"]["_id"], "..");
    }

    #[tokio::test]
    async fn gateway_errors_are_retried() {
        let calls = Arc::new(AtomicU32::new(0));
        let app = Router::new()
            .route(
                "/cities/_mget",
                post(|State(calls): State<Arc<AtomicU32>>| async move {
                    if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                        (StatusCode::SERVICE_UNAVAILABLE, Json(json!({})))
                    } else {
                        (StatusCode::OK, Json(json!({ "docs": [{ "found": false }] })))
                    }
                }),
            )
            .with_state(calls.clone());
        let addr = serve(app).await;

        let store = ElasticsearchStore::new(&ElasticsearchConfig {
            max_retries: 2,
            ..config_for(&addr)
        })
        .unwrap();

        assert!(store.get("dubai").await.unwrap().is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn ping_answers_without_retrying() {
        let calls = Arc::new(AtomicU32::new(0));
        let app = Router::new()
            .route(
                "/",
                head(|State(calls): State<Arc<AtomicU32>>| async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    StatusCode::SERVICE_UNAVAILABLE
                }),
            )
            .with_state(calls.clone());
        let addr = serve(app).await;

        let store = ElasticsearchStore::new(&ElasticsearchConfig {
            max_retries: 5,
            ..config_for(&addr)
        })
        .unwrap();

        let err = store.ping().await.unwrap_err();
        assert!(err.is_unavailable());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn close_releases_the_client() {
        let (addr, _log) = spawn_fake_cluster().await;
        let store = ElasticsearchStore::new(&config_for(&addr)).unwrap();
        store.ping().await.unwrap();

        store.close().await;
        assert!(store.is_closed());

        let err = store.get("abu_dhabi").await.unwrap_err();
        assert!(err.is_unavailable());

        // A second close is a no-op.
        store.close().await;
    }

    #[tokio::test]
    async fn unreachable_cluster_is_unavailable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        drop(listener);

        let store = ElasticsearchStore::new(&config_for(&addr)).unwrap();
        let err = store.get("dubai").await.unwrap_err();
        assert!(err.is_unavailable());
    }
}
