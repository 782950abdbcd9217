//! Integration tests for WeatherClient with the filesystem cache
//!
//! The upstream API is replaced by a wiremock server and the cache lives in a
//! temporary directory.

use std::fs;
use std::time::{Duration, SystemTime};

use serde_json::{json, Value};
use tempfile::TempDir;
use weathercache::{cache_key, CacheStore, ClientConfig, FileCache, WeatherClient};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to build a client against the mock server with a temp cache dir
fn create_client(server: &MockServer) -> (WeatherClient, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config = ClientConfig::new("test-key", temp_dir.path().join("cache"))
        .with_base_url(server.uri())
        .with_timeout(Duration::from_millis(200));
    let client = WeatherClient::new(config).expect("Client should build");
    (client, temp_dir)
}

/// Helper to make a cache entry look older than it is
fn backdate(client: &WeatherClient, key: &str, by: Duration) {
    let file = fs::File::options()
        .write(true)
        .open(client.cache().path_for(key))
        .expect("Cache file should exist");
    file.set_modified(SystemTime::now() - by)
        .expect("Should set modification time");
}

async fn mount_ok(server: &MockServer, q: &str, body: Value, times: u64) {
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", q))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_new_creates_cache_directory() {
    let mock_server = MockServer::start().await;
    let (client, temp_dir) = create_client(&mock_server);

    assert!(temp_dir.path().join("cache").is_dir());
    assert_eq!(client.config().cache_dir(), temp_dir.path().join("cache").as_path());
}

#[tokio::test]
async fn test_success_is_returned_and_persisted() {
    let mock_server = MockServer::start().await;
    mount_ok(&mock_server, "Paris,FR", json!({"temp": 21}), 1).await;
    let (client, _temp_dir) = create_client(&mock_server);

    let payload = client.get_current_weather("Paris", Some("FR")).await;

    assert_eq!(payload, Some(json!({"temp": 21})));

    let path = client.cache().path_for(&cache_key("Paris", Some("FR")));
    let stored: Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(stored, json!({"temp": 21}));
}

#[tokio::test]
async fn test_two_calls_within_ttl_issue_one_request() {
    let mock_server = MockServer::start().await;
    mount_ok(&mock_server, "Madrid", json!({"temp": 30}), 1).await;
    let (client, _temp_dir) = create_client(&mock_server);

    let first = client.get_current_weather("Madrid", None).await;
    let second = client.get_current_weather("Madrid", None).await;

    assert_eq!(first, second);
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_stale_entry_is_refetched_and_overwritten() {
    let mock_server = MockServer::start().await;
    let (client, _temp_dir) = create_client(&mock_server);
    let key = cache_key("Rome", None);

    client.cache().store(&key, &json!({"temp": 5}));
    backdate(&client, &key, Duration::from_secs(601));
    mount_ok(&mock_server, "Rome", json!({"temp": 25}), 1).await;

    let payload = client.get_current_weather("Rome", None).await;

    assert_eq!(payload, Some(json!({"temp": 25})));
    assert_eq!(client.cache().lookup(&key), Some(json!({"temp": 25})));
}

#[tokio::test]
async fn test_fresh_entry_skips_network() {
    let mock_server = MockServer::start().await;
    let (client, _temp_dir) = create_client(&mock_server);
    let key = cache_key("Rome", None);

    client.cache().store(&key, &json!({"temp": 5}));
    backdate(&client, &key, Duration::from_secs(300));

    let payload = client.get_current_weather("Rome", None).await;

    assert_eq!(payload, Some(json!({"temp": 5})));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_country_code_gets_its_own_entry() {
    let mock_server = MockServer::start().await;
    mount_ok(&mock_server, "Paris", json!({"country": "FR"}), 1).await;
    mount_ok(&mock_server, "Paris,US", json!({"country": "US"}), 1).await;
    let (client, _temp_dir) = create_client(&mock_server);

    let plain = client.get_current_weather("Paris", None).await;
    let texas = client.get_current_weather("Paris", Some("US")).await;

    assert_eq!(plain, Some(json!({"country": "FR"})));
    assert_eq!(texas, Some(json!({"country": "US"})));
    assert_ne!(
        client.cache().path_for(&cache_key("Paris", None)),
        client.cache().path_for(&cache_key("Paris", Some("US")))
    );
}

#[tokio::test]
async fn test_underscored_city_does_not_shadow_country_lookup() {
    let mock_server = MockServer::start().await;
    mount_ok(&mock_server, "Paris_FR", json!({"who": "Paris_FR"}), 1).await;
    mount_ok(&mock_server, "Paris,FR", json!({"who": "Paris"}), 1).await;
    let (client, _temp_dir) = create_client(&mock_server);

    let odd = client.get_current_weather("Paris_FR", None).await;
    let paris = client.get_current_weather("Paris", Some("FR")).await;

    assert_eq!(odd, Some(json!({"who": "Paris_FR"})));
    assert_eq!(paris, Some(json!({"who": "Paris"})));
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_debug_output_hides_api_key() {
    let temp_dir = TempDir::new().unwrap();
    let client = WeatherClient::new(ClientConfig::new("super-secret", temp_dir.path())).unwrap();

    assert!(!format!("{:?}", client).contains("super-secret"));
}

#[tokio::test]
async fn test_not_found_returns_none_without_cache_write() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "cod": "404",
            "message": "city not found"
        })))
        .mount(&mock_server)
        .await;
    let (client, _temp_dir) = create_client(&mock_server);

    let payload = client.get_current_weather("Atlantis", None).await;

    assert!(payload.is_none());
    assert!(!client.cache().path_for(&cache_key("Atlantis", None)).exists());
}

#[tokio::test]
async fn test_timeout_returns_none() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"temp": 1}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;
    let (client, _temp_dir) = create_client(&mock_server);

    let payload = client.get_current_weather("Slowtown", None).await;

    assert!(payload.is_none());
    assert!(!client.cache().path_for(&cache_key("Slowtown", None)).exists());
}

#[tokio::test]
async fn test_corrupted_cache_falls_through_to_request() {
    let mock_server = MockServer::start().await;
    mount_ok(&mock_server, "Lisbon", json!({"temp": 18}), 1).await;
    let (client, _temp_dir) = create_client(&mock_server);
    let key = cache_key("Lisbon", None);

    fs::write(client.cache().path_for(&key), "{\"temp\": 1").unwrap();

    let payload = client.get_current_weather("Lisbon", None).await;

    assert_eq!(payload, Some(json!({"temp": 18})));
    assert_eq!(client.cache().lookup(&key), Some(json!({"temp": 18})));
}

#[tokio::test]
async fn test_shared_file_cache_across_clients() {
    let mock_server = MockServer::start().await;
    mount_ok(&mock_server, "Oslo", json!({"temp": -2}), 1).await;
    let temp_dir = TempDir::new().unwrap();
    let cache = FileCache::new(temp_dir.path(), Duration::from_secs(600)).unwrap();
    let config = ClientConfig::new("test-key", temp_dir.path()).with_base_url(mock_server.uri());

    let first = WeatherClient::with_cache(config.clone(), &cache).unwrap();
    let second = WeatherClient::with_cache(config, &cache).unwrap();

    assert!(first.get_current_weather("Oslo", None).await.is_some());
    assert_eq!(
        second.get_current_weather("Oslo", None).await,
        Some(json!({"temp": -2}))
    );
}
