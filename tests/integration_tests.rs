//! Integration tests
//!
//! Tests the full flow: API response → landed raw object → arrival event →
//! JSON Lines artifact, through the library API and the CLI runner.

use bytes::Bytes;
use clap::Parser;
use pretty_assertions::assert_eq;
use serde_json::json;
use series_lake::cli::{Cli, Runner, EXIT_PARTIAL_FAILURE};
use series_lake::{
    ArrivalBatch, ArrivalRecord, BlobStore, CloudStore, LandingConfig, LandingProducer,
    ObjectLocation, ReshapeConfig, ReshapeDriver,
};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const EXAMPLE: &str = r#"{"Time Series (Daily)": {"2024-01-02": {"1. open": "100.0"}, "2024-01-03": {"1. open": "101.0"}}}"#;
const EXAMPLE_JSONL: &str = "{\"1. open\": \"100.0\"}\n{\"1. open\": \"101.0\"}\n";

// ============================================================================
// Library Flow Tests
// ============================================================================

#[tokio::test]
async fn test_s3_notification_to_jsonl() {
    let store = Arc::new(CloudStore::memory());
    store
        .put(
            &ObjectLocation::new("landing", "raw/20240103_raw-data-api-response.json"),
            Bytes::from_static(EXAMPLE.as_bytes()),
        )
        .await
        .unwrap();

    let event = json!({
        "Records": [{
            "eventName": "ObjectCreated:Put",
            "s3": {
                "bucket": {"name": "landing"},
                "object": {"key": "raw/20240103_raw-data-api-response.json"}
            }
        }]
    });
    let batch = ArrivalBatch::from_s3_notification(&event).unwrap();
    let driver = ReshapeDriver::new(store.clone(), ReshapeConfig::new("lake")).unwrap();

    let report = driver.process(&batch).await;
    assert!(report.is_complete_success());

    let out = store
        .get(&ObjectLocation::new(
            "lake",
            "converted/20240103_converted-data-api-response.jsonl",
        ))
        .await
        .unwrap();
    assert_eq!(std::str::from_utf8(&out).unwrap(), EXAMPLE_JSONL);
}

#[tokio::test]
async fn test_landing_then_reshape() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Meta Data": {"2. Symbol": "IBM"},
            "Time Series (Daily)": {
                "2024-01-03": {"1. open": "161.00", "5. volume": "4086000"},
                "2024-01-02": {"1. open": "162.83", "5. volume": "3995000"}
            }
        })))
        .mount(&mock_server)
        .await;

    let store = Arc::new(CloudStore::memory());
    let producer = LandingProducer::new(
        store.clone(),
        LandingConfig {
            base_url: format!("{}/query", mock_server.uri()),
            api_key: "demo".to_string(),
            symbol: "IBM".to_string(),
            bucket: "lake".to_string(),
            ..Default::default()
        },
    )
    .unwrap();
    let landed = producer.land_once(chrono::Utc::now()).await.unwrap();
    assert!(landed.key.starts_with("raw/"));

    let driver = ReshapeDriver::new(store.clone(), ReshapeConfig::new("lake")).unwrap();
    let report = driver
        .process(&ArrivalBatch::new(vec![ArrivalRecord::from(landed.clone())]))
        .await;
    let output = report.succeeded().next().unwrap();

    assert!(output
        .destination
        .key
        .ends_with("_converted-data-api-response.jsonl"));
    assert!(output.destination.key.starts_with("converted/"));
    assert_eq!(output.records, 2);

    let content = store.get(&output.destination).await.unwrap();
    assert_eq!(
        std::str::from_utf8(&content).unwrap(),
        "{\"1. open\": \"161.00\", \"5. volume\": \"4086000\"}\n{\"1. open\": \"162.83\", \"5. volume\": \"3995000\"}\n"
    );
}

// ============================================================================
// CLI Runner Tests
// ============================================================================

fn write_config(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("config.yaml");
    std::fs::write(
        &path,
        "reshape:\n  destination_container: lake\n  destination_layer_prefix: converted\n",
    )
    .unwrap();
    path
}

fn seed_raw(root: &std::path::Path, key: &str, body: &str) {
    let path = root.join("landing").join(key);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, body).unwrap();
}

async fn run_cli(args: &[&str]) -> series_lake::Result<i32> {
    let runner = Runner::new(Cli::parse_from(args));
    let config = runner.load_config()?;
    runner.run(config).await
}

#[tokio::test]
async fn test_cli_reshape_local_store() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("store");
    let config = write_config(dir.path());
    seed_raw(&root, "raw/20240103_raw-data-api-response.json", EXAMPLE);

    let store_url = format!("file://{}", root.display());
    let event = json!({
        "records": [{"container": "landing", "key": "raw/20240103_raw-data-api-response.json"}]
    })
    .to_string();

    let code = run_cli(&[
        "series-lake",
        "--config",
        config.to_str().unwrap(),
        "--store",
        &store_url,
        "reshape",
        "--event-json",
        &event,
    ])
    .await
    .unwrap();

    assert_eq!(code, 0);
    let written = std::fs::read_to_string(
        root.join("lake/converted/20240103_converted-data-api-response.jsonl"),
    )
    .unwrap();
    assert_eq!(written, EXAMPLE_JSONL);
}

#[tokio::test]
async fn test_cli_reshape_partial_failure_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("store");
    let config = write_config(dir.path());
    seed_raw(&root, "raw/1_raw-data-api-response.json", EXAMPLE);
    seed_raw(&root, "raw/3_raw-data-api-response.json", EXAMPLE);

    let event_path = dir.path().join("event.json");
    std::fs::write(
        &event_path,
        json!({
            "Records": [
                {"s3": {"bucket": {"name": "landing"}, "object": {"key": "raw/1_raw-data-api-response.json"}}},
                {"s3": {"bucket": {"name": "landing"}, "object": {"key": "raw/2_raw-data-api-response.json"}}},
                {"s3": {"bucket": {"name": "landing"}, "object": {"key": "raw/3_raw-data-api-response.json"}}}
            ]
        })
        .to_string(),
    )
    .unwrap();

    let code = run_cli(&[
        "series-lake",
        "--config",
        config.to_str().unwrap(),
        "--store",
        &format!("file://{}", root.display()),
        "reshape",
        "--event",
        event_path.to_str().unwrap(),
    ])
    .await
    .unwrap();

    assert_eq!(code, EXIT_PARTIAL_FAILURE);
    assert!(root
        .join("lake/converted/1_converted-data-api-response.jsonl")
        .exists());
    assert!(!root
        .join("lake/converted/2_converted-data-api-response.jsonl")
        .exists());
    assert!(root
        .join("lake/converted/3_converted-data-api-response.jsonl")
        .exists());
}

#[tokio::test]
async fn test_cli_reshape_object_missing_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());

    let result = run_cli(&[
        "series-lake",
        "--config",
        config.to_str().unwrap(),
        "--store",
        "memory://",
        "reshape-object",
        "--container",
        "landing",
        "--key",
        "raw/missing.json",
    ])
    .await;

    assert!(matches!(result, Err(series_lake::Error::Retrieval { .. })));
}

#[tokio::test]
async fn test_cli_reshape_requires_event() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());

    let result = run_cli(&[
        "series-lake",
        "--config",
        config.to_str().unwrap(),
        "--store",
        "memory://",
        "reshape",
    ])
    .await;

    assert!(result.unwrap_err().to_string().contains("No event given"));
}

#[test]
fn test_cli_reshape_event_sources_conflict() {
    let result = Cli::try_parse_from([
        "series-lake",
        "reshape",
        "--event",
        "event.json",
        "--event-json",
        "{\"records\": []}",
    ]);
    assert_eq!(
        result.unwrap_err().kind(),
        clap::error::ErrorKind::ArgumentConflict
    );
}

#[tokio::test]
async fn test_cli_derive_key() {
    let code = run_cli(&[
        "series-lake",
        "derive-key",
        "--key",
        "raw/20240101_raw-data-api-response.json",
    ])
    .await
    .unwrap();
    assert_eq!(code, 0);
}
