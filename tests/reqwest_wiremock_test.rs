//! End-to-end fetches through the reqwest adapter against a wiremock
//! server.

use fleetdash::adapters::ReqwestHttpClient;
use fleetdash::config::{trucks_screen, DashConfig};
use fleetdash::error::{PollError, TransportError};
use fleetdash::models::{FieldValue, Snapshot};
use fleetdash::poll::{fetch_snapshot, PollConfig, PollEvent, PollingSource};
use fleetdash::traits::{HttpClient, HttpError};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const NEVER: Duration = Duration::from_secs(3600);

async fn serve(route: &str, template: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(template)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_get_returns_body_and_status() {
    let server = serve("/map.txt", ResponseTemplate::new(200).set_body_string("#T#")).await;
    let client = ReqwestHttpClient::new();

    let response = client
        .get(&format!("{}/map.txt", server.uri()))
        .await
        .unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.text().unwrap(), "#T#");
}

#[tokio::test]
async fn test_non_success_status_is_returned_not_raised() {
    let server = serve("/trucks.json", ResponseTemplate::new(404).set_body_string("nope")).await;
    let client = ReqwestHttpClient::new();

    let response = client
        .get(&format!("{}/trucks.json", server.uri()))
        .await
        .unwrap();
    assert_eq!(response.status, 404);
    assert!(!response.is_success());
}

#[tokio::test]
async fn test_client_timeout() {
    let server = serve(
        "/slow.txt",
        ResponseTemplate::new(200)
            .set_body_string("late")
            .set_delay(Duration::from_millis(500)),
    )
    .await;
    let client = ReqwestHttpClient::with_timeout(Duration::from_millis(50)).unwrap();

    let err = client
        .get(&format!("{}/slow.txt", server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(err, HttpError::Timeout(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_fetch_snapshot_decodes_trucks() {
    let server = serve(
        "/trucks.json",
        ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"name": "T1", "location": {"x": 1, "y": 2}, "status": {"__enum__": "TruckState.BUSY"},
             "fuel_level": 50, "trash_level": 10}
        ])),
    )
    .await;

    let config = DashConfig::default().with_base_url(server.uri());
    let poll = config.poll_config(&trucks_screen()).unwrap();
    let snapshot = fetch_snapshot(&ReqwestHttpClient::new(), &poll).await.unwrap();

    let records = snapshot.records().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].field("status"), Some(&FieldValue::from("BUSY")));
}

#[tokio::test]
async fn test_fetch_snapshot_status_error_keeps_body_excerpt() {
    let server = serve(
        "/map.txt",
        ResponseTemplate::new(503).set_body_string("  maintenance  "),
    )
    .await;
    let poll = PollConfig::text(format!("{}/map.txt", server.uri()), NEVER).unwrap();

    let err = fetch_snapshot(&ReqwestHttpClient::new(), &poll)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        PollError::Transport(TransportError::Status {
            status: 503,
            body: "maintenance".to_string()
        })
    );
}

#[tokio::test]
async fn test_polling_source_over_http() {
    let server = serve("/map.txt", ResponseTemplate::new(200).set_body_string("A\nB")).await;
    let poll = PollConfig::text(format!("{}/map.txt", server.uri()), NEVER)
        .unwrap()
        .with_label("map");
    let (tx, mut rx) = mpsc::unbounded_channel();
    let source = PollingSource::start_with_events(poll, Arc::new(ReqwestHttpClient::new()), tx);

    let event = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(event, PollEvent::SnapshotReplaced { source: "map".into() });
    assert_eq!(*source.current_snapshot(), Snapshot::Text("A\nB".to_string()));
    source.stop();
}

#[tokio::test]
async fn test_unreachable_server_is_swallowed() {
    let poll = PollConfig::text("http://127.0.0.1:59998/map.txt", NEVER)
        .unwrap()
        .with_label("map");
    let (tx, mut rx) = mpsc::unbounded_channel();
    let source = PollingSource::start_with_events(poll, Arc::new(ReqwestHttpClient::new()), tx);

    let event = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .unwrap()
        .unwrap();
    match event {
        PollEvent::FetchFailed { error, .. } => {
            assert_eq!(error.error_code(), "TRANSPORT_CONNECTION")
        }
        other => panic!("Expected FetchFailed, got {:?}", other),
    }
    assert_eq!(*source.current_snapshot(), Snapshot::Text(String::new()));
}
