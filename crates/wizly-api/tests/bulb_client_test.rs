#![allow(clippy::unwrap_used)]
// Integration tests for `BulbClient` using wiremock.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wizly_api::{BulbClient, BulbRecord, Error};

// ── Helpers ─────────────────────────────────────────────────────────

const SCAN_TIMEOUT: Duration = Duration::from_secs(5);

async fn setup() -> (MockServer, BulbClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = BulbClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

fn desk(state: i32) -> serde_json::Value {
    json!({ "ip": "10.0.0.7", "name": "Desk", "state": state, "scene_id": 11, "scene": "Warm White" })
}

// ── Inventory ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_bulbs() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/crud/bulbs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "bulbs": [
                desk(1),
                { "ip": "10.0.0.8", "name": "10.0.0.8", "state": 0, "scene_id": 0, "scene": "" }
            ]
        })))
        .mount(&server)
        .await;

    let bulbs = client.list_bulbs().await.unwrap();

    assert_eq!(bulbs.len(), 2);
    assert_eq!(bulbs[0].ip, "10.0.0.7");
    assert_eq!(bulbs[0].name.as_deref(), Some("Desk"));
    assert_eq!(bulbs[0].scene_id, Some(11));
    assert_eq!(bulbs[1].state, 0);
}

#[tokio::test]
async fn test_get_bulb() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/crud/bulbs/10.0.0.7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(desk(1)))
        .mount(&server)
        .await;

    let bulb = client.get_bulb("10.0.0.7").await.unwrap();
    assert_eq!(bulb.name.as_deref(), Some("Desk"));
}

#[tokio::test]
async fn test_get_bulb_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/crud/bulbs/10.0.0.99"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client.get_bulb("10.0.0.99").await.unwrap_err();
    assert!(err.is_not_found(), "expected 404, got: {err:?}");
}

#[tokio::test]
async fn test_update_bulb_sends_full_record() {
    let (server, client) = setup().await;

    let record = BulbRecord {
        ip: "10.0.0.7".into(),
        name: Some("Kitchen".into()),
        state: 1,
        scene_id: Some(11),
        scene: Some("Warm White".into()),
    };

    Mock::given(method("PUT"))
        .and(path("/crud/bulbs/10.0.0.7"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "ip": "10.0.0.7", "name": "Kitchen", "state": 1, "scene_id": 11, "scene": "Warm White"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "bulbs": [{ "ip": "10.0.0.7", "name": "Kitchen", "state": 1, "scene_id": 11, "scene": "Warm White" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let bulbs = client.update_bulb(&record).await.unwrap();
    assert_eq!(bulbs, vec![record]);
}

#[tokio::test]
async fn test_delete_bulb_ignores_body() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/crud/bulbs/10.0.0.7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_bulb("10.0.0.7").await.unwrap();
}

#[tokio::test]
async fn test_delete_bulb_failure_status() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    match client.delete_bulb("10.0.0.7").await {
        Err(Error::Status { status, reason }) => {
            assert_eq!(status, 404);
            assert_eq!(reason, "Not Found");
        }
        other => panic!("expected Status error, got: {other:?}"),
    }
}

// ── Control ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_power_on_broadcast() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/wiz/on/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "bulbs": [desk(255)] })))
        .expect(1)
        .mount(&server)
        .await;

    let bulbs = client.power_on("all").await.unwrap();
    assert_eq!(bulbs[0].state, 255);
}

#[tokio::test]
async fn test_power_off() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/wiz/off/10.0.0.7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "bulbs": [desk(0)] })))
        .expect(1)
        .mount(&server)
        .await;

    let bulbs = client.power_off("10.0.0.7").await.unwrap();
    assert_eq!(bulbs[0].state, 0);
}

#[tokio::test]
async fn test_apply_and_toggle_scene_paths() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/wiz/scene/10.0.0.7/27"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "bulbs": [desk(1)] })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/wiz/toggle/all/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "bulbs": [] })))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(client.apply_scene("10.0.0.7", 27).await.unwrap().len(), 1);
    assert!(client.toggle_scene("all", 5).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_scan() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/wiz/scan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "bulbs": [desk(-1)] })))
        .mount(&server)
        .await;

    let bulbs = client.scan(SCAN_TIMEOUT).await.unwrap();
    assert_eq!(bulbs[0].state, -1);
}

#[tokio::test]
async fn test_scan_outlives_client_request_timeout() {
    let server = MockServer::start().await;
    let http = reqwest::Client::builder()
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    let client = BulbClient::with_client(http, Url::parse(&server.uri()).unwrap());

    Mock::given(method("GET"))
        .and(path("/wiz/scan"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "bulbs": [desk(0)] }))
                .set_delay(Duration::from_millis(600)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/crud/bulbs"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "bulbs": [] }))
                .set_delay(Duration::from_millis(600)),
        )
        .mount(&server)
        .await;

    assert_eq!(client.scan(SCAN_TIMEOUT).await.unwrap().len(), 1);
    assert!(matches!(client.list_bulbs().await, Err(Error::Transport(_))));
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_application_error_on_success_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/wiz/scan"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "error": "Scan error: timed out" })),
        )
        .mount(&server)
        .await;

    match client.scan(SCAN_TIMEOUT).await {
        Err(Error::Application { message }) => assert_eq!(message, "Scan error: timed out"),
        other => panic!("expected Application error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_error_field_is_success() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/wiz/on/all"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "bulbs": [desk(1)], "error": "" })),
        )
        .mount(&server)
        .await;

    let bulbs = client.power_on("all").await.unwrap();
    assert_eq!(bulbs.len(), 1);
    assert_eq!(bulbs[0].state, 1);
}

#[tokio::test]
async fn test_non_success_status_ignores_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/crud/bulbs"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "bulbs": [desk(1)] })))
        .mount(&server)
        .await;

    let err = client.list_bulbs().await.unwrap_err();
    assert_eq!(err.to_string(), "HTTP 500 Internal Server Error");
}

#[tokio::test]
async fn test_garbage_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/wiz/on/10.0.0.7"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    match client.power_on("10.0.0.7").await {
        Err(Error::Deserialization { body, .. }) => assert_eq!(body, "<html>oops</html>"),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}
