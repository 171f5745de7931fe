//! End-to-end tests for the visualizer HTTP API.
//!
//! Requests go straight to the router through `tower::ServiceExt::oneshot`;
//! no socket is opened. Every test builds its own seeded server state.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use algoscope_vis::{VisConfig, VisServer};

// Helpers

async fn test_app() -> Router {
    let config = VisConfig {
        seed: Some(1),
        ..VisConfig::default()
    };
    VisServer::new(config).await.router()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn post_json(app: &Router, path: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    send(app, request).await
}

async fn post(app: &Router, path: &str) -> (StatusCode, Value) {
    post_json(app, path, json!({})).await
}

async fn get_json(app: &Router, path: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(path).body(Body::empty()).unwrap();
    send(app, request).await
}

// Health and catalogue

#[tokio::test]
async fn health_check() {
    let app = test_app().await;
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn catalogue_lists_every_family() {
    let app = test_app().await;
    let (status, body) = get_json(&app, "/api/catalogue").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sorting"].as_array().unwrap().len(), 5);
    assert_eq!(body["searching"].as_array().unwrap().len(), 2);
    assert_eq!(body["trees"].as_array().unwrap().len(), 5);
    assert_eq!(body["graphs"].as_array().unwrap().len(), 3);
    assert_eq!(body["sorting"][0]["id"], "bubble");
    assert_eq!(body["sorting"][0]["name"], "Bubble Sort");
    assert_eq!(body["graphs"][2]["id"], "dijkstra");
}

// Builders

#[tokio::test]
async fn invalid_array_leaves_page_unchanged() {
    let app = test_app().await;
    let (_, before) = get_json(&app, "/api/sorting").await;
    assert_eq!(before["page"]["values"].as_array().unwrap().len(), 20);

    let (status, body) =
        post_json(&app, "/api/sorting/array", json!({ "values": "4, banana" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("banana"));

    let (_, after) = get_json(&app, "/api/sorting").await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn array_over_the_cap_is_rejected() {
    let app = test_app().await;
    let values = (1..=51).map(|v| v.to_string()).collect::<Vec<_>>().join(",");
    let (status, _) = post_json(&app, "/api/sorting/array", json!({ "values": values })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn mistyped_numbers_are_bad_requests() {
    let app = test_app().await;
    let (_, before) = get_json(&app, "/api/sorting").await;

    let cases = [
        ("/api/sorting/append", json!({ "value": "abc" })),
        ("/api/sorting/append", json!({ "value": -5 })),
        ("/api/trees/insert", json!({ "value": 1.5 })),
        ("/api/graphs/edge", json!({ "from": "A", "to": "B", "weight": -1 })),
        ("/api/playback/sorting/seek", json!({ "cursor": "end" })),
        ("/api/sorting/array", json!({})),
    ];
    for (path, body) in cases {
        let (status, reply) = post_json(&app, path, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{path}");
        let error = reply["error"].as_str().unwrap();
        assert!(error.starts_with("invalid input: "), "{path}: {error}");
    }

    let (_, after) = get_json(&app, "/api/sorting").await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn unreadable_body_is_a_bad_request() {
    let app = test_app().await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/stack/push")
        .header("content-type", "application/json")
        .body(Body::from("{\"value\":"))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn binary_search_keeps_values_sorted() {
    let app = test_app().await;
    post_json(&app, "/api/searching/algorithm", json!({ "algorithm": "binary" })).await;
    let (status, body) =
        post_json(&app, "/api/searching/array", json!({ "values": "9 3 7 1" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"]["values"], json!([1, 3, 7, 9]));
    assert_eq!(body["page"]["algorithm"], "binary");
}

#[tokio::test]
async fn tree_insert_and_clear() {
    let app = test_app().await;
    let (_, body) = post_json(&app, "/api/trees/values", json!({ "values": "50 30 70" })).await;
    assert_eq!(body["page"]["nodes"].as_array().unwrap().len(), 3);

    let (_, body) = post_json(&app, "/api/trees/insert", json!({ "value": 30 })).await;
    assert_eq!(body["page"]["nodes"].as_array().unwrap().len(), 3);

    let (_, body) = post(&app, "/api/trees/clear").await;
    assert_eq!(body["page"]["root"], Value::Null);

    let (status, body) = post(&app, "/api/playback/trees/play").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Tree is empty");
}

#[tokio::test]
async fn graph_start_must_exist() {
    let app = test_app().await;
    let (status, _) = post_json(&app, "/api/graphs/start", json!({ "node": "Z" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = post_json(&app, "/api/graphs/start", json!({ "node": "C" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"]["start"], "C");
    assert_eq!(body["page"]["end"], "G");
}

// Playback

#[tokio::test]
async fn step_regenerates_trace_after_edit() {
    let app = test_app().await;
    let (_, body) = post_json(&app, "/api/sorting/array", json!({ "values": "5 3 8 1" })).await;
    assert_eq!(body["playback"]["state"], "idle");

    let (status, body) = post(&app, "/api/playback/sorting/step").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["playback"]["state"], "paused");
    assert_eq!(body["playback"]["cursor"], 1);
    assert_eq!(body["playback"]["current"]["kind"], "compare");
    assert_eq!(
        body["playback"]["current"]["description"],
        "Comparing elements 5 and 3"
    );
    assert_eq!(body["playback"]["stats"]["comparisons"], 1);

    let (_, body) = post(&app, "/api/playback/sorting/step-back").await;
    assert_eq!(body["playback"]["state"], "ready");
    assert_eq!(body["playback"]["current"], Value::Null);
}

#[tokio::test]
async fn play_on_empty_array_conflicts() {
    let app = test_app().await;
    post(&app, "/api/sorting/clear").await;
    let (status, body) = post(&app, "/api/playback/sorting/play").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Array is empty");

    let (_, body) = get_json(&app, "/api/playback/sorting").await;
    assert_eq!(body["playback"]["state"], "idle");
}

#[tokio::test]
async fn seek_clamps_to_the_end() {
    let app = test_app().await;
    post(&app, "/api/playback/trees/step").await;
    let (status, body) =
        post_json(&app, "/api/playback/trees/seek", json!({ "cursor": 10_000 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["playback"]["cursor"], body["playback"]["total"]);
    assert_eq!(body["playback"]["state"], "finished");
    assert_eq!(body["playback"]["current"]["kind"], "finish");
}

#[tokio::test]
async fn speed_accepts_slider_positions() {
    let app = test_app().await;
    let (_, body) = post_json(&app, "/api/playback/graphs/speed", json!({ "slider": 300 })).await;
    assert_eq!(body["playback"]["delayMs"], 800);

    let (_, body) = post_json(&app, "/api/playback/graphs/speed", json!({ "delayMs": 5 })).await;
    assert_eq!(body["playback"]["delayMs"], 100);

    let (status, _) = post_json(&app, "/api/playback/graphs/speed", json!({ "speed": 5 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_page_is_rejected() {
    let app = test_app().await;
    let (status, _) = post(&app, "/api/playback/heaps/play").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn pause_outside_playing_is_a_no_op() {
    let app = test_app().await;
    let (status, body) = post(&app, "/api/playback/searching/pause").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["playback"]["state"], "idle");
}

// Stack and queue

#[tokio::test]
async fn stack_push_push_pop() {
    let app = test_app().await;
    post_json(&app, "/api/stack/push", json!({ "value": "a" })).await;
    post_json(&app, "/api/stack/push", json!({ "value": "b" })).await;

    let (status, body) = post(&app, "/api/stack/pop").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["value"], "b");
    assert_eq!(body["items"], json!(["a"]));
    assert_eq!(body["history"][0]["kind"], "pop");
    assert_eq!(body["history"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn blank_push_is_rejected() {
    let app = test_app().await;
    let (status, _) = post_json(&app, "/api/stack/push", json!({ "value": "   " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (_, body) = get_json(&app, "/api/stack").await;
    assert_eq!(body["size"], 0);
}

#[tokio::test]
async fn dequeue_on_empty_queue_is_recorded() {
    let app = test_app().await;
    let (status, body) = post(&app, "/api/queue/dequeue").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Queue is empty");

    let (_, body) = get_json(&app, "/api/queue").await;
    assert_eq!(body["history"][0]["kind"], "dequeue");
    assert_eq!(body["history"][0]["result"], "Queue is empty");
}

#[tokio::test]
async fn queue_is_first_in_first_out() {
    let app = test_app().await;
    post_json(&app, "/api/queue/enqueue", json!({ "value": "x" })).await;
    post_json(&app, "/api/queue/enqueue", json!({ "value": "y" })).await;

    let (_, body) = post(&app, "/api/queue/front").await;
    assert_eq!(body["value"], "x");
    let (_, body) = post(&app, "/api/queue/dequeue").await;
    assert_eq!(body["value"], "x");
    assert_eq!(body["items"], json!(["y"]));

    let (_, body) = post(&app, "/api/queue/is-empty").await;
    assert_eq!(body["isEmpty"], false);
}
