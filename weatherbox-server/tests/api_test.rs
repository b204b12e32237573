use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use weatherbox_server::configs::Store;

mod common;
use common::mock_app::{body_json, get, MockApp};

#[tokio::test]
async fn test_health() {
    let app = MockApp::new().with_health_handle();
    app.record("box2", json!({"temperature": 70})).await;
    app.record("box1", json!({"temperature": 71})).await;

    let response = app.router.clone().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], json!("running"));
    assert_eq!(body["mqtt_broker"], json!("localhost:1883"));
    assert_eq!(body["active_units"], json!(["box1", "box2"]));
    assert_eq!(body["total_units"], json!(2));
}

#[tokio::test]
async fn test_history() {
    let app = MockApp::new().with_history_handle();
    for i in 0..5 {
        app.record("box1", json!({"temperature": 60 + i, "rainfall": 0.0})).await;
    }

    let response = app.router.clone().oneshot(get("/api/history/box1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["unit_id"], json!("box1"));
    assert_eq!(body["data_points"], json!(5));

    let history = body["history"].as_array().unwrap();
    assert_eq!(history[0]["temperature"], json!(60.0));
    assert_eq!(history[4]["temperature"], json!(64.0));
    assert!(history[0].get("raw_payload").is_none());

    let response = app.router.clone().oneshot(get("/api/history/box1?hours=24")).await.unwrap();
    assert_eq!(body_json(response).await["data_points"], json!(5));
}

#[tokio::test]
async fn test_history_bounded() {
    let app = MockApp::with_store(Store {
        max_history_points: 288,
        offline_after: None,
    })
    .with_history_handle();
    for i in 0..290 {
        app.record("box1", json!({"temperature": i})).await;
    }

    let response = app.router.clone().oneshot(get("/api/history/box1")).await.unwrap();
    let body = body_json(response).await;

    assert_eq!(body["data_points"], json!(288));
    assert_eq!(body["history"][0]["temperature"], json!(2.0));
}

#[tokio::test]
async fn test_history_unknown_unit() {
    let app = MockApp::new().with_history_handle();

    let response = app.router.clone().oneshot(get("/api/history/ghost")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["error"]["message"], json!("No historical data for unit 'ghost'"));
}

#[tokio::test]
async fn test_history_hours_window() {
    let app = MockApp::new().with_history_handle();
    for i in 0..3 {
        app.record("box1", json!({"temperature": i})).await;
    }

    let response = app
        .router
        .clone()
        .oneshot(get("/api/history/box1?hours=4294967295"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data_points"], json!(3));

    let response = app.router.clone().oneshot(get("/api/history/box1?hours=0")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data_points"], json!(0));
    assert_eq!(body["history"], json!([]));
}

#[tokio::test]
async fn test_history_invalid_hours() {
    let app = MockApp::new().with_history_handle();
    app.record("box1", json!({"temperature": 70})).await;

    for uri in ["/api/history/box1?hours=abc", "/api/history/box1?hours=-1", "/api/history/box1?hours=4294967296"] {
        let response = app.router.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], json!(400));
        assert!(body["error"]["message"].as_str().unwrap().starts_with("Invalid query"));
    }
}

#[tokio::test]
async fn test_status_summary() {
    let app = MockApp::new().with_status_handle();
    for unit_id in ["box1", "box2", "box3"] {
        app.record(unit_id, json!({"humidity": 45})).await;
    }

    let response = app.router.clone().oneshot(get("/api/status")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["total"], json!(3));
    assert_eq!(body["online"], json!(3));
    assert_eq!(body["offline"], json!(0));
    assert!(body["last_update"].is_string());
}
