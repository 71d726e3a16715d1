use axum_test::TestServer;
use serde_json::json;

use will_watch_api::api::{create_router, AppState};

fn create_test_server() -> TestServer {
    let state = AppState::new().unwrap();
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_request_id_header() {
    let server = create_test_server();

    let response = server.get("/health").await;
    let generated = response.header("x-request-id");
    assert!(uuid::Uuid::parse_str(generated.to_str().unwrap()).is_ok());

    let id = "67e55044-10b1-426f-9247-bb680e5fe0c8";
    let response = server
        .get("/health")
        .add_header(
            axum::http::HeaderName::from_static("x-request-id"),
            axum::http::HeaderValue::from_static(id),
        )
        .await;
    assert_eq!(response.header("x-request-id"), id);
}

#[tokio::test]
async fn test_list_features() {
    let server = create_test_server();

    let response = server.get("/api/v1/features").await;
    response.assert_status_ok();
    let features: Vec<serde_json::Value> = response.json();

    let names: Vec<&str> = features
        .iter()
        .map(|f| f["feature"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["genre", "age_rating", "length", "era", "user_rating"]);

    let genre = &features[0];
    assert_eq!(genre["display_name"], "Genre");
    assert_eq!(genre["options"].as_array().unwrap().len(), 5);
    assert_eq!(genre["options"][4], json!({ "code": 5, "label": "Horror" }));

    let defaults: Vec<u64> = features
        .iter()
        .map(|f| f["default"].as_u64().unwrap())
        .collect();
    assert_eq!(defaults, vec![1, 2, 2, 3, 3]);
}

#[tokio::test]
async fn test_get_single_feature() {
    let server = create_test_server();

    let response = server.get("/api/v1/features/user_rating").await;
    response.assert_status_ok();
    let feature: serde_json::Value = response.json();
    let labels: Vec<&str> = feature["options"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["Poor", "Average", "Good", "Excellent"]);
}

#[tokio::test]
async fn test_get_unknown_feature() {
    let server = create_test_server();

    let response = server.get("/api/v1/features/budget").await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "unknown feature: budget");
}

#[tokio::test]
async fn test_predict_will_watch() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/predict")
        .json(&json!({
            "genre": 1,
            "age_rating": 2,
            "length": 2,
            "era": 3,
            "user_rating": 3
        }))
        .await;

    response.assert_status_ok();
    let result: serde_json::Value = response.json();
    assert_eq!(result["prediction"], 1);
    assert_eq!(result["label"], "Will Watch");
    assert!((result["score"].as_f64().unwrap() - 1.4).abs() < 1e-9);
    assert_eq!(
        result["selection"],
        json!({
            "genre": "Action",
            "age_rating": "PG-13",
            "length": "Medium",
            "era": "Modern",
            "user_rating": "Good"
        })
    );
}

#[tokio::test]
async fn test_predict_at_threshold_is_wont_watch() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/predict")
        .json(&json!({
            "genre": 5,
            "age_rating": 5,
            "length": 4,
            "era": 2,
            "user_rating": 1
        }))
        .await;

    response.assert_status_ok();
    let result: serde_json::Value = response.json();
    assert_eq!(result["prediction"], 0);
    assert_eq!(result["label"], "Won't Watch");
    assert!((result["score"].as_f64().unwrap() - 0.6).abs() < 1e-9);
}

#[tokio::test]
async fn test_predict_out_of_range() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/predict")
        .json(&json!({
            "genre": 1,
            "age_rating": 2,
            "length": 0,
            "era": 3,
            "user_rating": 3
        }))
        .await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "length must be between 1 and 4, got 0");
}

#[tokio::test]
async fn test_predict_codes_outside_byte_range() {
    let server = create_test_server();

    for (length, message) in [
        (json!(256), "length must be between 1 and 4, got 256"),
        (json!(-1), "length must be between 1 and 4, got -1"),
    ] {
        let response = server
            .post("/api/v1/predict")
            .json(&json!({
                "genre": 1,
                "age_rating": 2,
                "length": length,
                "era": 3,
                "user_rating": 3
            }))
            .await;

        response.assert_status(axum::http::StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], message);
    }
}

#[tokio::test]
async fn test_predict_malformed_body() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/predict")
        .json(&json!({
            "genre": 1,
            "age_rating": 2,
            "length": "long",
            "era": 3,
            "user_rating": 3
        }))
        .await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("length"));
}

#[tokio::test]
async fn test_accuracy() {
    let server = create_test_server();

    let response = server.get("/api/v1/accuracy").await;
    response.assert_status_ok();
    let accuracy: serde_json::Value = response.json();
    assert_eq!(accuracy["correct"], 10);
    assert_eq!(accuracy["total"], 20);
    assert_eq!(accuracy["display"], "50.0");
}

#[tokio::test]
async fn test_dataset() {
    let server = create_test_server();

    let response = server.get("/api/v1/dataset").await;
    response.assert_status_ok();
    let rows: Vec<serde_json::Value> = response.json();
    assert_eq!(rows.len(), 20);

    let third = &rows[2];
    assert_eq!(third["id"], 3);
    assert_eq!(
        third["features"],
        json!({ "genre": 1, "age_rating": 5, "length": 2, "era": 2, "user_rating": 1 })
    );
    assert_eq!(third["labels"]["age_rating"], "R");
    assert_eq!(third["output"], 0);
    assert_eq!(third["output_label"], "Won't Watch");
    assert_eq!(third["predicted"], 1);

    let matching = rows
        .iter()
        .filter(|row| row["output"] == row["predicted"])
        .count();
    assert_eq!(matching, 10);
}

#[tokio::test]
async fn test_unknown_route() {
    let server = create_test_server();
    let response = server.get("/api/v1/movies").await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);
}
