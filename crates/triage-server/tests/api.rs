//! End-to-end tests of the HTTP API against a fixture-trained model and
//! temp-file stores.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use triage_core::TrainingSample;
use triage_model::{trainer, TrainingConfig};
use triage_server::{AppState, ServerConfig};
use triage_store::UserStore;

fn fixture_samples() -> Vec<TrainingSample> {
    let labeled: &[(&str, &str)] = &[
        ("train delayed by 4 hours without any announcement", "Punctuality"),
        ("express train running three hours late", "Punctuality"),
        ("arrival delayed again at the junction", "Punctuality"),
        ("departure delayed no information given", "Punctuality"),
        ("no water in toilet and very dirty washroom", "Cleanliness"),
        ("coach floor filthy and smelly", "Cleanliness"),
        ("washroom not cleaned for the whole journey", "Cleanliness"),
        ("dirty seats and garbage in the coach", "Cleanliness"),
        ("ticket cancelled but refund not received yet", "Refunds"),
        ("refund pending for two months", "Refunds"),
        ("cancelled ticket money not returned", "Refunds"),
        ("no refund after train cancellation", "Refunds"),
    ];
    labeled
        .iter()
        .map(|(text, dept)| TrainingSample::new(*text, *dept))
        .collect()
}

/// Trains a fixture model and wires a router over temp-file stores.
/// Returns the router and the temp dir keeping the files alive.
async fn test_app() -> (Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();

    let outcome = trainer::train(fixture_samples(), &TrainingConfig::default()).unwrap();

    let config = ServerConfig {
        port: 0,
        log_level: "warn".to_string(),
        cors_allowed_origins: "*".to_string(),
        jwt_secret: "integration-test-secret".to_string(),
        jwt_expire_minutes: 120,
        data_file: dir.path().join("complaints.json"),
        users_file: dir.path().join("users.json"),
        model_file: dir.path().join("complaint_model.json"),
        vectorizer_file: dir.path().join("tfidf_vectorizer.json"),
        static_dir: dir.path().join("static"),
    };

    let users = UserStore::new(&config.users_file);
    users.add_user("inspector", "secret123").await.unwrap();

    let state = AppState::new(config, outcome.vectorizer, outcome.model);
    (triage_server::routes::build_router(state), dir)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn login_token(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/admin/login",
            json!({"username": "inspector", "password": "secret123"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    body["access_token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_is_ok() {
    let (app, _dir) = test_app().await;
    let response = app.oneshot(get_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn submit_predicts_and_status_returns_verbatim_text() {
    let (app, _dir) = test_app().await;

    let text = "Train delayed by 4 hours";
    let response = app
        .clone()
        .oneshot(json_request("POST", "/submit", json!({"complaint": text})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let id = body["complaint_id"].as_str().unwrap().to_string();
    assert_eq!(id.len(), 8);
    assert_eq!(body["predicted"][0]["department"], "Punctuality");
    let score = body["predicted"][0]["score"].as_f64().unwrap();
    assert!(score > 0.0 && score <= 1.0);

    let response = app
        .oneshot(get_request(&format!("/status/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let record = body_json(response).await;
    assert_eq!(record["complaint"], text);
    assert_eq!(record["status"], "Pending");
    assert_eq!(record["assigned_departments"][0], "Punctuality");
}

#[tokio::test]
async fn submit_extracts_pnr_from_text_when_not_provided() {
    let (app, _dir) = test_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/submit",
            json!({"complaint": "PNR 1234567890 train delayed by two hours"}),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    let id = body["complaint_id"].as_str().unwrap();

    let response = app
        .oneshot(get_request(&format!("/status/{id}")))
        .await
        .unwrap();
    let record = body_json(response).await;
    assert_eq!(record["pnr"], "1234567890");
}

#[tokio::test]
async fn submit_rejects_empty_complaint() {
    let (app, _dir) = test_app().await;
    let response = app
        .oneshot(json_request("POST", "/submit", json!({"complaint": "   "})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn status_of_unknown_id_is_404() {
    let (app, _dir) = test_app().await;
    let response = app.oneshot(get_request("/status/00000000")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn login_with_wrong_password_is_401_and_generic() {
    let (app, _dir) = test_app().await;
    let response = app
        .oneshot(json_request(
            "POST",
            "/admin/login",
            json!({"username": "inspector", "password": "wrong"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    let message = body["error"]["message"].as_str().unwrap();
    assert!(message.contains("Invalid username or password"));
}

#[tokio::test]
async fn admin_routes_require_bearer_token() {
    let (app, _dir) = test_app().await;
    let response = app
        .oneshot(get_request("/admin/complaints"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn staff_can_list_and_update_complaints() {
    let (app, _dir) = test_app().await;
    let token = login_token(&app).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/submit",
            json!({"complaint": "refund not received for cancelled ticket"}),
        ))
        .await
        .unwrap();
    let id = body_json(response).await["complaint_id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/admin/complaints")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let all = body_json(response).await;
    assert!(all.get(&id).is_some());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/admin/update/{id}"))
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::from(
                    json!({"status": "Resolved", "departments": "Refunds, Commercial"})
                        .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get_request(&format!("/status/{id}")))
        .await
        .unwrap();
    let record = body_json(response).await;
    assert_eq!(record["status"], "Resolved");
    assert_eq!(record["assigned_departments"][0], "Refunds");
    assert_eq!(record["assigned_departments"][1], "Commercial");
}

#[tokio::test]
async fn updating_unknown_complaint_is_404() {
    let (app, _dir) = test_app().await;
    let token = login_token(&app).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/admin/update/00000000")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::from(
                    json!({"status": "Resolved", "departments": ""}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
