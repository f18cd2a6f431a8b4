mod common;

use axum::{
    extract::{Path, RawQuery, State},
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use common::{pick_free_port, spawn_server};
use reqwest::Client;
use serde_json::Value;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

#[derive(Debug, Clone)]
struct Recorded {
    table: String,
    query: Option<String>,
    prefer: Option<String>,
    apikey: Option<String>,
    body: Value,
}

#[derive(Default)]
struct MockBackend {
    requests: Mutex<Vec<Recorded>>,
    fail: AtomicBool,
}

impl MockBackend {
    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

async fn record(
    State(backend): State<Arc<MockBackend>>,
    Path(table): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> StatusCode {
    if backend.fail.load(Ordering::SeqCst) {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };
    backend.requests.lock().unwrap().push(Recorded {
        table,
        query,
        prefer: header("prefer"),
        apikey: header("apikey"),
        body,
    });
    StatusCode::CREATED
}

async fn start_backend() -> (String, Arc<MockBackend>) {
    let backend = Arc::new(MockBackend::default());
    let app = Router::new()
        .route("/rest/v1/:table", post(record))
        .with_state(Arc::clone(&backend));

    let port = pick_free_port();
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .expect("bind mock backend");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (format!("http://127.0.0.1:{port}"), backend)
}

fn remote_env(url: String) -> Vec<(&'static str, String)> {
    vec![
        ("REBOOT_REMOTE_URL", url),
        ("REBOOT_REMOTE_KEY", "test-key".to_string()),
    ]
}

#[tokio::test]
async fn diary_entry_is_inserted_as_single_row() {
    let (url, backend) = start_backend().await;
    let server = spawn_server(&remote_env(url)).await;
    let client = Client::new();

    let response = client
        .post(server.url("/api/diary"))
        .json(&serde_json::json!({
            "feelings": "anxious in the morning",
            "triggers": "late night scrolling",
            "symptoms": "restless",
            "relapse": true
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.table, "diario");
    assert_eq!(request.apikey.as_deref(), Some("test-key"));
    assert_eq!(
        request.body,
        serde_json::json!([{
            "sentimentos": "anxious in the morning",
            "gatilhos": "late night scrolling",
            "sintomas": "restless",
            "recaida": true
        }])
    );
}

#[tokio::test]
async fn diary_form_stays_on_page_when_backend_fails() {
    let (url, backend) = start_backend().await;
    backend.fail.store(true, Ordering::SeqCst);
    let server = spawn_server(&remote_env(url)).await;
    let client = Client::new();

    let response = client
        .post(server.url("/diary"))
        .form(&[("feelings", "tired"), ("relapse", "on")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let page = response.text().await.unwrap();
    assert!(page.contains("failed to save diary entry"));
    assert!(page.contains("action=\"/diary\""));

    // stats are independent of the remote outcome
    let response = client
        .post(server.url("/api/entries"))
        .json(&serde_json::json!({ "mood": 3 }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    backend.fail.store(false, Ordering::SeqCst);
    let response = client
        .post(server.url("/diary"))
        .form(&[("feelings", "tired"), ("relapse", "on")])
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].body[0]["recaida"], true);
    assert_eq!(requests[0].body[0]["sintomas"], "");
}

#[tokio::test]
async fn profile_upsert_is_keyed_by_id() {
    let (url, backend) = start_backend().await;
    let server = spawn_server(&remote_env(url)).await;
    let client = Client::new();

    for _ in 0..2 {
        let response = client
            .post(server.url("/api/profile"))
            .json(&serde_json::json!({ "user_id": "user-42", "email": "someone@example.com" }))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
        let profile: Value = response.json().await.unwrap();
        assert_eq!(profile["id"], "user-42");
        assert_eq!(profile["current_streak"], 0);
    }

    let requests = backend.requests();
    assert_eq!(requests.len(), 2);
    for request in &requests {
        assert_eq!(request.table, "user_profiles");
        assert_eq!(request.query.as_deref(), Some("on_conflict=id"));
        assert_eq!(request.prefer.as_deref(), Some("resolution=merge-duplicates"));
        assert_eq!(request.body["id"], "user-42");
        assert_eq!(request.body["email"], "someone@example.com");
        assert_eq!(request.body["longest_streak"], 0);
        assert_eq!(request.body["total_days"], 0);
        assert!(request.body["start_date"].is_string());
    }

    let response = client
        .post(server.url("/api/profile"))
        .json(&serde_json::json!({ "user_id": "  ", "email": "someone@example.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
