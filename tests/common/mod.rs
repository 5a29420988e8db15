//! In-process fake of the timeline backend

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

pub const GOOD_TOKEN: &str = "T1";

/// Article whose like count endpoint always fails
pub const BROKEN_LIKES_ID: u64 = 2;

#[derive(Default)]
pub struct Backend {
    /// (path, Authorization header) for every request seen
    pub seen: Mutex<Vec<(String, Option<String>)>>,
    pub likes: Mutex<u64>,
}

impl Backend {
    fn record(&self, path: impl Into<String>, headers: &HeaderMap) {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.seen.lock().unwrap().push((path.into(), auth));
    }

    pub fn auth_for(&self, path: &str) -> Vec<Option<String>> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| p == path)
            .map(|(_, a)| a.clone())
            .collect()
    }

    pub fn request_count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers.get("authorization").and_then(|v| v.to_str().ok()) == Some(GOOD_TOKEN)
}

fn article(id: u64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "content": format!("{} body", title),
        "author": "ann",
        "created_at": "2024-05-01T10:00:00Z"
    })
}

async fn login(State(b): State<Arc<Backend>>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    b.record("/api/auth/login", &headers);
    if body["username"] == "a" && body["password"] == "b" {
        Json(json!({ "token": GOOD_TOKEN })).into_response()
    } else {
        (StatusCode::UNAUTHORIZED, "invalid credentials").into_response()
    }
}

async fn register(State(b): State<Arc<Backend>>, headers: HeaderMap, Json(_body): Json<Value>) -> Response {
    b.record("/api/auth/register", &headers);
    Json(json!({ "token": GOOD_TOKEN })).into_response()
}

async fn list_articles(State(b): State<Arc<Backend>>, headers: HeaderMap) -> Response {
    b.record("/api/articles", &headers);
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(json!([article(3, "third"), article(1, "first"), article(2, "second")])).into_response()
}

async fn create_article(State(b): State<Arc<Backend>>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    b.record("/api/articles#post", &headers);
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(json!({
        "id": 10,
        "title": body["title"],
        "content": body["content"],
        "author": body["author"],
    }))
    .into_response()
}

async fn like(State(b): State<Arc<Backend>>, headers: HeaderMap, Path(id): Path<u64>) -> Response {
    b.record(format!("/api/articles/{}/like", id), &headers);
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    *b.likes.lock().unwrap() += 1;
    Json(json!({ "message": "liked" })).into_response()
}

async fn likes(State(b): State<Arc<Backend>>, headers: HeaderMap, Path(id): Path<u64>) -> Response {
    b.record(format!("/api/articles/{}/likes", id), &headers);
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if id == BROKEN_LIKES_ID {
        return (StatusCode::INTERNAL_SERVER_ERROR, "redis unavailable").into_response();
    }
    let extra = *b.likes.lock().unwrap();
    if id == 3 {
        // Numeric form, as some deployments send it
        Json(json!({ "likes": 4 + extra })).into_response()
    } else {
        Json(json!({ "likes": (id + extra).to_string() })).into_response()
    }
}

async fn rates(State(b): State<Arc<Backend>>, headers: HeaderMap) -> Response {
    b.record("/api/exchangeRates", &headers);
    Json(json!([
        { "id": 1, "base_currency": "USD", "target_currency": "EUR", "rate": 0.92, "date": "2024-05-01T00:00:00Z" },
        { "id": 2, "base_currency": "USD", "target_currency": "JPY", "rate": 155.3, "date": "2024-05-01T00:00:00Z" }
    ]))
    .into_response()
}

async fn ping() -> Json<Value> {
    Json(json!({ "message": "pong" }))
}

/// Start the fake on an ephemeral port; returns its base URL
pub async fn spawn_backend() -> (String, Arc<Backend>) {
    let backend = Arc::new(Backend::default());
    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/articles", get(list_articles).post(create_article))
        .route("/api/articles/:id/like", post(like))
        .route("/api/articles/:id/likes", get(likes))
        .route("/api/exchangeRates", get(rates))
        .route("/ping", get(ping))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), backend)
}
