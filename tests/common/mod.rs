//! In-process mock of the Obsidian Local REST API.
//!
//! Serves an in-memory vault on 127.0.0.1 and records every request so tests
//! can assert on headers, bodies, and call counts.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::{json, Value};

pub const API_KEY: &str = "test-key";
pub const NOTE_JSON: &str = "application/vnd.olrapi.note+json";

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub accept: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Default)]
struct Inner {
    files: HashMap<String, String>,
    requests: Vec<Recorded>,
    forced: Option<(u16, String)>,
}

#[derive(Clone, Default)]
pub struct MockVault {
    inner: Arc<Mutex<Inner>>,
}

impl MockVault {
    pub fn with_note(self, path: &str, content: &str) -> Self {
        self.inner
            .lock()
            .unwrap()
            .files
            .insert(path.to_string(), content.to_string());
        self
    }

    /// Answer every request with this status and body.
    pub fn force_response(&self, status: u16, body: &str) {
        self.inner.lock().unwrap().forced = Some((status, body.to_string()));
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn file(&self, path: &str) -> Option<String> {
        self.inner.lock().unwrap().files.get(path).cloned()
    }

    /// Start serving; returns the base URL.
    pub async fn spawn(&self) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new().fallback(handle).with_state(self.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn error(status: StatusCode, message: &str) -> Response {
    let body = json!({ "errorCode": u32::from(status.as_u16()) * 100, "message": message });
    (status, body.to_string()).into_response()
}

enum Target {
    Collection,
    File(String),
}

fn target(path: &str) -> Option<Target> {
    if path == "/vault/files" {
        return Some(Target::Collection);
    }
    path.strip_prefix("/vault/files/")
        .or_else(|| path.strip_prefix("/vault/"))
        .map(|p| Target::File(p.to_string()))
}

async fn handle(
    State(vault): State<MockVault>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = urlencoding::decode(uri.path())
        .map(|p| p.into_owned())
        .unwrap_or_else(|_| uri.path().to_string());
    let body = String::from_utf8_lossy(&body).into_owned();
    let record = Recorded {
        method: method.to_string(),
        path: path.clone(),
        authorization: header_value(&headers, header::AUTHORIZATION),
        accept: header_value(&headers, header::ACCEPT),
        content_type: header_value(&headers, header::CONTENT_TYPE),
        body: body.clone(),
    };

    let mut inner = vault.inner.lock().unwrap();
    inner.requests.push(record.clone());

    if let Some((status, forced)) = inner.forced.clone() {
        return (StatusCode::from_u16(status).unwrap(), forced).into_response();
    }

    let expected = format!("Bearer {}", API_KEY);
    if record.authorization.as_deref() != Some(expected.as_str()) {
        return error(StatusCode::UNAUTHORIZED, "Authorization required");
    }

    match (method, target(&path)) {
        (Method::POST, Some(Target::Collection)) => {
            let parsed: Value = match serde_json::from_str(&body) {
                Ok(v) => v,
                Err(_) => return error(StatusCode::BAD_REQUEST, "invalid JSON"),
            };
            let (Some(p), Some(c)) = (parsed["path"].as_str(), parsed["content"].as_str()) else {
                return error(StatusCode::BAD_REQUEST, "path and content are required");
            };
            if inner.files.contains_key(p) {
                return error(StatusCode::CONFLICT, "File already exists");
            }
            inner.files.insert(p.to_string(), c.to_string());
            StatusCode::CREATED.into_response()
        }
        (Method::GET, Some(Target::File(p))) => {
            if p == "broken.md" {
                return (StatusCode::OK, "definitely not json").into_response();
            }
            if p == "latin1.md" {
                // "café" in ISO-8859-1
                return (StatusCode::OK, vec![0x63u8, 0x61, 0x66, 0xe9]).into_response();
            }
            let Some(content) = inner.files.get(&p).cloned() else {
                return error(StatusCode::NOT_FOUND, "Not Found");
            };
            if record.accept.as_deref() == Some(NOTE_JSON) {
                let note = json!({
                    "content": content,
                    "frontmatter": {},
                    "path": p,
                    "stat": {"ctime": 1700000000000i64, "mtime": 1700000100000i64, "size": content.len()},
                    "tags": []
                });
                (
                    StatusCode::OK,
                    [(header::CONTENT_TYPE, NOTE_JSON)],
                    note.to_string(),
                )
                    .into_response()
            } else {
                (StatusCode::OK, [(header::CONTENT_TYPE, "text/markdown")], content).into_response()
            }
        }
        (Method::PUT, Some(Target::File(p))) => {
            let content = if record.content_type.as_deref() == Some("application/json") {
                match serde_json::from_str::<Value>(&body)
                    .ok()
                    .and_then(|v| v["content"].as_str().map(str::to_string))
                {
                    Some(c) => c,
                    None => return error(StatusCode::BAD_REQUEST, "content is required"),
                }
            } else {
                body
            };
            inner.files.insert(p, content);
            StatusCode::NO_CONTENT.into_response()
        }
        (Method::DELETE, Some(Target::File(p))) => match inner.files.remove(&p) {
            Some(_) => StatusCode::NO_CONTENT.into_response(),
            None => error(StatusCode::NOT_FOUND, "Not Found"),
        },
        _ => error(StatusCode::METHOD_NOT_ALLOWED, "Unsupported"),
    }
}
