//! In-memory stand-ins for the repositories and the image store.
//!
//! Each fake counts every call it receives and can be switched into a
//! failing mode that answers with a backend/storage error. `StubBackend`
//! serves the HTTP adapters from a local listener instead.

use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use chrono::Utc;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::core::config::SupabaseConfig;
use crate::core::error::{AppError, Result};
use crate::features::categories::models::Category;
use crate::features::categories::repositories::CategoryRepository;
use crate::features::items::models::{Item, ItemFields};
use crate::features::items::repositories::ItemRepository;
use crate::modules::storage::ImageStore;
use crate::modules::supabase::SupabaseClient;

/// Call counter and failure switch shared by the fakes
#[derive(Default)]
struct CallTracker {
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl CallTracker {
    fn hit(&self) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.failing.load(Ordering::SeqCst)
    }
}

pub struct FakeCategoryRepository {
    rows: Mutex<Vec<Category>>,
    next_id: AtomicI64,
    tracker: CallTracker,
}

impl FakeCategoryRepository {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            tracker: CallTracker::default(),
        }
    }

    pub fn call_count(&self) -> usize {
        self.tracker.calls.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, failing: bool) {
        self.tracker.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl CategoryRepository for FakeCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>> {
        if self.tracker.hit() {
            return Err(backend_down());
        }
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn insert(&self, title: &str) -> Result<Category> {
        if self.tracker.hit() {
            return Err(backend_down());
        }
        let category = Category {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            created_at: Utc::now(),
            title: title.to_string(),
        };
        self.rows.lock().unwrap().push(category.clone());
        Ok(category)
    }

    async fn update(&self, id: i64, title: &str) -> Result<Category> {
        if self.tracker.hit() {
            return Err(backend_down());
        }
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))?;
        row.title = title.to_string();
        Ok(row.clone())
    }

    async fn delete(&self, id: i64) -> Result<Category> {
        if self.tracker.hit() {
            return Err(backend_down());
        }
        let mut rows = self.rows.lock().unwrap();
        let index = rows
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))?;
        Ok(rows.remove(index))
    }
}

pub struct FakeItemRepository {
    rows: Mutex<Vec<Item>>,
    next_id: AtomicI64,
    tracker: CallTracker,
}

impl FakeItemRepository {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            tracker: CallTracker::default(),
        }
    }

    pub fn call_count(&self) -> usize {
        self.tracker.calls.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, failing: bool) {
        self.tracker.failing.store(failing, Ordering::SeqCst);
    }

    /// Current rows without counting a call
    pub fn rows(&self) -> Vec<Item> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl ItemRepository for FakeItemRepository {
    async fn list(&self) -> Result<Vec<Item>> {
        if self.tracker.hit() {
            return Err(backend_down());
        }
        Ok(self.rows())
    }

    async fn insert(&self, fields: &ItemFields) -> Result<Item> {
        if self.tracker.hit() {
            return Err(backend_down());
        }
        let item = Item {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            created_at: Utc::now(),
            title: fields.title.clone(),
            description: fields.description.clone(),
            price: fields.price,
            image_path: fields.image_path.clone(),
            category: fields.category,
        };
        self.rows.lock().unwrap().push(item.clone());
        Ok(item)
    }

    async fn update(&self, id: i64, fields: &ItemFields) -> Result<Item> {
        if self.tracker.hit() {
            return Err(backend_down());
        }
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Item {} not found", id)))?;
        row.title = fields.title.clone();
        row.description = fields.description.clone();
        row.price = fields.price;
        row.image_path = fields.image_path.clone();
        row.category = fields.category;
        Ok(row.clone())
    }

    async fn delete(&self, id: i64) -> Result<Item> {
        if self.tracker.hit() {
            return Err(backend_down());
        }
        let mut rows = self.rows.lock().unwrap();
        let index = rows
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Item {} not found", id)))?;
        Ok(rows.remove(index))
    }
}

/// Image store that keeps keys in memory and serves a Supabase-shaped public URL
pub struct FakeImageStore {
    bucket: String,
    uploaded: Mutex<Vec<String>>,
    removed: Mutex<Vec<String>>,
    tracker: CallTracker,
}

impl FakeImageStore {
    pub fn new(bucket: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            uploaded: Mutex::new(Vec::new()),
            removed: Mutex::new(Vec::new()),
            tracker: CallTracker::default(),
        }
    }

    pub fn call_count(&self) -> usize {
        self.tracker.calls.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, failing: bool) {
        self.tracker.failing.store(failing, Ordering::SeqCst);
    }

    pub fn uploaded_keys(&self) -> Vec<String> {
        self.uploaded.lock().unwrap().clone()
    }

    pub fn removed_keys(&self) -> Vec<String> {
        self.removed.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageStore for FakeImageStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn upload(&self, key: &str, _data: Vec<u8>, _content_type: &str) -> Result<()> {
        if self.tracker.hit() {
            return Err(AppError::Storage("storage unavailable".to_string()));
        }
        self.uploaded.lock().unwrap().push(key.to_string());
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!(
            "https://test.supabase.co/storage/v1/object/public/{}/{}",
            self.bucket, key
        )
    }

    async fn remove(&self, keys: &[String]) -> Result<()> {
        if self.tracker.hit() {
            return Err(AppError::Storage("storage unavailable".to_string()));
        }
        self.removed.lock().unwrap().extend_from_slice(keys);
        Ok(())
    }
}

fn backend_down() -> AppError {
    AppError::Backend("HTTP 503 - backend unavailable".to_string())
}

/// One request seen by [`StubBackend`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

#[derive(Clone)]
struct StubState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    reply: Arc<Mutex<(StatusCode, serde_json::Value)>>,
}

/// Local HTTP server standing in for PostgREST and Storage
///
/// Records every request and answers all of them with the configured reply
/// (`200 []` until changed).
pub struct StubBackend {
    url: String,
    state: StubState,
}

impl StubBackend {
    pub async fn start() -> Self {
        let state = StubState {
            requests: Arc::new(Mutex::new(Vec::new())),
            reply: Arc::new(Mutex::new((StatusCode::OK, serde_json::json!([])))),
        };

        let app = Router::new()
            .fallback(record_request)
            .with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { url, state }
    }

    pub fn client(&self) -> SupabaseClient {
        SupabaseClient::new(&SupabaseConfig {
            url: self.url.clone(),
            anon_key: "anon-key".to_string(),
        })
    }

    pub fn reply_with(&self, status: StatusCode, body: serde_json::Value) {
        *self.state.reply.lock().unwrap() = (status, body);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// The single request received so far
    pub fn only_request(&self) -> RecordedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests[0].clone()
    }
}

async fn record_request(
    State(state): State<StubState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let query = uri
        .query()
        .map(|q| {
            reqwest::Url::parse(&format!("http://stub/?{}", q))
                .unwrap()
                .query_pairs()
                .into_owned()
                .collect()
        })
        .unwrap_or_default();

    state.requests.lock().unwrap().push(RecordedRequest {
        method,
        path: uri.path().to_string(),
        query,
        headers,
        body,
    });

    let (status, reply) = state.reply.lock().unwrap().clone();
    (status, Json(reply)).into_response()
}
