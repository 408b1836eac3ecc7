//! In-process stand-in for the Hacker News Firebase API.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

#[derive(Debug, Clone)]
enum ItemReply {
    Json(Value),
    Raw(String),
    Status(StatusCode),
}

#[derive(Debug, Default)]
pub struct FakeApiBuilder {
    ranking: Vec<u64>,
    items: HashMap<u64, ItemReply>,
    delays: HashMap<u64, Duration>,
    listing_body: Option<String>,
}

impl FakeApiBuilder {
    /// Ranked story with a title and optional body text.
    pub fn story(mut self, id: u64, title: &str, text: Option<&str>) -> Self {
        let mut item = json!({
            "by": "pg",
            "id": id,
            "score": 100,
            "time": 1_160_418_111u64,
            "title": title,
            "type": "story",
        });
        if let Some(text) = text {
            item["text"] = json!(text);
        }
        self.ranking.push(id);
        self.items.insert(id, ItemReply::Json(item));
        self
    }

    /// `count` ranked stories titled `"Story {id}"`, ids from 1.
    pub fn numbered_stories(mut self, count: u64) -> Self {
        for id in 1..=count {
            self = self.story(id, &format!("Story {}", id), None);
        }
        self
    }

    /// Ranked item with an arbitrary JSON body (e.g. `null` or no title).
    pub fn raw_item(mut self, id: u64, body: Value) -> Self {
        self.ranking.push(id);
        self.items.insert(id, ItemReply::Json(body));
        self
    }

    /// Ranked item whose body is not valid JSON.
    pub fn malformed_item(mut self, id: u64) -> Self {
        self.ranking.push(id);
        self.items
            .insert(id, ItemReply::Raw("{\"title\": \"trunc".to_string()));
        self
    }

    /// Ranked item answering with `status`.
    pub fn failing_item(mut self, id: u64, status: StatusCode) -> Self {
        self.ranking.push(id);
        self.items.insert(id, ItemReply::Status(status));
        self
    }

    pub fn delay(mut self, id: u64, delay: Duration) -> Self {
        self.delays.insert(id, delay);
        self
    }

    /// Replaces the `topstories.json` body verbatim.
    pub fn listing_body(mut self, body: &str) -> Self {
        self.listing_body = Some(body.to_string());
        self
    }

    pub async fn spawn(self) -> FakeApi {
        let state = Arc::new(FakeApiState {
            ranking: self.ranking,
            items: self.items,
            delays: self.delays,
            listing_body: self.listing_body,
            item_hits: AtomicUsize::new(0),
        });

        let app = Router::new()
            .route("/v0/topstories.json", get(top_stories))
            .route("/v0/item/{file}", get(item))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake API listener");
        let addr = listener.local_addr().expect("fake API local addr");
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await;
        });

        FakeApi {
            addr,
            state,
            shutdown_tx: Some(shutdown_tx),
        }
    }
}

struct FakeApiState {
    ranking: Vec<u64>,
    items: HashMap<u64, ItemReply>,
    delays: HashMap<u64, Duration>,
    listing_body: Option<String>,
    item_hits: AtomicUsize,
}

pub struct FakeApi {
    addr: SocketAddr,
    state: Arc<FakeApiState>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl FakeApi {
    pub fn builder() -> FakeApiBuilder {
        FakeApiBuilder::default()
    }

    /// API root to hand to `HnClient`, e.g. `http://127.0.0.1:PORT/v0`.
    pub fn base_url(&self) -> String {
        format!("http://{}/v0", self.addr)
    }

    pub fn item_hits(&self) -> usize {
        self.state.item_hits.load(Ordering::SeqCst)
    }
}

impl Drop for FakeApi {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn top_stories(State(state): State<Arc<FakeApiState>>) -> Response {
    match &state.listing_body {
        Some(body) => body.clone().into_response(),
        None => axum::Json(state.ranking.clone()).into_response(),
    }
}

async fn item(State(state): State<Arc<FakeApiState>>, Path(file): Path<String>) -> Response {
    state.item_hits.fetch_add(1, Ordering::SeqCst);

    let Some(id) = file
        .strip_suffix(".json")
        .and_then(|id| id.parse::<u64>().ok())
    else {
        return StatusCode::NOT_FOUND.into_response();
    };

    if let Some(delay) = state.delays.get(&id) {
        tokio::time::sleep(*delay).await;
    }

    match state.items.get(&id) {
        Some(ItemReply::Json(value)) => axum::Json(value.clone()).into_response(),
        Some(ItemReply::Raw(body)) => body.clone().into_response(),
        Some(ItemReply::Status(status)) => (*status).into_response(),
        // Firebase answers unknown ids with a literal `null`.
        None => axum::Json(Value::Null).into_response(),
    }
}
