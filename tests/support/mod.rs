// tests/support/mod.rs
//
// Local stand-in for the three upstream services (RSS feed, NewsAPI, Gemini).
// Bound to 127.0.0.1:0; every request is counted so tests can assert
// "no network call happened".
#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode, Uri},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use daily_senryu::config::SenryuConfig;

pub const MODEL: &str = "gemini-pro";

pub struct UpstreamCfg {
    pub rss: String,
    pub newsapi: String,
    pub gemini_status: u16,
    pub gemini_body: String,
}

#[derive(Clone, Default)]
pub struct Seen {
    pub hits: Arc<AtomicUsize>,
    pub gemini_key: Arc<Mutex<Option<String>>>,
    pub gemini_query: Arc<Mutex<Option<String>>>,
    pub gemini_request: Arc<Mutex<Option<Value>>>,
    pub newsapi_query: Arc<Mutex<Option<HashMap<String, String>>>>,
}

impl Seen {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

#[derive(Clone)]
struct Shared {
    cfg: Arc<UpstreamCfg>,
    seen: Seen,
}

pub struct Upstream {
    pub base: String,
    pub seen: Seen,
}

impl Upstream {
    /// Config pointing every provider at this server and writing to `output`.
    pub fn config(&self, output: &Path) -> SenryuConfig {
        let mut cfg = SenryuConfig::default();
        cfg.rss.url = format!("{}/rss", self.base);
        cfg.newsapi.endpoint = format!("{}/v2/top-headlines", self.base);
        cfg.gemini.base_url = format!("{}/v1beta", self.base);
        cfg.gemini.model = MODEL.to_string();
        cfg.output.path = output.to_path_buf();
        cfg
    }
}

/// Wrap model text the way `generateContent` returns it.
pub fn gemini_body(text: &str) -> String {
    json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }], "role": "model" },
            "finishReason": "STOP",
            "index": 0
        }]
    })
    .to_string()
}

pub fn upstream_ok(rss: &str, model_text: &str) -> UpstreamCfg {
    UpstreamCfg {
        rss: rss.to_string(),
        newsapi: include_str!("../fixtures/newsapi_top_headlines.json").to_string(),
        gemini_status: 200,
        gemini_body: gemini_body(model_text),
    }
}

pub async fn spawn_upstream(cfg: UpstreamCfg) -> Upstream {
    let seen = Seen::default();
    let shared = Shared {
        cfg: Arc::new(cfg),
        seen: seen.clone(),
    };

    let app = Router::new()
        .route("/rss", get(rss))
        .route("/v2/top-headlines", get(newsapi))
        .route(
            &format!("/v1beta/models/{MODEL}:generateContent"),
            post(gemini),
        )
        .with_state(shared);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind upstream");
    let addr = listener.local_addr().expect("upstream addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("upstream server");
    });

    Upstream {
        base: format!("http://{addr}"),
        seen,
    }
}

async fn rss(State(s): State<Shared>) -> String {
    s.seen.hits.fetch_add(1, Ordering::SeqCst);
    s.cfg.rss.clone()
}

async fn newsapi(
    State(s): State<Shared>,
    Query(q): Query<HashMap<String, String>>,
) -> String {
    s.seen.hits.fetch_add(1, Ordering::SeqCst);
    *s.seen.newsapi_query.lock().unwrap() = Some(q);
    s.cfg.newsapi.clone()
}

async fn gemini(
    State(s): State<Shared>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    s.seen.hits.fetch_add(1, Ordering::SeqCst);
    *s.seen.gemini_key.lock().unwrap() = headers
        .get("x-goog-api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    *s.seen.gemini_query.lock().unwrap() = uri.query().map(str::to_string);
    *s.seen.gemini_request.lock().unwrap() = Some(body);

    let status = StatusCode::from_u16(s.cfg.gemini_status).unwrap();
    (status, s.cfg.gemini_body.clone())
}
