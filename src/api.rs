//! Read-only HTTP surface for the page: today's record (or the placeholder)
//! and the raw record file.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use chrono::{NaiveDate, Utc};
use metrics::counter;
use serde::Serialize;
use tower_http::{cors::CorsLayer, services::ServeFile};

use crate::record::{load_record, DailyRecord};

pub const FALLBACK_SENRYU: &str = "詠み込みに\n失敗をして\n詫びる朝";
pub const FALLBACK_EXPLANATION: &str =
    "システムの不具合により今日の川柳が取得できませんでした。しばらく時間をおいてお試しください。";

#[derive(Clone)]
pub struct AppState {
    record_path: Arc<PathBuf>,
}

impl AppState {
    pub fn new(record_path: impl Into<PathBuf>) -> Self {
        Self {
            record_path: Arc::new(record_path.into()),
        }
    }

    /// Public path of the raw record, `/data/<file name>`.
    pub fn data_route(&self) -> Option<String> {
        let name = self.record_path.file_name()?.to_str()?;
        Some(format!("/data/{name}"))
    }
}

#[derive(Debug, Serialize)]
pub struct TodayResponse {
    pub record: DailyRecord,
    /// true when no valid record exists and the placeholder is served
    pub fallback: bool,
    /// true when the record was generated on an earlier day
    pub stale: bool,
}

pub fn fallback_record(today: NaiveDate) -> DailyRecord {
    DailyRecord {
        date: today,
        senryu: FALLBACK_SENRYU.to_string(),
        explanation: FALLBACK_EXPLANATION.to_string(),
        news_title: String::new(),
        news_url: None,
    }
}

/// Only the record file itself is exposed under `/data`; its directory may be
/// the working directory, which also holds `.env`.
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/api/senryu/today", get(today));
    match state.data_route() {
        Some(route) => {
            router = router.route_service(&route, ServeFile::new(state.record_path.as_path()));
        }
        None => {
            tracing::warn!(path = %state.record_path.display(), "record path has no file name; /data not mounted");
        }
    }
    router.layer(CorsLayer::very_permissive()).with_state(state)
}

async fn today(State(state): State<AppState>) -> Json<TodayResponse> {
    counter!("senryu_today_requests_total").increment(1);
    let today = Utc::now().date_naive();

    match load_record(&state.record_path).await {
        Ok(Some(record)) => {
            let stale = record.date != today;
            Json(TodayResponse {
                record,
                fallback: false,
                stale,
            })
        }
        Ok(None) => {
            tracing::warn!(path = %state.record_path.display(), "no record yet; serving placeholder");
            counter!("senryu_fallback_served_total").increment(1);
            Json(TodayResponse {
                record: fallback_record(today),
                fallback: true,
                stale: false,
            })
        }
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "record unreadable; serving placeholder");
            counter!("senryu_fallback_served_total").increment(1);
            Json(TodayResponse {
                record: fallback_record(today),
                fallback: true,
                stale: false,
            })
        }
    }
}
