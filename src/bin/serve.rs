// src/bin/serve.rs
//! Serves the published record to the page: `/api/senryu/today`, `/data/<record file>`,
//! `/health` and `/metrics`.

use anyhow::Context;
use daily_senryu::{api, metrics::Metrics, telemetry, SenryuConfig};
use tracing::info;

const ENV_BIND: &str = "SENRYU_BIND";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    telemetry::init_tracing("daily_senryu=info,tower_http=info,warn");

    let cfg = SenryuConfig::load_default()?;
    let metrics = Metrics::init()?;

    let state = api::AppState::new(cfg.output.path.clone());
    let app = api::create_router(state).merge(metrics.router());

    let bind = std::env::var(ENV_BIND).unwrap_or_else(|_| "0.0.0.0:8000".to_string());
    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("binding {bind}"))?;
    info!(%bind, record = %cfg.output.path.display(), "senryu api listening");

    axum::serve(listener, app).await.context("axum server")?;
    Ok(())
}
