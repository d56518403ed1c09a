//! Daily senryu generator — one run per invocation.
//! Meant to be triggered by an external scheduler (cron, CI), once a day.

use std::process::ExitCode;

use chrono::Utc;
use daily_senryu::{pipeline, telemetry, SenryuConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env in local/dev; no-op when the scheduler injects the environment.
    let _ = dotenvy::dotenv();
    telemetry::init_tracing("daily_senryu=info,warn");

    info!("=== daily senryu generation started ===");

    let cfg = match SenryuConfig::load_default() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(error = %format!("{e:#}"), "could not load configuration");
            return ExitCode::FAILURE;
        }
    };

    let today = Utc::now().date_naive();
    match pipeline::run_from_env(&cfg, today).await {
        Ok(record) => {
            info!(
                date = %record.date,
                news_title = %record.news_title,
                "=== daily senryu generation finished ==="
            );
            ExitCode::SUCCESS
        }
        // already logged with its stage by the pipeline
        Err(_) => ExitCode::FAILURE,
    }
}
