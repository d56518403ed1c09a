//! One generation run: fetch → prompt → generate → sanitize → write.
//!
//! Every step either yields its output or ends the run with a `RunError`
//! tagged by the stage that failed. Nothing is written unless all earlier
//! stages succeeded.

use std::fmt;
use std::path::Path;
use std::time::Instant;

use chrono::NaiveDate;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use once_cell::sync::OnceCell;
use tracing::{error, info};

use crate::config::{Secrets, SenryuConfig};
use crate::generate::{build_generator, Generator};
use crate::http::build_http_client;
use crate::news::{build_source, NewsSource};
use crate::prompt::build_prompt;
use crate::record::{write_record, DailyRecord};
use crate::sanitize::parse_reply;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Config,
    Fetch,
    Generate,
    Sanitize,
    Write,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Config => "config",
            Stage::Fetch => "fetch",
            Stage::Generate => "generate",
            Stage::Sanitize => "sanitize",
            Stage::Write => "write",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal failure of a run.
#[derive(Debug)]
pub struct RunError {
    pub stage: Stage,
    pub source: anyhow::Error,
}

impl RunError {
    fn at(stage: Stage) -> impl FnOnce(anyhow::Error) -> Self {
        move |source| Self { stage, source }
    }
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {:#}", self.stage, self.source)
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.source)
    }
}

fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("senryu_runs_total", "Generation runs started.");
        describe_counter!(
            "senryu_run_failures_total",
            "Generation runs that ended in a failure, by stage."
        );
        describe_histogram!("senryu_stage_ms", "Time spent per pipeline stage in milliseconds.");
    });
}

fn record_stage(stage: Stage, t0: Instant) {
    histogram!("senryu_stage_ms", "stage" => stage.as_str())
        .record(t0.elapsed().as_secs_f64() * 1_000.0);
}

/// Run the pipeline with already-built collaborators.
pub async fn run_once(
    source: &dyn NewsSource,
    generator: &dyn Generator,
    output: &Path,
    today: NaiveDate,
) -> Result<DailyRecord, RunError> {
    ensure_metrics_described();
    counter!("senryu_runs_total").increment(1);

    let res = run_stages(source, generator, output, today).await;
    if let Err(e) = &res {
        counter!("senryu_run_failures_total", "stage" => e.stage.as_str()).increment(1);
        error!(stage = %e.stage, error = %format!("{:#}", e.source), "run aborted");
    }
    res
}

async fn run_stages(
    source: &dyn NewsSource,
    generator: &dyn Generator,
    output: &Path,
    today: NaiveDate,
) -> Result<DailyRecord, RunError> {
    let t0 = Instant::now();
    let headline = source.fetch_top().await.map_err(RunError::at(Stage::Fetch))?;
    record_stage(Stage::Fetch, t0);
    info!(provider = source.name(), title = %headline.title, "picked headline");

    let prompt = build_prompt(&headline.title, headline.description.as_deref());

    let t0 = Instant::now();
    let raw = generator
        .generate(&prompt)
        .await
        .map_err(RunError::at(Stage::Generate))?;
    record_stage(Stage::Generate, t0);
    info!(provider = generator.name(), reply_len = raw.len(), "model replied");

    let reply = parse_reply(&raw).map_err(RunError::at(Stage::Sanitize))?;

    let record = DailyRecord::new(today, reply, headline);
    write_record(output, &record).map_err(RunError::at(Stage::Write))?;
    info!(
        path = %output.display(),
        date = %record.date,
        senryu = %record.senryu,
        "daily senryu saved"
    );
    Ok(record)
}

/// Resolve secrets, build the real collaborators and run once.
///
/// Secrets are checked first so a misconfigured run never reaches the network.
pub async fn run_from_env(cfg: &SenryuConfig, today: NaiveDate) -> Result<DailyRecord, RunError> {
    let (source, generator) = match build_collaborators(cfg) {
        Ok(pair) => pair,
        Err(e) => {
            ensure_metrics_described();
            counter!("senryu_run_failures_total", "stage" => Stage::Config.as_str()).increment(1);
            error!(error = %format!("{:#}", e), "configuration incomplete; nothing fetched");
            return Err(RunError::at(Stage::Config)(e));
        }
    };
    info!(
        source = source.name(),
        generator = generator.name(),
        output = %cfg.output.path.display(),
        "starting generation run"
    );
    run_once(source.as_ref(), generator.as_ref(), &cfg.output.path, today).await
}

fn build_collaborators(
    cfg: &SenryuConfig,
) -> anyhow::Result<(Box<dyn NewsSource>, Box<dyn Generator>)> {
    let secrets = Secrets::from_env(cfg.source)?;
    let client = build_http_client()?;
    let source = build_source(cfg, &secrets, client.clone())?;
    let generator = build_generator(cfg, &secrets, client);
    Ok((source, generator))
}
