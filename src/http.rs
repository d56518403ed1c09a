use anyhow::{Context, Result};
use std::time::Duration;

const USER_AGENT: &str = concat!("daily-senryu/", env!("CARGO_PKG_VERSION"));

/// One client per run, shared by the news source and the generator.
pub fn build_http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(Duration::from_secs(10))
        // generation can take a while on long prompts
        .timeout(Duration::from_secs(60))
        .build()
        .context("building reqwest client")
}
