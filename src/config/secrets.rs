// src/config/secrets.rs
use anyhow::{anyhow, Result};
use std::env;
use std::fmt;

use super::SourceKind;

pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_NEWS_API_KEY: &str = "NEWS_API_KEY";

/// API keys resolved from the process environment.
#[derive(Clone)]
pub struct Secrets {
    pub gemini_api_key: String,
    /// Only present (and only required) for the NewsAPI source.
    pub news_api_key: Option<String>,
}

impl Secrets {
    /// Resolve keys for the given source. Fails on the first missing or blank key,
    /// before anything touches the network.
    pub fn from_env(source: SourceKind) -> Result<Self> {
        let gemini_api_key = required(ENV_GEMINI_API_KEY)?;
        let news_api_key = match source {
            SourceKind::NewsApi => Some(required(ENV_NEWS_API_KEY)?),
            SourceKind::Rss => None,
        };
        Ok(Self {
            gemini_api_key,
            news_api_key,
        })
    }
}

// Never print key material, not even in debug output.
impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secrets")
            .field("gemini_api_key_len", &self.gemini_api_key.len())
            .field(
                "news_api_key_len",
                &self.news_api_key.as_ref().map(|k| k.len()),
            )
            .finish()
    }
}

fn required(name: &str) -> Result<String> {
    let v = env::var(name).map_err(|_| anyhow!("Missing {name} env var"))?;
    let v = v.trim();
    if v.is_empty() {
        return Err(anyhow!("{name} is set but empty"));
    }
    Ok(v.to_string())
}
