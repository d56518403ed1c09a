// src/news/mod.rs
pub mod providers;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::{Secrets, SenryuConfig, SourceKind};
use providers::{newsapi::NewsApiProvider, rss::RssProvider};

/// The single article a run is built around.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Headline {
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
}

#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Return the top (first) article of the source.
    async fn fetch_top(&self) -> Result<Headline>;
    fn name(&self) -> &'static str;
}

/// Build the configured headline provider.
pub fn build_source(
    cfg: &SenryuConfig,
    secrets: &Secrets,
    client: reqwest::Client,
) -> Result<Box<dyn NewsSource>> {
    match cfg.source {
        SourceKind::Rss => Ok(Box::new(RssProvider::from_url(&cfg.rss.url, client))),
        SourceKind::NewsApi => {
            let key = secrets
                .news_api_key
                .clone()
                .ok_or_else(|| anyhow!("newsapi source selected without a news api key"))?;
            Ok(Box::new(NewsApiProvider::new(
                &cfg.newsapi.endpoint,
                &cfg.newsapi.country,
                key,
                client,
            )))
        }
    }
}
