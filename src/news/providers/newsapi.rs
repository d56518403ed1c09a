// src/news/providers/newsapi.rs
use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use crate::news::{Headline, NewsSource};

#[derive(Debug, Deserialize)]
struct TopHeadlines {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
}

/// Headlines API provider (`top-headlines?country=..&apiKey=..`).
pub struct NewsApiProvider {
    endpoint: String,
    country: String,
    api_key: String,
    client: reqwest::Client,
}

impl NewsApiProvider {
    pub fn new(endpoint: &str, country: &str, api_key: String, client: reqwest::Client) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            country: country.to_string(),
            api_key,
            client,
        }
    }
}

/// Validate a top-headlines response body and return its first article unchanged.
pub fn parse_top_article(body: &str) -> Result<Headline> {
    let parsed: TopHeadlines = serde_json::from_str(body).context("parsing newsapi json")?;

    if parsed.status != "ok" {
        bail!(
            "newsapi returned status `{}`: {}",
            parsed.status,
            parsed.message.as_deref().unwrap_or("no message")
        );
    }

    let first = parsed
        .articles
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("newsapi returned no articles"))?;

    let title = first
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| anyhow!("first newsapi article has no title"))?;

    Ok(Headline {
        title,
        description: first.description,
        url: first.url,
    })
}

#[async_trait]
impl NewsSource for NewsApiProvider {
    async fn fetch_top(&self) -> Result<Headline> {
        let resp = self
            .client
            .get(self.endpoint.as_str())
            .query(&[
                ("country", self.country.as_str()),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await
            // reqwest errors embed the request URL, which carries the key.
            .map_err(|e| anyhow!("newsapi request failed: {}", e.without_url()))?;

        let status = resp.status();
        let body = resp.text().await.context("newsapi http .text()")?;
        if !status.is_success() {
            tracing::warn!(%status, provider = "newsapi", "provider http error");
            // NewsAPI reports errors as `{status:"error", message}`; surface the message when present.
            return match parse_top_article(&body) {
                Err(e) => Err(e.context(format!("newsapi http status {status}"))),
                Ok(_) => Err(anyhow!("newsapi http status {status}")),
            };
        }
        parse_top_article(&body)
    }

    fn name(&self) -> &'static str {
        "newsapi"
    }
}
