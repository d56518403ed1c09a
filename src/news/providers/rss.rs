// src/news/providers/rss.rs
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::news::{Headline, NewsSource};

// Feeds are matched by pattern, not parsed as XML: portal feeds routinely carry
// HTML entities and namespaces that a strict parser rejects.
static RE_ITEM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<item(?:\s[^>]*)?>(.*?)(?:</item>|<item[\s>]|\z)").expect("item regex")
});
static RE_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<title>(.*?)</title>").expect("title regex"));
static RE_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"<link>(.*?)</link>").expect("link regex"));
static RE_DESCRIPTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<description>(.*?)</description>").expect("description regex"));
static RE_CDATA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!\[CDATA\[(.*?)\]\]>").expect("cdata regex"));

pub struct RssProvider {
    mode: Mode,
}

enum Mode {
    Fixture(String),
    Http { url: String, client: reqwest::Client },
}

impl RssProvider {
    pub fn from_fixture_str(s: &str) -> Self {
        Self {
            mode: Mode::Fixture(s.to_string()),
        }
    }

    pub fn from_url(url: &str, client: reqwest::Client) -> Self {
        Self {
            mode: Mode::Http {
                url: url.to_string(),
                client,
            },
        }
    }
}

/// Remove every `<![CDATA[ ... ]]>` wrapper, keeping the wrapped text.
pub fn strip_cdata(s: &str) -> String {
    RE_CDATA.replace_all(s, "$1").into_owned()
}

/// Extract the first `<item>` of an RSS document.
///
/// Title and link are returned exactly as they appear in the feed apart from
/// CDATA unwrapping; no entity decoding or trimming is applied to them.
pub fn parse_first_item(xml: &str) -> Result<Headline> {
    let item = RE_ITEM
        .captures(xml)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| anyhow!("no <item> found in rss feed"))?;

    let title = RE_TITLE
        .captures(item)
        .and_then(|c| c.get(1))
        .map(|m| strip_cdata(m.as_str()))
        .ok_or_else(|| anyhow!("first rss item has no <title>"))?;
    if title.trim().is_empty() {
        return Err(anyhow!("first rss item has an empty <title>"));
    }

    let link = RE_LINK
        .captures(item)
        .and_then(|c| c.get(1))
        .map(|m| strip_cdata(m.as_str()))
        .ok_or_else(|| anyhow!("first rss item has no <link>"))?;

    let description = RE_DESCRIPTION
        .captures(item)
        .and_then(|c| c.get(1))
        .map(|m| strip_cdata(m.as_str()).trim().to_string())
        .filter(|d| !d.is_empty());

    Ok(Headline {
        title,
        description,
        url: Some(link),
    })
}

#[async_trait]
impl NewsSource for RssProvider {
    async fn fetch_top(&self) -> Result<Headline> {
        match &self.mode {
            Mode::Fixture(s) => parse_first_item(s),
            Mode::Http { url, client } => {
                let resp = match client.get(url.as_str()).send().await {
                    Ok(resp) => resp,
                    Err(e) => {
                        tracing::warn!(error = ?e, provider = "rss", "provider http error");
                        return Err(e).context("rss http get()");
                    }
                };
                let body = resp
                    .error_for_status()
                    .with_context(|| format!("rss feed {url} returned an error status"))?
                    .text()
                    .await
                    .context("rss http .text()")?;
                tracing::debug!(bytes = body.len(), "rss feed downloaded");
                parse_first_item(&body)
            }
        }
    }

    fn name(&self) -> &'static str {
        "rss"
    }
}
