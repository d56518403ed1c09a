// src/generate/gemini.rs
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::Generator;

pub const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}
#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}
#[derive(Serialize)]
struct Req<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Deserialize)]
struct Resp {
    #[serde(default)]
    candidates: Vec<Candidate>,
}
#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}
#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<RespPart>,
}
#[derive(Deserialize)]
struct RespPart {
    text: Option<String>,
}

/// Gemini `generateContent` over plain HTTP.
pub struct GeminiClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(base_url: &str, model: &str, api_key: String, http: reqwest::Client) -> Self {
        let url = format!(
            "{}/models/{}:generateContent",
            base_url.trim_end_matches('/'),
            model
        );
        Self { http, url, api_key }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Pull `candidates[0].content.parts[0].text` out of a response body.
pub fn extract_text(body: &str) -> Result<String> {
    let resp: Resp = serde_json::from_str(body).context("decoding gemini response json")?;
    let first = resp
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("gemini response has no candidates"))?;
    let finish = first.finish_reason;
    first
        .content
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .map(|t| t.trim().to_string())
        .ok_or_else(|| {
            anyhow!(
                "gemini candidate has no text part (finishReason={})",
                finish.as_deref().unwrap_or("unknown")
            )
        })
}

#[async_trait]
impl Generator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let req = Req {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let resp = self
            .http
            .post(self.url.as_str())
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&req)
            .send()
            .await
            .context("gemini request failed")?;

        let status = resp.status();
        let body = resp.text().await.context("gemini http .text()")?;
        if !status.is_success() {
            return Err(anyhow!("gemini api error ({status}): {body}"));
        }
        extract_text(&body)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}
