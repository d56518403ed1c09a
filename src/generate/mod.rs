//! Generation client: sends a prompt to a generative-language service and
//! returns the raw reply text.
//!
//! Only the raw-HTTP transport is implemented (`GeminiClient`); the key travels
//! in a request header. `MockGenerator` stands in for it in tests.

pub mod gemini;
pub mod mock;

use anyhow::Result;
use async_trait::async_trait;

use crate::config::{Secrets, SenryuConfig};

pub use gemini::GeminiClient;
pub use mock::MockGenerator;

#[async_trait]
pub trait Generator: Send + Sync {
    /// Send `prompt` and return the model's raw text (possibly fenced).
    async fn generate(&self, prompt: &str) -> Result<String>;
    /// Provider name for diagnostics.
    fn name(&self) -> &'static str;
}

/// Build the production generator from config + secrets.
pub fn build_generator(
    cfg: &SenryuConfig,
    secrets: &Secrets,
    client: reqwest::Client,
) -> Box<dyn Generator> {
    Box::new(GeminiClient::new(
        &cfg.gemini.base_url,
        &cfg.gemini.model,
        secrets.gemini_api_key.clone(),
        client,
    ))
}
