// src/config/mod.rs
pub mod secrets;

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use secrets::Secrets;

pub const ENV_CONFIG_PATH: &str = "SENRYU_CONFIG_PATH";
pub const ENV_SOURCE: &str = "SENRYU_SOURCE";
pub const DEFAULT_CONFIG_PATH: &str = "config/senryu.toml";

/// Which headline provider feeds the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Rss,
    NewsApi,
}

impl SourceKind {
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rss" => Ok(Self::Rss),
            "newsapi" => Ok(Self::NewsApi),
            other => bail!("unsupported news source `{other}` (expected `rss` or `newsapi`)"),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rss => "rss",
            Self::NewsApi => "newsapi",
        }
    }
}

fn default_rss_url() -> String {
    "https://news.yahoo.co.jp/rss/topics/top-picks.xml".to_string()
}
fn default_newsapi_endpoint() -> String {
    "https://newsapi.org/v2/top-headlines".to_string()
}
fn default_country() -> String {
    "jp".to_string()
}
fn default_gemini_base() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}
fn default_gemini_model() -> String {
    "gemini-pro".to_string()
}
fn default_output_path() -> PathBuf {
    PathBuf::from("data/senryu_today.json")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RssConfig {
    #[serde(default = "default_rss_url")]
    pub url: String,
}

impl Default for RssConfig {
    fn default() -> Self {
        Self {
            url: default_rss_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsApiConfig {
    #[serde(default = "default_newsapi_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_country")]
    pub country: String,
}

impl Default for NewsApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_newsapi_endpoint(),
            country: default_country(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    #[serde(default = "default_gemini_base")]
    pub base_url: String,
    #[serde(default = "default_gemini_model")]
    pub model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: default_gemini_base(),
            model: default_gemini_model(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

/// Non-secret settings. Every section is optional in the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SenryuConfig {
    #[serde(default)]
    pub source: SourceKind,
    #[serde(default)]
    pub rss: RssConfig,
    #[serde(default)]
    pub newsapi: NewsApiConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl SenryuConfig {
    /// Load from an explicit TOML path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading senryu config from {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("parsing senryu config {}", path.display()))
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: SenryuConfig = toml::from_str(s)?;
        Ok(cfg)
    }

    /// Load using env var + fallbacks:
    /// 1) $SENRYU_CONFIG_PATH
    /// 2) config/senryu.toml
    /// 3) built-in defaults
    ///
    /// `$SENRYU_SOURCE` overrides the `source` key afterwards.
    pub fn load_default() -> Result<Self> {
        let mut cfg = if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            Self::load_from(&pb)?
        } else {
            let default_p = PathBuf::from(DEFAULT_CONFIG_PATH);
            if default_p.exists() {
                Self::load_from(&default_p)?
            } else {
                Self::default()
            }
        };

        if let Ok(s) = std::env::var(ENV_SOURCE) {
            if !s.trim().is_empty() {
                cfg.source = SourceKind::parse(&s)?;
            }
        }
        Ok(cfg)
    }
}
