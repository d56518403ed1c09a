// src/record.rs
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

use crate::news::Headline;
use crate::sanitize::SenryuReply;

/// The one document a run publishes. Field order is the on-disk order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub senryu: String,
    pub explanation: String,
    pub news_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub news_url: Option<String>,
}

impl DailyRecord {
    pub fn new(date: NaiveDate, reply: SenryuReply, headline: Headline) -> Self {
        Self {
            date,
            senryu: reply.senryu,
            explanation: reply.explanation,
            news_title: headline.title,
            news_url: headline.url,
        }
    }
}

/// Overwrite `path` with the pretty-printed record, creating the parent directory if needed.
pub fn write_record(path: &Path, record: &DailyRecord) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating output directory {}", dir.display()))?;
    }
    let json = serde_json::to_string_pretty(record).context("serializing daily record")?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Read the last published record. `Ok(None)` when nothing has been written yet.
pub fn read_record(path: &Path) -> Result<Option<DailyRecord>> {
    match fs::read_to_string(path) {
        Ok(s) => parse_record(path, &s).map(Some),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
    }
}

/// `read_record` for async handlers; the file is read on the tokio blocking pool.
pub async fn load_record(path: &Path) -> Result<Option<DailyRecord>> {
    match tokio::fs::read_to_string(path).await {
        Ok(s) => parse_record(path, &s).map(Some),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
    }
}

fn parse_record(path: &Path, s: &str) -> Result<DailyRecord> {
    serde_json::from_str(s).with_context(|| format!("parsing {}", path.display()))
}
