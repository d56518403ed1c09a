//! Turns the model's free-form reply into a `SenryuReply`.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

const FENCE: &str = "```";

/// The two fields the prompt asks the model for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SenryuReply {
    #[serde(alias = "poem")]
    pub senryu: String,
    pub explanation: String,
}

/// Strip a surrounding markdown code fence (with or without a language tag).
///
/// Text that does not start with a fence is only trimmed.
pub fn strip_code_fence(raw: &str) -> &str {
    let t = raw.trim();
    let Some(rest) = t.strip_prefix(FENCE) else {
        return t;
    };
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    let rest = rest.strip_suffix(FENCE).unwrap_or(rest);
    rest.trim()
}

/// Strip fences and parse. Invalid JSON, a missing field or a blank field is an error.
pub fn parse_reply(raw: &str) -> Result<SenryuReply> {
    let body = strip_code_fence(raw);
    let reply: SenryuReply =
        serde_json::from_str(body).context("model reply is not the expected JSON object")?;

    if reply.senryu.trim().is_empty() {
        bail!("model reply has an empty `senryu`");
    }
    if reply.explanation.trim().is_empty() {
        bail!("model reply has an empty `explanation`");
    }

    let lines = reply.senryu.lines().filter(|l| !l.trim().is_empty()).count();
    if lines != 3 {
        tracing::warn!(lines, "senryu does not have three lines; keeping it as is");
    }
    Ok(reply)
}
