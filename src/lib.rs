// src/lib.rs
// Public library surface shared by both binaries and the integration tests.

pub mod api;
pub mod config;
pub mod generate;
pub mod http;
pub mod metrics;
pub mod news;
pub mod pipeline;
pub mod prompt;
pub mod record;
pub mod sanitize;
pub mod telemetry;

// ---- Re-exports for stable public API ----
pub use crate::api::create_router;
pub use crate::config::{Secrets, SenryuConfig, SourceKind};
pub use crate::pipeline::{run_from_env, run_once, RunError, Stage};
pub use crate::record::DailyRecord;
