//! Common test utilities shared across integration tests.
//!
//! Helpers here build clients and configs pointed at a mock ranking service
//! without depending on the main crate's internal test utilities.

#![allow(dead_code)]

use std::path::PathBuf;

use intellirank::api::HttpRankingClient;
use intellirank::config::Config;
use serde_json::{Value, json};
use tempfile::TempDir;

/// Config aimed at `base_url` with short probe timings.
pub fn config_for(base_url: &str) -> Config {
    let mut config = Config::default();
    config.api.base_url = base_url.to_string();
    config.health.probe_timeout_ms = 200;
    config.health.poll_interval_secs = 1;
    config.api.request_timeout_secs = 5;
    config
}

pub fn client_for(base_url: &str) -> HttpRankingClient {
    HttpRankingClient::from_config(&config_for(base_url)).expect("client builds")
}

/// Write a config file pointing at `base_url` into a fresh temp dir.
pub fn write_config(base_url: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("config.toml");
    let body = format!(
        "[api]\nbase_url = \"{base_url}\"\n\n[health]\nprobe_timeout_ms = 200\npoll_interval_secs = 1\n"
    );
    std::fs::write(&path, body).expect("write config");
    (dir, path)
}

/// A result payload in the service's wire shape.
pub fn result_json(id: i64, title: &str, low_confidence: bool) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": format!("About {title}"),
        "category": "Technology",
        "subcategory": "Backend",
        "match_percentage": if low_confidence { "4.2%" } else { "61.0%" },
        "low_confidence": low_confidence,
        "tags": ["python", "web"],
        "difficulty_level": "Beginner",
        "score": if low_confidence { 0.042 } else { 0.61 },
    })
}
