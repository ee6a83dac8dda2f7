//! JSON rendering: the report's serde form, pretty-printed.

use anyhow::{Context, Result};
use webfuzz::Report;

pub fn render(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize report")
}
