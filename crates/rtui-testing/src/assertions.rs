//! Assertions over the CLI's `--format json` output.

use anyhow::{Context, Result};
use serde_json::Value;

/// Assert that a `keys` listing contains exactly the expected keys, in order.
pub fn assert_keys(json: &Value, expected: &[&str]) -> Result<()> {
    let keys = json["keys"]
        .as_array()
        .context("Expected 'keys' array in JSON")?;
    let actual: Vec<&str> = keys.iter().filter_map(Value::as_str).collect();

    if actual != expected {
        anyhow::bail!("Expected keys {:?}, got {:?}", expected, actual);
    }
    Ok(())
}

/// Assert the render kind of a `get` result (`json`, `plain` or `error`).
pub fn assert_render_kind(json: &Value, expected: &str) -> Result<()> {
    let kind = json["primary"]["kind"]
        .as_str()
        .context("Expected 'primary.kind' in JSON")?;

    if kind != expected {
        anyhow::bail!("Expected render kind '{}', got '{}'", expected, kind);
    }
    Ok(())
}

/// Assert that a `get` result carries a source block with the given first line.
pub fn assert_source_starts_with(json: &Value, prefix: &str) -> Result<()> {
    let first = json["source"]["lines"][0]
        .as_str()
        .context("Expected 'source.lines' in JSON")?;

    if !first.starts_with(prefix) {
        anyhow::bail!("Source block starts with '{}', expected '{}'", first, prefix);
    }
    Ok(())
}
