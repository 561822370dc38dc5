//! Input loading for the purchase statistics pipeline.
//!
//! Reads the purchases JSON file from disk and parses it into an untyped
//! document. Shape validation happens downstream in the flattener.

use std::path::Path;

use serde_json::Value;
use stats_core::error::{Result, StatsError};
use tracing::debug;

/// Read `path` and parse its contents as JSON.
///
/// The expected shape is a top-level array of purchase objects, but the
/// document is returned untyped; the flattener owns shape validation.
///
/// Fails with [`StatsError::FileRead`] when the file does not exist or is
/// unreadable, and with [`StatsError::JsonParse`] when the content is not
/// valid JSON. An empty file is not valid JSON and fails the same way.
pub fn load_document(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path).map_err(|source| StatsError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let document: Value = serde_json::from_str(&content)?;

    debug!("Parsed {} bytes from {}", content.len(), path.display());
    Ok(document)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
