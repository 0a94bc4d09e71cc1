//! CLI command implementations.

pub mod assist;
pub mod estimate;
pub mod insure;
pub mod merge;
pub mod telemetry;
pub mod validate;
pub mod weather;

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Config, ShedSpec};
use crate::infrastructure::config::ConfigLoader;

/// Read a JSON or YAML document. YAML is tried when the extension says so
/// or when the text is not JSON.
pub fn read_document(path: &Path) -> DomainResult<Value> {
    let text = std::fs::read_to_string(path).map_err(|source| DomainError::SpecFileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    if !is_yaml {
        if let Ok(value) = serde_json::from_str::<Value>(&text) {
            return Ok(value);
        }
    }

    serde_yaml::from_str::<Value>(&text).map_err(|e| DomainError::SpecFileFormat {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Read a spec file. Ill-typed fields fall back to defaults.
pub fn load_spec(path: &Path) -> Result<ShedSpec> {
    let candidate = read_document(path)
        .with_context(|| format!("Failed to load spec from {}", path.display()))?;
    Ok(ShedSpec::from_candidate(&candidate))
}

/// Configuration for commands that need it.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}
