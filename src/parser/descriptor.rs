//! Descriptor file loading.
//!
//! Descriptors are YAML documents by convention; JSON (with comments, via
//! json5) is accepted for tooling that generates descriptors. The file is
//! read once at build time and validated before any deck is constructed.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::DeckDescriptor;

/// Loads and validates a descriptor from a file.
///
/// The format is chosen by extension: `.yaml`/`.yml` parse as YAML,
/// `.json`/`.json5` as lenient JSON. Anything else is rejected rather than
/// guessed.
pub fn load_descriptor(path: &Path) -> Result<DeckDescriptor> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read descriptor {}", path.display()))?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let descriptor = match extension.as_str() {
        "yaml" | "yml" => parse_yaml_descriptor(&raw)
            .with_context(|| format!("Failed to parse {}", path.display()))?,
        "json" | "json5" => parse_json_descriptor(&raw)
            .with_context(|| format!("Failed to parse {}", path.display()))?,
        other => anyhow::bail!(
            "Unsupported descriptor extension '{other}' for {} (expected .yaml or .json)",
            path.display()
        ),
    };

    descriptor.validate()?;
    Ok(descriptor)
}

/// Parses a YAML descriptor document.
pub fn parse_yaml_descriptor(raw: &str) -> Result<DeckDescriptor> {
    serde_yml::from_str(raw).context("Invalid YAML descriptor")
}

/// Parses a JSON (json5-lenient) descriptor document.
pub fn parse_json_descriptor(raw: &str) -> Result<DeckDescriptor> {
    json5::from_str(raw).context("Invalid JSON descriptor")
}
