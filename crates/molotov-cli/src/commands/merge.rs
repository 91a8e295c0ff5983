//! `molotov merge` — Merge an override fragment into a configuration.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use molotov_compose::config::Configuration;
use molotov_compose::config::merge::merge;
use molotov_compose::config::validator::parse_document;
use serde_json::Value;

use crate::output;

/// Arguments for the `merge` command.
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Path to the base configuration document.
    pub config: PathBuf,

    /// Path to an override fragment layered on top.
    #[arg(long)]
    pub overrides: Option<PathBuf>,
}

/// Executes the `merge` command, printing the merged document as JSON.
///
/// # Errors
///
/// Returns an error if either document cannot be read or parsed.
pub fn execute(args: &MergeArgs) -> anyhow::Result<()> {
    let merged = merge_files(&args.config, args.overrides.as_deref())?;
    println!("{}", serde_json::to_string_pretty(&merged)?);
    Ok(())
}

fn merge_files(config: &Path, overrides: Option<&Path>) -> anyhow::Result<Configuration> {
    let base = read_document(config)?;
    let Some(path) = overrides else {
        return Ok(base);
    };
    let fragment = read_document(path)?;
    tracing::debug!(config = %config.display(), overrides = %path.display(), "merging documents");
    Ok(merge(&base, &fragment))
}

fn read_document(path: &Path) -> anyhow::Result<Configuration> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    parse_document(&value).map_err(output::coded)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use molotov_common::types::Namespace;
    use serde_json::json;

    use super::*;

    #[test]
    fn merges_override_file_over_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = dir.path().join("config.json");
        let overrides = dir.path().join("overrides.json");
        fs::write(
            &config,
            json!({
                "demo": {
                    "basesNamespace": ["widget"],
                    "pluginDefs": { "widget": { "fancy": ["a", "b"] } }
                }
            })
            .to_string(),
        )
        .expect("write");
        fs::write(
            &overrides,
            json!({ "demo": { "pluginDefs": { "widget": { "fancy": ["b"], "extra": ["a"] } } } })
                .to_string(),
        )
        .expect("write");

        let merged = merge_files(&config, Some(&overrides)).expect("merge");
        let plugins = merged
            .get(&Namespace::new("demo"))
            .and_then(|c| c.plugins.as_ref())
            .expect("plugins");
        assert_eq!(plugins.mixins("widget", "fancy"), Some(&["b".to_string()][..]));
        assert_eq!(plugins.mixins("widget", "extra"), Some(&["a".to_string()][..]));
    }

    #[test]
    fn without_overrides_returns_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = dir.path().join("config.json");
        fs::write(&config, json!({ "demo": { "basesNamespace": [] } }).to_string())
            .expect("write");
        let merged = merge_files(&config, None).expect("merge");
        assert!(merged.get(&Namespace::new("demo")).is_some());
    }

    #[test]
    fn rejects_non_object_document() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = dir.path().join("config.json");
        fs::write(&config, "[1, 2, 3]").expect("write");
        let err = merge_files(&config, None).unwrap_err();
        assert!(err.to_string().contains("MOLOTOV_MALFORMED_MOLOTOV_CONFIG"), "got: {err}");
    }
}
