//! `molotov validate` — Check that a manifest builds and its bases resolve.

use std::path::PathBuf;

use clap::Args;
use molotov_common::types::Target;
use molotov_compose::config::merge::merge;
use molotov_compose::config::validator::require_valid;
use molotov_sdk::manifest::Manifest;

use crate::output;

/// Arguments for the `validate` command.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the manifest.
    #[arg(default_value = molotov_common::constants::SETTINGS_FILE)]
    pub manifest: PathBuf,
}

/// Executes the `validate` command.
///
/// Loads the manifest, builds its registry, checks that the merged
/// configuration declares both sections, and resolves the bases.
///
/// # Errors
///
/// Returns an error if any of those steps fails.
pub fn execute(args: &ValidateArgs) -> anyhow::Result<()> {
    tracing::info!(manifest = %args.manifest.display(), "validating manifest");
    let manifest = Manifest::load(&args.manifest).map_err(output::coded)?;
    let namespace = manifest.namespace().clone();
    let mut registry = manifest.into_registry().map_err(output::coded)?;

    let merged = merge(registry.config(), registry.overrides());
    require_valid(&merged, &namespace, Target::Plugins).map_err(output::coded)?;
    let bases = registry.mix_bases().map_err(output::coded)?;

    println!(
        "{}: namespace \"{namespace}\" is valid ({} base(s), {} extension module(s))",
        args.manifest.display(),
        bases.len(),
        registry.extensions().len()
    );
    Ok(())
}
