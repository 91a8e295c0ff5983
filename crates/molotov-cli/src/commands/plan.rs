//! `molotov plan` — Resolve a manifest and print how every plugin is layered.

use std::path::PathBuf;

use clap::Args;
use molotov_sdk::manifest::Manifest;

use crate::output;

/// Arguments for the `plan` command.
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Path to the manifest.
    #[arg(default_value = molotov_common::constants::SETTINGS_FILE)]
    pub manifest: PathBuf,

    /// Print the plan as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Executes the `plan` command.
///
/// Runs the full resolution (bases, then plugins) and displays each
/// composed plugin as its mixin layering, outermost first.
///
/// # Errors
///
/// Returns an error if the manifest cannot be loaded or resolved.
pub fn execute(args: &PlanArgs) -> anyhow::Result<()> {
    let manifest = Manifest::load(&args.manifest).map_err(output::coded)?;
    let namespace = manifest.namespace().clone();
    let mut registry = manifest.into_registry().map_err(output::coded)?;
    let plugins = registry.resolve().map_err(output::coded)?;

    if args.json {
        let plan = output::plan_json(&namespace, &plugins);
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    println!("{}", output::heading(&format!("Composition Plan for: {namespace}")));
    println!();
    let mut count = 0usize;
    for (base, named) in &plugins {
        for (plugin, blueprint) in named {
            println!("  {}", output::plan_line(base, plugin, blueprint));
            count += 1;
        }
    }
    println!();
    println!("  {count} plugin(s) composed.");
    Ok(())
}
