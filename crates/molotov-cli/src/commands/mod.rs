//! CLI command definitions and dispatch.

pub mod merge;
pub mod plan;
pub mod validate;

use clap::{Parser, Subcommand};

/// Molotov — configuration-driven mixin composition.
#[derive(Parser, Debug)]
#[command(name = "molotov", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check that a manifest builds and its bases resolve.
    Validate(validate::ValidateArgs),
    /// Merge an override fragment into a configuration and print the result.
    Merge(merge::MergeArgs),
    /// Resolve a manifest and print how every plugin is layered.
    Plan(plan::PlanArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Validate(args) => validate::execute(&args),
        Command::Merge(args) => merge::execute(&args),
        Command::Plan(args) => plan::execute(&args),
    }
}
