//! CLI argument definitions and `LaunchProfile` construction.
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use super::{resolve_config_path, LaunchProfile};

/// Parsed command intent from CLI.
#[derive(Debug, Clone)]
pub struct ParsedCommand {
    pub profile: LaunchProfile,
    pub command: CliCommand,
}

/// Top-level commands.
#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Print the launch configuration for a program as JSON.
    #[command(
        about = "Print the launch configuration for a program as JSON",
        after_help = "The socket directory is left on disk for the host; use `run` to have it removed on exit."
    )]
    Setup(ProgramArgs),
    /// Launch a program on a port and remove its socket directory on exit.
    Run(RunArgs),
    /// List configured programs and their assets.
    Programs,
    /// Print the JSON Schema of the launch configuration.
    Schema,
    /// Print the effective configuration as TOML.
    PrintConfig,
}

/// Arguments naming a program.
#[derive(Debug, Clone, Args)]
pub struct ProgramArgs {
    /// Program identifier (for example `bandage` or `igv`).
    pub program: String,
}

/// Arguments for `run`.
#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Program identifier (for example `bandage` or `igv`).
    pub program: String,
    /// Port substituted for `{port}` in the bridge command.
    #[arg(long)]
    pub port: u16,
}

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    author,
    version,
    about = "Remote desktop launcher for notebook server proxies",
    long_about = None
)]
pub struct LaunchProfileArgs {
    /// Path to a TOML config (overrides REMOTE_DESKTOP_PROXY_CONFIG).
    #[arg(long = "config", global = true)]
    pub config_override: Option<PathBuf>,
    #[command(subcommand)]
    pub command: CliCommand,
}

impl LaunchProfileArgs {
    /// Build a `LaunchProfile` from CLI args and environment variables.
    pub fn build(&self) -> Result<LaunchProfile> {
        let (config_path, config_source) = resolve_config_path(self.config_override.clone())?;
        Ok(LaunchProfile {
            config_path,
            config_source,
        })
    }

    pub fn into_command(self) -> Result<ParsedCommand> {
        let profile = self.build()?;
        Ok(ParsedCommand {
            profile,
            command: self.command,
        })
    }
}
