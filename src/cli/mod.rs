//! CLI entrypoint module structure.
use anyhow::{Context, Result};
use serde_json::json;
use tracing::warn;

use crate::{
    launch::{build_launch_plan, LaunchConfig},
    proxy::config::ProxyConfig,
};

pub mod args;
pub mod profile;

pub use args::{CliCommand, LaunchProfileArgs, ParsedCommand, ProgramArgs, RunArgs};
pub use profile::{resolve_config_path, LaunchProfile};
pub use crate::proxy::config::ConfigSource;

/// Execute a non-supervising command and return its stdout payload.
///
/// `run` is handled by the async runtime and is rejected here.
pub fn execute_cli_command(command: &CliCommand, config: &ProxyConfig) -> Result<String> {
    match command {
        CliCommand::Setup(args) => setup_payload(config, &args.program),
        CliCommand::Programs => programs_payload(config),
        CliCommand::Schema => schema_payload(),
        CliCommand::PrintConfig => config
            .to_toml()
            .context("failed to render configuration as TOML"),
        CliCommand::Run(args) => Err(anyhow::anyhow!(
            "`run {}` must be executed by the supervising runtime",
            args.program
        )),
    }
}

/// Build the launch configuration and hand its socket directory to the host.
fn setup_payload(config: &ProxyConfig, program: &str) -> Result<String> {
    let plan = build_launch_plan(config, program)
        .with_context(|| format!("failed to build launch configuration for `{program}`"))?;
    let (launch_config, socket_dir) = plan.into_parts();
    let kept = socket_dir.keep();
    warn!(
        target: "remote_desktop_proxy::launch",
        program,
        socket_dir = %kept.display(),
        "Socket directory handed to host; it is not removed when the session ends"
    );

    Ok(serde_json::to_string_pretty(&launch_config)?)
}

fn programs_payload(config: &ProxyConfig) -> Result<String> {
    let share_dir = &config.assets.share_dir;
    let programs = config
        .programs
        .ids()
        .map(|id| {
            let assets = config.programs.resolve(id, share_dir)?;
            Ok(json!({
                "name": id,
                "script": assets.script.to_string_lossy(),
                "script_exists": assets.script.exists(),
                "icon": assets.icon.to_string_lossy(),
            }))
        })
        .collect::<Result<Vec<_>>>()?;

    let payload = json!({
        "share_dir": share_dir.to_string_lossy(),
        "programs": programs,
    });
    Ok(serde_json::to_string_pretty(&payload)?)
}

fn schema_payload() -> Result<String> {
    let schema = schemars::schema_for!(LaunchConfig);
    Ok(serde_json::to_string_pretty(&schema)?)
}
