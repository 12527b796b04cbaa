//! Entry point for the remote desktop proxy launcher.
use std::process::ExitCode;

use anyhow::Error;
use clap::Parser;
use remote_desktop_proxy::{
    cli::{execute_cli_command, CliCommand, LaunchProfileArgs},
    lib::telemetry,
    proxy::{
        config::ProxyConfig,
        runtime::{self, RuntimeExit, SessionEnd},
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match bootstrap().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(exit) => exit.report(),
    }
}

async fn bootstrap() -> Result<(), RuntimeExit> {
    telemetry::init_tracing().map_err(RuntimeExit::from_error)?;
    let args = LaunchProfileArgs::parse();
    let parsed = args.into_command().map_err(RuntimeExit::from_error)?;
    let profile = &parsed.profile;
    let config = ProxyConfig::load(profile.config_path.clone(), profile.config_source)
        .map_err(|err| RuntimeExit::from_error(Error::new(err)))?;

    match parsed.command {
        CliCommand::Run(run) => run_program(&config, &run.program, run.port).await,
        command => handle_cli_command(&command, &config),
    }
}

async fn run_program(config: &ProxyConfig, program: &str, port: u16) -> Result<(), RuntimeExit> {
    let end = runtime::run_supervised(config, program, port)
        .await
        .map_err(|err| RuntimeExit::from_error(Error::new(err)))?;
    match end {
        SessionEnd::Exited(Some(0)) | SessionEnd::Interrupted => Ok(()),
        SessionEnd::Exited(Some(code)) => Err(RuntimeExit::from_child_code(code)),
        SessionEnd::Exited(None) => Err(RuntimeExit::from_child_code(1)),
    }
}

fn handle_cli_command(command: &CliCommand, config: &ProxyConfig) -> Result<(), RuntimeExit> {
    let message = execute_cli_command(command, config).map_err(RuntimeExit::from_error)?;
    println!("{message}");
    Ok(())
}
