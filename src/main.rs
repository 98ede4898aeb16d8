//! Entry point for the hackathon MCP server.
use std::process::ExitCode;

use anyhow::Error;
use clap::Parser;
use hackathon_mcp::{
    app::hackathon_application,
    cli::{execute_cli_command, CliCommand, LaunchProfile, LaunchProfileArgs, ParsedCommand},
    lib::telemetry,
    server::{
        config::ServerConfig,
        runtime::{self, RuntimeExit},
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
    let command = args.into_command().map_err(RuntimeExit::from_error)?;

    match command {
        ParsedCommand::RunServer(profile) => run_server(profile).await,
        ParsedCommand::Cli(command, profile) => handle_cli_command(command, &profile),
    }
}

async fn run_server(profile: LaunchProfile) -> Result<(), RuntimeExit> {
    let config = ServerConfig::load(profile.config_path.clone())
        .map_err(|err| RuntimeExit::from_error(Error::new(err)))?
        .with_content_dir(profile.content_dir.clone());
    let app = hackathon_application(config.content.base_dir.as_deref())
        .map_err(RuntimeExit::from_application_error)?;
    runtime::run_server(profile, config, app).await
}

fn handle_cli_command(command: CliCommand, profile: &LaunchProfile) -> Result<(), RuntimeExit> {
    let message = execute_cli_command(command, profile).map_err(RuntimeExit::from_error)?;
    println!("{message}");
    Ok(())
}
