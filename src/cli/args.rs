//! CLI argument definitions and `LaunchProfile` construction.
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use super::{
    build_launch_args, resolve_config_path, resolve_content_dir, LaunchProfile, TransportMode,
};

/// Parsed command intent from CLI.
#[derive(Debug, Clone)]
pub enum ParsedCommand {
    RunServer(LaunchProfile),
    Cli(CliCommand, LaunchProfile),
}

/// Top-level optional CLI commands.
#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Print the registered resources, prompts and tools as JSON.
    #[command(about = "Print the registered resources, prompts and tools as JSON")]
    Endpoints,
    /// Write the bundled content files so they can be edited and served with --content-dir.
    #[command(
        about = "Write the bundled content files into a directory",
        after_help = "Hint: serve the exported files with `hackathon-mcp --content-dir <DIR>`."
    )]
    ExportContent(ExportContentArgs),
}

/// Arguments for `export-content`.
#[derive(Debug, Clone, Args)]
pub struct ExportContentArgs {
    /// Destination directory (receives resources/ and prompts/).
    pub destination: PathBuf,
    /// Overwrite existing files.
    #[arg(long, default_value_t = false)]
    pub force: bool,
    /// Show planned changes without touching files.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    author,
    version,
    about = "Hackathon MCP server (hackathon overview + FastMCP starter prompt)",
    long_about = None
)]
pub struct LaunchProfileArgs {
    /// Select stdio (default) or tcp.
    #[arg(long, value_enum, default_value_t = TransportMode::Stdio)]
    pub transport: TransportMode,
    /// Path to config.toml (overrides MCP_CONFIG_PATH).
    #[arg(long = "config")]
    pub config_override: Option<PathBuf>,
    /// Directory with resources/*.md and prompts/*.md (overrides [content].base_dir).
    #[arg(long = "content-dir")]
    pub content_dir: Option<PathBuf>,
    /// Optional CLI command mode.
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

impl LaunchProfileArgs {
    /// Build a `LaunchProfile` from CLI args and environment variables.
    pub fn build(self) -> Result<LaunchProfile> {
        let config_path = resolve_config_path(self.config_override)?;
        let content_dir = resolve_content_dir(self.content_dir)?;
        let launch_args = build_launch_args(
            self.transport,
            config_path.as_deref(),
            content_dir.as_deref(),
        );

        Ok(LaunchProfile {
            config_path,
            transport: self.transport,
            content_dir,
            launch_args,
        })
    }

    /// Parse CLI args into either server launch mode or utility command mode.
    pub fn into_command(mut self) -> Result<ParsedCommand> {
        match self.command.take() {
            Some(command) => Ok(ParsedCommand::Cli(command, self.build()?)),
            None => Ok(ParsedCommand::RunServer(self.build()?)),
        }
    }
}
