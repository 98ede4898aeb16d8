//! CLI entrypoint module structure.
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;

use crate::{
    app::{catalog::BUNDLED_CONTENT_FILES, hackathon_application},
    lib::fs::{export_content_files, ContentExportStatus},
    server::config::ServerConfig,
};

pub mod args;
pub mod profile;

pub use args::{CliCommand, ExportContentArgs, LaunchProfileArgs, ParsedCommand};
pub use profile::{
    build_launch_args, resolve_config_path, resolve_content_dir, LaunchProfile, TransportMode,
};

/// Execute CLI command mode and return a user-facing result payload.
pub fn execute_cli_command(command: CliCommand, profile: &LaunchProfile) -> Result<String> {
    match command {
        CliCommand::Endpoints => describe_endpoints(profile),
        CliCommand::ExportContent(args) => {
            export_bundled_content(&args.destination, args.force, args.dry_run)
        }
    }
}

/// Build the application exactly as the server would and print its catalog.
fn describe_endpoints(profile: &LaunchProfile) -> Result<String> {
    let config = ServerConfig::load(profile.config_path.clone())?
        .with_content_dir(profile.content_dir.clone());
    let app = hackathon_application(config.content.base_dir.as_deref())
        .context("failed to build the endpoint catalog")?;
    Ok(serde_json::to_string_pretty(&app.catalog())?)
}

/// Export bundled content files and format a JSON response payload.
fn export_bundled_content(destination_dir: &Path, force: bool, dry_run: bool) -> Result<String> {
    let result = export_content_files(destination_dir, &BUNDLED_CONTENT_FILES, force, dry_run)
        .with_context(|| {
            format!(
                "failed to write content files to {}",
                destination_dir.to_string_lossy()
            )
        })?;

    let (status, message) = match result.status {
        ContentExportStatus::Planned => ("planned", "dry-run: no files were modified"),
        ContentExportStatus::Exported => ("exported", "content exported"),
        ContentExportStatus::SkippedExisting => (
            "skipped_existing",
            "content files already exist; re-run with --force to overwrite",
        ),
    };

    let payload = json!({
        "status": status,
        "destination_dir": destination_dir.to_string_lossy(),
        "written_files": result.written_files,
        "message": message
    });

    Ok(serde_json::to_string_pretty(&payload)?)
}
