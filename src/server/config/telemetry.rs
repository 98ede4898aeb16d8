use tracing::{debug, info};

use super::ServerConfig;

pub fn log_defaults_used(default_path: &std::path::Path) {
    debug!(
        target: "hackathon_mcp::config",
        path = %default_path.display(),
        "No configuration file found; using built-in defaults"
    );
}

pub fn log_loaded(config: &ServerConfig) {
    info!(
        target: "hackathon_mcp::config",
        path = %config.source_display(),
        host = %config.server.host,
        port = config.server.port,
        content_dir = ?config.content.base_dir,
        "Configuration loaded"
    );
}
