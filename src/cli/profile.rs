//! LaunchProfile and config path resolution.
use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::server::config::DEFAULT_CONFIG_PATH;

const MCP_CONFIG_ENV: &str = "MCP_CONFIG_PATH";

/// MCP transport mode.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum TransportMode {
    Stdio,
    Tcp,
}

impl TransportMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Stdio => "stdio",
            TransportMode::Tcp => "tcp",
        }
    }
}

/// Resolved launch profile.
#[derive(Debug, Clone)]
pub struct LaunchProfile {
    /// `None` when no config file was named and `config.toml` does not exist.
    pub config_path: Option<PathBuf>,
    pub transport: TransportMode,
    pub content_dir: Option<PathBuf>,
    pub launch_args: Vec<String>,
}

/// Resolve config path in the order: CLI override → env var → default.
///
/// An explicitly named file is always returned (and must exist later); the default file is only
/// returned when present.
pub fn resolve_config_path(override_path: Option<PathBuf>) -> Result<Option<PathBuf>> {
    let cwd = env::current_dir().context("failed to obtain current directory")?;
    Ok(resolve_config_path_from(
        override_path,
        env::var_os(MCP_CONFIG_ENV).map(PathBuf::from),
        &cwd,
    ))
}

/// Resolve the config path from explicit inputs (testable helper).
fn resolve_config_path_from(
    override_path: Option<PathBuf>,
    env_path: Option<PathBuf>,
    cwd: &Path,
) -> Option<PathBuf> {
    let explicit = override_path.or(env_path.filter(|path| !path.as_os_str().is_empty()));
    match explicit {
        Some(path) => Some(absolutize(path, cwd)),
        None => {
            let default = cwd.join(DEFAULT_CONFIG_PATH);
            default.is_file().then_some(default)
        }
    }
}

/// Resolve a relative `--content-dir` against the working directory.
pub fn resolve_content_dir(content_dir: Option<PathBuf>) -> Result<Option<PathBuf>> {
    match content_dir {
        Some(dir) => {
            let cwd = env::current_dir().context("failed to obtain current directory")?;
            Ok(Some(absolutize(dir, &cwd)))
        }
        None => Ok(None),
    }
}

/// Build launch arguments suitable for reproduction/logging.
pub fn build_launch_args(
    transport: TransportMode,
    config: Option<&Path>,
    content_dir: Option<&Path>,
) -> Vec<String> {
    let mut args = vec![format!("--transport={}", transport.as_str())];
    if let Some(config) = config {
        args.push(format!("--config={}", config.display()));
    }
    if let Some(content_dir) = content_dir {
        args.push(format!("--content-dir={}", content_dir.display()));
    }
    args
}

fn absolutize(path: PathBuf, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn cli_override_beats_env() {
        let cwd = PathBuf::from("/work");
        let resolved = resolve_config_path_from(
            Some(PathBuf::from("cli.toml")),
            Some(PathBuf::from("/etc/env.toml")),
            &cwd,
        );
        assert_eq!(resolved, Some(PathBuf::from("/work/cli.toml")));
    }

    #[test]
    fn env_is_used_without_override() {
        let cwd = PathBuf::from("/work");
        let resolved =
            resolve_config_path_from(None, Some(PathBuf::from("/etc/env.toml")), &cwd);
        assert_eq!(resolved, Some(PathBuf::from("/etc/env.toml")));
    }

    #[test]
    fn missing_default_config_means_defaults() {
        let temp = tempdir().expect("can create temporary directory");
        assert_eq!(resolve_config_path_from(None, None, temp.path()), None);

        fs::write(temp.path().join(DEFAULT_CONFIG_PATH), "").expect("can write config");
        assert_eq!(
            resolve_config_path_from(None, None, temp.path()),
            Some(temp.path().join(DEFAULT_CONFIG_PATH))
        );
    }

    #[test]
    fn launch_args_include_only_given_paths() {
        assert_eq!(
            build_launch_args(TransportMode::Stdio, None, None),
            vec!["--transport=stdio".to_string()]
        );
        assert_eq!(
            build_launch_args(
                TransportMode::Tcp,
                Some(Path::new("/etc/hackathon.toml")),
                Some(Path::new("/srv/content"))
            ),
            vec![
                "--transport=tcp".to_string(),
                "--config=/etc/hackathon.toml".to_string(),
                "--content-dir=/srv/content".to_string(),
            ]
        );
    }
}
