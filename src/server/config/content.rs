use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::lib::{errors::ConfigError, paths::is_nonempty_absolute};

/// Where static content is read from. `None` means the embedded defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentSection {
    pub base_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawContentSection {
    pub base_dir: Option<PathBuf>,
}

/// Relative `base_dir` values resolve against the directory holding the config file.
pub fn parse_content_section(
    raw: Option<RawContentSection>,
    path: &Path,
) -> Result<ContentSection, ConfigError> {
    let Some(base_dir) = raw.unwrap_or_default().base_dir else {
        return Ok(ContentSection::default());
    };

    if base_dir.as_os_str().to_string_lossy().trim().is_empty() {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "content.base_dir",
            message: "Provide a directory containing resources/ and prompts/".into(),
        });
    }

    let base_dir = if is_nonempty_absolute(&base_dir) {
        base_dir
    } else {
        path.parent()
            .map(|parent| parent.join(&base_dir))
            .unwrap_or(base_dir)
    };
    Ok(ContentSection {
        base_dir: Some(base_dir),
    })
}
