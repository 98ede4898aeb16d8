//! File helpers for reading content files and exporting the bundled content layout.

use std::{
    fs,
    io::{self, ErrorKind},
    path::Path,
};

use crate::lib::errors::ContentLoadError;

/// Read a file and decode it strictly as UTF-8.
pub fn read_utf8_file(path: &Path) -> Result<String, ContentLoadError> {
    let bytes = fs::read(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ContentLoadError::Missing {
            path: path.to_path_buf(),
        },
        _ => ContentLoadError::Unreadable {
            path: path.to_path_buf(),
            source,
        },
    })?;
    String::from_utf8(bytes).map_err(|source| ContentLoadError::InvalidUtf8 {
        path: path.to_path_buf(),
        source,
    })
}

/// Content file payload to write under a content directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundledContentFile<'a> {
    /// Path relative to the content directory (for example: `resources/hackathon_overview.md`).
    pub relative_path: &'a str,
    /// UTF-8 content to write.
    pub content: &'a str,
}

/// File write status for `export_content_files`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentExportStatus {
    Planned,
    Exported,
    SkippedExisting,
}

/// Result summary for a content export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentExportResult {
    pub status: ContentExportStatus,
    pub written_files: Vec<String>,
}

/// Write bundled content files into `destination_dir`.
///
/// In dry-run mode this function does not mutate filesystem state.
/// Without `force`, existing files are preserved and no write happens.
pub fn export_content_files(
    destination_dir: &Path,
    files: &[BundledContentFile<'_>],
    force: bool,
    dry_run: bool,
) -> Result<ContentExportResult, io::Error> {
    let written_files = files
        .iter()
        .map(|file| file.relative_path.to_string())
        .collect::<Vec<_>>();

    let has_existing = files
        .iter()
        .any(|file| destination_dir.join(file.relative_path).exists());
    if has_existing && !force {
        return Ok(ContentExportResult {
            status: ContentExportStatus::SkippedExisting,
            written_files,
        });
    }

    if dry_run {
        return Ok(ContentExportResult {
            status: ContentExportStatus::Planned,
            written_files,
        });
    }

    fs::create_dir_all(destination_dir)?;
    for file in files {
        let path = destination_dir.join(file.relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, file.content.as_bytes())?;
    }

    Ok(ContentExportResult {
        status: ContentExportStatus::Exported,
        written_files,
    })
}
