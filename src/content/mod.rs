//! Static content loaded once at startup.
//!
//! A [`ContentStore`] owns every text blob the server can return. Blobs are read eagerly,
//! validated as UTF-8 and shared by reference with the endpoint descriptors that expose them.

use std::{
    borrow::Cow,
    collections::HashMap,
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::Serialize;
use tracing::{debug, error, info};

use crate::lib::{errors::ContentLoadError, fs::read_utf8_file, paths::is_confined_relative};

/// Subdirectory holding resource documents under the content base directory.
pub const RESOURCES_DIR: &str = "resources";
/// Subdirectory holding prompt templates under the content base directory.
pub const PROMPTS_DIR: &str = "prompts";
const MARKDOWN_EXTENSION: &str = "md";

/// Declared content type of a blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ContentType {
    #[serde(rename = "text/markdown")]
    Markdown,
    #[serde(rename = "text/plain")]
    PlainText,
}

impl ContentType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ContentType::Markdown => "text/markdown",
            ContentType::PlainText => "text/plain",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable UTF-8 text plus its declared content type.
#[derive(Debug, PartialEq, Eq)]
pub struct ContentBlob {
    text: String,
    content_type: ContentType,
}

impl ContentBlob {
    pub fn new(text: impl Into<String>, content_type: ContentType) -> Self {
        Self {
            text: text.into(),
            content_type,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    /// Size in bytes of the UTF-8 text.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Where a blob comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    /// Text embedded in the binary or supplied inline.
    Literal(Cow<'static, str>),
    /// File path relative to the content base directory.
    File(PathBuf),
}

impl ContentSource {
    pub fn literal(text: impl Into<Cow<'static, str>>) -> Self {
        Self::Literal(text.into())
    }

    /// `resources/<name>.md`
    pub fn resource_file(name: &str) -> Self {
        Self::File(markdown_path(RESOURCES_DIR, name))
    }

    /// `prompts/<name>.md`
    pub fn prompt_file(name: &str) -> Self {
        Self::File(markdown_path(PROMPTS_DIR, name))
    }

    fn describe(&self) -> Cow<'_, str> {
        match self {
            ContentSource::Literal(_) => Cow::Borrowed("literal"),
            ContentSource::File(path) => path.to_string_lossy(),
        }
    }
}

fn markdown_path(dir: &str, name: &str) -> PathBuf {
    Path::new(dir).join(format!("{name}.{MARKDOWN_EXTENSION}"))
}

/// Owner of every loaded blob, keyed by a stable content key.
#[derive(Debug, Default)]
pub struct ContentStore {
    base_dir: Option<PathBuf>,
    blobs: HashMap<String, Arc<ContentBlob>>,
    order: Vec<String>,
}

impl ContentStore {
    /// Store that only accepts literal sources.
    pub fn embedded() -> Self {
        Self::default()
    }

    /// Store that resolves file sources under `base_dir`.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
            ..Self::default()
        }
    }

    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    /// Load `source` under `key`. File sources are read and decoded immediately.
    pub fn load(
        &mut self,
        key: &str,
        source: &ContentSource,
        content_type: ContentType,
    ) -> Result<Arc<ContentBlob>, ContentLoadError> {
        if self.blobs.contains_key(key) {
            return Err(ContentLoadError::DuplicateKey {
                key: key.to_string(),
            });
        }

        let text = match source {
            ContentSource::Literal(text) => text.clone().into_owned(),
            ContentSource::File(relative) => self.read_file(key, relative).map_err(|err| {
                error!(
                    target: "hackathon_mcp::content",
                    key,
                    source = %source.describe(),
                    reason = %err,
                    "Failed to load content"
                );
                err
            })?,
        };

        let blob = Arc::new(ContentBlob::new(text, content_type));
        info!(
            target: "hackathon_mcp::content",
            key,
            source = %source.describe(),
            content_type = %content_type,
            bytes = blob.len(),
            "Loaded content"
        );
        self.blobs.insert(key.to_string(), Arc::clone(&blob));
        self.order.push(key.to_string());
        Ok(blob)
    }

    pub fn get(&self, key: &str) -> Option<Arc<ContentBlob>> {
        self.blobs.get(key).cloned()
    }

    /// Keys in load order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn read_file(&self, key: &str, relative: &Path) -> Result<String, ContentLoadError> {
        let base_dir = self
            .base_dir
            .as_deref()
            .ok_or_else(|| ContentLoadError::NoBaseDir {
                key: key.to_string(),
            })?;
        if !is_confined_relative(relative) {
            return Err(ContentLoadError::OutsideBaseDir {
                path: relative.to_path_buf(),
            });
        }
        let path = base_dir.join(relative);
        debug!(
            target: "hackathon_mcp::content",
            key,
            path = %path.display(),
            "Reading content file"
        );
        read_utf8_file(&path)
    }
}
