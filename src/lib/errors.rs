use std::{io, path::PathBuf, string::FromUtf8Error};

use config::ConfigError as ConfigLoaderError;
use rmcp::model::ErrorData;
use serde::Serialize;
use serde_json::{Map, Number, Value};
use thiserror::Error;

use crate::endpoints::EndpointKind;

/// Errors that can occur while loading or validating configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to build (read) the configuration file.
    #[error("Failed to read configuration file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Failed to deserialize TOML into a struct.
    #[error("Failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Field failed validation.
    #[error("Configuration file {path} has invalid `{field}`: {message}")]
    InvalidField {
        path: PathBuf,
        field: &'static str,
        message: String,
    },
}

impl ConfigError {
    /// Helper to wrap `config::ConfigError` as a read failure.
    pub fn from_read_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::FileRead { path, source }
    }

    /// Helper to wrap `config::ConfigError` as a parse failure.
    pub fn from_parse_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::Parse { path, source }
    }
}

/// Failures while loading static content at startup. All of them abort startup.
#[derive(Debug, Error)]
pub enum ContentLoadError {
    #[error("Content file {path} does not exist")]
    Missing { path: PathBuf },
    #[error("Failed to read content file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Content file {path} is not valid UTF-8: {source}")]
    InvalidUtf8 {
        path: PathBuf,
        #[source]
        source: FromUtf8Error,
    },
    #[error("Content path {path} escapes the content directory")]
    OutsideBaseDir { path: PathBuf },
    #[error("Content `{key}` is file-backed but no content directory is configured")]
    NoBaseDir { key: String },
    #[error("Content key `{key}` was loaded twice")]
    DuplicateKey { key: String },
}

/// Startup-time registration failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Endpoint identifier `{identifier}` is already registered (as {existing})")]
    DuplicateIdentifier {
        identifier: String,
        existing: EndpointKind,
    },
    #[error("Endpoint identifiers cannot be empty")]
    EmptyIdentifier,
    #[error("Prompt `{identifier}` must reference loaded content in at least one message")]
    PromptWithoutContent { identifier: String },
}

/// Failures while constructing the application.
#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Content(#[from] ContentLoadError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("Endpoint `{identifier}` refers to content `{key}` that was never loaded")]
    MissingContent { identifier: String, key: String },
}

/// Which `ErrorData` constructor an error descriptor maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorDataKind {
    ResourceNotFound,
    InvalidParams,
    Internal,
}

/// Structured error metadata returned to MCP clients.
#[derive(Debug, Clone, Serialize)]
pub struct ToolErrorDescriptor {
    /// Error code.
    pub code: &'static str,
    /// User-facing message.
    pub message: &'static str,
    /// Recommended remediation.
    pub remediation: &'static str,
    #[serde(skip)]
    pub kind: ErrorDataKind,
}

impl ToolErrorDescriptor {
    /// Simple constructor.
    pub const fn new(
        code: &'static str,
        message: &'static str,
        remediation: &'static str,
        kind: ErrorDataKind,
    ) -> Self {
        Self {
            code,
            message,
            remediation,
            kind,
        }
    }

    /// Create a builder.
    pub fn builder(&self) -> ToolErrorDescriptorBuilder<'_> {
        ToolErrorDescriptorBuilder::new(self)
    }
}

/// Builder for error data that fails if required fields are missing.
pub struct ToolErrorDescriptorBuilder<'a> {
    descriptor: &'a ToolErrorDescriptor,
    retryable: Option<bool>,
    details: Option<Value>,
    extra_fields: Map<String, Value>,
}

impl<'a> ToolErrorDescriptorBuilder<'a> {
    pub fn new(descriptor: &'a ToolErrorDescriptor) -> Self {
        Self {
            descriptor,
            retryable: None,
            details: None,
            extra_fields: Map::new(),
        }
    }

    pub fn retryable(mut self, retryable: bool) -> Self {
        self.retryable = Some(retryable);
        self
    }

    pub fn details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_context_field(mut self, key: &str, value: Value) -> Self {
        self.extra_fields.insert(key.to_string(), value);
        self
    }

    pub fn with_exit_code_value(mut self, exit_code: u8) -> Self {
        let numeric = Number::from(exit_code);
        self.extra_fields
            .insert("exit_code".into(), Value::Number(numeric));
        self
    }

    pub fn build(self) -> Result<ErrorData, ToolErrorBuilderError> {
        if self.descriptor.remediation.trim().is_empty() {
            return Err(ToolErrorBuilderError::MissingRemediation {
                code: self.descriptor.code,
            });
        }
        let retryable = self
            .retryable
            .ok_or(ToolErrorBuilderError::MissingRetryable {
                code: self.descriptor.code,
            })?;

        let mut data = Map::new();
        data.insert("code".into(), Value::String(self.descriptor.code.into()));
        data.insert(
            "remediation".into(),
            Value::String(self.descriptor.remediation.into()),
        );
        data.insert("retryable".into(), Value::Bool(retryable));
        if let Some(details) = self.details {
            data.insert("details".into(), details);
        }
        for (key, value) in self.extra_fields {
            data.insert(key, value);
        }

        let data = Some(Value::Object(data));
        Ok(match self.descriptor.kind {
            ErrorDataKind::ResourceNotFound => {
                ErrorData::resource_not_found(self.descriptor.message, data)
            }
            ErrorDataKind::InvalidParams => {
                ErrorData::invalid_params(self.descriptor.message, data)
            }
            ErrorDataKind::Internal => ErrorData::internal_error(self.descriptor.message, data),
        })
    }
}

/// Errors when required builder fields are missing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToolErrorBuilderError {
    #[error("retryable is missing (code={code})")]
    MissingRetryable { code: &'static str },
    #[error("remediation is empty (code={code})")]
    MissingRemediation { code: &'static str },
}

/// Unknown resource URI.
pub const RESOURCE_NOT_FOUND_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::new(
    "RESOURCE_NOT_FOUND",
    "No resource is registered under the requested URI",
    "Call resources/list and retry with one of the advertised URIs.",
    ErrorDataKind::ResourceNotFound,
);

/// Unknown prompt name.
pub const PROMPT_NOT_FOUND_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::new(
    "PROMPT_NOT_FOUND",
    "No prompt is registered under the requested name",
    "Call prompts/list and retry with one of the advertised prompt names.",
    ErrorDataKind::InvalidParams,
);

/// Unknown tool name.
pub const TOOL_NOT_FOUND_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::new(
    "TOOL_NOT_FOUND",
    "No tool is registered under the requested name",
    "Call tools/list and retry with one of the advertised tool names.",
    ErrorDataKind::InvalidParams,
);

/// Startup aborted because static content could not be loaded.
pub const CONTENT_LOAD_FAILED_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::new(
    "CONTENT_LOAD_FAILED",
    "Static content could not be loaded; the server was not started",
    "Check --content-dir / [content].base_dir and make sure resources/*.md and prompts/*.md exist as UTF-8 files.",
    ErrorDataKind::Internal,
);

/// Startup aborted because the endpoint catalog is inconsistent.
pub const ENDPOINT_REGISTRATION_FAILED_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::new(
    "ENDPOINT_REGISTRATION_FAILED",
    "Endpoint registration failed; the server was not started",
    "Give every resource, prompt and tool a unique, non-empty identifier.",
    ErrorDataKind::Internal,
);
