//! The fixed hackathon catalog: one overview resource, one starter prompt, one overview tool.

use std::{path::Path, sync::Arc};

use schemars::JsonSchema;
use serde::Deserialize;

use super::Application;
use crate::{
    content::{ContentBlob, ContentSource, ContentStore, ContentType},
    endpoints::{
        EndpointRegistry, MessageRole, PromptDescriptor, PromptMessage, ResourceDescriptor,
        ToolDescriptor,
    },
    lib::{errors::ApplicationError, fs::BundledContentFile},
};

pub const APP_NAME: &str = "fastmcp-hackathon";
pub const APP_DESCRIPTION: &str = "Provides the hackathon overview markdown and a starter prompt \
for building FastMCP servers with Python.";

pub const OVERVIEW_CONTENT_KEY: &str = "hackathon_overview";
pub const STARTER_CONTENT_KEY: &str = "fastmcp_python_starter";

pub const OVERVIEW_RESOURCE_URI: &str = "resource://hackathon-overview";
pub const STARTER_PROMPT_NAME: &str = "fastmcp-python-starter";
pub const OVERVIEW_TOOL_NAME: &str = "get_hackathon_overview";

const STARTER_PREAMBLE: &str = "You are an expert FastMCP engineer helping a developer build a \
Python MCP server that integrates cleanly with Cursor.";

const EMBEDDED_OVERVIEW: &str = include_str!("../../content/resources/hackathon_overview.md");
const EMBEDDED_STARTER: &str = include_str!("../../content/prompts/fastmcp_python_starter.md");

/// Embedded defaults in their on-disk layout, used by `export-content`.
pub const BUNDLED_CONTENT_FILES: [BundledContentFile<'static>; 2] = [
    BundledContentFile {
        relative_path: "resources/hackathon_overview.md",
        content: EMBEDDED_OVERVIEW,
    },
    BundledContentFile {
        relative_path: "prompts/fastmcp_python_starter.md",
        content: EMBEDDED_STARTER,
    },
];

/// Arguments advertised by the overview tool. They are accepted and ignored: the full document
/// is always returned.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct OverviewToolArgs {
    /// Free-form topic. Accepted for compatibility; does not filter the document.
    pub query: Option<String>,
}

/// Load the catalog content (embedded, or from `content_dir`) and build the application.
pub fn hackathon_application(content_dir: Option<&Path>) -> Result<Application, ApplicationError> {
    let store = load_content(content_dir)?;
    Application::build(APP_NAME, APP_DESCRIPTION, store, register_endpoints)
}

fn load_content(content_dir: Option<&Path>) -> Result<ContentStore, ApplicationError> {
    let (mut store, overview, starter) = match content_dir {
        Some(dir) => (
            ContentStore::with_base_dir(dir),
            ContentSource::resource_file(OVERVIEW_CONTENT_KEY),
            ContentSource::prompt_file(STARTER_CONTENT_KEY),
        ),
        None => (
            ContentStore::embedded(),
            ContentSource::literal(EMBEDDED_OVERVIEW),
            ContentSource::literal(EMBEDDED_STARTER),
        ),
    };
    store.load(OVERVIEW_CONTENT_KEY, &overview, ContentType::Markdown)?;
    store.load(STARTER_CONTENT_KEY, &starter, ContentType::Markdown)?;
    Ok(store)
}

fn register_endpoints(
    content: &ContentStore,
    registry: &mut EndpointRegistry,
) -> Result<(), ApplicationError> {
    let overview = require(content, OVERVIEW_CONTENT_KEY, OVERVIEW_RESOURCE_URI)?;
    registry.register(ResourceDescriptor::new(
        OVERVIEW_RESOURCE_URI,
        "Hackathon Overview",
        "Markdown overview for the MCP hackathon",
        Arc::clone(&overview),
    ))?;

    let starter = require(content, STARTER_CONTENT_KEY, STARTER_PROMPT_NAME)?;
    registry.register(PromptDescriptor::new(
        STARTER_PROMPT_NAME,
        "Prompt template for building FastMCP servers with Python",
        vec![
            PromptMessage::literal(MessageRole::Assistant, STARTER_PREAMBLE),
            PromptMessage::content(MessageRole::User, starter),
        ],
    )?)?;

    registry.register(ToolDescriptor::with_parameters::<OverviewToolArgs>(
        OVERVIEW_TOOL_NAME,
        "Return the full hackathon overview markdown. The optional `query` is accepted but \
does not filter the result.",
        overview,
    ))?;
    Ok(())
}

fn require(
    content: &ContentStore,
    key: &str,
    identifier: &str,
) -> Result<Arc<ContentBlob>, ApplicationError> {
    content
        .get(key)
        .ok_or_else(|| ApplicationError::MissingContent {
            identifier: identifier.to_string(),
            key: key.to_string(),
        })
}
