//! Application shell: immutable name/description metadata plus the populated endpoint registry.

pub mod catalog;

use serde::Serialize;
use tracing::info;

use crate::{
    content::ContentStore,
    endpoints::{EndpointKind, EndpointRegistry, EndpointSummary},
    lib::errors::ApplicationError,
};

pub use catalog::{hackathon_application, APP_DESCRIPTION, APP_NAME};

/// Fully constructed server application. Nothing can be added after [`Application::build`].
#[derive(Debug)]
pub struct Application {
    name: String,
    description: String,
    content: ContentStore,
    registry: EndpointRegistry,
}

impl Application {
    /// Populate a registry from an already-loaded content store.
    pub fn build<F>(
        name: impl Into<String>,
        description: impl Into<String>,
        content: ContentStore,
        register: F,
    ) -> Result<Self, ApplicationError>
    where
        F: FnOnce(&ContentStore, &mut EndpointRegistry) -> Result<(), ApplicationError>,
    {
        let mut registry = EndpointRegistry::new();
        register(&content, &mut registry)?;

        let app = Self {
            name: name.into(),
            description: description.into(),
            content,
            registry,
        };
        info!(
            target: "hackathon_mcp::registry",
            app = %app.name,
            content_blobs = app.content.len(),
            resources = app.registry.count(EndpointKind::Resource),
            prompts = app.registry.count(EndpointKind::Prompt),
            tools = app.registry.count(EndpointKind::Tool),
            "Application built"
        );
        Ok(app)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn registry(&self) -> &EndpointRegistry {
        &self.registry
    }

    pub fn content(&self) -> &ContentStore {
        &self.content
    }

    /// Serializable catalog for introspection.
    pub fn catalog(&self) -> AppCatalog<'_> {
        AppCatalog {
            name: &self.name,
            description: &self.description,
            content_dir: self
                .content
                .base_dir()
                .map(|dir| dir.to_string_lossy().into_owned()),
            endpoints: self
                .registry
                .list()
                .iter()
                .map(|descriptor| descriptor.summary())
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AppCatalog<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub content_dir: Option<String>,
    pub endpoints: Vec<EndpointSummary<'a>>,
}
