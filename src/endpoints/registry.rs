use std::collections::HashMap;

use tracing::debug;

use super::{
    EndpointDescriptor, EndpointKind, EndpointNotFound, ExpectedKind, PromptDescriptor,
    ResourceDescriptor, ToolDescriptor,
};
use crate::lib::errors::RegistryError;

/// Identifier → descriptor map that remembers insertion order.
#[derive(Debug, Default, Clone)]
pub struct EndpointRegistry {
    entries: Vec<EndpointDescriptor>,
    index: HashMap<String, usize>,
}

impl EndpointRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a descriptor. A duplicate or blank identifier leaves the registry untouched.
    pub fn register(
        &mut self,
        descriptor: impl Into<EndpointDescriptor>,
    ) -> Result<(), RegistryError> {
        let descriptor = descriptor.into();
        let identifier = descriptor.identifier();
        if identifier.trim().is_empty() {
            return Err(RegistryError::EmptyIdentifier);
        }
        if let Some(&position) = self.index.get(identifier) {
            return Err(RegistryError::DuplicateIdentifier {
                identifier: identifier.to_string(),
                existing: self.entries[position].kind(),
            });
        }

        debug!(
            target: "hackathon_mcp::registry",
            identifier,
            kind = %descriptor.kind(),
            "Registered endpoint"
        );
        self.index.insert(identifier.to_string(), self.entries.len());
        self.entries.push(descriptor);
        Ok(())
    }

    pub fn resolve(&self, identifier: &str) -> Result<&EndpointDescriptor, EndpointNotFound> {
        self.index
            .get(identifier)
            .map(|&position| &self.entries[position])
            .ok_or_else(|| EndpointNotFound {
                identifier: identifier.to_string(),
                expected: ExpectedKind::Any,
            })
    }

    pub fn resolve_resource(&self, uri: &str) -> Result<&ResourceDescriptor, EndpointNotFound> {
        match self.resolve(uri) {
            Ok(EndpointDescriptor::Resource(resource)) => Ok(resource),
            _ => Err(not_found(uri, EndpointKind::Resource)),
        }
    }

    pub fn resolve_prompt(&self, name: &str) -> Result<&PromptDescriptor, EndpointNotFound> {
        match self.resolve(name) {
            Ok(EndpointDescriptor::Prompt(prompt)) => Ok(prompt),
            _ => Err(not_found(name, EndpointKind::Prompt)),
        }
    }

    pub fn resolve_tool(&self, name: &str) -> Result<&ToolDescriptor, EndpointNotFound> {
        match self.resolve(name) {
            Ok(EndpointDescriptor::Tool(tool)) => Ok(tool),
            _ => Err(not_found(name, EndpointKind::Tool)),
        }
    }

    /// Every descriptor in registration order.
    pub fn list(&self) -> &[EndpointDescriptor] {
        &self.entries
    }

    pub fn resources(&self) -> impl Iterator<Item = &ResourceDescriptor> {
        self.entries.iter().filter_map(|entry| match entry {
            EndpointDescriptor::Resource(resource) => Some(resource),
            _ => None,
        })
    }

    pub fn prompts(&self) -> impl Iterator<Item = &PromptDescriptor> {
        self.entries.iter().filter_map(|entry| match entry {
            EndpointDescriptor::Prompt(prompt) => Some(prompt),
            _ => None,
        })
    }

    pub fn tools(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.entries.iter().filter_map(|entry| match entry {
            EndpointDescriptor::Tool(tool) => Some(tool),
            _ => None,
        })
    }

    pub fn count(&self, kind: EndpointKind) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.kind() == kind)
            .count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn not_found(identifier: &str, kind: EndpointKind) -> EndpointNotFound {
    EndpointNotFound {
        identifier: identifier.to_string(),
        expected: ExpectedKind::Kind(kind),
    }
}
