//! Endpoint descriptors (resources, prompts, tools) and the registry that addresses them.

pub mod registry;

use std::{fmt, sync::Arc};

use schemars::JsonSchema;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::{
    content::{ContentBlob, ContentType},
    lib::errors::RegistryError,
};

pub use registry::EndpointRegistry;

/// JSON object used for tool arguments and input schemas.
pub type JsonObject = Map<String, Value>;

/// Endpoint kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointKind {
    Resource,
    Prompt,
    Tool,
}

impl EndpointKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            EndpointKind::Resource => "resource",
            EndpointKind::Prompt => "prompt",
            EndpointKind::Tool => "tool",
        }
    }
}

impl fmt::Display for EndpointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lookup miss. Returned as a value; the protocol layer decides how to surface it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("No {expected} is registered under `{identifier}`")]
pub struct EndpointNotFound {
    pub identifier: String,
    pub expected: ExpectedKind,
}

/// What the caller was looking for when a lookup missed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedKind {
    Any,
    Kind(EndpointKind),
}

impl fmt::Display for ExpectedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectedKind::Any => f.write_str("endpoint"),
            ExpectedKind::Kind(kind) => kind.fmt(f),
        }
    }
}

/// A registered endpoint.
#[derive(Debug, Clone)]
pub enum EndpointDescriptor {
    Resource(ResourceDescriptor),
    Prompt(PromptDescriptor),
    Tool(ToolDescriptor),
}

impl EndpointDescriptor {
    pub fn identifier(&self) -> &str {
        match self {
            EndpointDescriptor::Resource(resource) => &resource.uri,
            EndpointDescriptor::Prompt(prompt) => &prompt.name,
            EndpointDescriptor::Tool(tool) => &tool.name,
        }
    }

    pub fn kind(&self) -> EndpointKind {
        match self {
            EndpointDescriptor::Resource(_) => EndpointKind::Resource,
            EndpointDescriptor::Prompt(_) => EndpointKind::Prompt,
            EndpointDescriptor::Tool(_) => EndpointKind::Tool,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            EndpointDescriptor::Resource(resource) => &resource.description,
            EndpointDescriptor::Prompt(prompt) => &prompt.description,
            EndpointDescriptor::Tool(tool) => &tool.description,
        }
    }

    /// Catalog row used for introspection output.
    pub fn summary(&self) -> EndpointSummary<'_> {
        let (name, content_type) = match self {
            EndpointDescriptor::Resource(resource) => {
                (Some(resource.name.as_str()), Some(resource.content_type()))
            }
            EndpointDescriptor::Prompt(_) | EndpointDescriptor::Tool(_) => (None, None),
        };
        let parameters = match self {
            EndpointDescriptor::Tool(tool) => Some(tool.parameter_names()),
            EndpointDescriptor::Resource(_) | EndpointDescriptor::Prompt(_) => None,
        };
        EndpointSummary {
            kind: self.kind(),
            identifier: self.identifier(),
            name,
            description: self.description(),
            content_type,
            parameters,
        }
    }
}

impl From<ResourceDescriptor> for EndpointDescriptor {
    fn from(value: ResourceDescriptor) -> Self {
        Self::Resource(value)
    }
}

impl From<PromptDescriptor> for EndpointDescriptor {
    fn from(value: PromptDescriptor) -> Self {
        Self::Prompt(value)
    }
}

impl From<ToolDescriptor> for EndpointDescriptor {
    fn from(value: ToolDescriptor) -> Self {
        Self::Tool(value)
    }
}

/// Serializable view of one registry entry.
#[derive(Debug, Serialize)]
pub struct EndpointSummary<'a> {
    pub kind: EndpointKind,
    pub identifier: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    pub description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,
    /// Declared tool parameters (tools only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<&'a str>>,
}

/// Read-only, parameterless document.
#[derive(Debug, Clone)]
pub struct ResourceDescriptor {
    pub uri: String,
    pub name: String,
    pub description: String,
    content: Arc<ContentBlob>,
}

impl ResourceDescriptor {
    pub fn new(
        uri: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        content: Arc<ContentBlob>,
    ) -> Self {
        Self {
            uri: uri.into(),
            name: name.into(),
            description: description.into(),
            content,
        }
    }

    pub fn content_type(&self) -> ContentType {
        self.content.content_type()
    }

    /// Always the loaded blob.
    pub fn read(&self) -> &ContentBlob {
        &self.content
    }
}

/// Role of a prompt message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    Assistant,
    User,
}

/// Text of a prompt message.
#[derive(Debug, Clone)]
pub enum MessageText {
    Literal(String),
    Content(Arc<ContentBlob>),
}

impl MessageText {
    pub fn as_str(&self) -> &str {
        match self {
            MessageText::Literal(text) => text,
            MessageText::Content(blob) => blob.text(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PromptMessage {
    pub role: MessageRole,
    pub text: MessageText,
}

impl PromptMessage {
    pub fn literal(role: MessageRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: MessageText::Literal(text.into()),
        }
    }

    pub fn content(role: MessageRole, blob: Arc<ContentBlob>) -> Self {
        Self {
            role,
            text: MessageText::Content(blob),
        }
    }
}

/// A rendered prompt message borrowing the registered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderedMessage<'a> {
    pub role: MessageRole,
    pub text: &'a str,
}

/// Fixed sequence of role-tagged messages.
#[derive(Debug, Clone)]
pub struct PromptDescriptor {
    pub name: String,
    pub description: String,
    messages: Vec<PromptMessage>,
}

impl PromptDescriptor {
    /// At least one message must reference loaded content.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        messages: Vec<PromptMessage>,
    ) -> Result<Self, RegistryError> {
        let name = name.into();
        let references_content = messages
            .iter()
            .any(|message| matches!(message.text, MessageText::Content(_)));
        if !references_content {
            return Err(RegistryError::PromptWithoutContent { identifier: name });
        }
        Ok(Self {
            name,
            description: description.into(),
            messages,
        })
    }

    pub fn render(&self) -> Vec<RenderedMessage<'_>> {
        self.messages
            .iter()
            .map(|message| RenderedMessage {
                role: message.role,
                text: message.text.as_str(),
            })
            .collect()
    }
}

/// Callable endpoint that returns its blob regardless of arguments.
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    input_schema: Arc<JsonObject>,
    content: Arc<ContentBlob>,
}

impl ToolDescriptor {
    /// Declare the advertised parameters with a `JsonSchema` type.
    pub fn with_parameters<P: JsonSchema>(
        name: impl Into<String>,
        description: impl Into<String>,
        content: Arc<ContentBlob>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: Arc::new(schema_object_for::<P>()),
            content,
        }
    }

    pub fn input_schema(&self) -> Arc<JsonObject> {
        Arc::clone(&self.input_schema)
    }

    /// Names of the declared parameters, in schema order.
    pub fn parameter_names(&self) -> Vec<&str> {
        self.input_schema
            .get("properties")
            .and_then(Value::as_object)
            .map(|props| props.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// `_args` exists for protocol compatibility only and has no effect on the result.
    pub fn invoke(&self, _args: Option<&JsonObject>) -> &ContentBlob {
        &self.content
    }
}

fn schema_object_for<P: JsonSchema>() -> JsonObject {
    match serde_json::to_value(schemars::schema_for!(P)) {
        Ok(Value::Object(object)) => object,
        _ => {
            let mut object = JsonObject::new();
            object.insert("type".into(), Value::String("object".into()));
            object
        }
    }
}
