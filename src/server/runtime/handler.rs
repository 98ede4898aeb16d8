use std::sync::Arc;

use rmcp::{
    model::{
        Annotated, CallToolRequestParam, CallToolResult, Content, ErrorData, GetPromptRequestParam,
        GetPromptResult, Implementation, ListPromptsResult, ListResourcesResult, ListToolsResult,
        PaginatedRequestParam, Prompt, PromptMessage, PromptMessageRole, RawResource,
        ReadResourceRequestParam, ReadResourceResult, Resource, ResourceContents,
        ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
    RoleServer, ServerHandler,
};
use serde_json::json;
use tracing::{debug, warn};

use crate::{
    app::Application,
    endpoints::{
        EndpointNotFound, MessageRole, PromptDescriptor, ResourceDescriptor, ToolDescriptor,
    },
    lib::errors::{
        ToolErrorDescriptor, PROMPT_NOT_FOUND_ERROR, RESOURCE_NOT_FOUND_ERROR, TOOL_NOT_FOUND_ERROR,
    },
};

/// MCP handler serving the endpoints of one [`Application`].
///
/// Cloning is cheap; every connection shares the same immutable application.
#[derive(Clone)]
pub struct HackathonServer {
    app: Arc<Application>,
    instructions: Arc<String>,
}

impl HackathonServer {
    pub fn new(app: Arc<Application>, instructions: String) -> Self {
        Self {
            app,
            instructions: Arc::new(instructions),
        }
    }
}

impl ServerHandler for HackathonServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder()
                .enable_prompts()
                .enable_resources()
                .enable_tools()
                .build(),
            server_info: Implementation {
                name: self.app.name().to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some((*self.instructions).clone()),
            ..ServerInfo::default()
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, ErrorData> {
        let resources: Vec<Resource> = self.app.registry().resources().map(to_resource).collect();
        debug!(
            target: "hackathon_mcp::runtime",
            count = resources.len(),
            "Listed resources"
        );
        Ok(ListResourcesResult::with_all_items(resources))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, ErrorData> {
        debug!(target: "hackathon_mcp::runtime", uri = %request.uri, "Reading resource");
        let resource = self
            .app
            .registry()
            .resolve_resource(&request.uri)
            .map_err(|miss| not_found(&RESOURCE_NOT_FOUND_ERROR, "uri", miss))?;
        Ok(read_result(resource))
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, ErrorData> {
        let prompts: Vec<Prompt> = self.app.registry().prompts().map(to_prompt).collect();
        debug!(
            target: "hackathon_mcp::runtime",
            count = prompts.len(),
            "Listed prompts"
        );
        Ok(ListPromptsResult::with_all_items(prompts))
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, ErrorData> {
        debug!(target: "hackathon_mcp::runtime", name = %request.name, "Rendering prompt");
        let prompt = self
            .app
            .registry()
            .resolve_prompt(&request.name)
            .map_err(|miss| not_found(&PROMPT_NOT_FOUND_ERROR, "name", miss))?;
        Ok(prompt_result(prompt))
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        let tools: Vec<Tool> = self.app.registry().tools().map(to_tool).collect();
        debug!(
            target: "hackathon_mcp::runtime",
            count = tools.len(),
            "Listed tools"
        );
        Ok(ListToolsResult::with_all_items(tools))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        debug!(target: "hackathon_mcp::runtime", name = %request.name, "Calling tool");
        let tool = self
            .app
            .registry()
            .resolve_tool(&request.name)
            .map_err(|miss| not_found(&TOOL_NOT_FOUND_ERROR, "name", miss))?;
        let blob = tool.invoke(request.arguments.as_ref());
        Ok(CallToolResult::success(vec![Content::text(blob.text())]))
    }
}

fn not_found(descriptor: &ToolErrorDescriptor, field: &str, miss: EndpointNotFound) -> ErrorData {
    warn!(
        target: "hackathon_mcp::runtime",
        identifier = %miss.identifier,
        expected = %miss.expected,
        "Endpoint lookup missed"
    );
    let fallback = ErrorData::invalid_params(miss.to_string(), None);
    descriptor
        .builder()
        .retryable(false)
        .with_context_field(field, json!(miss.identifier))
        .build()
        .unwrap_or(fallback)
}

fn to_resource(resource: &ResourceDescriptor) -> Resource {
    let mut raw = RawResource::new(resource.uri.clone(), resource.name.clone());
    raw.description = Some(resource.description.clone());
    raw.mime_type = Some(resource.content_type().as_str().to_string());
    raw.size = u32::try_from(resource.read().len()).ok();
    Annotated::new(raw, None)
}

fn read_result(resource: &ResourceDescriptor) -> ReadResourceResult {
    let blob = resource.read();
    let mut contents = ResourceContents::text(blob.text(), resource.uri.clone());
    if let ResourceContents::TextResourceContents { mime_type, .. } = &mut contents {
        *mime_type = Some(blob.content_type().as_str().to_string());
    }
    ReadResourceResult {
        contents: vec![contents],
    }
}

fn to_prompt(prompt: &PromptDescriptor) -> Prompt {
    Prompt::new(prompt.name.clone(), Some(prompt.description.clone()), None)
}

fn prompt_result(prompt: &PromptDescriptor) -> GetPromptResult {
    GetPromptResult {
        description: Some(prompt.description.clone()),
        messages: prompt
            .render()
            .into_iter()
            .map(|message| {
                PromptMessage::new_text(to_protocol_role(message.role), message.text)
            })
            .collect(),
    }
}

fn to_protocol_role(role: MessageRole) -> PromptMessageRole {
    match role {
        MessageRole::Assistant => PromptMessageRole::Assistant,
        MessageRole::User => PromptMessageRole::User,
    }
}

fn to_tool(tool: &ToolDescriptor) -> Tool {
    Tool::new(
        tool.name.clone(),
        tool.description.clone(),
        tool.input_schema(),
    )
}
