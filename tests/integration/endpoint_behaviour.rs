use std::{fs, path::PathBuf};

use anyhow::Result;
use rmcp::{
    model::{
        CallToolRequestParam, ClientInfo, ErrorCode, GetPromptRequestParam, PromptMessageContent,
        PromptMessageRole, ReadResourceRequestParam, ResourceContents,
    },
    serve_client,
    service::{RoleClient, RunningService, ServiceError},
    ServiceExt,
};
use serde_json::json;
use tokio::task::JoinHandle;

use crate::common::{build_server, fixture};

type ServerTask = JoinHandle<Result<()>>;

async fn connect(
    content_dir: Option<PathBuf>,
) -> Result<(RunningService<RoleClient, ClientInfo>, ServerTask)> {
    let server = build_server(content_dir)?;
    let (server_transport, client_transport) = tokio::io::duplex(4096);
    let server_task = tokio::spawn(async move {
        server.serve(server_transport).await?.waiting().await?;
        Result::<_, anyhow::Error>::Ok(())
    });
    let client = serve_client(ClientInfo::default(), client_transport).await?;
    Ok((client, server_task))
}

fn fixture_content_dir() -> PathBuf {
    PathBuf::from(fixture("tests/fixtures/content"))
}

fn tool_text(result: &rmcp::model::CallToolResult) -> String {
    result
        .content
        .iter()
        .filter_map(|content| content.as_text().map(|text| text.text.clone()))
        .collect()
}

#[tokio::test]
async fn read_resource_returns_file_text_verbatim() -> Result<()> {
    let (client, server_task) = connect(Some(fixture_content_dir())).await?;

    let resources = client.list_resources(None).await?;
    assert_eq!(resources.resources.len(), 1);
    let listed = &resources.resources[0].raw;
    assert_eq!(listed.name, "Hackathon Overview");
    assert_eq!(listed.mime_type.as_deref(), Some("text/markdown"));

    let read = client
        .read_resource(ReadResourceRequestParam {
            uri: "resource://hackathon-overview".into(),
        })
        .await?;
    assert_eq!(read.contents.len(), 1);
    match &read.contents[0] {
        ResourceContents::TextResourceContents {
            uri,
            mime_type,
            text,
            ..
        } => {
            assert_eq!(uri, "resource://hackathon-overview");
            assert_eq!(mime_type.as_deref(), Some("text/markdown"));
            assert_eq!(text, "## Overview\n...");
        }
        other => panic!("Unexpected contents: {other:?}"),
    }

    let _ = client.cancel().await;
    let _ = server_task.await;
    Ok(())
}

#[tokio::test]
async fn prompt_renders_preamble_then_template() -> Result<()> {
    let (client, server_task) = connect(Some(fixture_content_dir())).await?;
    let template = fs::read_to_string(fixture(
        "tests/fixtures/content/prompts/fastmcp_python_starter.md",
    ))?;

    let prompt = client
        .get_prompt(GetPromptRequestParam {
            name: "fastmcp-python-starter".into(),
            arguments: None,
        })
        .await?;
    assert_eq!(
        prompt.description.as_deref(),
        Some("Prompt template for building FastMCP servers with Python")
    );
    assert_eq!(prompt.messages.len(), 2);
    assert_eq!(prompt.messages[0].role, PromptMessageRole::Assistant);
    assert_eq!(prompt.messages[1].role, PromptMessageRole::User);
    match &prompt.messages[1].content {
        PromptMessageContent::Text { text } => assert_eq!(text, &template),
        other => panic!("Unexpected content: {other:?}"),
    }

    let _ = client.cancel().await;
    let _ = server_task.await;
    Ok(())
}

#[tokio::test]
async fn tool_ignores_its_arguments() -> Result<()> {
    let (client, server_task) = connect(None).await?;

    let tools = client.list_tools(None).await?;
    let tool = tools
        .tools
        .iter()
        .find(|tool| tool.name.as_ref() == "get_hackathon_overview")
        .expect("tool is listed");
    let properties = tool
        .input_schema
        .get("properties")
        .and_then(|value| value.as_object())
        .expect("schema properties");
    assert!(properties.contains_key("query"));

    let read = client
        .read_resource(ReadResourceRequestParam {
            uri: "resource://hackathon-overview".into(),
        })
        .await?;
    let overview = match &read.contents[0] {
        ResourceContents::TextResourceContents { text, .. } => text.clone(),
        other => panic!("Unexpected contents: {other:?}"),
    };

    let argument_sets = [
        None,
        Some(json!({})),
        Some(json!({ "query": "schedule" })),
        Some(json!({ "query": 42, "unexpected": [1, 2, 3] })),
    ];
    for arguments in argument_sets {
        let result = client
            .call_tool(CallToolRequestParam {
                name: "get_hackathon_overview".into(),
                arguments: arguments.and_then(|value| value.as_object().cloned()),
            })
            .await?;
        assert_ne!(result.is_error, Some(true));
        assert_eq!(tool_text(&result), overview);
    }

    let _ = client.cancel().await;
    let _ = server_task.await;
    Ok(())
}

#[tokio::test]
async fn unknown_identifiers_produce_mcp_errors() -> Result<()> {
    let (client, server_task) = connect(None).await?;

    let resource_error = client
        .read_resource(ReadResourceRequestParam {
            uri: "resource://unknown".into(),
        })
        .await
        .expect_err("unknown resource must fail");
    match resource_error {
        ServiceError::McpError(error) => {
            assert_eq!(error.code, ErrorCode::RESOURCE_NOT_FOUND);
            let data = error.data.expect("structured data");
            assert_eq!(data["code"], "RESOURCE_NOT_FOUND");
            assert_eq!(data["uri"], "resource://unknown");
        }
        other => anyhow::bail!("unexpected error: {other:?}"),
    }

    let prompt_error = client
        .get_prompt(GetPromptRequestParam {
            name: "missing-prompt".into(),
            arguments: None,
        })
        .await
        .expect_err("unknown prompt must fail");
    match prompt_error {
        ServiceError::McpError(error) => {
            assert_eq!(error.code, ErrorCode::INVALID_PARAMS);
            let data = error.data.expect("structured data");
            assert_eq!(data["code"], "PROMPT_NOT_FOUND");
        }
        other => anyhow::bail!("unexpected error: {other:?}"),
    }

    let tool_error = client
        .call_tool(CallToolRequestParam {
            name: "missing_tool".into(),
            arguments: None,
        })
        .await
        .expect_err("unknown tool must fail");
    match tool_error {
        ServiceError::McpError(error) => {
            assert_eq!(error.code, ErrorCode::INVALID_PARAMS);
            let data = error.data.expect("structured data");
            assert_eq!(data["code"], "TOOL_NOT_FOUND");
        }
        other => anyhow::bail!("unexpected error: {other:?}"),
    }

    let _ = client.cancel().await;
    let _ = server_task.await;
    Ok(())
}

#[tokio::test]
async fn server_info_carries_application_metadata() -> Result<()> {
    let (client, server_task) = connect(None).await?;

    let info = client.peer_info().expect("server info after handshake");
    assert_eq!(info.server_info.name, "fastmcp-hackathon");
    let instructions = info.instructions.as_deref().unwrap_or_default();
    assert!(instructions.contains("hackathon overview"));
    assert!(info.capabilities.resources.is_some());
    assert!(info.capabilities.prompts.is_some());
    assert!(info.capabilities.tools.is_some());

    let _ = client.cancel().await;
    let _ = server_task.await;
    Ok(())
}
