use std::{fs, time::Duration};

use anyhow::Result;
use rmcp::{
    model::{ClientInfo, ReadResourceRequestParam, ResourceContents},
    serve_client,
};
use tokio::time::timeout;

use crate::common::{fixture, spawn_server_process};

#[tokio::test]
async fn inspector_style_spawn_lists_endpoints() -> Result<()> {
    let (mut child, transport, stderr_task) = spawn_server_process().await?;

    let client = serve_client(ClientInfo::default(), transport).await?;
    let peer_info = client.peer_info().expect("server info after handshake");
    assert_eq!(peer_info.server_info.name, "fastmcp-hackathon");

    let resources = client.list_resources(None).await?;
    assert_eq!(resources.resources.len(), 1);
    let listed = &resources.resources[0].raw;
    assert_eq!(listed.uri, "resource://hackathon-overview");

    let tools = client.list_tools(None).await?;
    assert!(
        tools
            .tools
            .iter()
            .any(|tool| tool.name.as_ref() == "get_hackathon_overview"),
        "list_tools should include get_hackathon_overview: {:?}",
        tools.tools
    );

    let prompts = client.list_prompts(None).await?;
    let mut prompt_names = prompts.prompts.iter().map(|prompt| prompt.name.as_str());
    assert!(prompt_names.any(|name| name == "fastmcp-python-starter"));

    client.cancel().await?;
    let status = timeout(Duration::from_secs(5), child.wait()).await??;
    assert!(
        status.success(),
        "server should exit cleanly but exit status was {status:?}"
    );
    if let Some(handle) = stderr_task {
        let _ = handle.await;
    }
    Ok(())
}

#[tokio::test]
async fn spawned_server_serves_configured_content_dir() -> Result<()> {
    let (mut child, transport, stderr_task) = spawn_server_process().await?;
    let expected = fs::read_to_string(fixture(
        "tests/fixtures/content/resources/hackathon_overview.md",
    ))?;

    let client = serve_client(ClientInfo::default(), transport).await?;
    let read = client
        .read_resource(ReadResourceRequestParam {
            uri: "resource://hackathon-overview".into(),
        })
        .await?;
    match &read.contents[0] {
        ResourceContents::TextResourceContents { text, .. } => assert_eq!(text, &expected),
        other => panic!("Unexpected contents: {other:?}"),
    }

    client.cancel().await?;
    let _ = timeout(Duration::from_secs(5), child.wait()).await??;
    if let Some(handle) = stderr_task {
        let _ = handle.await;
    }
    Ok(())
}
