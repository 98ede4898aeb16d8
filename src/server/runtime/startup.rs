use std::{process::ExitCode, sync::Arc};

use anyhow::{Context, Error};
use rmcp::{model::ErrorData, ServiceExt};
use serde_json::json;
use tokio::net::TcpListener;

use crate::{
    app::Application,
    cli::{LaunchProfile, TransportMode},
    endpoints::EndpointKind,
    lib::{
        errors::{
            ApplicationError, ToolErrorDescriptor, CONTENT_LOAD_FAILED_ERROR,
            ENDPOINT_REGISTRATION_FAILED_ERROR,
        },
        telemetry::{emit_runtime_mode, RuntimeModeTelemetry},
    },
    server::{
        config::ServerConfig,
        runtime::{build_instructions, HackathonServer},
    },
};

/// Exit code when bundled or on-disk content cannot be loaded.
pub const CONTENT_LOAD_EXIT_CODE: u8 = 65;
/// Exit code when the endpoint catalog cannot be registered.
pub const REGISTRATION_EXIT_CODE: u8 = 70;

/// Bundles a runtime error message with an exit code and optional structured error data.
#[derive(Debug)]
pub struct RuntimeExit {
    message: String,
    exit_code: ExitCode,
    error_data: Option<ErrorData>,
}

impl RuntimeExit {
    pub fn structured(error: ErrorData, exit_code: ExitCode) -> Self {
        Self {
            message: error.message.to_string(),
            exit_code,
            error_data: Some(error),
        }
    }

    pub fn from_error(err: impl Into<Error>) -> Self {
        let err = err.into();
        Self {
            message: format!("{err:?}"),
            exit_code: ExitCode::FAILURE,
            error_data: None,
        }
    }

    /// Map an application construction failure to its exit code and structured payload.
    pub fn from_application_error(err: ApplicationError) -> Self {
        let (descriptor, code) = match &err {
            ApplicationError::Content(_) => (&CONTENT_LOAD_FAILED_ERROR, CONTENT_LOAD_EXIT_CODE),
            ApplicationError::Registry(_) | ApplicationError::MissingContent { .. } => (
                &ENDPOINT_REGISTRATION_FAILED_ERROR,
                REGISTRATION_EXIT_CODE,
            ),
        };
        tracing::error!(
            target: "hackathon_mcp::runtime",
            code = descriptor.code,
            reason = %err,
            "Failed to build application"
        );
        match startup_error_data(descriptor, code, &err) {
            Some(data) => Self::structured(data, ExitCode::from(code)),
            None => Self {
                message: err.to_string(),
                exit_code: ExitCode::from(code),
                error_data: None,
            },
        }
    }

    pub fn report(self) -> ExitCode {
        if let Some(data) = self.error_data {
            if let Ok(serialized) = serde_json::to_string(&data) {
                eprintln!("{serialized}");
            } else {
                eprintln!("{}", data.message);
            }
        } else {
            eprintln!("{}", self.message);
        }
        self.exit_code
    }

    pub fn exit_code(&self) -> ExitCode {
        self.exit_code
    }

    pub fn error_data(&self) -> Option<&ErrorData> {
        self.error_data.as_ref()
    }
}

fn startup_error_data(
    descriptor: &ToolErrorDescriptor,
    code: u8,
    err: &ApplicationError,
) -> Option<ErrorData> {
    descriptor
        .builder()
        .retryable(false)
        .details(json!({ "reason": err.to_string() }))
        .with_exit_code_value(code)
        .build()
        .ok()
}

/// Start the MCP server and select stdio/TCP based on the launch profile.
pub async fn run_server(
    profile: LaunchProfile,
    config: ServerConfig,
    app: Application,
) -> Result<(), RuntimeExit> {
    let instructions = build_instructions(&app);
    let content_source = app
        .content()
        .base_dir()
        .map(|dir| dir.display().to_string())
        .unwrap_or_else(|| "<embedded>".to_string());
    let config_path = config
        .source_path
        .as_ref()
        .map(|path| path.display().to_string());
    let (host, port) = match profile.transport {
        TransportMode::Stdio => (None, None),
        TransportMode::Tcp => (Some(config.server.host.as_str()), Some(config.server.port)),
    };
    let registry = app.registry();

    emit_runtime_mode(&RuntimeModeTelemetry {
        transport: profile.transport.as_str(),
        host,
        port,
        config_path: config_path.as_deref(),
        content_source: &content_source,
        resources: registry.count(EndpointKind::Resource),
        prompts: registry.count(EndpointKind::Prompt),
        tools: registry.count(EndpointKind::Tool),
        launch_args: &profile.launch_args,
    });

    let server = HackathonServer::new(Arc::new(app), instructions);
    match profile.transport {
        TransportMode::Stdio => run_stdio(server).await,
        TransportMode::Tcp => run_tcp(server, &config).await,
    }
}

async fn run_stdio(server: HackathonServer) -> Result<(), RuntimeExit> {
    let running = server
        .serve(rmcp::transport::stdio())
        .await
        .map_err(RuntimeExit::from_error)?;
    running.waiting().await.map_err(RuntimeExit::from_error)?;
    Ok(())
}

async fn run_tcp(server: HackathonServer, config: &ServerConfig) -> Result<(), RuntimeExit> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind TCP port {addr}"))
        .map_err(RuntimeExit::from_error)?;
    tracing::info!(
        target: "hackathon_mcp::runtime",
        transport = "tcp",
        bind_addr = %addr,
        "Started listening in TCP mode"
    );

    loop {
        let (stream, peer) = listener
            .accept()
            .await
            .with_context(|| format!("failed to accept TCP connection ({addr})"))
            .map_err(RuntimeExit::from_error)?;
        tracing::info!(
            target: "hackathon_mcp::runtime",
            peer = %peer,
            "Accepted connection from MCP client"
        );
        let connection = server.clone();
        tokio::spawn(async move {
            let outcome = match connection.serve(stream).await {
                Ok(running) => running.waiting().await.map(|_| ()).map_err(Error::from),
                Err(err) => Err(Error::from(err)),
            };
            match outcome {
                Ok(()) => tracing::info!(
                    target: "hackathon_mcp::runtime",
                    peer = %peer,
                    "MCP client disconnected"
                ),
                Err(err) => tracing::warn!(
                    target: "hackathon_mcp::runtime",
                    peer = %peer,
                    reason = %err,
                    "MCP session ended with an error"
                ),
            }
        });
    }
}
