use crate::app::Application;

/// Build the `ServerInfo.instructions` string shown to MCP clients.
pub fn build_instructions(app: &Application) -> String {
    app.description().trim().to_string()
}
