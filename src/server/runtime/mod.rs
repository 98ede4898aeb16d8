//! MCP server startup and protocol handling.
mod handler;
mod server_info;
mod startup;

pub use handler::HackathonServer;
pub use server_info::build_instructions;
pub use startup::{run_server, RuntimeExit, CONTENT_LOAD_EXIT_CODE, REGISTRATION_EXIT_CODE};
