//! Library crate root for the hackathon MCP server.

#[path = "lib/mod.rs"]
pub mod lib_mod;
pub use lib_mod as lib;
pub mod app;
pub mod cli;
pub mod content;
pub mod endpoints;
pub mod server;
