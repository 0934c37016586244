//! MCP (Model Context Protocol) server implementation
//!
//! Stdio-based MCP server built on the official `rmcp` SDK, exposing the
//! escrow tool dispatcher to AI clients.

mod server;

pub use server::{LinkdEscrowService, tool_listing};
