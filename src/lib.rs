//! # xano-mcp
//!
//! MCP (Model Context Protocol) server for the Xano metadata API.
//!
//! This crate provides an MCP server that exposes Xano's management operations
//! as tools for AI agents. It implements the MCP protocol over stdin/stdout
//! using JSON-RPC 2.0; every tool maps to a single bearer-authenticated HTTPS
//! request against the Meta API.
//!
//! ## Features
//!
//! - **44 tools** covering instances, workspaces, tables, schema fields,
//!   indexes, records (including bulk operations), files, API groups, and
//!   workspace export
//! - **Instance resolution**: a default instance can be configured so tool
//!   calls may omit `instance_name`
//! - **Uniform error surface**: upstream failures come back as error-flagged
//!   tool results carrying the HTTP status, never as transport faults
//!
//! ## Usage
//!
//! The server is typically run as an executable and configured in AI tools like Claude Desktop:
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "xano": {
//!       "command": "/path/to/xano-mcp",
//!       "env": { "XANO_API_TOKEN": "your-token" }
//!     }
//!   }
//! }
//! ```
//!
//! ## Library Usage
//!
//! For testing or embedding, you can use the library API:
//!
//! ```no_run
//! use xano_mcp::{McpServer, XanoConfig, XanoSession};
//!
//! let config = XanoConfig::new("xano-token").with_default_instance("xnwv-v1z6-dvnr");
//! let session = XanoSession::new(config).expect("Failed to create session");
//! let mut server = McpServer::new(session);
//!
//! // Run the server (reads from stdin, writes to stdout)
//! // server.run().await.expect("Server error");
//! ```

#![warn(missing_docs)]

mod args;
mod error;
mod server;
mod session;
mod tools;

pub use error::{McpError, Result};
pub use server::{JsonRpcRequest, JsonRpcResponse, McpServer};
pub use session::{XanoConfig, XanoSession};
pub use tools::{ToolDef, ToolRegistry};
