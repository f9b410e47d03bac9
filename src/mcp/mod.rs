//! Model Context Protocol (MCP) Module
//!
//! This module contains the MCP surface of the server, including:
//! - Protocol models (JsonRpcRequest, constants, tool inputs)
//! - RPC helpers (success/error responses, tool result envelopes)
//! - The tool registry (schemas and handlers)
//! - MCP handlers (initialize, tools/list, tools/call, etc.)

pub mod handlers;
pub mod helpers;
pub mod models;
pub mod tools;

// Re-export commonly used types and functions
pub use handlers::routes;
pub use tools::{ToolError, ToolRegistry};
