//! Amazon Catalog MCP Server Library
//!
//! This library exposes Amazon product search, product lookup and review
//! lookup as MCP tools over stateless Streamable HTTP. Without Selling
//! Partner API credentials it serves deterministic mock data.

// Domain modules
pub mod catalog;
pub mod mcp;
pub mod spapi;

// Infrastructure
pub mod config;
pub mod router;
pub mod state;
