//! MCP Protocol Models and Constants
//!
//! This module contains all data structures and constants related to the
//! Model Context Protocol (MCP) specification, plus the typed tool inputs.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

// =============================================================================
// MCP Constants
// =============================================================================

/// Tool: keyword search
pub const SEARCH_TOOL_NAME: &str = "searchAmazonProducts";
/// Tool: single product lookup
pub const PRODUCT_INFO_TOOL_NAME: &str = "getProductInfo";
/// Tool: product reviews
pub const PRODUCT_REVIEW_TOOL_NAME: &str = "getProductReview";
/// Server identifier
pub const SERVER_NAME: &str = "amz-mcp";
/// Revision offered when the client asks for one we do not know
pub const PROTOCOL_VERSION: &str = "2025-06-18";
/// Protocol revisions this server can speak, newest first
pub const SUPPORTED_PROTOCOL_VERSIONS: &[&str] = &[PROTOCOL_VERSION, "2025-03-26", "2024-11-05"];

/// Default `maxResults` for searches
pub const DEFAULT_MAX_RESULTS: i64 = 10;

// =============================================================================
// MCP Protocol Models
// =============================================================================

/// Standard JSON-RPC 2.0 Request envelope
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    /// Protocol version (should be "2.0")
    #[allow(dead_code)]
    pub jsonrpc: Option<String>,

    /// Method name to invoke
    pub method: String,

    /// Parameters for the method
    pub params: Option<Value>,

    /// Request identifier; absent for notifications. An explicit `null` is
    /// kept as `Some(Value::Null)` and answered like any other id.
    #[serde(default, deserialize_with = "present")]
    pub id: Option<Value>,
}

/// Marks a field as present even when its value is `null`.
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

impl JsonRpcRequest {
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

// =============================================================================
// Tool Inputs
// =============================================================================

fn default_max_results() -> i64 {
    DEFAULT_MAX_RESULTS
}

/// Input for `searchAmazonProducts`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchInput {
    pub keywords: String,

    pub category: Option<String>,

    /// Clamped to 1..=50 by [`SearchInput::max_results`]
    #[serde(default = "default_max_results")]
    pub max_results: i64,
}

impl SearchInput {
    pub fn max_results(&self) -> u32 {
        // Bounded to 1..=50, so the cast cannot truncate.
        self.max_results.clamp(1, 50) as u32
    }
}

/// Input for `getProductInfo` and `getProductReview`
#[derive(Debug, Deserialize)]
pub struct ProductIdInput {
    /// ASIN
    pub id: String,
}
