//! Tool registry
//!
//! The three catalog tools as a static table of name, schemas and handler.
//! `tools/list` renders the table; `tools/call` looks a tool up by name and
//! runs its handler against the shared [`CatalogAdapter`].

use super::{
    helpers::{tool_error, tool_success, tool_success_with_text},
    models::*,
};
use crate::catalog::CatalogAdapter;
use futures_util::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::warn;

/// Failures that never reach the adapter.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

/// Runs a tool. Adapter failures are folded into the returned value as an
/// `isError` result; only argument problems surface as [`ToolError`].
pub type ToolHandler = for<'a> fn(&'a CatalogAdapter, Value) -> BoxFuture<'a, Result<Value, ToolError>>;

pub struct ToolDefinition {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub input_schema: fn() -> Value,
    pub output_schema: fn() -> Value,
    pub handler: ToolHandler,
}

impl ToolDefinition {
    /// The `tools/list` entry for this tool.
    pub fn describe(&self) -> Value {
        json!({
            "name": self.name,
            "title": self.title,
            "description": self.description,
            "inputSchema": (self.input_schema)(),
            "outputSchema": (self.output_schema)(),
        })
    }
}

pub struct ToolRegistry {
    tools: Vec<ToolDefinition>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::catalog()
    }
}

impl ToolRegistry {
    /// The catalog tools, in listing order.
    pub fn catalog() -> Self {
        Self {
            tools: vec![
                ToolDefinition {
                    name: SEARCH_TOOL_NAME,
                    title: "Search Amazon Products",
                    description: "Search for Amazon products by keywords and category",
                    input_schema: search_input_schema,
                    output_schema: search_output_schema,
                    handler: search_amazon_products,
                },
                ToolDefinition {
                    name: PRODUCT_INFO_TOOL_NAME,
                    title: "Get Product Info",
                    description: "Get product details by product ID",
                    input_schema: product_id_schema,
                    output_schema: product_schema,
                    handler: get_product_info,
                },
                ToolDefinition {
                    name: PRODUCT_REVIEW_TOOL_NAME,
                    title: "Get Product Review",
                    description: "Get product reviews by product ID",
                    input_schema: product_id_schema,
                    output_schema: review_set_schema,
                    handler: get_product_review,
                },
            ],
        }
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.iter().find(|t| t.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.iter()
    }

    /// `tools/list` result body.
    pub fn list(&self) -> Value {
        json!({ "tools": self.iter().map(ToolDefinition::describe).collect::<Vec<_>>() })
    }

    pub async fn call(
        &self,
        adapter: &CatalogAdapter,
        name: &str,
        args: Value,
    ) -> Result<Value, ToolError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        (tool.handler)(adapter, args).await
    }
}

fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, ToolError> {
    // A call without arguments is treated as an empty object so the error
    // names the missing field.
    let args = if args.is_null() { json!({}) } else { args };
    serde_json::from_value(args).map_err(|e| ToolError::InvalidArguments(e.to_string()))
}

fn to_value<T: serde::Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

// =============================================================================
// Handlers
// =============================================================================

fn search_amazon_products(
    adapter: &CatalogAdapter,
    args: Value,
) -> BoxFuture<'_, Result<Value, ToolError>> {
    Box::pin(async move {
        let input: SearchInput = parse_args(args)?;
        let result = adapter
            .search_products(&input.keywords, input.category.as_deref(), input.max_results())
            .await;

        Ok(match result {
            Ok(products) => {
                let products = to_value(&products);
                let structured = json!({ "products": &products });
                tool_success_with_text(&products, structured)
            }
            Err(e) => {
                warn!(tool = SEARCH_TOOL_NAME, error = %e, "Tool failed");
                tool_error(e)
            }
        })
    })
}

fn get_product_info(adapter: &CatalogAdapter, args: Value) -> BoxFuture<'_, Result<Value, ToolError>> {
    Box::pin(async move {
        let input: ProductIdInput = parse_args(args)?;

        Ok(match adapter.get_product_info(&input.id).await {
            Ok(product) => tool_success(to_value(&product)),
            Err(e) => {
                warn!(tool = PRODUCT_INFO_TOOL_NAME, error = %e, "Tool failed");
                tool_error(e)
            }
        })
    })
}

fn get_product_review(
    adapter: &CatalogAdapter,
    args: Value,
) -> BoxFuture<'_, Result<Value, ToolError>> {
    Box::pin(async move {
        let input: ProductIdInput = parse_args(args)?;

        Ok(match adapter.get_product_reviews(&input.id).await {
            Ok(reviews) => tool_success(to_value(&reviews)),
            Err(e) => {
                warn!(tool = PRODUCT_REVIEW_TOOL_NAME, error = %e, "Tool failed");
                tool_error(e)
            }
        })
    })
}

// =============================================================================
// Schemas
// =============================================================================

fn search_input_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "keywords": { "type": "string" },
            "category": { "type": "string" },
            "maxResults": { "type": "integer", "minimum": 1, "maximum": 50, "default": DEFAULT_MAX_RESULTS }
        },
        "required": ["keywords"]
    })
}

fn product_id_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "id": { "type": "string" }
        },
        "required": ["id"]
    })
}

fn product_properties() -> Value {
    json!({
        "id": { "type": "string" },
        "title": { "type": "string" },
        "price": { "type": ["string", "null"] },
        "url": { "type": "string" },
        "image": { "type": ["string", "null"] }
    })
}

fn search_output_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "products": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": product_properties(),
                    "required": ["id", "title", "url"]
                }
            }
        },
        "required": ["products"]
    })
}

fn product_schema() -> Value {
    let mut properties = product_properties();
    properties["brand"] = json!({ "type": ["string", "null"] });
    properties["features"] = json!({ "type": "array", "items": { "type": "string" } });
    properties["dimensions"] = json!({});
    properties["weight"] = json!({});
    json!({
        "type": "object",
        "properties": properties,
        "required": ["id", "title", "url"]
    })
}

fn review_set_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "productId": { "type": "string" },
            "reviews": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "author": { "type": "string" },
                        "rating": { "type": "integer", "minimum": 1, "maximum": 5 },
                        "text": { "type": "string" }
                    },
                    "required": ["author", "rating", "text"]
                }
            }
        },
        "required": ["productId", "reviews"]
    })
}
