//! MCP (Model Context Protocol) route handlers
//!
//! Stateless Streamable HTTP: every POST carries one JSON-RPC message and is
//! answered in full by the response; nothing outlives the request. GET
//! (server push) and DELETE (session termination) are refused.

use super::{helpers::*, models::*};
use crate::state::{AppState, SharedState};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Path of the single MCP endpoint
pub const MCP_PATH: &str = "/mcp";

/// Creates routes for MCP-related operations
pub fn routes() -> Router<SharedState> {
    Router::new().route(
        MCP_PATH,
        post(handle_mcp)
            .get(method_not_allowed)
            .delete(method_not_allowed),
    )
}

/// Endpoint: GET|DELETE /mcp
/// No server-initiated streams and no sessions to terminate.
async fn method_not_allowed() -> Response {
    info!("Rejecting non-POST MCP request");
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(rpc_error(Value::Null, SERVER_ERROR, "Method not allowed.")),
    )
        .into_response()
}

/// Endpoint: POST /mcp
/// Handles the Model Context Protocol communication for POST requests.
async fn handle_mcp(
    State(state): State<SharedState>,
    body: Result<Json<JsonRpcRequest>, axum::extract::rejection::JsonRejection>,
) -> Response {
    // Parse JSON-RPC Request (POST)
    let req = match body {
        Ok(Json(r)) => r,
        Err(e) => {
            warn!("JSON parse error: {}", e.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(rpc_error(Value::Null, PARSE_ERROR, "Parse error")),
            )
                .into_response();
        }
    };

    let span = info_span!(
        "mcp_request",
        request_id = %Uuid::new_v4().simple(),
        method = %req.method,
    );

    dispatch(&state, req).instrument(span).await
}

async fn dispatch(state: &AppState, req: JsonRpcRequest) -> Response {
    if req.is_notification() {
        debug!("Notification received");
        return StatusCode::ACCEPTED.into_response();
    }

    let id = req.id.unwrap_or(Value::Null);
    let method_name = req.method.as_str();
    let params = req.params.unwrap_or(Value::Null);

    info!("MCP call (id: {})", id);

    // Dispatch Method
    let response_body = match method_name {
        "initialize" => rpc_success(id, handle_initialize(&params)),
        "notifications/initialized" => rpc_success(id, json!({})),
        "tools/list" => rpc_success(id, state.tools.list()),
        "tools/call" => {
            let tool_name = params.get("name").and_then(|n| n.as_str()).unwrap_or("");
            let args = params.get("arguments").cloned().unwrap_or(Value::Null);

            match state.tools.call(&state.adapter, tool_name, args).await {
                Ok(result) => rpc_success(id, result),
                Err(e) => {
                    warn!("Rejected tool call: {}", e);
                    rpc_error(id, INVALID_PARAMS, e.to_string())
                }
            }
        }
        "ping" => rpc_success(id, json!({})),
        _ => {
            warn!("Unknown method: {}", method_name);
            rpc_error(id, METHOD_NOT_FOUND, "Method not found")
        }
    };

    Json(response_body).into_response()
}

// =============================================================================
// MCP Method Handlers
// =============================================================================

/// Handles `initialize` request (Handshake).
///
/// Echoes the client's protocol version when we support it, otherwise offers
/// our newest.
fn handle_initialize(params: &Value) -> Value {
    let requested = params.get("protocolVersion").and_then(Value::as_str);
    let version = requested
        .filter(|v| SUPPORTED_PROTOCOL_VERSIONS.contains(v))
        .unwrap_or(PROTOCOL_VERSION);

    json!({
        "protocolVersion": version,
        "capabilities": {
            "tools": { "listChanged": false }
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION")
        }
    })
}
