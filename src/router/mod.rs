//! Routing module for the MCP server

use crate::mcp::helpers::{rpc_error, INTERNAL_ERROR};
use crate::state::SharedState;
use axum::{
    body::Body,
    extract::Request,
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::Value;
use std::any::Any;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
};
use tracing::{error, info, warn};

/// Creates and configures the application router with all routes and middleware
pub fn create_app_router(state: SharedState) -> Router {
    // Middleware: CORS (Permissive for local dev)
    let cors_layer = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    // Routes
    Router::new()
        .merge(crate::mcp::routes())
        .layer(
            ServiceBuilder::new()
                .layer(cors_layer)
                .layer(middleware::from_fn(log_requests))
                .layer(CatchPanicLayer::custom(internal_error_response)),
        )
        .with_state(state)
}

/// Middleware: Log requests
async fn log_requests(req: Request<Body>, next: Next) -> Response {
    info!("REQ: {} {}", req.method(), req.uri());
    let res = next.run(req).await;
    if !res.status().is_success() {
        warn!("RES: {}", res.status());
    }
    res
}

/// Turns a handler panic into a JSON-RPC internal error instead of a dropped
/// connection.
pub fn internal_error_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };
    error!("Error handling MCP request: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(rpc_error(Value::Null, INTERNAL_ERROR, "Internal server error")),
    )
        .into_response()
}
