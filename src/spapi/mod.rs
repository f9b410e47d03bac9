//! Selling Partner API collaborator
//!
//! The catalog adapter talks to Amazon through the [`SellingPartnerApi`]
//! trait: an [`ApiCall`] goes in, the raw JSON body (or an
//! [`UpstreamError`]) comes out. [`SpApiClient`] is the HTTP implementation.

pub mod client;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use client::{SpApiClient, SpApiEndpoints, SpRegion};

/// Errors raised while talking to the Selling Partner API.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("access token refresh failed (HTTP {status}): {message}")]
    Auth { status: u16, message: String },

    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },

    #[error("unsupported operation {operation} on {endpoint}/{version}")]
    UnsupportedOperation {
        operation: String,
        endpoint: String,
        version: String,
    },

    #[error("missing path parameter '{0}'")]
    MissingPathParameter(String),

    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("{0}")]
    Other(String),
}

/// A query parameter value. Lists are sent comma-joined.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Single(String),
    List(Vec<String>),
}

impl QueryValue {
    pub fn to_query_string(&self) -> String {
        match self {
            QueryValue::Single(v) => v.clone(),
            QueryValue::List(vs) => vs.join(","),
        }
    }
}

/// One upstream operation invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiCall {
    pub operation: &'static str,
    /// Endpoint family, e.g. `catalog` or `catalogItems`.
    pub endpoint: &'static str,
    pub version: &'static str,
    pub path: Vec<(&'static str, String)>,
    pub query: Vec<(&'static str, QueryValue)>,
}

impl ApiCall {
    pub fn new(operation: &'static str, endpoint: &'static str, version: &'static str) -> Self {
        Self {
            operation,
            endpoint,
            version,
            path: Vec::new(),
            query: Vec::new(),
        }
    }

    pub fn path_param(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.path.push((name, value.into()));
        self
    }

    pub fn query(mut self, name: &'static str, value: impl ToString) -> Self {
        self.query.push((name, QueryValue::Single(value.to_string())));
        self
    }

    pub fn query_list<I, S>(mut self, name: &'static str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.query.push((name, QueryValue::List(values)));
        self
    }

    pub fn path_value(&self, name: &str) -> Option<&str> {
        self.path
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn query_value(&self, name: &str) -> Option<&QueryValue> {
        self.query.iter().find(|(k, _)| *k == name).map(|(_, v)| v)
    }
}

/// The upstream catalog API as the adapter consumes it.
#[async_trait]
pub trait SellingPartnerApi: Send + Sync {
    async fn call_api(&self, call: &ApiCall) -> Result<Value, UpstreamError>;
}
