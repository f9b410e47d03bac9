//! reqwest-backed Selling Partner API client
//!
//! Handles Login-with-Amazon token refresh and maps `(endpoint, version,
//! operation)` triples onto REST paths. Throttling and retries are left to
//! the caller.

use super::{ApiCall, SellingPartnerApi, UpstreamError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

/// Login-with-Amazon token endpoint.
pub const LWA_TOKEN_URL: &str = "https://api.amazon.com/auth/o2/token";

/// Refresh the access token this long before Amazon says it expires.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

const ACCESS_TOKEN_HEADER: &str = "x-amz-access-token";

/// SP-API regional endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpRegion {
    NorthAmerica,
    Europe,
    FarEast,
}

impl SpRegion {
    /// Maps an AWS region name onto the SP-API region serving it. Unknown
    /// regions fall back to North America.
    pub fn from_aws_region(region: &str) -> Self {
        match region {
            "eu-west-1" => SpRegion::Europe,
            "ap-northeast-1" => SpRegion::FarEast,
            _ => SpRegion::NorthAmerica,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            SpRegion::NorthAmerica => "na",
            SpRegion::Europe => "eu",
            SpRegion::FarEast => "fe",
        }
    }

    pub fn api_base(self, sandbox: bool) -> String {
        let prefix = if sandbox { "sandbox." } else { "" };
        format!("https://{}sellingpartnerapi-{}.amazon.com", prefix, self.code())
    }
}

/// Where the client sends its requests.
#[derive(Debug, Clone, PartialEq)]
pub struct SpApiEndpoints {
    pub api_base: String,
    pub token_url: String,
}

impl SpApiEndpoints {
    pub fn for_region(region: SpRegion, sandbox: bool) -> Self {
        Self {
            api_base: region.api_base(sandbox),
            token_url: LWA_TOKEN_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    expires_at: Instant,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

pub struct SpApiClient {
    http: Client,
    client_id: String,
    client_secret: String,
    refresh_token: String,
    endpoints: SpApiEndpoints,
    token: Mutex<Option<AccessToken>>,
}

impl SpApiClient {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        refresh_token: impl Into<String>,
        endpoints: SpApiEndpoints,
    ) -> Result<Self, UpstreamError> {
        let http = Client::builder()
            .user_agent(concat!("amz-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            refresh_token: refresh_token.into(),
            endpoints,
            token: Mutex::new(None),
        })
    }

    /// Returns a cached access token, refreshing it when close to expiry.
    async fn access_token(&self) -> Result<String, UpstreamError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.expires_at {
                return Ok(token.value.clone());
            }
        }

        debug!("Refreshing LWA access token");
        let response = self
            .http
            .post(&self.endpoints.token_url)
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", self.refresh_token.as_str()),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Auth {
                status: status.as_u16(),
                message: auth_error_message(status, &body),
            });
        }

        let token: TokenResponse = response.json().await?;
        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(TOKEN_EXPIRY_MARGIN);
        *cached = Some(AccessToken {
            value: token.access_token.clone(),
            expires_at: Instant::now() + lifetime,
        });

        Ok(token.access_token)
    }

    /// Resolves the full request URL for a call.
    pub fn request_url(&self, call: &ApiCall) -> Result<Url, UpstreamError> {
        let template = resource_template(call)?;

        let mut url = Url::parse(&self.endpoints.api_base)
            .map_err(|e| UpstreamError::InvalidEndpoint(format!("{}: {}", self.endpoints.api_base, e)))?;

        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| UpstreamError::InvalidEndpoint(self.endpoints.api_base.clone()))?;
            segments.pop_if_empty();
            for segment in template.split('/').filter(|s| !s.is_empty()) {
                match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                    Some(name) => {
                        let value = call
                            .path_value(name)
                            .ok_or_else(|| UpstreamError::MissingPathParameter(name.to_string()))?;
                        segments.push(value);
                    }
                    None => {
                        segments.push(segment);
                    }
                }
            }
        }

        if !call.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &call.query {
                pairs.append_pair(name, &value.to_query_string());
            }
        }

        Ok(url)
    }
}

#[async_trait]
impl SellingPartnerApi for SpApiClient {
    async fn call_api(&self, call: &ApiCall) -> Result<Value, UpstreamError> {
        let url = self.request_url(call)?;
        let token = self.access_token().await?;

        debug!(operation = call.operation, endpoint = call.endpoint, version = call.version, %url, "SP-API request");

        let response = self
            .http
            .get(url)
            .header(ACCESS_TOKEN_HEADER, token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Api {
                status: status.as_u16(),
                message: api_error_message(status, &body),
            });
        }

        Ok(response.json().await?)
    }
}

/// REST path template for a call; `{name}` segments come from path params.
fn resource_template(call: &ApiCall) -> Result<&'static str, UpstreamError> {
    let template = match (call.endpoint, call.version, call.operation) {
        ("catalog", "v0", "searchCatalogItems" | "listCatalogItems") => "/catalog/v0/items",
        ("catalog", "v0", "getCatalogItem") => "/catalog/v0/items/{asin}",
        ("catalogItems", "2022-04-01", "searchCatalogItems") => "/catalog/2022-04-01/items",
        ("catalogItems", "2022-04-01", "getCatalogItem") => "/catalog/2022-04-01/items/{asin}",
        _ => {
            return Err(UpstreamError::UnsupportedOperation {
                operation: call.operation.to_string(),
                endpoint: call.endpoint.to_string(),
                version: call.version.to_string(),
            })
        }
    };
    Ok(template)
}

/// Pulls `errors[0]` out of an SP-API error body, e.g.
/// `{"errors":[{"code":"NotFound","message":"Item not found"}]}`.
fn api_error_message(status: StatusCode, body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let first = parsed
        .as_ref()
        .and_then(|v| v.get("errors"))
        .and_then(|e| e.get(0));

    if let Some(error) = first {
        let message = error.get("message").and_then(Value::as_str).unwrap_or("");
        return match error.get("code").and_then(Value::as_str) {
            Some(code) if !message.is_empty() => format!("{}: {}", code, message),
            Some(code) => code.to_string(),
            None if !message.is_empty() => message.to_string(),
            None => fallback_message(status, body),
        };
    }

    fallback_message(status, body)
}

/// LWA reports failures as `{"error": "...", "error_description": "..."}`.
fn auth_error_message(status: StatusCode, body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let description = parsed.as_ref().and_then(|v| {
        v.get("error_description")
            .or_else(|| v.get("error"))
            .and_then(Value::as_str)
            .map(str::to_string)
    });
    description.unwrap_or_else(|| fallback_message(status, body))
}

fn fallback_message(status: StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        body.to_string()
    }
}
