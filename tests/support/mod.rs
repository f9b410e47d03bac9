//! Shared fixtures for integration tests
#![allow(dead_code)]

use amz_mcp_rust::spapi::{ApiCall, SellingPartnerApi, UpstreamError};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Mutex;

/// A fake upstream that answers from a fixed script and records every call.
#[derive(Default)]
pub struct ScriptedApi {
    responses: Mutex<VecDeque<Result<Value, String>>>,
    calls: Mutex<Vec<ApiCall>>,
}

impl ScriptedApi {
    pub fn new(responses: Vec<Result<Value, String>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(messages: &[&str]) -> Self {
        Self::new(messages.iter().map(|m| Err(m.to_string())).collect())
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SellingPartnerApi for ScriptedApi {
    async fn call_api(&self, call: &ApiCall) -> Result<Value, UpstreamError> {
        self.calls.lock().unwrap().push(call.clone());
        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(Ok(value)) => Ok(value),
            Some(Err(message)) => Err(UpstreamError::Other(message)),
            None => Err(UpstreamError::Other("no scripted response left".into())),
        }
    }
}

pub const MARKETPLACE: &str = "ATVPDKIKX0DER";

/// A `2022-04-01` catalog item.
pub fn current_item(asin: &str, title: &str, amount: f64) -> Value {
    json!({
        "asin": asin,
        "attributes": {
            "item_name": [{ "value": title, "language_tag": "en_US" }],
            "list_price": [{ "amount": amount, "currency_code": "USD" }],
            "brand": [{ "value": "Acme" }],
            "bullet_point": [{ "value": "Sturdy" }, { "value": "Light" }]
        },
        "images": [{ "images": [{ "link": format!("https://m.media-amazon.com/images/I/{}.jpg", asin) }] }]
    })
}

/// A `v0` catalog item.
pub fn legacy_item(asin: &str, title: &str, amount: f64) -> Value {
    json!({
        "Identifiers": { "MarketplaceASIN": { "MarketplaceId": MARKETPLACE, "ASIN": asin } },
        "AttributeSets": [{
            "Title": title,
            "ListPrice": { "Amount": amount, "CurrencyCode": "USD" },
            "Brand": "Acme",
            "Feature": ["Sturdy", "Light"]
        }]
    })
}
