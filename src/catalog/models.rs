//! Catalog Domain Models
//!
//! Normalized records returned by the catalog adapter, whichever upstream
//! API generation produced them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Catalog Domain Models
// =============================================================================

/// A normalized product.
///
/// Search results only fill the summary fields (`id` through `image`); the
/// detail fields are present for product lookups.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// ASIN
    pub id: String,

    pub title: String,

    /// `"{currency} {amount}"`, e.g. `"USD 9.99"`
    pub price: Option<String>,

    /// Detail page URL
    pub url: String,

    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,

    /// Passed through as the upstream reported it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Value>,
}

impl Product {
    /// Drops the detail fields, keeping what a search result carries.
    pub fn into_summary(self) -> Self {
        Self {
            brand: None,
            features: None,
            dimensions: None,
            weight: None,
            ..self
        }
    }
}

/// A single customer review.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub author: String,

    /// 1 to 5
    pub rating: u8,

    pub text: String,
}

/// Reviews for one product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSet {
    pub product_id: String,
    pub reviews: Vec<Review>,
}

/// Canonical detail page for an ASIN.
pub fn detail_page_url(asin: &str) -> String {
    format!("https://amazon.com/dp/{}", asin)
}
