//! Upstream response shapes and their normalizers
//!
//! The Catalog Items API comes in two generations. `v0` ("legacy") items are
//! keyed by `Identifiers` / `AttributeSets` in PascalCase; `2022-04-01`
//! ("current") items are keyed by `asin` / `attributes` / `images` with
//! array-wrapped values. Each gets a typed mirror here and one normalizer
//! into [`Product`].
//!
//! Every mirror field is read on its own: a field of the wrong type reads as
//! absent and the rest of the item survives.

use super::models::{detail_page_url, Product};
use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, warn};

/// Title used when the upstream item carries none.
pub const UNKNOWN_TITLE: &str = "Unknown Product";
/// Id used when a legacy item carries no ASIN.
pub const UNKNOWN_ID: &str = "unknown";

/// Which API generation a raw payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Legacy,
    Current,
}

/// Classifies a single raw item by its discriminating keys.
pub fn detect_shape(item: &Value) -> Shape {
    if item.get("Identifiers").is_some() || item.get("AttributeSets").is_some() {
        Shape::Legacy
    } else {
        Shape::Current
    }
}

impl Shape {
    /// Extracts the item list from a search response body.
    pub fn search_items(self, mut response: Value) -> Vec<Value> {
        let pointer = match self {
            Shape::Legacy => "/payload/Items",
            Shape::Current => "/items",
        };
        match response.pointer_mut(pointer).map(Value::take) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        }
    }

    /// Extracts the single item from a get-item response body.
    pub fn catalog_item(self, mut response: Value) -> Value {
        match self {
            Shape::Legacy => response
                .get_mut("payload")
                .map(Value::take)
                .unwrap_or_else(|| Value::Object(Default::default())),
            Shape::Current => response,
        }
    }
}

/// A price as either generation reports it.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Money {
    #[serde(alias = "CurrencyCode", alias = "currency", default, deserialize_with = "tolerant")]
    pub currency_code: Option<String>,

    #[serde(alias = "Amount", alias = "value", default)]
    pub amount: Option<Value>,
}

/// Formats a price as `"{currency} {amount}"`. No price, no string.
pub fn format_price(price: Option<&Money>) -> Option<String> {
    let price = price?;
    let amount = match price.amount.as_ref()? {
        Value::String(s) => s.clone(),
        Value::Null => return None,
        other => other.to_string(),
    };
    match price.currency_code.as_deref() {
        Some(currency) if !currency.is_empty() => Some(format!("{} {}", currency, amount)),
        _ => Some(amount),
    }
}

// =============================================================================
// Field readers
// =============================================================================

/// Reads a field, treating a value of the wrong type as absent.
fn tolerant<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_else(|e| {
        debug!(error = %e, "Ignoring mistyped catalog field");
        T::default()
    }))
}

/// Reads a list field element by element. Unreadable elements are dropped
/// and a lone value stands for a one-element list.
fn tolerant_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let elements = match Value::deserialize(deserializer)? {
        Value::Array(elements) => elements,
        Value::Null => Vec::new(),
        single => vec![single],
    };

    Ok(elements
        .into_iter()
        .filter_map(|element| {
            serde_json::from_value(element)
                .inspect_err(|e| debug!(error = %e, "Ignoring mistyped catalog list element"))
                .ok()
        })
        .collect())
}

// =============================================================================
// Legacy (v0) shape
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct LegacyItem {
    #[serde(deserialize_with = "tolerant")]
    pub identifiers: Option<LegacyIdentifiers>,
    #[serde(deserialize_with = "tolerant_seq")]
    pub attribute_sets: Vec<LegacyAttributeSet>,
    #[serde(rename = "DetailPageURL", deserialize_with = "tolerant")]
    pub detail_page_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LegacyIdentifiers {
    #[serde(rename = "MarketplaceASIN", deserialize_with = "tolerant")]
    pub marketplace_asin: Option<LegacyMarketplaceAsin>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LegacyMarketplaceAsin {
    #[serde(rename = "ASIN", deserialize_with = "tolerant")]
    pub asin: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct LegacyAttributeSet {
    #[serde(deserialize_with = "tolerant")]
    pub title: Option<String>,
    #[serde(deserialize_with = "tolerant")]
    pub list_price: Option<Money>,
    #[serde(deserialize_with = "tolerant")]
    pub small_image: Option<LegacyImage>,
    #[serde(deserialize_with = "tolerant")]
    pub brand: Option<String>,
    #[serde(deserialize_with = "tolerant_seq")]
    pub feature: Vec<String>,
    pub package_dimensions: Option<Value>,
    #[serde(deserialize_with = "tolerant")]
    pub item_dimensions: Option<LegacyItemDimensions>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LegacyImage {
    #[serde(rename = "URL", deserialize_with = "tolerant")]
    pub url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct LegacyItemDimensions {
    pub weight: Option<Value>,
}

// =============================================================================
// Current (2022-04-01) shape
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CurrentItem {
    #[serde(deserialize_with = "tolerant")]
    pub asin: Option<String>,
    #[serde(deserialize_with = "tolerant")]
    pub attributes: CurrentAttributes,
    #[serde(deserialize_with = "tolerant_seq")]
    pub images: Vec<CurrentImageSet>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CurrentAttributes {
    #[serde(deserialize_with = "tolerant_seq")]
    pub item_name: Vec<TextValue>,
    #[serde(deserialize_with = "tolerant_seq")]
    pub list_price: Vec<Money>,
    #[serde(deserialize_with = "tolerant_seq")]
    pub brand: Vec<TextValue>,
    #[serde(deserialize_with = "tolerant_seq")]
    pub bullet_point: Vec<TextValue>,
    pub item_dimensions: Option<Value>,
    pub item_weight: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TextValue {
    #[serde(deserialize_with = "tolerant")]
    pub value: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CurrentImageSet {
    #[serde(deserialize_with = "tolerant_seq")]
    pub images: Vec<CurrentImage>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CurrentImage {
    #[serde(deserialize_with = "tolerant")]
    pub link: Option<String>,
}

// =============================================================================
// Normalization
// =============================================================================

/// A raw upstream item tagged with its shape.
#[derive(Debug)]
pub enum RawItem {
    Legacy(LegacyItem),
    Current(CurrentItem),
}

impl RawItem {
    /// Reads `value` as the given shape. Mistyped fields read as absent; a
    /// payload that is not an object at all normalizes as an empty item.
    pub fn parse(shape: Shape, value: Value) -> Self {
        match shape {
            Shape::Legacy => RawItem::Legacy(lenient(shape, value)),
            Shape::Current => RawItem::Current(lenient(shape, value)),
        }
    }

    /// Reads `value` as whichever shape its keys indicate.
    pub fn detect(value: Value) -> Self {
        let shape = detect_shape(&value);
        Self::parse(shape, value)
    }

    pub fn into_product(self) -> Product {
        match self {
            RawItem::Legacy(item) => normalize_legacy(item),
            RawItem::Current(item) => normalize_current(item),
        }
    }
}

fn lenient<T: Default + for<'de> Deserialize<'de>>(shape: Shape, value: Value) -> T {
    serde_json::from_value(value).unwrap_or_else(|e| {
        warn!(?shape, error = %e, "Catalog item is not an object, normalizing as empty");
        T::default()
    })
}

fn normalize_legacy(item: LegacyItem) -> Product {
    let id = item
        .identifiers
        .and_then(|i| i.marketplace_asin)
        .and_then(|m| m.asin)
        .unwrap_or_else(|| UNKNOWN_ID.to_string());
    let attributes = item.attribute_sets.into_iter().next().unwrap_or_default();
    let url = item
        .detail_page_url
        .unwrap_or_else(|| detail_page_url(&id));

    Product {
        title: attributes
            .title
            .unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
        price: format_price(attributes.list_price.as_ref()),
        url,
        image: attributes.small_image.and_then(|i| i.url),
        brand: attributes.brand,
        features: Some(attributes.feature),
        dimensions: attributes.package_dimensions,
        weight: attributes.item_dimensions.and_then(|d| d.weight),
        id,
    }
}

fn normalize_current(item: CurrentItem) -> Product {
    let id = item.asin.unwrap_or_else(|| UNKNOWN_ID.to_string());
    let attributes = item.attributes;

    Product {
        url: detail_page_url(&id),
        title: first_text(attributes.item_name).unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
        price: format_price(attributes.list_price.first()),
        image: item
            .images
            .into_iter()
            .next()
            .and_then(|set| set.images.into_iter().next())
            .and_then(|image| image.link),
        brand: first_text(attributes.brand),
        features: Some(
            attributes
                .bullet_point
                .into_iter()
                .filter_map(|b| b.value)
                .collect(),
        ),
        dimensions: attributes.item_dimensions,
        weight: attributes.item_weight,
        id,
    }
}

fn first_text(values: Vec<TextValue>) -> Option<String> {
    values.into_iter().next().and_then(|v| v.value)
}
