//! Catalog adapter behaviour: mode selection, mock data and the fallback
//! chains, driven through a scripted upstream.

mod support;

use amz_mcp_rust::catalog::{
    shape::{RawItem, Shape},
    CatalogAdapter, CatalogError, Mode, Operation,
};
use amz_mcp_rust::config::Config;
use amz_mcp_rust::spapi::QueryValue;
use serde_json::json;
use std::sync::Arc;
use support::{current_item, legacy_item, ScriptedApi, MARKETPLACE};

const REQUIRED: [&str; 5] = [
    "AMAZON_CLIENT_ID",
    "AMAZON_CLIENT_SECRET",
    "AMAZON_REFRESH_TOKEN",
    "AMAZON_ACCESS_KEY_ID",
    "AMAZON_SECRET_ACCESS_KEY",
];

fn live(api: &Arc<ScriptedApi>, sandbox: bool) -> CatalogAdapter {
    CatalogAdapter::live(api.clone(), MARKETPLACE, sandbox)
}

// =============================================================================
// Mode selection
// =============================================================================

#[test]
fn test_any_missing_credential_selects_mock() {
    for absent in REQUIRED {
        let config = Config::from_lookup(|key| {
            if key == absent {
                None
            } else if REQUIRED.contains(&key) {
                Some("configured".to_string())
            } else {
                None
            }
        });
        let adapter = CatalogAdapter::from_config(&config);
        assert_eq!(adapter.mode(), Mode::Mock, "{} missing should force mock", absent);
    }
}

#[test]
fn test_placeholder_credential_selects_mock() {
    let config = Config::from_lookup(|key| match key {
        "AMAZON_CLIENT_SECRET" => Some("your_client_secret_here".to_string()),
        k if REQUIRED.contains(&k) => Some("configured".to_string()),
        _ => None,
    });
    assert!(CatalogAdapter::from_config(&config).is_mock());
}

// =============================================================================
// Mock mode
// =============================================================================

#[tokio::test]
async fn test_mock_search_returns_min_of_n_and_five() {
    let adapter = CatalogAdapter::mock();

    for (n, expected) in [(1, 1), (3, 3), (5, 5), (10, 5), (50, 5)] {
        let products = adapter.search_products("mug", None, n).await.unwrap();
        assert_eq!(products.len(), expected);

        for (i, product) in products.iter().enumerate() {
            assert_eq!(product.id, format!("B00MOCK{:03}", i + 1));
            let price = 19.99 + 5.0 * (i + 1) as f64;
            assert_eq!(product.price, Some(format!("${:.2}", price)));
        }
    }
}

#[tokio::test]
async fn test_mock_product_info_and_reviews() {
    let adapter = CatalogAdapter::mock();

    let product = adapter.get_product_info("B0ANYTHING").await.unwrap();
    assert_eq!(product.id, "B0ANYTHING");
    assert_eq!(product.brand.as_deref(), Some("Mock Brand"));
    assert_eq!(
        product.dimensions,
        Some(json!({ "length": 10, "width": 8, "height": 2, "unit": "inches" }))
    );

    let reviews = adapter.get_product_reviews("B0ANYTHING").await.unwrap();
    assert_eq!(reviews.product_id, "B0ANYTHING");
    assert_eq!(reviews.reviews.len(), 2);
}

// =============================================================================
// Live search
// =============================================================================

#[tokio::test]
async fn test_live_search_uses_current_api_first() {
    let api = Arc::new(ScriptedApi::new(vec![Ok(json!({
        "numberOfResults": 1,
        "items": [current_item("B0LAMP0001", "Desk Lamp", 24.5)]
    }))]));
    let adapter = live(&api, false);

    let products = adapter.search_products("lamp", Some("Home"), 1000).await.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, "B0LAMP0001");
    assert_eq!(products[0].title, "Desk Lamp");
    assert_eq!(products[0].price.as_deref(), Some("USD 24.5"));
    // Search results are summaries.
    assert_eq!(products[0].brand, None);
    assert_eq!(products[0].features, None);

    let calls = api.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].endpoint, "catalogItems");
    assert_eq!(calls[0].query_value("pageSize"), Some(&QueryValue::Single("20".into())));
    assert_eq!(
        calls[0].query_value("marketplaceIds"),
        Some(&QueryValue::List(vec![MARKETPLACE.to_string()]))
    );
}

#[tokio::test]
async fn test_live_search_falls_back_to_legacy() {
    let api = Arc::new(ScriptedApi::new(vec![
        Err("catalogItems unavailable".into()),
        Ok(json!({ "payload": { "Items": [
            legacy_item("B0LAMP0001", "Desk Lamp", 24.5),
            legacy_item("B0LAMP0002", "Floor Lamp", 80.0)
        ] } })),
    ]));
    let adapter = live(&api, false);

    let products = adapter.search_products("lamp", None, 2).await.unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[1].id, "B0LAMP0002");
    assert_eq!(products[1].price.as_deref(), Some("USD 80.0"));

    let calls = api.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].endpoint, "catalog");
    assert_eq!(calls[1].version, "v0");
    assert_eq!(calls[1].query_value("MaxResultsPerPage"), Some(&QueryValue::Single("2".into())));
}

#[tokio::test]
async fn test_live_search_reports_first_failure() {
    let api = Arc::new(ScriptedApi::failing(&["throttled by catalogItems", "v0 retired"]));
    let adapter = live(&api, false);

    let err = adapter.search_products("lamp", None, 10).await.unwrap_err();
    assert_eq!(err.operation(), Operation::Search);
    let message = err.to_string();
    assert_eq!(message, "Amazon SP API search failed: throttled by catalogItems");
    assert!(!message.contains("v0 retired"));
    assert_eq!(api.calls().len(), 2);
}

// =============================================================================
// Live product info
// =============================================================================

#[tokio::test]
async fn test_product_info_legacy_first() {
    let api = Arc::new(ScriptedApi::new(vec![Ok(json!({
        "payload": legacy_item("B0CHAIR001", "Office Chair", 129.0)
    }))]));
    let adapter = live(&api, false);

    let product = adapter.get_product_info("B0CHAIR001").await.unwrap();
    assert_eq!(product.id, "B0CHAIR001");
    assert_eq!(product.brand.as_deref(), Some("Acme"));
    assert_eq!(product.features, Some(vec!["Sturdy".to_string(), "Light".to_string()]));

    let calls = api.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].version, "v0");
    assert_eq!(calls[0].path_value("asin"), Some("B0CHAIR001"));
}

#[tokio::test]
async fn test_product_info_second_variant_result_is_returned() {
    let payload = current_item("B0CHAIR001", "Office Chair", 129.0);
    let api = Arc::new(ScriptedApi::new(vec![
        Err("v0 says no".into()),
        Ok(payload.clone()),
    ]));
    let adapter = live(&api, false);

    let product = adapter.get_product_info("B0CHAIR001").await.unwrap();
    assert_eq!(product, RawItem::parse(Shape::Current, payload).into_product());

    let calls = api.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(
        calls[1].query_value("includedData"),
        Some(&QueryValue::List(vec![
            "attributes".into(),
            "images".into(),
            "productTypes".into()
        ]))
    );
}

#[tokio::test]
async fn test_product_info_error_carries_first_message() {
    let api = Arc::new(ScriptedApi::failing(&["variant a", "variant b", "variant c"]));
    let adapter = live(&api, false);

    let err = adapter.get_product_info("B0CHAIR001").await.unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Upstream {
            operation: Operation::ProductInfo,
            ..
        }
    ));
    let message = err.to_string();
    assert!(message.contains("variant a"));
    assert!(!message.contains("variant b"));
    // Outside the sandbox the minimal variant is never tried.
    assert_eq!(api.calls().len(), 2);
}

#[tokio::test]
async fn test_product_info_sandbox_minimal_variant() {
    let payload = json!({ "asin": "B0CHAIR001" });
    let api = Arc::new(ScriptedApi::new(vec![
        Err("variant a".into()),
        Err("variant b".into()),
        Ok(payload),
    ]));
    let adapter = live(&api, true);

    let product = adapter.get_product_info("B0CHAIR001").await.unwrap();
    assert_eq!(product.id, "B0CHAIR001");
    assert_eq!(product.title, "Unknown Product");

    let calls = api.calls();
    assert_eq!(calls.len(), 3);
    assert!(calls[2].query_value("includedData").is_none());
}

#[tokio::test]
async fn test_product_info_sandbox_all_fail() {
    let api = Arc::new(ScriptedApi::failing(&["variant a", "variant b", "variant c"]));
    let adapter = live(&api, true);

    let err = adapter.get_product_info("B0CHAIR001").await.unwrap_err();
    assert_eq!(err.to_string(), "Amazon SP API product info failed: variant a");
    assert_eq!(api.calls().len(), 3);
}

// =============================================================================
// Live reviews
// =============================================================================

#[tokio::test]
async fn test_live_reviews_are_a_placeholder() {
    let api = Arc::new(ScriptedApi::failing(&["should not be called"]));
    let adapter = live(&api, false);

    let reviews = adapter.get_product_reviews("B0CHAIR001").await.unwrap();
    assert_eq!(reviews.product_id, "B0CHAIR001");
    assert_eq!(reviews.reviews.len(), 1);
    assert_eq!(reviews.reviews[0].author, "SP API User");
    assert!(api.calls().is_empty());
}
