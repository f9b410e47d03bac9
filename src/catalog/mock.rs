//! Deterministic stand-in data served when no credentials are configured.

use super::models::{detail_page_url, Product, Review, ReviewSet};
use serde_json::json;

/// Upper bound on mock search results, whatever the caller asks for.
pub const MOCK_SEARCH_LIMIT: u32 = 5;
pub const MOCK_BRAND: &str = "Mock Brand";

/// `B00MOCK001`, `B00MOCK002`, ...
pub fn mock_asin(index: u32) -> String {
    format!("B00MOCK{:03}", index)
}

pub fn search_results(keywords: &str, max_results: u32) -> Vec<Product> {
    (1..=max_results.min(MOCK_SEARCH_LIMIT))
        .map(|i| {
            let id = mock_asin(i);
            Product {
                title: format!("Mock Product {} for \"{}\"", i, keywords),
                price: Some(format!("${:.2}", 19.99 + f64::from(i) * 5.0)),
                url: detail_page_url(&id),
                image: None,
                brand: None,
                features: None,
                dimensions: None,
                weight: None,
                id,
            }
        })
        .collect()
}

pub fn product_info(asin: &str) -> Product {
    Product {
        id: asin.to_string(),
        title: format!("Mock Product for ASIN {}", asin),
        price: Some("$29.99".to_string()),
        url: detail_page_url(asin),
        image: None,
        brand: Some(MOCK_BRAND.to_string()),
        features: Some(vec![
            "Mock feature 1".to_string(),
            "Mock feature 2".to_string(),
            "Mock feature 3".to_string(),
        ]),
        dimensions: Some(json!({ "length": 10, "width": 8, "height": 2, "unit": "inches" })),
        weight: Some(json!({ "value": 1.5, "unit": "pounds" })),
    }
}

pub fn product_reviews(asin: &str) -> ReviewSet {
    ReviewSet {
        product_id: asin.to_string(),
        reviews: vec![
            Review {
                author: "Mock Reviewer 1".to_string(),
                rating: 5,
                text: "Great mock product! Works as expected in demo mode.".to_string(),
            },
            Review {
                author: "Mock Reviewer 2".to_string(),
                rating: 4,
                text: "Good value for a mock product. Configure real Amazon SP API for actual data."
                    .to_string(),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_results_are_capped_and_numbered() {
        let results = search_results("usb cable", 10);
        assert_eq!(results.len(), 5);

        let ids: Vec<_> = results.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(
            ids,
            ["B00MOCK001", "B00MOCK002", "B00MOCK003", "B00MOCK004", "B00MOCK005"]
        );
        assert_eq!(results[0].price.as_deref(), Some("$24.99"));
        assert_eq!(results[4].price.as_deref(), Some("$44.99"));
        assert_eq!(results[0].title, "Mock Product 1 for \"usb cable\"");
        assert_eq!(results[0].url, "https://amazon.com/dp/B00MOCK001");
    }

    #[test]
    fn test_search_results_below_cap() {
        assert_eq!(search_results("x", 3).len(), 3);
        assert!(search_results("x", 0).is_empty());
    }

    #[test]
    fn test_product_info_echoes_asin() {
        let product = product_info("B0CUSTOM01");
        assert_eq!(product.id, "B0CUSTOM01");
        assert_eq!(product.brand.as_deref(), Some(MOCK_BRAND));
        assert_eq!(product.features.as_ref().map(Vec::len), Some(3));
        assert_eq!(product.weight, Some(json!({ "value": 1.5, "unit": "pounds" })));
    }

    #[test]
    fn test_reviews_are_fixed() {
        let set = product_reviews("B0CUSTOM01");
        assert_eq!(set.product_id, "B0CUSTOM01");
        assert_eq!(set.reviews.len(), 2);
        assert_eq!(set.reviews[0].rating, 5);
        assert_eq!(set.reviews[1].rating, 4);
    }
}
