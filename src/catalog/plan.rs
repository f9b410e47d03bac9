//! Fallback chains
//!
//! Each live operation tries a fixed, ordered list of API-version variants
//! and stops at the first one that answers. The lists are built here as data
//! so the adapter only has to walk them. A [`Chain`] always has a first
//! attempt, so a failed chain always has a first failure to report.

use super::shape::Shape;
use crate::spapi::ApiCall;

/// Largest page the upstream search accepts.
pub const MAX_PAGE_SIZE: u32 = 20;

pub const CURRENT_VERSION: &str = "2022-04-01";
pub const LEGACY_VERSION: &str = "v0";

/// One step of a chain: the call to make and how to read its answer.
#[derive(Debug, Clone, PartialEq)]
pub struct Attempt {
    pub label: &'static str,
    pub call: ApiCall,
    pub shape: Shape,
}

/// An ordered, non-empty list of attempts.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    pub first: Attempt,
    pub fallbacks: Vec<Attempt>,
}

impl Chain {
    /// Attempts in the order they are tried.
    pub fn iter(&self) -> impl Iterator<Item = &Attempt> {
        std::iter::once(&self.first).chain(&self.fallbacks)
    }
}

pub fn search(marketplace_id: &str, keywords: &str, max_results: u32) -> Chain {
    let page_size = max_results.min(MAX_PAGE_SIZE);

    Chain {
        first: Attempt {
            label: "catalogItems 2022-04-01",
            call: ApiCall::new("searchCatalogItems", "catalogItems", CURRENT_VERSION)
                .query_list("marketplaceIds", [marketplace_id])
                .query("keywords", keywords)
                .query("pageSize", page_size),
            shape: Shape::Current,
        },
        fallbacks: vec![Attempt {
            label: "catalog v0",
            call: ApiCall::new("searchCatalogItems", "catalog", LEGACY_VERSION)
                .query("MarketplaceId", marketplace_id)
                .query("Keywords", keywords)
                .query("MaxResultsPerPage", page_size),
            shape: Shape::Legacy,
        }],
    }
}

pub fn product_info(marketplace_id: &str, asin: &str, sandbox: bool) -> Chain {
    let current = ApiCall::new("getCatalogItem", "catalogItems", CURRENT_VERSION)
        .path_param("asin", asin)
        .query_list("marketplaceIds", [marketplace_id]);

    let mut fallbacks = vec![Attempt {
        label: "catalogItems 2022-04-01",
        call: current
            .clone()
            .query_list("includedData", ["attributes", "images", "productTypes"]),
        shape: Shape::Current,
    }];

    // The sandbox rejects includedData on some accounts.
    if sandbox {
        fallbacks.push(Attempt {
            label: "catalogItems 2022-04-01 (minimal)",
            call: current,
            shape: Shape::Current,
        });
    }

    Chain {
        first: Attempt {
            label: "catalog v0",
            call: ApiCall::new("getCatalogItem", "catalog", LEGACY_VERSION)
                .path_param("asin", asin)
                .query("MarketplaceId", marketplace_id),
            shape: Shape::Legacy,
        },
        fallbacks,
    }
}
