//! Catalog Adapter
//!
//! Picks MOCK or LIVE mode once, at construction, and serves the three
//! catalog operations. LIVE mode walks the fallback chains from
//! [`super::plan`] and normalizes whichever variant answered.

use super::{
    error::{CatalogError, Operation},
    mock,
    models::{Product, Review, ReviewSet},
    plan::{self, Attempt, Chain},
    shape::{RawItem, Shape},
};
use crate::config::Config;
use crate::spapi::{SellingPartnerApi, SpApiClient, SpApiEndpoints, SpRegion, UpstreamError};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Bounds applied to every search, whoever the caller is.
pub const MIN_RESULTS: u32 = 1;
pub const MAX_RESULTS: u32 = 50;

/// Fixed answer for review lookups in LIVE mode: the Catalog Items API has
/// no review endpoint.
pub const REVIEWS_UNAVAILABLE: &str = "Reviews not available through SP API. Consider using Product Advertising API or other approved methods.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Mock,
    Live,
}

enum Backend {
    Mock,
    Live(LiveCatalog),
}

struct LiveCatalog {
    api: Arc<dyn SellingPartnerApi>,
    marketplace_id: String,
    sandbox: bool,
}

pub struct CatalogAdapter {
    backend: Backend,
}

impl CatalogAdapter {
    /// Builds the adapter from startup configuration.
    ///
    /// Never fails: missing credentials or an unbuildable HTTP client both
    /// land in MOCK mode.
    pub fn from_config(config: &Config) -> Self {
        let missing = config.credentials.missing();
        if !missing.is_empty() {
            warn!("Missing Amazon SP API credentials: {}", missing.join(", "));
            warn!("Using mock data. Please configure all required credentials.");
            return Self::mock();
        }

        let credentials = &config.credentials;
        let region = SpRegion::from_aws_region(&config.region);
        let client = SpApiClient::new(
            credentials.client_id.clone().unwrap_or_default(),
            credentials.client_secret.clone().unwrap_or_default(),
            credentials.refresh_token.clone().unwrap_or_default(),
            SpApiEndpoints::for_region(region, config.sandbox),
        );

        match client {
            Ok(client) => {
                info!(
                    region = region.code(),
                    marketplace = %config.marketplace_id,
                    sandbox = config.sandbox,
                    "Amazon SP API client ready"
                );
                Self::live(Arc::new(client), config.marketplace_id.clone(), config.sandbox)
            }
            Err(e) => {
                warn!("Failed to initialize Amazon SP API client: {}", e);
                warn!("Using mock data instead.");
                Self::mock()
            }
        }
    }

    pub fn mock() -> Self {
        Self {
            backend: Backend::Mock,
        }
    }

    pub fn live(
        api: Arc<dyn SellingPartnerApi>,
        marketplace_id: impl Into<String>,
        sandbox: bool,
    ) -> Self {
        Self {
            backend: Backend::Live(LiveCatalog {
                api,
                marketplace_id: marketplace_id.into(),
                sandbox,
            }),
        }
    }

    pub fn mode(&self) -> Mode {
        match self.backend {
            Backend::Mock => Mode::Mock,
            Backend::Live(_) => Mode::Live,
        }
    }

    pub fn is_mock(&self) -> bool {
        self.mode() == Mode::Mock
    }

    pub async fn search_products(
        &self,
        keywords: &str,
        category: Option<&str>,
        max_results: u32,
    ) -> Result<Vec<Product>, CatalogError> {
        let max_results = max_results.clamp(MIN_RESULTS, MAX_RESULTS);

        let live = match &self.backend {
            Backend::Mock => return Ok(mock::search_results(keywords, max_results)),
            Backend::Live(live) => live,
        };

        info!(keywords, ?category, max_results, "Searching catalog");
        if category.is_some() {
            debug!("Category filter is not forwarded to the catalog search");
        }

        let chain = plan::search(&live.marketplace_id, keywords, max_results);
        live.run_chain(Operation::Search, chain, |shape, response| {
            shape
                .search_items(response)
                .into_iter()
                .map(|item| RawItem::detect(item).into_product().into_summary())
                .collect()
        })
        .await
    }

    pub async fn get_product_info(&self, asin: &str) -> Result<Product, CatalogError> {
        let live = match &self.backend {
            Backend::Mock => return Ok(mock::product_info(asin)),
            Backend::Live(live) => live,
        };

        info!(asin, "Fetching product info");

        let chain = plan::product_info(&live.marketplace_id, asin, live.sandbox);
        live.run_chain(Operation::ProductInfo, chain, |shape, response| {
            RawItem::parse(shape, shape.catalog_item(response)).into_product()
        })
        .await
    }

    pub async fn get_product_reviews(&self, asin: &str) -> Result<ReviewSet, CatalogError> {
        if self.is_mock() {
            return Ok(mock::product_reviews(asin));
        }

        Ok(ReviewSet {
            product_id: asin.to_string(),
            reviews: vec![Review {
                author: "SP API User".to_string(),
                rating: 4,
                text: REVIEWS_UNAVAILABLE.to_string(),
            }],
        })
    }
}

impl LiveCatalog {
    /// Tries each attempt in order and normalizes the first answer. If all
    /// fail, the error carries the first failure.
    async fn run_chain<T, F>(
        &self,
        operation: Operation,
        chain: Chain,
        normalize: F,
    ) -> Result<T, CatalogError>
    where
        F: Fn(Shape, Value) -> T,
    {
        let total = chain.iter().count();

        let first_failure = match self.attempt(operation, 1, total, &chain.first).await {
            Ok(response) => return Ok(normalize(chain.first.shape, response)),
            Err(e) => e,
        };

        for (step, attempt) in chain.fallbacks.iter().enumerate() {
            if let Ok(response) = self.attempt(operation, step + 2, total, attempt).await {
                info!(%operation, variant = attempt.label, "Fallback variant succeeded");
                return Ok(normalize(attempt.shape, response));
            }
        }

        Err(CatalogError::Upstream {
            operation,
            source: first_failure,
        })
    }

    async fn attempt(
        &self,
        operation: Operation,
        step: usize,
        total: usize,
        attempt: &Attempt,
    ) -> Result<Value, UpstreamError> {
        debug!(%operation, step, total, variant = attempt.label, "Calling SP API");
        self.api.call_api(&attempt.call).await.inspect_err(|e| {
            warn!(%operation, step, total, variant = attempt.label, error = %e, "SP API call failed");
        })
    }
}
