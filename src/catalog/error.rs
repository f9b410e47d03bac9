use crate::spapi::UpstreamError;
use std::fmt;
use thiserror::Error;

/// The adapter operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Search,
    ProductInfo,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Search => "search",
            Operation::ProductInfo => "product info",
        })
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Every variant of the fallback chain failed; `source` is the first
    /// failure, later ones are only logged.
    #[error("Amazon SP API {operation} failed: {source}")]
    Upstream {
        operation: Operation,
        #[source]
        source: UpstreamError,
    },
}

impl CatalogError {
    pub fn operation(&self) -> Operation {
        match self {
            CatalogError::Upstream { operation, .. } => *operation,
        }
    }
}
