//! Catalog Domain Module
//!
//! This module contains the Amazon catalog adapter, including:
//! - Domain models (Product, Review, ReviewSet)
//! - Upstream response shapes and their normalizers
//! - Mock data for credential-less operation
//! - The fallback chains and the adapter that walks them

pub mod adapter;
pub mod error;
pub mod mock;
pub mod models;
pub mod plan;
pub mod shape;

// Re-export commonly used types for convenience
pub use adapter::{CatalogAdapter, Mode};
pub use error::{CatalogError, Operation};
pub use models::{Product, Review, ReviewSet};
