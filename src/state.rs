//! Application State
//!
//! Everything a request needs, built once at startup. Nothing in here is
//! mutated after construction, so requests share it without locking.

use crate::catalog::CatalogAdapter;
use crate::config::Config;
use crate::mcp::ToolRegistry;
use std::sync::Arc;

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

pub struct AppState {
    /// Catalog operations, in whichever mode startup selected.
    pub adapter: CatalogAdapter,

    /// Tools exposed over MCP.
    pub tools: ToolRegistry,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self::with_adapter(CatalogAdapter::from_config(config))
    }

    pub fn with_adapter(adapter: CatalogAdapter) -> Self {
        Self {
            adapter,
            tools: ToolRegistry::catalog(),
        }
    }
}
