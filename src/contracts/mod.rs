//! HTTP surface for contract generation.

pub mod handlers;
pub mod models;

use std::sync::Arc;

use crate::generators::{Clock, PageConfig, SystemClock};

/// Shared, read-only request context.
#[derive(Clone)]
pub struct AppState {
    pub clock: Arc<dyn Clock>,
    pub page: PageConfig,
}

impl AppState {
    pub fn new(clock: Arc<dyn Clock>, page: PageConfig) -> Self {
        Self { clock, page }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock), PageConfig::default())
    }
}
