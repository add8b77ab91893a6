use crate::store::AssetStore;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn AssetStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn AssetStore>) -> Self {
        Self { store }
    }
}
