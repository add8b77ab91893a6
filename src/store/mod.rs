//! Persistence adapter for asset records.
//!
//! Handlers only see [`AssetStore`]; the concrete backend is chosen once in
//! `main` and injected through [`crate::state::AppState`].

pub mod memory;
pub mod mongo;

use async_trait::async_trait;

use crate::asset_id::AssetId;
use crate::models::{Asset, AssetUpdate, NewAsset};

pub use memory::MemoryAssetStore;
pub use mongo::MongoAssetStore;

/// Failure reported by a store backend
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store has not been connected yet, or has already been closed
    #[error("{0}")]
    Unavailable(String),
    /// The database rejected or failed the operation
    #[error("{0}")]
    Upstream(#[from] mongodb::error::Error),
    /// The database assigned an identifier that is not an ObjectId
    #[error("unexpected identifier returned by store: {0}")]
    UnexpectedId(String),
}

/// Document operations over the asset collection
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Open the connection. Calling it while connected is a no-op; calling
    /// it after [`AssetStore::close`] fails with [`StoreError::Unavailable`].
    async fn connect(&self) -> Result<(), StoreError>;

    /// Round-trip to the backend to verify it is reachable
    async fn ping(&self) -> Result<(), StoreError>;

    /// Release the connection. Later calls to any operation fail.
    async fn close(&self);

    async fn insert(&self, asset: NewAsset) -> Result<AssetId, StoreError>;

    async fn find_by_id(&self, id: AssetId) -> Result<Option<Asset>, StoreError>;

    async fn find_by_employee(&self, employee_id: &str) -> Result<Vec<Asset>, StoreError>;

    /// Merge the non-null fields of `update` into the stored record.
    /// Returns whether a record with `id` existed.
    async fn update(&self, id: AssetId, update: &AssetUpdate) -> Result<bool, StoreError>;

    /// Returns whether a record was removed
    async fn delete(&self, id: AssetId) -> Result<bool, StoreError>;
}

/// Connection lifecycle shared by the backends: `Uninitialized -> Connected -> Closed`
#[derive(Debug)]
pub(crate) enum Connection<T> {
    Uninitialized,
    Connected(T),
    Closed,
}

impl<T> Connection<T> {
    /// Borrow the live handle, or report why there is none
    pub(crate) fn handle(&self) -> Result<&T, StoreError> {
        match self {
            Connection::Connected(handle) => Ok(handle),
            other => Err(other.unavailable()),
        }
    }

    pub(crate) fn handle_mut(&mut self) -> Result<&mut T, StoreError> {
        match self {
            Connection::Connected(handle) => Ok(handle),
            other => Err(other.unavailable()),
        }
    }

    fn unavailable(&self) -> StoreError {
        let reason = match self {
            Connection::Uninitialized => "asset store is not connected",
            Connection::Closed => "asset store has been closed",
            Connection::Connected(_) => "asset store is connected",
        };
        StoreError::Unavailable(reason.to_string())
    }

    /// Move to `Closed`, handing back the handle if one was live
    pub(crate) fn take(&mut self) -> Option<T> {
        match std::mem::replace(self, Connection::Closed) {
            Connection::Connected(handle) => Some(handle),
            Connection::Uninitialized | Connection::Closed => None,
        }
    }
}
