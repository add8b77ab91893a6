use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{AssetStore, Connection, StoreError};
use crate::asset_id::AssetId;
use crate::models::{Asset, AssetUpdate, NewAsset};

/// In-process asset store
///
/// Keeps records in insertion order, so listings come back in creation
/// order. Lookups are linear scans. Contents are lost on close.
pub struct MemoryAssetStore {
    conn: RwLock<Connection<Vec<Asset>>>,
}

impl MemoryAssetStore {
    pub fn new() -> Self {
        Self {
            conn: RwLock::new(Connection::Uninitialized),
        }
    }
}

impl Default for MemoryAssetStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AssetStore for MemoryAssetStore {
    async fn connect(&self) -> Result<(), StoreError> {
        let mut conn = self.conn.write().await;
        if let Connection::Uninitialized = *conn {
            *conn = Connection::Connected(Vec::new());
            tracing::info!("In-memory asset store ready");
        }
        // Closed stays closed
        conn.handle().map(|_| ())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.conn.read().await.handle().map(|_| ())
    }

    async fn close(&self) {
        if self.conn.write().await.take().is_some() {
            tracing::info!("In-memory asset store closed");
        }
    }

    async fn insert(&self, asset: NewAsset) -> Result<AssetId, StoreError> {
        let mut conn = self.conn.write().await;
        let records = conn.handle_mut()?;

        let id = AssetId::generate();
        records.push(Asset::from_new(id, asset));

        tracing::debug!("Inserted asset with id: {}", id);
        Ok(id)
    }

    async fn find_by_id(&self, id: AssetId) -> Result<Option<Asset>, StoreError> {
        let conn = self.conn.read().await;
        Ok(conn.handle()?.iter().find(|asset| asset.id == id).cloned())
    }

    async fn find_by_employee(&self, employee_id: &str) -> Result<Vec<Asset>, StoreError> {
        let conn = self.conn.read().await;
        Ok(conn
            .handle()?
            .iter()
            .filter(|asset| asset.employee_id == employee_id)
            .cloned()
            .collect())
    }

    async fn update(&self, id: AssetId, update: &AssetUpdate) -> Result<bool, StoreError> {
        let mut conn = self.conn.write().await;
        match conn.handle_mut()?.iter_mut().find(|asset| asset.id == id) {
            Some(asset) => {
                update.apply_to(asset);
                tracing::debug!("Updated asset with id: {}", id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: AssetId) -> Result<bool, StoreError> {
        let mut conn = self.conn.write().await;
        let records = conn.handle_mut()?;
        match records.iter().position(|asset| asset.id == id) {
            Some(index) => {
                records.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_asset(employee_id: &str, name: &str) -> NewAsset {
        NewAsset {
            employee_id: employee_id.to_string(),
            asset_names: vec![name.to_string()],
            asset_ids: vec![format!("{}-id", name)],
            purchase_date: None,
            serial_number: None,
            condition: None,
        }
    }

    async fn connected_store() -> MemoryAssetStore {
        let store = MemoryAssetStore::new();
        store.connect().await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_operations_fail_before_connect() {
        let store = MemoryAssetStore::new();

        assert!(matches!(store.ping().await, Err(StoreError::Unavailable(_))));
        assert!(matches!(
            store.insert(new_asset("E1", "Laptop")).await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(matches!(
            store.find_by_employee("E1").await,
            Err(StoreError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_connect_is_idempotent_and_close_is_final() {
        let store = connected_store().await;
        let id = store.insert(new_asset("E1", "Laptop")).await.unwrap();

        // A second connect must not reset the data
        store.connect().await.unwrap();
        assert!(store.find_by_id(id).await.unwrap().is_some());

        store.close().await;
        assert!(matches!(store.ping().await, Err(StoreError::Unavailable(_))));
        assert!(matches!(store.connect().await, Err(StoreError::Unavailable(_))));
        assert!(matches!(store.find_by_id(id).await, Err(StoreError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = connected_store().await;
        let input = new_asset("E1", "Laptop");

        let id = store.insert(input.clone()).await.unwrap();
        let found = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(found, Asset::from_new(id, input));

        assert!(store.find_by_id(AssetId::generate()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_identical_inserts_create_distinct_records() {
        let store = connected_store().await;
        let first = store.insert(new_asset("E1", "Laptop")).await.unwrap();
        let second = store.insert(new_asset("E1", "Laptop")).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(store.find_by_employee("E1").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_find_by_employee_filters_exactly() {
        let store = connected_store().await;
        let laptop = store.insert(new_asset("E1", "Laptop")).await.unwrap();
        store.insert(new_asset("E2", "Phone")).await.unwrap();
        let monitor = store.insert(new_asset("E1", "Monitor")).await.unwrap();

        let ids: Vec<AssetId> = store
            .find_by_employee("E1")
            .await
            .unwrap()
            .into_iter()
            .map(|asset| asset.id)
            .collect();
        assert_eq!(ids, vec![laptop, monitor]);

        assert!(store.find_by_employee("e1").await.unwrap().is_empty());
        assert!(store.find_by_employee("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_listing_follows_insertion_order() {
        let store = connected_store().await;
        let first = store.insert(new_asset("E1", "Laptop")).await.unwrap();
        let second = store.insert(new_asset("E1", "Phone")).await.unwrap();
        store.delete(first).await.unwrap();
        let third = store.insert(new_asset("E1", "Laptop")).await.unwrap();

        let update = AssetUpdate {
            condition: Some("used".to_string()),
            ..Default::default()
        };
        store.update(second, &update).await.unwrap();

        let ids: Vec<AssetId> = store
            .find_by_employee("E1")
            .await
            .unwrap()
            .into_iter()
            .map(|asset| asset.id)
            .collect();
        assert_eq!(ids, vec![second, third]);
    }

    #[tokio::test]
    async fn test_update_reports_match_even_without_change() {
        let store = connected_store().await;
        let id = store.insert(new_asset("E1", "Laptop")).await.unwrap();

        let update = AssetUpdate {
            employee_id: Some("E1".to_string()),
            ..Default::default()
        };
        assert!(store.update(id, &update).await.unwrap());
        assert!(!store.update(AssetId::generate(), &update).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let store = connected_store().await;
        let id = store.insert(new_asset("E1", "Laptop")).await.unwrap();

        assert!(store.delete(id).await.unwrap());
        assert!(!store.delete(id).await.unwrap());
        assert!(store.find_by_id(id).await.unwrap().is_none());
    }
}
