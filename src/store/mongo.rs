use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::RwLock;

use super::{AssetStore, Connection, StoreError};
use crate::asset_id::AssetId;
use crate::config::Config;
use crate::models::{Asset, AssetUpdate, NewAsset};

/// Asset as laid out in the MongoDB collection
#[derive(Debug, Serialize, Deserialize)]
struct AssetDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    employee_id: String,
    asset_names: Vec<String>,
    #[serde(default)]
    asset_ids: Option<Vec<String>>,
    // Older documents carry the id list under `asset_id`; `asset_ids` wins
    // when an update has left both keys behind
    #[serde(default, rename = "asset_id")]
    legacy_asset_ids: Option<Vec<String>>,
    #[serde(default)]
    purchase_date: Option<String>,
    #[serde(default)]
    serial_number: Option<String>,
    #[serde(default)]
    condition: Option<String>,
}

impl AssetDocument {
    /// `_id` becomes the public `id`
    fn into_asset(self) -> Asset {
        Asset {
            id: AssetId::from(self.id),
            employee_id: self.employee_id,
            asset_names: self.asset_names,
            asset_ids: self
                .asset_ids
                .or(self.legacy_asset_ids)
                .unwrap_or_default(),
            purchase_date: self.purchase_date,
            serial_number: self.serial_number,
            condition: self.condition,
        }
    }
}

struct MongoHandle {
    client: Client,
    assets: Collection<AssetDocument>,
}

/// Asset store backed by a MongoDB collection
///
/// Construction does no I/O. [`AssetStore::connect`] builds the driver
/// client, which is shared by all requests until [`AssetStore::close`].
pub struct MongoAssetStore {
    url: String,
    database: String,
    collection: String,
    timeout: Duration,
    conn: RwLock<Connection<MongoHandle>>,
}

impl MongoAssetStore {
    pub fn new(
        url: impl Into<String>,
        database: impl Into<String>,
        collection: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            collection: collection.into(),
            timeout,
            conn: RwLock::new(Connection::Uninitialized),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.mongodb_url,
            &config.mongodb_database,
            &config.mongodb_collection,
            config.mongodb_timeout,
        )
    }

    /// Collection accessor; fails fast outside the connected state
    async fn assets(&self) -> Result<Collection<AssetDocument>, StoreError> {
        Ok(self.conn.read().await.handle()?.assets.clone())
    }
}

#[async_trait]
impl AssetStore for MongoAssetStore {
    async fn connect(&self) -> Result<(), StoreError> {
        let mut conn = self.conn.write().await;
        if let Connection::Uninitialized = *conn {
            let mut options = ClientOptions::parse(&self.url).await?;
            options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
            options.server_selection_timeout = Some(self.timeout);

            let client = Client::with_options(options)?;
            let assets = client
                .database(&self.database)
                .collection::<AssetDocument>(&self.collection);

            tracing::info!(
                "MongoDB client created for {}.{}",
                self.database,
                self.collection
            );
            *conn = Connection::Connected(MongoHandle { client, assets });
        }
        conn.handle().map(|_| ())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let client = self.conn.read().await.handle()?.client.clone();
        client.database("admin").run_command(doc! { "ping": 1 }).await?;
        tracing::debug!("MongoDB ping succeeded");
        Ok(())
    }

    async fn close(&self) {
        let handle = self.conn.write().await.take();
        if let Some(handle) = handle {
            handle.client.shutdown().await;
            tracing::info!("Disconnected from MongoDB");
        }
    }

    async fn insert(&self, asset: NewAsset) -> Result<AssetId, StoreError> {
        let assets = self.assets().await?;
        let result = assets
            .clone_with_type::<NewAsset>()
            .insert_one(&asset)
            .await?;

        let id = result
            .inserted_id
            .as_object_id()
            .map(AssetId::from)
            .ok_or_else(|| StoreError::UnexpectedId(result.inserted_id.to_string()))?;

        tracing::debug!("Inserted asset with id: {}", id);
        Ok(id)
    }

    async fn find_by_id(&self, id: AssetId) -> Result<Option<Asset>, StoreError> {
        let assets = self.assets().await?;
        let found = assets.find_one(doc! { "_id": id.object_id() }).await?;
        Ok(found.map(AssetDocument::into_asset))
    }

    async fn find_by_employee(&self, employee_id: &str) -> Result<Vec<Asset>, StoreError> {
        let assets = self.assets().await?;
        let cursor = assets.find(doc! { "employee_id": employee_id }).await?;
        let docs: Vec<AssetDocument> = cursor.try_collect().await?;

        tracing::debug!("Found {} assets for employee {}", docs.len(), employee_id);
        Ok(docs.into_iter().map(AssetDocument::into_asset).collect())
    }

    async fn update(&self, id: AssetId, update: &AssetUpdate) -> Result<bool, StoreError> {
        let assets = self.assets().await?;
        let filter = doc! { "_id": id.object_id() };

        // MongoDB rejects an empty $set
        if update.is_empty() {
            return Ok(assets.find_one(filter).await?.is_some());
        }

        let mut modifications = doc! { "$set": update.to_set_document() };
        if update.asset_ids.is_some() {
            modifications.insert("$unset", doc! { "asset_id": "" });
        }

        let result = assets.update_one(filter, modifications).await?;

        tracing::debug!(
            "Updated asset {} (matched: {}, modified: {})",
            id,
            result.matched_count,
            result.modified_count
        );
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: AssetId) -> Result<bool, StoreError> {
        let assets = self.assets().await?;
        let result = assets.delete_one(doc! { "_id": id.object_id() }).await?;
        Ok(result.deleted_count > 0)
    }
}
