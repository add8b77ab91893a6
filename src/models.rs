use mongodb::bson::{Bson, Document};
use serde::{Deserialize, Serialize};

use crate::asset_id::AssetId;

/// Request body for creating an asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct NewAsset {
    /// ID of the employee assigned to the asset
    pub employee_id: String,
    /// Names of the assigned items
    pub asset_names: Vec<String>,
    /// Identifiers of the assigned items
    pub asset_ids: Vec<String>,
    pub purchase_date: Option<String>,
    pub serial_number: Option<String>,
    pub condition: Option<String>,
}

/// Request body for updating an asset
///
/// Absent and null fields both mean "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AssetUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_names: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

impl AssetUpdate {
    pub fn is_empty(&self) -> bool {
        self.employee_id.is_none()
            && self.asset_names.is_none()
            && self.asset_ids.is_none()
            && self.purchase_date.is_none()
            && self.serial_number.is_none()
            && self.condition.is_none()
    }

    /// Merge the non-null fields into an existing asset
    pub fn apply_to(&self, asset: &mut Asset) {
        if let Some(employee_id) = &self.employee_id {
            asset.employee_id = employee_id.clone();
        }
        if let Some(asset_names) = &self.asset_names {
            asset.asset_names = asset_names.clone();
        }
        if let Some(asset_ids) = &self.asset_ids {
            asset.asset_ids = asset_ids.clone();
        }
        if self.purchase_date.is_some() {
            asset.purchase_date = self.purchase_date.clone();
        }
        if self.serial_number.is_some() {
            asset.serial_number = self.serial_number.clone();
        }
        if self.condition.is_some() {
            asset.condition = self.condition.clone();
        }
    }

    /// Build the `$set` document holding only the non-null fields
    pub fn to_set_document(&self) -> Document {
        let mut set = Document::new();
        let mut put = |key: &str, value: Option<Bson>| {
            if let Some(value) = value {
                set.insert(key, value);
            }
        };
        put("employee_id", self.employee_id.clone().map(Bson::from));
        put("asset_names", self.asset_names.clone().map(Bson::from));
        put("asset_ids", self.asset_ids.clone().map(Bson::from));
        put("purchase_date", self.purchase_date.clone().map(Bson::from));
        put("serial_number", self.serial_number.clone().map(Bson::from));
        put("condition", self.condition.clone().map(Bson::from));
        set
    }
}

/// A persisted asset as returned by every read endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Asset {
    /// Unique identifier of the asset in the database
    #[schema(value_type = String, example = "65a1f0c2e4b0a1b2c3d4e5f6")]
    pub id: AssetId,
    pub employee_id: String,
    pub asset_names: Vec<String>,
    pub asset_ids: Vec<String>,
    pub purchase_date: Option<String>,
    pub serial_number: Option<String>,
    pub condition: Option<String>,
}

impl Asset {
    pub fn from_new(id: AssetId, asset: NewAsset) -> Self {
        Self {
            id,
            employee_id: asset.employee_id,
            asset_names: asset.asset_names,
            asset_ids: asset.asset_ids,
            purchase_date: asset.purchase_date,
            serial_number: asset.serial_number,
            condition: asset.condition,
        }
    }
}

/// Response type for successful DELETE operations
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct DeleteResponse {
    pub message: String,
}

impl DeleteResponse {
    pub fn deleted() -> Self {
        Self {
            message: "Asset deleted successfully".to_string(),
        }
    }
}
