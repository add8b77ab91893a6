use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a persisted asset.
///
/// Wraps the store-native ObjectId so the rest of the service never handles
/// raw strings as identifiers. Parse with [`str::parse`], format with
/// [`fmt::Display`] (24 lowercase hex characters).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct AssetId(ObjectId);

impl AssetId {
    /// Allocate a fresh identifier
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    pub fn object_id(self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for AssetId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

/// Rejected identifier text, kept verbatim for error reporting
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid asset id: '{0}'")]
pub struct InvalidAssetId(pub String);

impl FromStr for AssetId {
    type Err = InvalidAssetId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s)
            .map(Self)
            .map_err(|_| InvalidAssetId(s.to_string()))
    }
}

impl From<AssetId> for String {
    fn from(id: AssetId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for AssetId {
    type Error = InvalidAssetId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
