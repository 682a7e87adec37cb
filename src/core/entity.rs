//! Entity traits for raw persisted records

use crate::core::error::DecodeError;
use bson::{Bson, Document};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Base trait for all raw records handed over by the persistence layer.
///
/// Entities are loosely typed: every field may be missing or null, enums are
/// plain strings and timestamps are raw BSON values. They are never mutated
/// by this crate, only projected into models.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// The singular entity name (e.g., "organisation")
    fn entity_name() -> &'static str;

    /// The raw primary key, exactly as persisted
    fn raw_id(&self) -> &Bson;

    /// Decode a raw BSON document
    fn from_document(doc: Document) -> Result<Self, DecodeError> {
        bson::from_document(doc).map_err(|e| DecodeError {
            entity: Self::entity_name(),
            message: e.to_string(),
        })
    }

    /// Decode a record that went through a JSON layer
    fn from_json(value: serde_json::Value) -> Result<Self, DecodeError> {
        serde_json::from_value(value).map_err(|e| DecodeError {
            entity: Self::entity_name(),
            message: e.to_string(),
        })
    }
}
