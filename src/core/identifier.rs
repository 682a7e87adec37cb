//! Identifier codec and polymorphic reference fields
//!
//! Persisted references hold either a bare identifier or, when the upstream
//! query joined the related collection, the whole embedded record. Which shape
//! a value has is decided structurally by [`is_identifier`], never by a type
//! tag, because the same field holds either shape depending on the query.

use bson::Bson;
use bson::oid::ObjectId;
use regex::Regex;
use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

/// Errors raised while reading an identifier or a reference field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("expected a 24 character hex identifier, got {0}")]
    NotAnIdentifier(String),

    #[error("expected an identifier or an embedded record, got {0}")]
    Unrecognised(String),

    #[error("embedded record does not match the entity shape: {0}")]
    Embedded(String),
}

fn hex_token() -> &'static Regex {
    static HEX_TOKEN: OnceLock<Regex> = OnceLock::new();
    HEX_TOKEN.get_or_init(|| Regex::new(r"^[0-9a-fA-F]{24}$").unwrap())
}

/// Whether a string is a 24 character hex identifier token
pub fn is_identifier_token(value: &str) -> bool {
    hex_token().is_match(value)
}

/// Structural test deciding whether a persisted value is a bare identifier
///
/// An ObjectId or a 24-hex string is an identifier. Documents, nulls and
/// every other BSON type are not.
pub fn is_identifier(value: &Bson) -> bool {
    match value {
        Bson::ObjectId(_) => true,
        Bson::String(s) => is_identifier_token(s),
        _ => false,
    }
}

/// Read a persisted identifier into an [`ObjectId`]
pub fn to_object_id(value: &Bson) -> Result<ObjectId, IdentifierError> {
    match value {
        Bson::ObjectId(oid) => Ok(*oid),
        Bson::String(s) if is_identifier_token(s) => {
            ObjectId::parse_str(s).map_err(|_| IdentifierError::NotAnIdentifier(describe(value)))
        }
        other => Err(IdentifierError::NotAnIdentifier(describe(other))),
    }
}

/// Canonical string form of a persisted identifier (lowercase hex)
pub fn canonical_id(value: &Bson) -> Result<String, IdentifierError> {
    to_object_id(value).map(|oid| oid.to_hex())
}

fn describe(value: &Bson) -> String {
    match value {
        Bson::String(s) => format!("string '{}'", s),
        Bson::Null => "null".to_string(),
        other => format!("{:?}", other.element_type()),
    }
}

/// A reference field: a bare identifier or an embedded entity record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Reference<E> {
    Id(ObjectId),
    Embedded(Box<E>),
}

impl<E: DeserializeOwned> Reference<E> {
    /// Classify a raw persisted value
    pub fn from_bson(value: Bson) -> Result<Self, IdentifierError> {
        if is_identifier(&value) {
            return to_object_id(&value).map(Reference::Id);
        }

        match value {
            Bson::Document(doc) => bson::from_document(doc)
                .map(|entity| Reference::Embedded(Box::new(entity)))
                .map_err(|e| IdentifierError::Embedded(e.to_string())),
            other => Err(IdentifierError::Unrecognised(describe(&other))),
        }
    }
}

impl<E> Reference<E> {
    /// Resolve into an output value: the canonical id string, or whatever
    /// `convert` makes of the embedded record
    pub fn resolve<T, Err>(
        &self,
        as_id: impl FnOnce(String) -> T,
        convert: impl FnOnce(&E) -> Result<T, Err>,
    ) -> Result<T, Err> {
        match self {
            Reference::Id(oid) => Ok(as_id(oid.to_hex())),
            Reference::Embedded(entity) => convert(entity),
        }
    }
}

impl<E> From<ObjectId> for Reference<E> {
    fn from(oid: ObjectId) -> Self {
        Reference::Id(oid)
    }
}

impl<'de, E: DeserializeOwned> Deserialize<'de> for Reference<E> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Bson::deserialize(deserializer)?;
        Reference::from_bson(value).map_err(serde::de::Error::custom)
    }
}
