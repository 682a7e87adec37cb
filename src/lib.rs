//! # Orgview
//!
//! Conversion of persisted organisation, query and llms file records into
//! validated, client-safe models.
//!
//! ## Features
//!
//! - **Polymorphic references**: a reference field holds either a bare
//!   identifier or an embedded record, resolved per value
//! - **Credential redaction**: Shopify credentials only reach privileged callers
//! - **Schema-checked output**: every model is validated before it is returned,
//!   with all field issues reported together
//! - **Schema descriptions**: each model describes its own fields
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use orgview::prelude::*;
//!
//! let converter = Converter::default();
//! let entity = OrganisationEntity::from_document(doc)?;
//!
//! let public = converter.organisation(&entity, false)?;
//! assert!(!public.includes_credentials());
//!
//! let json = public.to_json()?;
//! ```

pub mod config;
pub mod converter;
pub mod core;
pub mod entities;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        entity::Entity,
        field::Truthy,
        identifier::{Reference, canonical_id, is_identifier},
        model::Model,
        schema::{FieldDescriptor, FieldKind, ModelSchema},
    };

    // === Errors ===
    pub use crate::core::error::{
        ConfigError, DecodeError, Error, ErrorResponse, FieldIssue, ModelValidationFailure,
    };

    // === Macros ===
    pub use crate::{impl_entity, literal_enum};

    // === Entities ===
    pub use crate::entities::{
        Citation, LlmsEntity, LlmsModel, OrganisationEntity, OrganisationModel, OrganisationRef,
        Platform, QueryEntity, QueryModel,
    };

    // === Config ===
    pub use crate::config::ConverterConfig;
    pub use crate::converter::Converter;

    // === External dependencies ===
    pub use bson::{Bson, Document, doc, oid::ObjectId};
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
}
