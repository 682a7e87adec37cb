//! Core module containing the codec, traits and helpers shared by every converter

pub mod entity;
pub mod error;
pub mod field;
pub mod identifier;
pub mod model;
pub mod schema;
pub mod validation;

pub use entity::Entity;
pub use error::{ConfigError, DecodeError, Error, FieldIssue, ModelValidationFailure};
pub use field::Truthy;
pub use identifier::{IdentifierError, Reference, is_identifier};
pub use model::Model;
pub use schema::{FieldDescriptor, FieldKind, ModelSchema};
