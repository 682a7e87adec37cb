//! Declarative field descriptions of the model schemas
//!
//! Each model publishes a static list of [`FieldDescriptor`]s: the output
//! field name, its kind, whether it may be null or omitted, and the
//! human-readable description the persisted schema documents. The API
//! layer uses [`ModelSchema::describe`] to publish the contract.

use serde::Serialize;
use serde_json::{Value, json};

/// Kind of value a model field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FieldKind {
    /// Canonical 24-hex identifier string
    Identifier,
    String,
    Number,
    Boolean,
    /// RFC 3339 timestamp
    Timestamp,
    /// One of a closed set of string literals
    Enum { values: &'static [&'static str] },
    /// Sub-record described by another schema
    Object { schema: &'static str },
    Array { items: &'static FieldKind },
    /// Identifier string or a nested model of the target schema
    Reference { target: &'static str },
}

/// Description of one output field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
    pub nullable: bool,
    pub optional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
}

impl FieldDescriptor {
    /// A required, non-null field
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            nullable: false,
            optional: false,
            description: None,
        }
    }

    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// The key may be omitted from the serialized model
    pub const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub const fn describe(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }
}

/// A model with a published field list
pub trait ModelSchema {
    /// Schema name (e.g., "organisation")
    const NAME: &'static str;

    fn fields() -> &'static [FieldDescriptor];

    fn field(name: &str) -> Option<&'static FieldDescriptor> {
        Self::fields().iter().find(|f| f.name == name)
    }

    /// Render the schema as a JSON description
    fn describe() -> Value {
        json!({
            "model": Self::NAME,
            "fields": Self::fields(),
        })
    }
}
