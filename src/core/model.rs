//! Model trait for validated, client-safe projections

use crate::core::entity::Entity;
use crate::core::error::ModelValidationFailure;
use crate::core::schema::ModelSchema;
use crate::core::validation;
use serde::Serialize;
use validator::Validate;

/// A validated projection of an entity, safe to hand to the API layer.
///
/// Models are plain values: no back-reference to the entity they came from.
pub trait Model: ModelSchema + Validate + Serialize + Sized {
    /// The raw record this model is projected from
    type Entity: Entity;

    /// Run the schema rules, handing the model back only if it conforms
    fn finalize(self) -> Result<Self, ModelValidationFailure> {
        match self.validate() {
            Ok(()) => Ok(self),
            Err(errors) => Err(ModelValidationFailure::new(
                Self::NAME,
                validation::flatten(&errors),
            )),
        }
    }

    /// Serialize for the API layer
    fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}
