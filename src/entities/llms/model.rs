//! Llms model and its conversion from the raw entity

use super::entity::LlmsEntity;
use crate::config::ConverterConfig;
use crate::core::error::{FieldIssue, ModelValidationFailure};
use crate::core::field::{coerce_timestamp, truthy_or};
use crate::core::identifier;
use crate::core::model::Model;
use crate::core::schema::{FieldDescriptor, FieldKind, ModelSchema};
use crate::core::validation::{IssueSink, validators};
use crate::entities::organisation::OrganisationRef;
use crate::entities::organisation::model::validate_reference;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Client-safe projection of a generated llms file record
///
/// Absent strings become `""` rather than null, and absent timestamps are
/// left out of the output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LlmsModel {
    #[validate(custom(function = "validators::object_id"))]
    pub id: String,
    #[validate(custom(function = "validate_reference"))]
    pub org: OrganisationRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_requested_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_hit: Option<DateTime<Utc>>,
    pub total_hits: i64,
    pub total_links: i64,
    pub domain: String,
    pub generated_file: String,
    pub github_link: String,
}

impl LlmsModel {
    /// Convert with the default configuration
    pub fn convert_from_entity(entity: &LlmsEntity) -> Result<Self, ModelValidationFailure> {
        Self::convert_with(entity, &ConverterConfig::default())
    }

    /// Convert an llms entity; an embedded owner is converted without
    /// credentials
    pub fn convert_with(
        entity: &LlmsEntity,
        config: &ConverterConfig,
    ) -> Result<Self, ModelValidationFailure> {
        let mut sink = IssueSink::new();

        let id = sink.check("id", identifier::canonical_id(&entity.id));
        let org = match &entity.org {
            Some(reference) => sink.nested(
                "org",
                OrganisationRef::resolve(reference, config).map_err(|f| f.issues),
            ),
            None => {
                sink.push(FieldIssue::new("org", "required"));
                OrganisationRef::default()
            }
        };

        let created_at = sink.check("createdAt", coerce_timestamp(entity.created_at.as_ref()));
        let updated_at = sink.check("updatedAt", coerce_timestamp(entity.updated_at.as_ref()));
        let generation_requested_at = sink.check(
            "generationRequestedAt",
            coerce_timestamp(entity.generation_requested_at.as_ref()),
        );
        let last_hit = sink.check("lastHit", coerce_timestamp(entity.last_hit.as_ref()));

        sink.finish(Self::NAME)?;

        Self {
            id,
            org,
            created_at,
            updated_at,
            generation_requested_at,
            last_hit,
            total_hits: truthy_or(&entity.total_hits, 0),
            total_links: truthy_or(&entity.total_links, 0),
            domain: truthy_or(&entity.domain, String::new()),
            generated_file: truthy_or(&entity.generated_file, String::new()),
            github_link: truthy_or(&entity.github_link, String::new()),
        }
        .finalize()
    }

    /// A regeneration has been requested and not completed yet
    pub fn has_pending_generation(&self) -> bool {
        self.generation_requested_at.is_some()
    }
}

impl Model for LlmsModel {
    type Entity = LlmsEntity;
}

impl ModelSchema for LlmsModel {
    const NAME: &'static str = "llms";

    fn fields() -> &'static [FieldDescriptor] {
        use FieldKind::*;
        const FIELDS: &[FieldDescriptor] = &[
            FieldDescriptor::new("id", Identifier),
            FieldDescriptor::new("org", Reference { target: "organisation" })
                .describe("The owner of this document"),
            FieldDescriptor::new("createdAt", Timestamp).optional(),
            FieldDescriptor::new("updatedAt", Timestamp)
                .optional()
                .describe("When the file settings were last changed"),
            FieldDescriptor::new("generationRequestedAt", Timestamp)
                .optional()
                .describe("When the file regen was requested, blank once completed"),
            FieldDescriptor::new("lastHit", Timestamp)
                .optional()
                .describe("Date of last tracked hit"),
            FieldDescriptor::new("totalHits", Number).describe("Total amount of tracked hits to file"),
            FieldDescriptor::new("totalLinks", Number).describe("Total amount of links in the file"),
            FieldDescriptor::new("domain", String).describe("The website domain (for faster access)"),
            FieldDescriptor::new("generatedFile", String).describe("The generated file to return"),
            FieldDescriptor::new("githubLink", String).describe("The github link (if enabled)"),
        ];
        FIELDS
    }
}
