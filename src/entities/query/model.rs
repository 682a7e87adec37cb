//! Query model and its conversion from the raw entity

use super::entity::{Citation, QueryEntity};
use crate::config::ConverterConfig;
use crate::core::error::ModelValidationFailure;
use crate::core::field::{self, coerce_timestamp, truthy};
use crate::core::identifier;
use crate::core::model::Model;
use crate::core::schema::{FieldDescriptor, FieldKind, ModelSchema};
use crate::core::validation::{IssueSink, validators};
use crate::entities::organisation::OrganisationRef;
use crate::entities::organisation::model::validate_references;
use crate::literal_enum;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

literal_enum! {
    /// The external platform a query is submitted to
    pub enum Platform {
        ChatGpt => "ChatGPT",
        Gemini => "Gemini",
        Perplexity => "Perplexity",
    }
}

/// A tracked prompt with the organisations following it
///
/// Timestamps are left out of the output entirely when the record has none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QueryModel {
    #[validate(custom(function = "validators::object_id"))]
    pub id: String,
    pub prompt: Option<String>,
    #[validate(custom(function = "validate_references"))]
    pub tracking_orgs: Vec<OrganisationRef>,
    pub platform: Option<Platform>,
    pub citations: Vec<Option<Citation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl QueryModel {
    /// Convert with the default configuration
    pub fn convert_from_entity(entity: &QueryEntity) -> Result<Self, ModelValidationFailure> {
        Self::convert_with(entity, &ConverterConfig::default())
    }

    pub fn convert_with(
        entity: &QueryEntity,
        config: &ConverterConfig,
    ) -> Result<Self, ModelValidationFailure> {
        let mut sink = IssueSink::new();

        let id = sink.check("id", identifier::canonical_id(&entity.id));
        let platform = sink.check(
            "platform",
            field::parse_literal(truthy(&entity.platform).as_ref()),
        );
        let created_at = sink.check("createdAt", coerce_timestamp(entity.created_at.as_ref()));
        let updated_at = sink.check("updatedAt", coerce_timestamp(entity.updated_at.as_ref()));

        // Each entry is resolved on its own; ids and embedded records may mix.
        let tracking_orgs = entity
            .tracking_orgs
            .iter()
            .flatten()
            .enumerate()
            .map(|(index, reference)| {
                sink.nested(
                    &format!("trackingOrgs[{}]", index),
                    OrganisationRef::resolve(reference, config).map_err(|f| f.issues),
                )
            })
            .collect();

        sink.finish(Self::NAME)?;

        Self {
            id,
            prompt: truthy(&entity.prompt),
            tracking_orgs,
            platform,
            citations: entity.citations.clone().unwrap_or_default(),
            created_at,
            updated_at,
        }
        .finalize()
    }

    /// Canonical ids of every tracking organisation, embedded or not
    pub fn tracking_org_ids(&self) -> Vec<&str> {
        self.tracking_orgs.iter().map(OrganisationRef::id).collect()
    }
}

impl Model for QueryModel {
    type Entity = QueryEntity;
}

impl ModelSchema for QueryModel {
    const NAME: &'static str = "query";

    fn fields() -> &'static [FieldDescriptor] {
        use FieldKind::*;
        const FIELDS: &[FieldDescriptor] = &[
            FieldDescriptor::new("id", Identifier),
            FieldDescriptor::new("prompt", String).nullable(),
            FieldDescriptor::new("trackingOrgs", Array { items: &Reference { target: "organisation" } })
                .describe("Organisations tracking this query"),
            FieldDescriptor::new("platform", Enum { values: Platform::VALUES }).nullable(),
            FieldDescriptor::new("citations", Array { items: &Object { schema: "citation" } })
                .describe("Brand mentions and links from the platform response"),
            FieldDescriptor::new("createdAt", Timestamp).optional(),
            FieldDescriptor::new("updatedAt", Timestamp).optional(),
        ];
        FIELDS
    }
}

impl ModelSchema for Citation {
    const NAME: &'static str = "citation";

    fn fields() -> &'static [FieldDescriptor] {
        const FIELDS: &[FieldDescriptor] = &[
            FieldDescriptor::new("brandName", FieldKind::String)
                .optional()
                .describe("Name of the brand mentioned"),
            FieldDescriptor::new("brandDomain", FieldKind::String)
                .optional()
                .describe("Domain of the brand mentioned"),
            FieldDescriptor::new("link", FieldKind::String).optional().describe("URL cited"),
            FieldDescriptor::new("linkText", FieldKind::String)
                .optional()
                .describe("Text of the link"),
            FieldDescriptor::new("position", FieldKind::Number)
                .optional()
                .describe("The 0th index of where the citation appears relative to others"),
        ];
        FIELDS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identifier::Reference;
    use crate::entities::organisation::OrganisationEntity;
    use bson::Bson;
    use bson::oid::ObjectId;

    const HEX: &str = "507f191e810c19729de860ea";
    const ORG_HEX: &str = "65a1b2c3d4e5f60718293a4b";

    fn entity() -> QueryEntity {
        QueryEntity {
            id: Bson::ObjectId(ObjectId::parse_str(HEX).unwrap()),
            ..Default::default()
        }
    }

    #[test]
    fn test_minimal_entity_omits_timestamps() {
        let model = QueryModel::convert_from_entity(&entity()).unwrap();
        assert_eq!(model.id, HEX);
        assert_eq!(model.prompt, None);
        assert!(model.tracking_orgs.is_empty());
        assert!(model.citations.is_empty());
        assert_eq!(model.platform, None);

        let json = model.to_json().unwrap();
        assert!(json.get("createdAt").is_none());
        assert!(json.get("updatedAt").is_none());
        assert_eq!(json["prompt"], serde_json::Value::Null);
    }

    #[test]
    fn test_mixed_tracking_orgs_keep_order() {
        let mut e = entity();
        e.tracking_orgs = Some(vec![
            Reference::Id(ObjectId::parse_str(ORG_HEX).unwrap()),
            Reference::Embedded(Box::new(OrganisationEntity {
                id: Bson::String(HEX.to_uppercase()),
                name: Some("Acme".to_string()),
                ..Default::default()
            })),
        ]);

        let model = QueryModel::convert_from_entity(&e).unwrap();
        assert_eq!(model.tracking_orgs[0], OrganisationRef::Id(ORG_HEX.to_string()));
        let nested = model.tracking_orgs[1].as_model().unwrap();
        assert_eq!(nested.id, HEX);
        assert_eq!(nested.name.as_deref(), Some("Acme"));
        assert_eq!(model.tracking_org_ids(), vec![ORG_HEX, HEX]);
    }

    #[test]
    fn test_invalid_embedded_org_reports_index() {
        let mut e = entity();
        e.tracking_orgs = Some(vec![
            Reference::Id(ObjectId::new()),
            Reference::Embedded(Box::new(OrganisationEntity {
                id: Bson::String("not-an-id".to_string()),
                ..Default::default()
            })),
        ]);

        let failure = QueryModel::convert_from_entity(&e).unwrap_err();
        assert_eq!(failure.model, "query");
        assert!(failure.has_issue("trackingOrgs[1].id"));
    }

    #[test]
    fn test_citations_are_not_sorted() {
        let mut e = entity();
        e.citations = Some(vec![
            Some(Citation {
                position: Some(1),
                link: Some("https://x.com".to_string()),
                ..Default::default()
            }),
            Some(Citation {
                position: Some(0),
                link: Some("https://y.com".to_string()),
                ..Default::default()
            }),
        ]);

        let model = QueryModel::convert_from_entity(&e).unwrap();
        let positions: Vec<_> = model.citations.iter().flatten().map(|c| c.position).collect();
        assert_eq!(positions, vec![Some(1), Some(0)]);
    }

    #[test]
    fn test_null_citation_keeps_its_slot() {
        let mut e = entity();
        e.citations = Some(vec![
            Some(Citation {
                link: Some("https://x.com".to_string()),
                position: Some(0),
                ..Default::default()
            }),
            None,
        ]);

        let model = QueryModel::convert_from_entity(&e).unwrap();
        assert_eq!(model.citations.len(), 2);
        assert_eq!(model.citations[1], None);

        let json = model.to_json().unwrap();
        assert_eq!(
            json["citations"],
            serde_json::json!([{ "link": "https://x.com", "position": 0 }, null])
        );
    }

    #[test]
    fn test_platform_parsing() {
        let mut e = entity();
        e.platform = Some("ChatGPT".to_string());
        assert_eq!(
            QueryModel::convert_from_entity(&e).unwrap().platform,
            Some(Platform::ChatGpt)
        );

        e.platform = Some("Bard".to_string());
        let failure = QueryModel::convert_from_entity(&e).unwrap_err();
        assert!(failure.has_issue("platform"));
    }

    #[test]
    fn test_truthy_timestamps_are_kept() {
        let mut e = entity();
        e.created_at = Some(Bson::DateTime(bson::DateTime::from_millis(1_700_000_000_000)));
        e.updated_at = Some(Bson::DateTime(bson::DateTime::from_millis(0)));

        let model = QueryModel::convert_from_entity(&e).unwrap();
        assert_eq!(model.created_at.unwrap().timestamp_millis(), 1_700_000_000_000);
        assert_eq!(model.updated_at, None);
    }
}
