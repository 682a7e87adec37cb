//! Raw persisted shape of a tracked query

use crate::core::field;
use crate::core::identifier::Reference;
use crate::entities::organisation::OrganisationEntity;
use crate::impl_entity;
use bson::Bson;
use serde::{Deserialize, Serialize};

/// A brand mention or link from the platform's response
///
/// Stored and returned as-is: `position` is the 0th index of where the
/// citation appears relative to the others, as reported upstream. Null
/// entries in the stored list are kept where they are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_text: Option<String>,
    #[serde(
        default,
        deserialize_with = "field::deserialize_integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub position: Option<i64>,
}

/// A query record as the persistence layer hands it over
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryEntity {
    #[serde(rename = "_id", alias = "id")]
    pub id: Bson,
    pub prompt: Option<String>,
    pub tracking_orgs: Option<Vec<Reference<OrganisationEntity>>>,
    pub platform: Option<String>,
    pub citations: Option<Vec<Option<Citation>>>,
    pub created_at: Option<Bson>,
    pub updated_at: Option<Bson>,
}

impl_entity!(QueryEntity, "query");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Entity;
    use bson::doc;
    use bson::oid::ObjectId;

    #[test]
    fn test_decode_mixed_tracking_orgs() {
        let first = ObjectId::new();
        let second = ObjectId::new();
        let entity = QueryEntity::from_document(doc! {
            "_id": ObjectId::new(),
            "prompt": "best running shoes",
            "trackingOrgs": [first, { "_id": second, "name": "Acme" }],
            "citations": [{ "link": "https://x.com", "position": 0 }],
        })
        .unwrap();

        let orgs = entity.tracking_orgs.unwrap();
        assert_eq!(orgs[0], Reference::Id(first));
        assert!(matches!(orgs[1], Reference::Embedded(_)));
        assert_eq!(entity.citations.unwrap()[0].as_ref().unwrap().position, Some(0));
    }

    #[test]
    fn test_null_citation_entries_decode() {
        let entity = QueryEntity::from_document(doc! {
            "_id": ObjectId::new(),
            "citations": [{ "link": "https://x.com", "position": 0 }, null],
        })
        .unwrap();

        let citations = entity.citations.unwrap();
        assert_eq!(citations.len(), 2);
        assert!(citations[0].is_some());
        assert_eq!(citations[1], None);
    }

    #[test]
    fn test_whole_double_position_decodes() {
        let entity = QueryEntity::from_document(doc! {
            "_id": ObjectId::new(),
            "citations": [{ "link": "https://x.com", "position": 2.0 }],
        })
        .unwrap();
        assert_eq!(entity.citations.unwrap()[0].as_ref().unwrap().position, Some(2));

        let err = QueryEntity::from_document(doc! {
            "_id": ObjectId::new(),
            "citations": [{ "position": 1.5 }],
        })
        .unwrap_err();
        assert_eq!(err.entity, "query");
    }

    #[test]
    fn test_scalar_tracking_org_is_a_decode_error() {
        let err = QueryEntity::from_document(doc! {
            "_id": ObjectId::new(),
            "trackingOrgs": [42],
        })
        .unwrap_err();
        assert_eq!(err.entity, "query");
    }

    #[test]
    fn test_citation_omits_missing_keys() {
        let citation = Citation {
            link: Some("https://x.com".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&citation).unwrap(),
            serde_json::json!({ "link": "https://x.com" })
        );
    }
}
