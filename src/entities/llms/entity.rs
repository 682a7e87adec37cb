//! Raw persisted shape of a generated llms file record

use crate::core::field;
use crate::core::identifier::Reference;
use crate::entities::organisation::OrganisationEntity;
use crate::impl_entity;
use bson::Bson;
use serde::{Deserialize, Serialize};

/// An llms file record as the persistence layer hands it over
///
/// `generation_requested_at` is set while a regeneration is pending and
/// cleared once the file has been written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LlmsEntity {
    #[serde(rename = "_id", alias = "id")]
    pub id: Bson,
    pub org: Option<Reference<OrganisationEntity>>,
    pub domain: Option<String>,
    pub created_at: Option<Bson>,
    pub updated_at: Option<Bson>,
    pub generation_requested_at: Option<Bson>,
    pub last_hit: Option<Bson>,
    #[serde(deserialize_with = "field::deserialize_integer")]
    pub total_hits: Option<i64>,
    #[serde(deserialize_with = "field::deserialize_integer")]
    pub total_links: Option<i64>,
    pub generated_file: Option<String>,
    pub github_link: Option<String>,
}

impl_entity!(LlmsEntity, "llms");
