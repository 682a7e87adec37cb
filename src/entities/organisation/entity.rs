//! Raw persisted shape of an organisation (the tenant root)

use crate::core::field;
use crate::impl_entity;
use bson::Bson;
use serde::{Deserialize, Serialize};

/// Shopify credentials as stored. Sensitive: only privileged conversions
/// copy them into the model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopifyConnectionEntity {
    pub api_key: Option<String>,
    pub domain: Option<String>,
    /// The scopes approved (comma separated string)
    pub scopes: Option<String>,
}

/// Result of an asynchronous scan (social media, homepage schema, review sites)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanEntity {
    pub details: Option<String>,
    #[serde(default)]
    pub updated_at: Option<Bson>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmsSettingsEntity {
    pub url: Option<String>,
    #[serde(default)]
    pub updated_at: Option<Bson>,
    pub prompt: Option<String>,
    pub products_enabled: Option<bool>,
    pub collections_enabled: Option<bool>,
    pub articles_enabled: Option<bool>,
    pub pages_enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubSettingsEntity {
    pub url: Option<String>,
    #[serde(default)]
    pub updated_at: Option<Bson>,
}

/// An organisation record as the persistence layer hands it over
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrganisationEntity {
    #[serde(rename = "_id", alias = "id")]
    pub id: Bson,
    pub country: Option<String>,
    pub contact_email: Option<String>,
    pub locale: Option<String>,
    pub reviewed: Option<bool>,
    pub rating: Option<f64>,
    pub plan: Option<String>,
    pub website: Option<String>,
    pub settings_last_synced: Option<Bson>,
    pub created_at: Option<Bson>,
    pub shopify_connection: Option<ShopifyConnectionEntity>,
    pub shopify_connection_status: Option<String>,
    pub name: Option<String>,
    pub social_media_scan: Option<ScanEntity>,
    pub homepage_schema_scan: Option<ScanEntity>,
    pub review_sites_scan: Option<ScanEntity>,
    pub llms_settings: Option<LlmsSettingsEntity>,
    pub github_settings: Option<GithubSettingsEntity>,
    pub onboarded: Option<bool>,
    #[serde(deserialize_with = "field::deserialize_integer")]
    pub queries_added_this_month: Option<i64>,
    pub topics: Option<Vec<String>>,
    pub billing_plan_status: Option<String>,
    pub billing_subscription_id: Option<String>,
    pub billing_plan_handle: Option<String>,
    pub billing_updated_at: Option<Bson>,
}

impl_entity!(OrganisationEntity, "organisation");
