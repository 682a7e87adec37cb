//! Organisation model and its conversion from the raw entity

use super::entity::{
    GithubSettingsEntity, LlmsSettingsEntity, OrganisationEntity, ScanEntity,
    ShopifyConnectionEntity,
};
use crate::config::ConverterConfig;
use crate::core::error::{FieldIssue, ModelValidationFailure};
use crate::core::field::{self, coerce_timestamp, coerce_timestamp_raw, truthy, truthy_or};
use crate::core::identifier::{self, Reference};
use crate::core::model::Model;
use crate::core::schema::{FieldDescriptor, FieldKind, ModelSchema};
use crate::core::validation::{IssueSink, validators};
use crate::literal_enum;
use bson::Bson;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

literal_enum! {
    /// State of the Shopify app installation
    #[derive(Default)]
    pub enum ShopifyConnectionStatus {
        Active => "ACTIVE",
        Pending => "PENDING",
        #[default]
        Inactive => "INACTIVE",
        Error => "ERROR",
    }
}

literal_enum! {
    pub enum ScanStatus {
        Success => "SUCCESS",
        Warning => "WARNING",
        Error => "ERROR",
    }
}

literal_enum! {
    #[derive(Default)]
    pub enum BillingPlanStatus {
        #[default]
        Inactive => "INACTIVE",
        Active => "ACTIVE",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopifyConnection {
    pub api_key: String,
    pub domain: String,
    pub scopes: Option<String>,
}

impl ShopifyConnection {
    fn from_entity(entity: &ShopifyConnectionEntity) -> Result<Self, Vec<FieldIssue>> {
        let mut sink = IssueSink::new();
        let api_key = sink.check("apiKey", required(&entity.api_key));
        let domain = sink.check("domain", required(&entity.domain));
        sink.into_result(Self {
            api_key,
            domain,
            scopes: entity.scopes.clone(),
        })
    }
}

/// A scanned resource; absent means not scanned yet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scan {
    pub details: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
    pub status: Option<ScanStatus>,
}

impl Scan {
    fn from_entity(entity: &ScanEntity) -> Result<Self, Vec<FieldIssue>> {
        let mut sink = IssueSink::new();
        let updated_at = sink.check("updatedAt", coerce_timestamp_raw(entity.updated_at.as_ref()));
        let status = sink.check("status", field::parse_literal(entity.status.as_ref()));
        sink.into_result(Self {
            details: entity.details.clone(),
            updated_at,
            status,
        })
    }
}

/// Generation settings of the llms file; absent means not enabled
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmsSettings {
    pub url: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
    pub prompt: Option<String>,
    pub products_enabled: Option<bool>,
    pub collections_enabled: Option<bool>,
    pub articles_enabled: Option<bool>,
    pub pages_enabled: Option<bool>,
}

impl LlmsSettings {
    fn from_entity(entity: &LlmsSettingsEntity) -> Result<Self, Vec<FieldIssue>> {
        let mut sink = IssueSink::new();
        let updated_at = sink.check("updatedAt", coerce_timestamp_raw(entity.updated_at.as_ref()));
        sink.into_result(Self {
            url: entity.url.clone(),
            updated_at,
            prompt: entity.prompt.clone(),
            products_enabled: entity.products_enabled,
            collections_enabled: entity.collections_enabled,
            articles_enabled: entity.articles_enabled,
            pages_enabled: entity.pages_enabled,
        })
    }
}

/// GitHub publishing settings; absent means not enabled
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubSettings {
    pub url: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl GithubSettings {
    fn from_entity(entity: &GithubSettingsEntity) -> Result<Self, Vec<FieldIssue>> {
        let mut sink = IssueSink::new();
        let updated_at = sink.check("updatedAt", coerce_timestamp_raw(entity.updated_at.as_ref()));
        sink.into_result(Self {
            url: entity.url.clone(),
            updated_at,
        })
    }
}

/// Client-safe projection of an organisation
///
/// `shopify_connection` is only ever populated by a privileged conversion.
/// `shopify_site` and `shopify_connection_status` are always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationModel {
    #[validate(custom(function = "validators::object_id"))]
    pub id: String,
    pub country: Option<String>,
    pub contact_email: Option<String>,
    pub locale: Option<String>,
    pub reviewed: Option<bool>,
    pub rating: Option<f64>,
    pub plan: Option<String>,
    pub website: Option<String>,
    pub shopify_connection: Option<ShopifyConnection>,
    pub shopify_connection_status: ShopifyConnectionStatus,
    pub name: Option<String>,
    pub social_media_scan: Option<Scan>,
    pub homepage_schema_scan: Option<Scan>,
    pub review_sites_scan: Option<Scan>,
    pub llms_settings: Option<LlmsSettings>,
    pub github_settings: Option<GithubSettings>,
    pub onboarded: bool,
    pub queries_added_this_month: i64,
    pub topics: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub settings_last_synced: Option<DateTime<Utc>>,
    pub shopify_site: Option<String>,
    pub billing_plan_status: BillingPlanStatus,
    pub billing_subscription_id: Option<String>,
    pub billing_plan_handle: Option<String>,
    pub billing_updated_at: Option<DateTime<Utc>>,
}

impl OrganisationModel {
    /// Convert with the default configuration
    pub fn convert_from_entity(
        entity: &OrganisationEntity,
        privileged: bool,
    ) -> Result<Self, ModelValidationFailure> {
        Self::convert_with(entity, privileged, &ConverterConfig::default())
    }

    /// Convert an organisation entity, including the Shopify credentials
    /// only when `privileged` is set
    pub fn convert_with(
        entity: &OrganisationEntity,
        privileged: bool,
        config: &ConverterConfig,
    ) -> Result<Self, ModelValidationFailure> {
        if privileged && config.audit_privileged_access {
            tracing::warn!(
                organisation_id = %entity.id,
                "organisation converted with credentials included"
            );
        }

        let mut sink = IssueSink::new();

        let id = sink.check("id", identifier::canonical_id(&entity.id));
        let created_at = sink.check(
            "createdAt",
            resolve_created_at(entity.created_at.as_ref(), config),
        );
        let settings_last_synced = sink.check(
            "settingsLastSynced",
            coerce_timestamp(entity.settings_last_synced.as_ref()),
        );
        let billing_updated_at = sink.check(
            "billingUpdatedAt",
            coerce_timestamp(entity.billing_updated_at.as_ref()),
        );

        let shopify_connection_status = sink.check(
            "shopifyConnectionStatus",
            parse_or_default(&entity.shopify_connection_status),
        );
        let billing_plan_status = sink.check(
            "billingPlanStatus",
            parse_or_default(&entity.billing_plan_status),
        );

        let shopify_connection = match (&entity.shopify_connection, privileged) {
            (Some(connection), true) => sink.nested(
                "shopifyConnection",
                ShopifyConnection::from_entity(connection).map(Some),
            ),
            _ => None,
        };
        let shopify_site = entity
            .shopify_connection
            .as_ref()
            .and_then(|c| truthy(&c.domain));

        let social_media_scan = sink.nested(
            "socialMediaScan",
            entity.social_media_scan.as_ref().map(Scan::from_entity).transpose(),
        );
        let homepage_schema_scan = sink.nested(
            "homepageSchemaScan",
            entity.homepage_schema_scan.as_ref().map(Scan::from_entity).transpose(),
        );
        let review_sites_scan = sink.nested(
            "reviewSitesScan",
            entity.review_sites_scan.as_ref().map(Scan::from_entity).transpose(),
        );
        let llms_settings = sink.nested(
            "llmsSettings",
            entity.llms_settings.as_ref().map(LlmsSettings::from_entity).transpose(),
        );
        let github_settings = sink.nested(
            "githubSettings",
            entity.github_settings.as_ref().map(GithubSettings::from_entity).transpose(),
        );

        sink.finish(Self::NAME)?;

        Self {
            id,
            country: truthy(&entity.country),
            contact_email: truthy(&entity.contact_email),
            locale: truthy(&entity.locale),
            reviewed: truthy(&entity.reviewed),
            rating: truthy(&entity.rating),
            plan: truthy(&entity.plan),
            website: truthy(&entity.website),
            shopify_connection,
            shopify_connection_status,
            name: truthy(&entity.name),
            social_media_scan,
            homepage_schema_scan,
            review_sites_scan,
            llms_settings,
            github_settings,
            onboarded: truthy_or(&entity.onboarded, false),
            queries_added_this_month: truthy_or(&entity.queries_added_this_month, 0),
            topics: truthy_or(&entity.topics, Vec::new()),
            created_at,
            settings_last_synced,
            shopify_site,
            billing_plan_status,
            billing_subscription_id: truthy(&entity.billing_subscription_id),
            billing_plan_handle: truthy(&entity.billing_plan_handle),
            billing_updated_at,
        }
        .finalize()
    }

    /// Whether the credentials were included in this projection
    pub fn includes_credentials(&self) -> bool {
        self.shopify_connection.is_some()
    }
}

// A missing or falsy creation time becomes "now". An explicit zero epoch is
// only kept when the configuration asks for it.
fn resolve_created_at(
    raw: Option<&Bson>,
    config: &ConverterConfig,
) -> Result<DateTime<Utc>, String> {
    let coerced = if config.preserve_zero_created_at {
        match raw {
            Some(Bson::String(s)) if s.is_empty() => None,
            other => coerce_timestamp_raw(other)?,
        }
    } else {
        coerce_timestamp(raw)?
    };
    Ok(coerced.unwrap_or_else(Utc::now))
}

fn parse_or_default<T>(raw: &Option<String>) -> Result<T, String>
where
    T: std::str::FromStr<Err = String> + Default,
{
    Ok(field::parse_literal(truthy(raw).as_ref())?.unwrap_or_default())
}

fn required(value: &Option<String>) -> Result<String, &'static str> {
    value.clone().ok_or("required")
}

/// A resolved organisation reference: the canonical id, or the nested model
/// when the record was embedded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrganisationRef {
    Id(String),
    Model(Box<OrganisationModel>),
}

impl Default for OrganisationRef {
    fn default() -> Self {
        OrganisationRef::Id(String::new())
    }
}

impl OrganisationRef {
    /// Resolve a reference field; embedded organisations are converted
    /// without credentials
    pub fn resolve(
        reference: &Reference<OrganisationEntity>,
        config: &ConverterConfig,
    ) -> Result<Self, ModelValidationFailure> {
        reference.resolve(OrganisationRef::Id, |entity| {
            OrganisationModel::convert_with(entity, false, config)
                .map(|model| OrganisationRef::Model(Box::new(model)))
        })
    }

    pub fn id(&self) -> &str {
        match self {
            OrganisationRef::Id(id) => id,
            OrganisationRef::Model(model) => &model.id,
        }
    }

    pub fn as_model(&self) -> Option<&OrganisationModel> {
        match self {
            OrganisationRef::Id(_) => None,
            OrganisationRef::Model(model) => Some(model),
        }
    }
}

/// Validator: a reference is a canonical id or a valid nested organisation
pub fn validate_reference(reference: &OrganisationRef) -> Result<(), ValidationError> {
    match reference {
        OrganisationRef::Id(id) => validators::object_id(id),
        OrganisationRef::Model(model) => model.validate().map_err(|errors| {
            validators::error("organisation", format!("invalid organisation: {}", errors))
        }),
    }
}

/// Validator: every entry of a reference list is valid; all failing
/// indices are listed in the message
pub fn validate_references(references: &[OrganisationRef]) -> Result<(), ValidationError> {
    let failures: Vec<String> = references
        .iter()
        .enumerate()
        .filter_map(|(index, reference)| {
            validate_reference(reference).err().map(|err| {
                let detail = err.message.as_deref().unwrap_or("invalid reference");
                format!("[{}] {}", index, detail)
            })
        })
        .collect();

    if failures.is_empty() {
        Ok(())
    } else {
        Err(validators::error("organisation_list", failures.join("; ")))
    }
}

impl Model for OrganisationModel {
    type Entity = OrganisationEntity;
}

impl ModelSchema for OrganisationModel {
    const NAME: &'static str = "organisation";

    fn fields() -> &'static [FieldDescriptor] {
        use FieldKind::*;
        const FIELDS: &[FieldDescriptor] = &[
            FieldDescriptor::new("id", Identifier),
            FieldDescriptor::new("country", String).nullable().describe("country of origin"),
            FieldDescriptor::new("contactEmail", String)
                .nullable()
                .describe("The email to contact for this org"),
            FieldDescriptor::new("locale", String).nullable().describe("shop locale / language"),
            FieldDescriptor::new("reviewed", Boolean)
                .nullable()
                .describe("whether or not store has engaged with review element"),
            FieldDescriptor::new("rating", Number).nullable().describe("rating score"),
            FieldDescriptor::new("plan", String).nullable().describe("shopify plan"),
            FieldDescriptor::new("website", String).nullable().describe("website URL"),
            FieldDescriptor::new("shopifyConnection", Object { schema: "shopifyConnection" })
                .nullable()
                .describe("Shopify credentials, only present for privileged callers"),
            FieldDescriptor::new(
                "shopifyConnectionStatus",
                Enum { values: ShopifyConnectionStatus::VALUES },
            ),
            FieldDescriptor::new("name", String).nullable().describe("Org/brand name"),
            FieldDescriptor::new("socialMediaScan", Object { schema: "scan" })
                .nullable()
                .describe("A scanned resource e.g. social media or reviews, null infers not scanned"),
            FieldDescriptor::new("homepageSchemaScan", Object { schema: "scan" })
                .nullable()
                .describe("A scanned resource e.g. social media or reviews, null infers not scanned"),
            FieldDescriptor::new("reviewSitesScan", Object { schema: "scan" })
                .nullable()
                .describe("A scanned resource e.g. social media or reviews, null infers not scanned"),
            FieldDescriptor::new("llmsSettings", Object { schema: "llmsSettings" })
                .nullable()
                .describe("Null infers not enabled"),
            FieldDescriptor::new("githubSettings", Object { schema: "githubSettings" })
                .nullable()
                .describe("Null infers not enabled"),
            FieldDescriptor::new("onboarded", Boolean)
                .describe("Whether org has completed onboarding"),
            FieldDescriptor::new("queriesAddedThisMonth", Number)
                .describe("We track total queries added to prevent abuse"),
            FieldDescriptor::new("topics", Array { items: &String }).describe("Suggested topics"),
            FieldDescriptor::new("createdAt", Timestamp),
            FieldDescriptor::new("settingsLastSynced", Timestamp).nullable(),
            FieldDescriptor::new("shopifySite", String)
                .nullable()
                .describe("The connected shop domain"),
            FieldDescriptor::new("billingPlanStatus", Enum { values: BillingPlanStatus::VALUES }),
            FieldDescriptor::new("billingSubscriptionId", String).nullable(),
            FieldDescriptor::new("billingPlanHandle", String).nullable(),
            FieldDescriptor::new("billingUpdatedAt", Timestamp).nullable(),
        ];
        FIELDS
    }
}

impl ModelSchema for ShopifyConnection {
    const NAME: &'static str = "shopifyConnection";

    fn fields() -> &'static [FieldDescriptor] {
        const FIELDS: &[FieldDescriptor] = &[
            FieldDescriptor::new("apiKey", FieldKind::String),
            FieldDescriptor::new("domain", FieldKind::String),
            FieldDescriptor::new("scopes", FieldKind::String)
                .nullable()
                .describe("The scopes approved (comma separated string)"),
        ];
        FIELDS
    }
}

impl ModelSchema for Scan {
    const NAME: &'static str = "scan";

    fn fields() -> &'static [FieldDescriptor] {
        const FIELDS: &[FieldDescriptor] = &[
            FieldDescriptor::new("details", FieldKind::String)
                .nullable()
                .describe("Describes issues or warnings etc from scan results"),
            FieldDescriptor::new("updatedAt", FieldKind::Timestamp).nullable(),
            FieldDescriptor::new("status", FieldKind::Enum { values: ScanStatus::VALUES })
                .nullable(),
        ];
        FIELDS
    }
}

impl ModelSchema for LlmsSettings {
    const NAME: &'static str = "llmsSettings";

    fn fields() -> &'static [FieldDescriptor] {
        const FIELDS: &[FieldDescriptor] = &[
            FieldDescriptor::new("url", FieldKind::String).nullable(),
            FieldDescriptor::new("updatedAt", FieldKind::Timestamp).nullable(),
            FieldDescriptor::new("prompt", FieldKind::String)
                .nullable()
                .describe("User can add extra text"),
            FieldDescriptor::new("productsEnabled", FieldKind::Boolean).nullable(),
            FieldDescriptor::new("collectionsEnabled", FieldKind::Boolean).nullable(),
            FieldDescriptor::new("articlesEnabled", FieldKind::Boolean).nullable(),
            FieldDescriptor::new("pagesEnabled", FieldKind::Boolean).nullable(),
        ];
        FIELDS
    }
}

impl ModelSchema for GithubSettings {
    const NAME: &'static str = "githubSettings";

    fn fields() -> &'static [FieldDescriptor] {
        const FIELDS: &[FieldDescriptor] = &[
            FieldDescriptor::new("url", FieldKind::String).nullable(),
            FieldDescriptor::new("updatedAt", FieldKind::Timestamp).nullable(),
        ];
        FIELDS
    }
}
