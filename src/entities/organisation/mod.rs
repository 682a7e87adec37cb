//! Organisation: the tenant root, and the only entity carrying credentials

pub mod entity;
pub mod model;

pub use entity::{
    GithubSettingsEntity, LlmsSettingsEntity, OrganisationEntity, ScanEntity,
    ShopifyConnectionEntity,
};
pub use model::{
    BillingPlanStatus, GithubSettings, LlmsSettings, OrganisationModel, OrganisationRef, Scan,
    ScanStatus, ShopifyConnection, ShopifyConnectionStatus,
};
