//! Entity records and their validated models

pub mod macros;

pub mod llms;
pub mod organisation;
pub mod query;

pub use llms::{LlmsEntity, LlmsModel};
pub use organisation::{OrganisationEntity, OrganisationModel, OrganisationRef};
pub use query::{Citation, Platform, QueryEntity, QueryModel};
