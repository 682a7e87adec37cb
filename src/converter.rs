//! Single entry point for turning persisted records into models
//!
//! Conversions hold no state beyond the configuration, so one `Converter`
//! can be shared freely between threads.

use crate::config::ConverterConfig;
use crate::core::entity::Entity;
use crate::core::error::{Error, ModelValidationFailure};
use crate::entities::llms::{LlmsEntity, LlmsModel};
use crate::entities::organisation::{OrganisationEntity, OrganisationModel};
use crate::entities::query::{QueryEntity, QueryModel};
use bson::Document;

#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: ConverterConfig,
}

impl Converter {
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    /// Convert an organisation; `privileged` callers also get the Shopify
    /// credentials
    pub fn organisation(
        &self,
        entity: &OrganisationEntity,
        privileged: bool,
    ) -> Result<OrganisationModel, ModelValidationFailure> {
        OrganisationModel::convert_with(entity, privileged, &self.config)
    }

    pub fn query(&self, entity: &QueryEntity) -> Result<QueryModel, ModelValidationFailure> {
        QueryModel::convert_with(entity, &self.config)
    }

    pub fn llms(&self, entity: &LlmsEntity) -> Result<LlmsModel, ModelValidationFailure> {
        LlmsModel::convert_with(entity, &self.config)
    }

    /// Decode and convert a raw organisation document
    pub fn organisation_from_document(
        &self,
        doc: Document,
        privileged: bool,
    ) -> Result<OrganisationModel, Error> {
        let entity = OrganisationEntity::from_document(doc)?;
        Ok(self.organisation(&entity, privileged)?)
    }

    pub fn query_from_document(&self, doc: Document) -> Result<QueryModel, Error> {
        let entity = QueryEntity::from_document(doc)?;
        Ok(self.query(&entity)?)
    }

    pub fn llms_from_document(&self, doc: Document) -> Result<LlmsModel, Error> {
        let entity = LlmsEntity::from_document(doc)?;
        Ok(self.llms(&entity)?)
    }
}
