//! Llms: the generated llms file record owned by one organisation

pub mod entity;
pub mod model;

pub use entity::LlmsEntity;
pub use model::LlmsModel;
