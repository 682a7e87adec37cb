//! Query: a prompt tracked against an external language-model platform

pub mod entity;
pub mod model;

pub use entity::{Citation, QueryEntity};
pub use model::{Platform, QueryModel};
