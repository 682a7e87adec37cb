//! Model validation
//!
//! Models derive `validator::Validate` for the rules their schema declares
//! beyond what the Rust types already enforce. Conversion problems found
//! while assembling a model are gathered in an [`IssueSink`] so a failure
//! reports every offending field at once.

pub mod report;
pub mod validators;

pub use report::{IssueSink, flatten};
