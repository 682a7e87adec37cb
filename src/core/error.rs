//! Typed error handling for the conversion layer
//!
//! Conversions fail with exactly one error kind, [`ModelValidationFailure`],
//! which signals malformed upstream data or a converter bug. It is never a
//! user error: the API layer is expected to turn it into an internal-error
//! response.
//!
//! # Error Categories
//!
//! - [`ModelValidationFailure`]: the assembled model does not conform to its schema
//! - [`DecodeError`]: a raw document does not match an entity schema
//! - [`ConfigError`]: converter configuration could not be loaded
//!
//! # Example
//!
//! ```rust,ignore
//! use orgview::prelude::*;
//!
//! match OrganisationModel::convert_from_entity(&entity, false) {
//!     Ok(model) => println!("{}", model.id),
//!     Err(failure) => {
//!         for issue in &failure.issues {
//!             eprintln!("{}: {}", issue.field, issue.message);
//!         }
//!     }
//! }
//! ```

use serde::Serialize;
use std::fmt;

/// Umbrella error type for everything this crate can report
#[derive(Debug)]
pub enum Error {
    /// A converted model failed schema validation
    Validation(ModelValidationFailure),

    /// A raw document could not be decoded into an entity
    Decode(DecodeError),

    /// Configuration errors
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Validation(e) => write!(f, "{}", e),
            Error::Decode(e) => write!(f, "{}", e),
            Error::Config(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Validation(e) => Some(e),
            Error::Decode(e) => Some(e),
            Error::Config(e) => Some(e),
        }
    }
}

/// Serializable error body for the API layer
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl Error {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Validation(e) => e.error_code(),
            Error::Decode(_) => "ENTITY_DECODE_ERROR",
            Error::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::Validation(failure) => Some(serde_json::json!({
                "model": failure.model,
                "fields": failure.issues,
            })),
            Error::Decode(DecodeError { entity, .. }) => {
                Some(serde_json::json!({ "entity": entity }))
            }
            Error::Config(_) => None,
        }
    }
}

// =============================================================================
// Model Validation Failures
// =============================================================================

/// A single offending field, addressed by its dotted output path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Prefix the field path, used when an issue bubbles out of a sub-record
    pub fn nested_under(mut self, parent: &str) -> Self {
        self.field = if self.field.starts_with('[') {
            format!("{}{}", parent, self.field)
        } else {
            format!("{}.{}", parent, self.field)
        };
        self
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// The assembled output does not conform to its declared model schema
///
/// Conversions are pure, so retrying with the same input cannot succeed.
/// Nothing is ever partially returned alongside this error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelValidationFailure {
    /// Name of the model that failed (e.g., "organisation")
    pub model: &'static str,
    /// All offending fields, in discovery order
    pub issues: Vec<FieldIssue>,
}

impl ModelValidationFailure {
    pub fn new(model: &'static str, issues: Vec<FieldIssue>) -> Self {
        Self { model, issues }
    }

    pub fn error_code(&self) -> &'static str {
        "MODEL_VALIDATION_FAILURE"
    }

    /// Check whether a given field path was reported
    pub fn has_issue(&self, field: &str) -> bool {
        self.issues.iter().any(|issue| issue.field == field)
    }
}

impl fmt::Display for ModelValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msgs: Vec<String> = self.issues.iter().map(ToString::to_string).collect();
        write!(
            f,
            "{} model failed validation: {}",
            self.model,
            msgs.join(", ")
        )
    }
}

impl std::error::Error for ModelValidationFailure {}

impl From<ModelValidationFailure> for Error {
    fn from(err: ModelValidationFailure) -> Self {
        Error::Validation(err)
    }
}

// =============================================================================
// Decode Errors
// =============================================================================

/// A persisted document did not match the entity shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    pub entity: &'static str,
    pub message: String,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to decode {} entity: {}", self.entity, self.message)
    }
}

impl std::error::Error for DecodeError {}

impl From<DecodeError> for Error {
    fn from(err: DecodeError) -> Self {
        Error::Decode(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to parse configuration
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// IO error while reading configuration
    IoError { path: String, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse config file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse config: {}", message)
                }
            }
            ConfigError::IoError { path, message } => {
                write!(f, "Failed to read config file '{}': {}", path, message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Config(err)
    }
}
