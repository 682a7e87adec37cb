//! Custom validators plugged into `#[validate(custom(...))]` attributes

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;
use validator::ValidationError;

fn canonical_hex() -> &'static Regex {
    static CANONICAL_HEX: OnceLock<Regex> = OnceLock::new();
    CANONICAL_HEX.get_or_init(|| Regex::new(r"^[0-9a-f]{24}$").unwrap())
}

/// Validator: value is a canonical (lowercase, 24 hex) identifier string
pub fn object_id(value: &str) -> Result<(), ValidationError> {
    if canonical_hex().is_match(value) {
        Ok(())
    } else {
        Err(error(
            "object_id",
            format!("'{}' is not a canonical identifier", value),
        ))
    }
}

/// Build a `ValidationError` with a message
pub fn error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}
