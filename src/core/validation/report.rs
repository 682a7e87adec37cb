//! Collection and flattening of field issues

use crate::core::error::{FieldIssue, ModelValidationFailure};
use std::fmt::Display;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Accumulates field issues while a model is being assembled
///
/// Every check hands back a usable value (the default on failure) so the
/// converter can keep going and report all problems in one failure.
#[derive(Debug, Default)]
pub struct IssueSink {
    issues: Vec<FieldIssue>,
}

impl IssueSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `result`'s error against `field`
    pub fn check<T: Default, E: Display>(&mut self, field: &str, result: Result<T, E>) -> T {
        match result {
            Ok(value) => value,
            Err(e) => {
                self.push(FieldIssue::new(field, e.to_string()));
                T::default()
            }
        }
    }

    /// Record the issues of a sub-record under `field`
    pub fn nested<T: Default>(&mut self, field: &str, result: Result<T, Vec<FieldIssue>>) -> T {
        match result {
            Ok(value) => value,
            Err(issues) => {
                self.issues
                    .extend(issues.into_iter().map(|issue| issue.nested_under(field)));
                T::default()
            }
        }
    }

    pub fn push(&mut self, issue: FieldIssue) {
        self.issues.push(issue);
    }

    /// Hand `value` back if nothing was recorded
    pub fn into_result<T>(self, value: T) -> Result<T, Vec<FieldIssue>> {
        if self.issues.is_empty() {
            Ok(value)
        } else {
            Err(self.issues)
        }
    }

    /// Fail the whole model if anything was recorded
    pub fn finish(self, model: &'static str) -> Result<(), ModelValidationFailure> {
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(ModelValidationFailure::new(model, self.issues))
        }
    }
}

/// Flatten `validator` errors into field issues with camelCase dotted paths
pub fn flatten(errors: &ValidationErrors) -> Vec<FieldIssue> {
    let mut issues = Vec::new();
    collect("", errors, &mut issues);
    issues.sort_by(|a, b| a.field.cmp(&b.field));
    issues
}

fn collect(prefix: &str, errors: &ValidationErrors, out: &mut Vec<FieldIssue>) {
    for (field, kind) in errors.errors() {
        let path = join(prefix, &to_camel_case(&field.to_string()));
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for err in field_errors {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string());
                    out.push(FieldIssue::new(path.clone(), message));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(&format!("{}[{}]", path, index), inner, out);
                }
            }
        }
    }
}

fn join(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

/// `tracking_orgs` -> `trackingOrgs`; already camelCase names pass through
pub fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '_' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
