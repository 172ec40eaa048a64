//! Shared validation helpers for inbound HTTP adapters.
//!
//! Field failures become `invalid_request` errors whose `details` name the
//! offending field and a stable code.

use serde_json::json;

use crate::domain::{Error, LoginValidationError, PostId, PostValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    InvalidInteger,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidInteger => "invalid_integer",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, code: ValidationCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

/// Map post validation failures to field-level 400 errors.
pub(crate) fn post_validation_error(err: PostValidationError) -> Error {
    field_error(
        FieldName::new(err.field()),
        ValidationCode::MissingField,
        err.to_string(),
    )
}

/// Map login validation failures to field-level 400 errors.
pub(crate) fn login_validation_error(err: LoginValidationError) -> Error {
    field_error(
        FieldName::new(err.field()),
        ValidationCode::MissingField,
        err.to_string(),
    )
}

/// Parse a post identifier from a path segment.
pub(crate) fn parse_post_id(raw: &str) -> Result<PostId, Error> {
    raw.parse::<PostId>().map_err(|err| {
        field_error(
            FieldName::new("id"),
            ValidationCode::InvalidInteger,
            err.to_string(),
        )
    })
}
