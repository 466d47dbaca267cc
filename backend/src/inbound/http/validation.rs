//! Shared validation helpers for inbound HTTP adapters.

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::Error;

/// Machine-readable reason placed in `details.code` of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DetailCode {
    MissingField,
    InvalidId,
    InvalidTimestamp,
    InvalidField,
}

impl DetailCode {
    fn as_str(self) -> &'static str {
        match self {
            DetailCode::MissingField => "missing_field",
            DetailCode::InvalidId => "invalid_id",
            DetailCode::InvalidTimestamp => "invalid_timestamp",
            DetailCode::InvalidField => "invalid_field",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("missing required field: {field}")).with_details(json!({
        "field": field,
        "code": DetailCode::MissingField.as_str(),
    }))
}

/// Field failed a domain validation rule; `message` is the rule's rendering.
pub(crate) fn invalid_field_error(field: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": DetailCode::InvalidField.as_str(),
    }))
}

/// Identifiers that are not integers are malformed, unlike well-formed ids
/// that simply match nothing.
pub(crate) fn parse_id(value: &str, field: FieldName) -> Result<i64, Error> {
    value.trim().parse::<i64>().map_err(|_| {
        let field = field.as_str();
        Error::malformed_request(format!("{field} must be a numeric identifier")).with_details(
            json!({
                "field": field,
                "value": value,
                "code": DetailCode::InvalidId.as_str(),
            }),
        )
    })
}

pub(crate) fn parse_rfc3339_timestamp(
    value: &str,
    field: FieldName,
) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|_| {
            let field = field.as_str();
            Error::invalid_request(format!("{field} must be an RFC 3339 timestamp")).with_details(
                json!({
                    "field": field,
                    "value": value,
                    "code": DetailCode::InvalidTimestamp.as_str(),
                }),
            )
        })
}
