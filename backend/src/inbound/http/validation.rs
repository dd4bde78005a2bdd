//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every validation failure is an `invalid_request` whose details name the
//! offending field and a stable code, plus the rejected value where echoing
//! it is safe.

use serde_json::json;

use crate::domain::{Availability, Error, LoginIdentity, LoginValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    OutOfRange,
    EmptyValue,
    TooLong,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::OutOfRange => "out_of_range",
            ErrorCode::EmptyValue => "empty_value",
            ErrorCode::TooLong => "too_long",
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

    fn as_str(&self) -> &'static str {
        self.0
    }
}

pub(crate) const USER_ID: FieldName = FieldName::new("userId");
pub(crate) const USERNAME: FieldName = FieldName::new("username");
pub(crate) const SCHEDULE_NAME: FieldName = FieldName::new("scheduleName");
pub(crate) const AVAILABILITY: FieldName = FieldName::new("availability");

fn field_error(field: FieldName, code: ErrorCode, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        ErrorCode::MissingField,
        format!("missing required field: {name}"),
    )
}

/// Require an optional body field.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Parse an availability value, accepting only 0, 1 or 2.
pub(crate) fn parse_availability(value: i64) -> Result<Availability, Error> {
    Availability::try_from(value).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": AVAILABILITY.as_str(),
            "value": value,
            "code": ErrorCode::OutOfRange.as_str(),
        }))
    })
}

/// Validate the identity handed over at login.
pub(crate) fn parse_login_identity(user_id: i64, username: &str) -> Result<LoginIdentity, Error> {
    LoginIdentity::try_from_parts(user_id, username).map_err(|err| {
        let (field, code) = match err {
            LoginValidationError::InvalidUserId => (USER_ID, ErrorCode::OutOfRange),
            LoginValidationError::EmptyUsername => (USERNAME, ErrorCode::EmptyValue),
            LoginValidationError::UsernameTooLong { .. } => (USERNAME, ErrorCode::TooLong),
        };
        field_error(field, code, err.to_string())
    })
}
