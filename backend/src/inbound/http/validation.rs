//! Request validation helpers shared by the HTTP handlers.
//!
//! Every rejected payload becomes one `invalid_request` error whose
//! `details.errors` lists each failing field as `{field, code, message}`.

use std::str::FromStr;

use actix_web::HttpRequest;
use actix_web::error::JsonPayloadError;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::domain::{CredentialsValidationError, Error, ExpenseValidationError, RawAmount};

const VALIDATION_FAILED: &str = "Validation failed";

/// One failing request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct FieldError {
    field: &'static str,
    code: &'static str,
    message: String,
}

impl FieldError {
    pub(crate) fn new(field: &'static str, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            code,
            message: message.into(),
        }
    }
}

impl From<&ExpenseValidationError> for FieldError {
    fn from(err: &ExpenseValidationError) -> Self {
        Self::new(err.field(), err.code(), err.to_string())
    }
}

impl From<&CredentialsValidationError> for FieldError {
    fn from(err: &CredentialsValidationError) -> Self {
        let code = match err {
            CredentialsValidationError::EmptyUsername | CredentialsValidationError::EmptyPassword => {
                "required"
            }
            CredentialsValidationError::Username(_) => "invalid_username",
            CredentialsValidationError::PasswordTooShort { .. } => "too_short",
            CredentialsValidationError::PasswordTooLong { .. } => "too_long",
        };
        Self::new(err.field(), code, err.to_string())
    }
}

/// Collapse field failures into a single `invalid_request` error.
pub(crate) fn validation_error<'a, E>(errors: impl IntoIterator<Item = &'a E>) -> Error
where
    E: 'a,
    FieldError: From<&'a E>,
{
    let errors: Vec<FieldError> = errors.into_iter().map(FieldError::from).collect();
    let message = match errors.as_slice() {
        [single] => single.message.clone(),
        _ => VALIDATION_FAILED.to_owned(),
    };
    Error::invalid_request(message).with_details(json!({ "errors": errors }))
}

/// Read the `amount` field: a JSON number or a numeric string.
///
/// Numbers are parsed from their literal text, so `4.1` stays exactly `4.1`.
pub(crate) fn parse_amount(value: Option<&Value>) -> RawAmount {
    match value {
        None | Some(Value::Null) => RawAmount::Missing,
        Some(Value::Number(number)) => parse_decimal(&number.to_string()),
        Some(Value::String(raw)) if raw.trim().is_empty() => RawAmount::Missing,
        Some(Value::String(raw)) => parse_decimal(raw.trim()),
        Some(_) => RawAmount::NotANumber,
    }
}

fn parse_decimal(raw: &str) -> RawAmount {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_or(RawAmount::NotANumber, RawAmount::Value)
}

/// `JsonConfig` error handler: malformed bodies use the validation envelope.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected request body");
    let field_error = match &err {
        JsonPayloadError::ContentType => FieldError::new(
            "body",
            "unsupported_content_type",
            "Content-Type must be application/json",
        ),
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            FieldError::new("body", "too_large", "Request body is too large")
        }
        _ => FieldError::new("body", "malformed_json", "Request body must be valid JSON"),
    };
    let message = field_error.message.clone();
    Error::invalid_request(message)
        .with_details(json!({ "errors": [field_error] }))
        .into()
}
