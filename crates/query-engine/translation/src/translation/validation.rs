//! Structural validation of the query parameters before they are translated.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

use super::error::FieldErrors;
use super::params::QueryParams;

/// Checks the shape of the query parameters an endpoint accepts.
pub trait ShapeValidator: Send + Sync {
    fn validate(&self, params: &QueryParams) -> Result<(), FieldErrors>;
}

/// Accepts every set of parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoValidation;

impl ShapeValidator for NoValidation {
    fn validate(&self, _params: &QueryParams) -> Result<(), FieldErrors> {
        Ok(())
    }
}

/// Validates the parameters by deserializing them into a DTO and running its `validator`
/// rules. Parameters the DTO does not declare are ignored.
#[derive(Debug)]
pub struct DtoValidator<T> {
    dto: PhantomData<fn() -> T>,
}

impl<T> DtoValidator<T> {
    pub fn new() -> Self {
        DtoValidator { dto: PhantomData }
    }
}

impl<T> Default for DtoValidator<T> {
    fn default() -> Self {
        DtoValidator::new()
    }
}

impl<T: DeserializeOwned + Validate> ShapeValidator for DtoValidator<T> {
    fn validate(&self, params: &QueryParams) -> Result<(), FieldErrors> {
        let object = params
            .iter()
            .map(|(key, value)| (key.to_string(), serde_json::Value::String(value.to_string())))
            .collect::<serde_json::Map<_, _>>();
        let dto: T = serde_json::from_value(serde_json::Value::Object(object)).map_err(|err| {
            let mut errors = FieldErrors::new();
            errors.add("query", err.to_string());
            errors
        })?;
        dto.validate().map_err(|errors| field_errors(&errors))
    }
}

fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut result = FieldErrors::new();
    for (field, errs) in errors.field_errors() {
        for err in errs {
            let message = err
                .message
                .as_ref()
                .map_or_else(|| format!("{}: validation failed", err.code), ToString::to_string);
            result.add(field.to_string(), message);
        }
    }
    result
}

/// The parameters every endpoint accepts, as strings straight from the query string.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StandardQueryDto {
    pub select: Option<String>,
    pub include: Option<String>,
    pub order_by: Option<String>,
    pub distinct: Option<String>,
    #[validate(custom(function = "validate_integer"))]
    pub take: Option<String>,
    #[validate(custom(function = "validate_non_negative_integer"))]
    pub skip: Option<String>,
    #[validate(custom(function = "validate_cursor"))]
    pub cursor: Option<String>,
}

/// The default validator of a translator.
pub type StandardValidator = DtoValidator<StandardQueryDto>;

fn validate_integer<T: AsRef<str>>(value: T) -> Result<(), ValidationError> {
    match value.as_ref().parse::<i64>() {
        Ok(_) => Ok(()),
        Err(_) => Err(ValidationError::new("integer").with_message("must be an integer".into())),
    }
}

fn validate_non_negative_integer<T: AsRef<str>>(value: T) -> Result<(), ValidationError> {
    match value.as_ref().parse::<i64>() {
        Ok(number) if number >= 0 => Ok(()),
        Ok(_) => Err(ValidationError::new("non_negative")
            .with_message("must not be negative".into())),
        Err(_) => Err(ValidationError::new("integer").with_message("must be an integer".into())),
    }
}

fn validate_cursor<T: AsRef<str>>(value: T) -> Result<(), ValidationError> {
    let value = value.as_ref();
    if value.is_empty() {
        return Ok(());
    }
    match serde_json::from_str::<serde_json::Value>(value) {
        Ok(serde_json::Value::Object(_)) => Ok(()),
        _ => Err(ValidationError::new("cursor").with_message("must be a JSON object".into())),
    }
}
