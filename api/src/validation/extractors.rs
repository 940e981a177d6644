//! Custom Axum extractors for validated input
//!
//! `ValidatedJson<T>`, `ValidatedForm<T>`, `ValidatedQuery<T>` and
//! `ValidatedPath<T>` wrap the matching axum extractor, then sanitize and
//! validate the parsed value before the handler sees it.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::{request::Parts, HeaderName, HeaderValue, StatusCode},
    Form, Json,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use super::fields::{pairs_to_fields, FieldReader};
use crate::metrics;

/// A field-level validation error
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validation error response body
#[derive(Debug, Serialize)]
pub struct ValidationErrorResponse {
    pub error: String,
    pub message: String,
    pub errors: Vec<FieldError>,
    pub code: u16,
    pub timestamp: String,
    pub correlation_id: String,
}

impl ValidationErrorResponse {
    pub fn new(errors: Vec<FieldError>) -> Self {
        let error_summary = if errors.len() == 1 {
            format!("Validation failed for field '{}'", errors[0].field)
        } else {
            format!("Validation failed for {} fields", errors.len())
        };

        Self {
            error: "ValidationError".to_string(),
            message: error_summary,
            errors,
            code: StatusCode::UNPROCESSABLE_ENTITY.as_u16(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            correlation_id: Uuid::new_v4().to_string(),
        }
    }
}

/// Validation error that converts to a 422 response
#[derive(Debug)]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError::new(field, message)],
        }
    }
}

impl axum::response::IntoResponse for ValidationError {
    fn into_response(self) -> axum::response::Response {
        let response = ValidationErrorResponse::new(self.errors);
        let correlation_id = response.correlation_id.clone();

        let mut response = (StatusCode::UNPROCESSABLE_ENTITY, Json(response)).into_response();
        if let Ok(value) = HeaderValue::from_str(&correlation_id) {
            response
                .headers_mut()
                .insert(HeaderName::from_static("x-correlation-id"), value);
        }
        response
    }
}

/// Trait for types that can be validated and sanitized
///
/// Implement this trait for a request type to use it with any of the
/// `Validated*` extractors.
pub trait Validatable: Sized + Default {
    /// Build the record from raw fields. Missing or mistyped fields are
    /// recorded on the reader and replaced by their default.
    fn from_fields(fields: &mut FieldReader<'_>) -> Self;

    /// Sanitize the data in-place
    fn sanitize(&mut self);

    /// Validate the data and return every field error found
    fn validate(&self) -> Result<(), Vec<FieldError>>;
}

/// Read, sanitize and validate a record, counting a rejection under `source`.
///
/// Type errors and constraint errors land in the same response. A field
/// that already failed to read is not checked again, since its value is
/// only a placeholder.
pub(crate) fn accept<T: Validatable>(
    fields: &Map<String, Value>,
    source: &'static str,
) -> Result<T, ValidationError> {
    let mut builder = ValidationBuilder::new();
    let mut data = T::from_fields(&mut FieldReader::new(fields, &mut builder));
    data.sanitize();

    let mut errors = builder.into_errors();
    if let Err(constraint_errors) = data.validate() {
        let unreadable: Vec<String> = errors.iter().map(|e| e.field.clone()).collect();
        errors.extend(
            constraint_errors
                .into_iter()
                .filter(|e| !is_covered(&unreadable, &e.field)),
        );
    }

    if errors.is_empty() {
        Ok(data)
    } else {
        Err(reject(source, errors))
    }
}

/// `field` is `unreadable` itself or nested below one of them
fn is_covered(unreadable: &[String], field: &str) -> bool {
    unreadable.iter().any(|u| {
        field == u
            || field
                .strip_prefix(u.as_str())
                .map_or(false, |rest| rest.starts_with('.'))
    })
}

fn reject(source: &'static str, errors: Vec<FieldError>) -> ValidationError {
    metrics::VALIDATION_FAILURES
        .with_label_values(&[source])
        .inc();
    tracing::debug!(source, failed = errors.len(), "request rejected by validation");
    ValidationError::new(errors)
}

/// JSON body extractor
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: Validatable + Send,
    S: Send + Sync,
{
    type Rejection = ValidationError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|err| {
                let message = match err {
                    axum::extract::rejection::JsonRejection::JsonDataError(e) => {
                        format!("Invalid JSON data: {}", e.body_text())
                    }
                    axum::extract::rejection::JsonRejection::JsonSyntaxError(e) => {
                        format!("JSON syntax error: {}", e.body_text())
                    }
                    axum::extract::rejection::JsonRejection::MissingJsonContentType(_) => {
                        "Content-Type must be application/json".to_string()
                    }
                    axum::extract::rejection::JsonRejection::BytesRejection(_) => {
                        "Failed to read request body".to_string()
                    }
                    _ => "Invalid JSON payload".to_string(),
                };
                reject("body", vec![FieldError::new("body", message)])
            })?;

        let Value::Object(fields) = body else {
            return Err(reject(
                "body",
                vec![FieldError::new("body", "must be a JSON object")],
            ));
        };

        accept(&fields, "body").map(ValidatedJson)
    }
}

/// `application/x-www-form-urlencoded` body extractor
pub struct ValidatedForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedForm<T>
where
    T: Validatable + Send,
    S: Send + Sync,
{
    type Rejection = ValidationError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
            .await
            .map_err(|err| {
                reject(
                    "form",
                    vec![FieldError::new("form", format!("Invalid form data: {}", err.body_text()))],
                )
            })?;

        accept(&pairs_to_fields(pairs), "form").map(ValidatedForm)
    }
}

/// Query string extractor
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    T: Validatable + Send,
    S: Send + Sync,
{
    type Rejection = ValidationError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|err| {
                reject(
                    "query",
                    vec![FieldError::new("query", format!("Invalid query string: {}", err.body_text()))],
                )
            })?;

        accept(&pairs_to_fields(pairs), "query").map(ValidatedQuery)
    }
}

/// Path parameter extractor
pub struct ValidatedPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidatedPath<T>
where
    T: Validatable + Send,
    S: Send + Sync,
{
    type Rejection = ValidationError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(pairs) = Path::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|err| {
                reject(
                    "path",
                    vec![FieldError::new("path", format!("Invalid path parameter: {}", err.body_text()))],
                )
            })?;

        accept(&pairs_to_fields(pairs), "path").map(ValidatedPath)
    }
}

/// Builder for accumulating validation errors
#[derive(Debug, Default)]
pub struct ValidationBuilder {
    errors: Vec<FieldError>,
}

impl ValidationBuilder {
    pub fn new() -> Self {
        Self { errors: vec![] }
    }

    /// Add an error if the result is Err
    pub fn check<F>(&mut self, field: &str, validator: F) -> &mut Self
    where
        F: FnOnce() -> Result<(), String>,
    {
        if let Err(message) = validator() {
            self.errors.push(FieldError::new(field, message));
        }
        self
    }

    /// Validate a nested record, reporting its fields as `prefix.field`
    pub fn nested<V: Validatable>(&mut self, prefix: &str, value: &V) -> &mut Self {
        if let Err(errors) = value.validate() {
            self.errors.extend(
                errors
                    .into_iter()
                    .map(|e| FieldError::new(format!("{}.{}", prefix, e.field), e.message)),
            );
        }
        self
    }

    /// Add an error directly
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) -> &mut Self {
        self.errors.push(FieldError::new(field, message));
        self
    }

    /// Finish building and return Result
    pub fn build(self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }

    /// Consume the builder, returning the errors collected so far
    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Get current error count
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}
