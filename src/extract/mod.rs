//! Validating extractors.
//!
//! | Extractor | Replaces | Source | On failure |
//! |---|---|---|---|
//! | [`ValidJson<T>`] | `axum::Json<T>` | JSON body | 422 |
//! | [`ValidQuery<T>`] | `axum::extract::Query<T>` | query string | 422 |
//! | [`ValidPath<T>`] | `axum::extract::Path<T>` | path parameters | 404 |
//! | [`ValidHeaders<T>`] | manual header parsing | HTTP headers | 422 |
//! | [`ValidCookies<T>`] | manual cookie parsing | `Cookie` header | 422 |
//! | [`ValidForm<T>`] | `axum::extract::Multipart` | multipart form | 422 |
//!
//! Each one deserializes into `T` and then runs [`validator::Validate`].
//! They also describe `T` to aide so the OpenAPI document carries the
//! parameter and body schemas plus the 422 error shape.

mod form;
mod headers;
mod json;
mod path;
mod query;

pub use form::{FormFields, FromFormFields, UploadedFile, ValidForm};
pub use headers::{ValidCookies, ValidHeaders};
pub use json::ValidJson;
pub use path::ValidPath;
pub use query::ValidQuery;

use aide::generate::GenContext;
use aide::openapi::{Operation, ReferenceOr, StatusCode};
use aide::operation::OperationOutput;
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::Validate;

use crate::error::{Location, ValidationError, ValidationErrorBody};

/// Deserialize `value` into `T`, then run its field checks.
pub(crate) fn validate_value<T>(location: Location, value: Value) -> Result<T, ValidationError>
where
    T: DeserializeOwned + Validate,
{
    let data: T = serde_json::from_value(value)
        .map_err(|err| ValidationError::from_serde(location, &err))?;
    data.validate()
        .map_err(|errors| ValidationError::from_validator(location, &errors))?;
    Ok(data)
}

/// Document the validation-error response unless the handler already documents that status.
pub(crate) fn document_rejection(
    ctx: &mut GenContext,
    operation: &mut Operation,
    status: u16,
    description: &str,
) {
    let Some(mut response) =
        <axum::Json<ValidationErrorBody> as OperationOutput>::operation_response(ctx, operation)
    else {
        return;
    };
    response.description = description.to_string();

    operation
        .responses
        .get_or_insert_with(Default::default)
        .responses
        .entry(StatusCode::Code(status))
        .or_insert(ReferenceOr::Item(response));
}
