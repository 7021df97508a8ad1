use std::collections::HashMap;

use aide::generate::GenContext;
use aide::openapi::Operation;
use aide::operation::OperationInput;
use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use axum::http::StatusCode;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use validator::Validate;

use super::{document_rejection, validate_value};
use crate::coerce::coerce_pairs;
use crate::error::{Issue, Location, ValidationError, ValidationRejection};

/// Path parameters validated against `T`.
///
/// A parameter that fails its checks answers 404: the URL does not name an
/// existing resource, the same as a route that never matched.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidPath<T>
where
    T: DeserializeOwned + Validate + JsonSchema,
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(params) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(path_rejection)?;

        let value = coerce_pairs::<T, _>(params);
        validate_value(Location::Path, value)
            .map(Self)
            .map_err(|error| ValidationRejection::new(StatusCode::NOT_FOUND, error))
    }
}

/// Undecodable segments (e.g. percent-encoded bytes that are not UTF-8) are 404.
/// Missing path params mean the extractor sits on the wrong route: 500.
fn path_rejection(rejection: PathRejection) -> ValidationRejection {
    let status = match &rejection {
        PathRejection::MissingPathParams(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::NOT_FOUND,
    };
    ValidationRejection::new(
        status,
        ValidationError::single(
            Location::Path,
            Issue::new(Vec::new(), rejection.body_text(), "path_invalid"),
        ),
    )
}

impl<T> OperationInput for ValidPath<T>
where
    T: JsonSchema,
{
    fn operation_input(ctx: &mut GenContext, operation: &mut Operation) {
        Path::<T>::operation_input(ctx, operation);
        document_rejection(ctx, operation, 404, "Path parameters did not match");
    }
}
