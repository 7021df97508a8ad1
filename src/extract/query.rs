use aide::generate::GenContext;
use aide::openapi::Operation;
use aide::operation::OperationInput;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use validator::Validate;

use super::{document_rejection, validate_value};
use crate::coerce::coerce_pairs;
use crate::error::{Issue, Location, ValidationError, ValidationRejection};

/// Query string validated against `T`.
///
/// Values are coerced by the declared type of each field, so `?limit=10`
/// fills an integer field while `?uid=10` stays a string.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned + Validate + JsonSchema,
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri).map_err(|rejection| {
            ValidationError::single(
                Location::Query,
                Issue::new(Vec::new(), rejection.body_text(), "query_invalid"),
            )
        })?;

        let value = coerce_pairs::<T, _>(pairs);
        Ok(Self(validate_value(Location::Query, value)?))
    }
}

impl<T> OperationInput for ValidQuery<T>
where
    T: JsonSchema,
{
    fn operation_input(ctx: &mut GenContext, operation: &mut Operation) {
        Query::<T>::operation_input(ctx, operation);
        document_rejection(ctx, operation, 422, "Query parameters failed validation");
    }
}
