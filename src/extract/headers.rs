use aide::generate::GenContext;
use aide::openapi::Operation;
use aide::operation::{add_parameters, parameters_from_schema, OperationInput, ParamLocation};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use validator::Validate;

use super::{document_rejection, validate_value};
use crate::coerce::{coerce_pairs, cookie_pairs, header_pairs};
use crate::error::{Location, ValidationRejection};

/// Request headers validated against `T`.
///
/// Header names are matched case-insensitively with `-` read as `_`, so a
/// `Content-Type` header fills a `content_type` field. Headers without a
/// matching field are ignored unless `T` denies unknown fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidHeaders<T>(pub T);

/// Cookies from the `Cookie` header validated against `T`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidCookies<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidHeaders<T>
where
    T: DeserializeOwned + Validate + JsonSchema,
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = coerce_pairs::<T, _>(header_pairs(&parts.headers));
        Ok(Self(validate_value(Location::Header, value)?))
    }
}

impl<T, S> FromRequestParts<S> for ValidCookies<T>
where
    T: DeserializeOwned + Validate + JsonSchema,
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = coerce_pairs::<T, _>(cookie_pairs(&parts.headers));
        Ok(Self(validate_value(Location::Cookie, value)?))
    }
}

fn document_parameters<T: JsonSchema>(
    ctx: &mut GenContext,
    operation: &mut Operation,
    location: ParamLocation,
) {
    let schema = ctx.schema.subschema_for::<T>();
    let params = parameters_from_schema(ctx, schema, location);
    add_parameters(ctx, operation, params);
}

impl<T> OperationInput for ValidHeaders<T>
where
    T: JsonSchema,
{
    fn operation_input(ctx: &mut GenContext, operation: &mut Operation) {
        document_parameters::<T>(ctx, operation, ParamLocation::Header);
        document_rejection(ctx, operation, 422, "Headers failed validation");
    }
}

impl<T> OperationInput for ValidCookies<T>
where
    T: JsonSchema,
{
    fn operation_input(ctx: &mut GenContext, operation: &mut Operation) {
        document_parameters::<T>(ctx, operation, ParamLocation::Cookie);
        document_rejection(ctx, operation, 422, "Cookies failed validation");
    }
}
