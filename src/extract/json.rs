use aide::generate::GenContext;
use aide::openapi::{Operation, Response as ApiResponse};
use aide::operation::{OperationInput, OperationOutput};
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;
use validator::Validate;

use super::{document_rejection, validate_value};
use crate::error::{Issue, Location, ValidationError, ValidationRejection};

/// JSON body validated against `T`.
///
/// Works in both directions: as an extractor it rejects bad bodies with 422,
/// as a response it checks `T` before serializing and answers 500 when the
/// handler produced a value that breaks its own model.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<serde_json::Value>::from_request(req, state)
            .await
            .map_err(|rejection| {
                ValidationError::single(
                    Location::Body,
                    Issue::new(Vec::new(), rejection.body_text(), "json_invalid"),
                )
            })?;

        Ok(Self(validate_value(Location::Body, value)?))
    }
}

impl<T> IntoResponse for ValidJson<T>
where
    T: Serialize + Validate,
{
    fn into_response(self) -> Response {
        if let Err(errors) = self.0.validate() {
            let error = ValidationError::from_validator(Location::Response, &errors);
            tracing::error!(%error, issues = ?error.issues, "handler produced an invalid response");
            return ValidationRejection::new(StatusCode::INTERNAL_SERVER_ERROR, error)
                .into_response();
        }
        Json(self.0).into_response()
    }
}

impl<T> OperationInput for ValidJson<T>
where
    T: JsonSchema,
{
    fn operation_input(ctx: &mut GenContext, operation: &mut Operation) {
        Json::<T>::operation_input(ctx, operation);
        document_rejection(ctx, operation, 422, "Request body failed validation");
    }
}

impl<T> OperationOutput for ValidJson<T>
where
    T: JsonSchema,
{
    type Inner = T;

    fn operation_response(ctx: &mut GenContext, operation: &mut Operation) -> Option<ApiResponse> {
        Json::<T>::operation_response(ctx, operation)
    }
}

impl<T> From<T> for ValidJson<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}
