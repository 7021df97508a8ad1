//! Responses that carry more than a JSON body.

use aide::generate::GenContext;
use aide::openapi::{
    Header, HeaderStyle, Operation, ParameterSchemaOrContent, ReferenceOr, Response as ApiResponse,
    SchemaObject,
};
use aide::operation::OperationOutput;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use schemars::json_schema;

use crate::models::LanguageResp;

pub const X_HEADER: &str = "x";
pub const X_VALUE: &str = "233";

/// `203 Non-Authoritative Information` with an `X: 233` header.
#[derive(Debug)]
pub struct LanguageReply(pub LanguageResp);

impl IntoResponse for LanguageReply {
    fn into_response(self) -> Response {
        (
            StatusCode::NON_AUTHORITATIVE_INFORMATION,
            [(HeaderName::from_static(X_HEADER), HeaderValue::from_static(X_VALUE))],
            Json(self.0),
        )
            .into_response()
    }
}

impl OperationOutput for LanguageReply {
    type Inner = LanguageResp;

    fn operation_response(ctx: &mut GenContext, operation: &mut Operation) -> Option<ApiResponse> {
        let mut response = Json::<LanguageResp>::operation_response(ctx, operation)?;
        response.headers.insert(
            "X".to_string(),
            ReferenceOr::Item(Header {
                description: Some(format!("Always `{X_VALUE}`")),
                style: HeaderStyle::Simple,
                required: true,
                deprecated: None,
                format: ParameterSchemaOrContent::Schema(SchemaObject {
                    json_schema: json_schema!({ "type": "string", "const": X_VALUE }),
                    external_docs: None,
                    example: None,
                }),
                example: None,
                examples: Default::default(),
                extensions: Default::default(),
            }),
        );
        Some(response)
    }
}
