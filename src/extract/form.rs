use std::borrow::Cow;
use std::collections::HashMap;

use aide::generate::GenContext;
use aide::openapi::{MediaType, Operation, ReferenceOr, RequestBody, SchemaObject};
use aide::operation::OperationInput;
use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request};
use schemars::{json_schema, JsonSchema, Schema, SchemaGenerator};
use validator::Validate;

use super::document_rejection;
use crate::error::{Issue, Location, ValidationError, ValidationRejection};

/// A file part of a multipart form.
#[derive(Debug, Clone, Default)]
pub struct UploadedFile {
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl JsonSchema for UploadedFile {
    fn schema_name() -> Cow<'static, str> {
        "UploadedFile".into()
    }

    fn json_schema(_: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "type": "string",
            "format": "binary"
        })
    }
}

/// The parts of a multipart form, split into text values and files.
#[derive(Debug, Default)]
pub struct FormFields {
    texts: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl FormFields {
    pub fn take_text(&mut self, name: &str) -> Option<String> {
        self.texts.remove(name)
    }

    pub fn take_file(&mut self, name: &str) -> Result<UploadedFile, ValidationError> {
        self.files.remove(name).ok_or_else(|| {
            ValidationError::single(
                Location::Form,
                Issue::new(vec![name.to_string()], "file required", "missing"),
            )
        })
    }

    async fn read(mut multipart: Multipart) -> Result<Self, ValidationError> {
        let mut fields = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if field.file_name().is_some() {
                let filename = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await.map_err(multipart_error)?;
                tracing::trace!(%name, ?filename, size = data.len(), "read file part");
                fields.files.insert(
                    name,
                    UploadedFile {
                        filename,
                        content_type,
                        data,
                    },
                );
            } else {
                let text = field.text().await.map_err(multipart_error)?;
                fields.texts.insert(name, text);
            }
        }

        Ok(fields)
    }
}

fn multipart_error(err: impl std::fmt::Display) -> ValidationError {
    ValidationError::single(
        Location::Form,
        Issue::new(Vec::new(), err.to_string(), "multipart_invalid"),
    )
}

/// Build a form model from its multipart parts.
pub trait FromFormFields: Sized {
    fn from_fields(fields: FormFields) -> Result<Self, ValidationError>;
}

/// Multipart form validated against `T`.
///
/// `T` pulls its fields out of [`FormFields`], then its `validator` checks run.
/// The schema of `T` is documented as the `multipart/form-data` request body;
/// give file fields the [`UploadedFile`] type so they render as binary.
#[derive(Debug, Clone, Default)]
pub struct ValidForm<T>(pub T);

impl<T, S> FromRequest<S> for ValidForm<T>
where
    T: FromFormFields + Validate,
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let multipart = Multipart::from_request(req, state)
            .await
            .map_err(|rejection| {
                ValidationError::single(
                    Location::Form,
                    Issue::new(Vec::new(), rejection.body_text(), "multipart_invalid"),
                )
            })?;

        let data = T::from_fields(FormFields::read(multipart).await?)?;
        data.validate()
            .map_err(|errors| ValidationError::from_validator(Location::Form, &errors))?;
        Ok(Self(data))
    }
}

impl<T> OperationInput for ValidForm<T>
where
    T: JsonSchema,
{
    fn operation_input(ctx: &mut GenContext, operation: &mut Operation) {
        let schema = ctx.schema.subschema_for::<T>();

        let mut body = RequestBody {
            required: true,
            ..Default::default()
        };
        body.content.insert(
            "multipart/form-data".to_string(),
            MediaType {
                schema: Some(SchemaObject {
                    json_schema: schema,
                    external_docs: None,
                    example: None,
                }),
                ..Default::default()
            },
        );
        operation.request_body = Some(ReferenceOr::Item(body));

        document_rejection(ctx, operation, 422, "Form failed validation");
    }
}
