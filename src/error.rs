//! Validation errors and their HTTP rendering.
//!
//! Every validating extractor funnels failures into [`ValidationError`]:
//! the request part that failed ([`Location`]) plus a list of [`Issue`]s,
//! each pointing at a field path. [`ValidationRejection`] pairs an error with
//! a status code and renders it as JSON:
//!
//! ```json
//! {
//!   "error": "Validation failed",
//!   "location": "body",
//!   "issues": [{ "loc": ["score"], "msg": "must be greater than 0 and less than 1", "type": "range" }]
//! }
//! ```

use std::collections::HashMap;
use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use schemars::JsonSchema;
use serde::Serialize;
use validator::{ValidationErrors, ValidationErrorsKind};

/// The part of a request (or the response) a value was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Path,
    Query,
    Body,
    Header,
    Cookie,
    Form,
    Response,
}

impl Location {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Query => "query",
            Self::Body => "body",
            Self::Header => "header",
            Self::Cookie => "cookie",
            Self::Form => "form",
            Self::Response => "response",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single failed check.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct Issue {
    /// Field path inside the validated value, outermost first. Empty when the
    /// problem concerns the value as a whole.
    pub loc: Vec<String>,
    pub msg: String,
    /// Machine-readable check name, e.g. `range`, `length`, `missing`.
    #[serde(rename = "type")]
    pub kind: String,
}

impl Issue {
    pub fn new(loc: Vec<String>, msg: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            loc,
            msg: msg.into(),
            kind: kind.into(),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("{location} validation failed with {} issue(s)", .issues.len())]
pub struct ValidationError {
    pub location: Location,
    pub issues: Vec<Issue>,
}

impl ValidationError {
    pub fn single(location: Location, issue: Issue) -> Self {
        Self {
            location,
            issues: vec![issue],
        }
    }

    /// Flatten `validator` errors; nested structs and list items extend the `loc` path.
    pub fn from_validator(location: Location, errors: &ValidationErrors) -> Self {
        let mut issues = Vec::new();
        collect_issues(errors, &[], &mut issues);
        issues.sort_by(|a, b| a.loc.cmp(&b.loc).then_with(|| a.kind.cmp(&b.kind)));
        Self { location, issues }
    }

    /// A deserialization failure. serde only names the field for missing ones.
    pub fn from_serde(location: Location, err: &impl fmt::Display) -> Self {
        let msg = err.to_string();
        let missing = msg
            .strip_prefix("missing field `")
            .and_then(|rest| rest.split('`').next())
            .map(str::to_string);

        let issue = match missing {
            Some(field) => Issue::new(vec![field], "field required", "missing"),
            None => Issue::new(Vec::new(), msg, "type_error"),
        };
        Self::single(location, issue)
    }
}

fn collect_issues(errors: &ValidationErrors, prefix: &[String], out: &mut Vec<Issue>) {
    for (field, kind) in errors.errors() {
        let mut loc = prefix.to_vec();
        if *field != "__all__" {
            loc.push(field.to_string());
        }

        match kind {
            ValidationErrorsKind::Field(failures) => {
                for failure in failures {
                    out.push(Issue::new(loc.clone(), describe(failure), failure.code.to_string()));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_issues(inner, &loc, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    let mut item_loc = loc.clone();
                    item_loc.push(index.to_string());
                    collect_issues(inner, &item_loc, out);
                }
            }
        }
    }
}

/// Human-readable message for a failed `validator` check.
fn describe(failure: &validator::ValidationError) -> String {
    if let Some(message) = &failure.message {
        return message.to_string();
    }

    let params: HashMap<&str, String> = failure
        .params
        .iter()
        .filter(|(key, _)| *key != "value")
        .map(|(key, value)| (&**key, value.to_string()))
        .collect();

    let bounds = |pairs: &[(&str, &str)]| -> Vec<String> {
        pairs
            .iter()
            .filter_map(|(key, phrase)| params.get(key).map(|v| format!("{phrase} {v}")))
            .collect()
    };

    match &*failure.code {
        "range" => {
            let parts = bounds(&[
                ("exclusive_min", "greater than"),
                ("min", "at least"),
                ("exclusive_max", "less than"),
                ("max", "at most"),
            ]);
            format!("must be {}", parts.join(" and "))
        }
        "length" => match params.get("equal") {
            Some(equal) => format!("length must be exactly {equal}"),
            None => {
                let parts = bounds(&[("min", "at least"), ("max", "at most")]);
                format!("length must be {}", parts.join(" and "))
            }
        },
        code => format!("failed `{code}` check"),
    }
}

/// JSON body of a validation failure.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ValidationErrorBody {
    pub error: String,
    pub location: Location,
    pub issues: Vec<Issue>,
}

/// Generic JSON error body: `{ "error": "...", "code": "..." }`.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
}

/// Rejection returned by every validating extractor.
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct ValidationRejection {
    status: StatusCode,
    #[source]
    error: ValidationError,
}

impl ValidationRejection {
    pub fn new(status: StatusCode, error: ValidationError) -> Self {
        tracing::debug!(
            status = status.as_u16(),
            location = %error.location,
            issues = ?error.issues,
            "rejecting request"
        );
        Self { status, error }
    }

    pub fn unprocessable(error: ValidationError) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, error)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn error(&self) -> &ValidationError {
        &self.error
    }
}

impl From<ValidationError> for ValidationRejection {
    fn from(error: ValidationError) -> Self {
        Self::unprocessable(error)
    }
}

impl IntoResponse for ValidationRejection {
    fn into_response(self) -> Response {
        let error = match (self.error.location, self.status) {
            (Location::Response, _) => "Response validation failed",
            (_, StatusCode::NOT_FOUND) => "Not Found",
            (_, StatusCode::INTERNAL_SERVER_ERROR) => "Internal Server Error",
            _ => "Validation failed",
        };
        let body = ValidationErrorBody {
            error: error.to_string(),
            location: self.error.location,
            issues: self.error.issues,
        };
        (self.status, Json(body)).into_response()
    }
}
