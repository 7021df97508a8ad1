use axum::extract::State;
use axum::Json;
use rand::Rng;
use validoc::{validoc, ValidCookies, ValidForm, ValidHeaders, ValidJson, ValidPath, ValidQuery};

use crate::error::ApiError;
use crate::models::{Cookie, Data, FileForm, FileResp, Header, LanguageResp, PredictPath, Query, Resp};
use crate::response::LanguageReply;
use crate::state::AppState;

/// A random prediction: `label` in `[0, 10)`, `score` in `(0, 1)`.
pub fn random_prediction() -> Resp {
    let mut rng = rand::rng();
    Resp {
        label: rng.random_range(0..10),
        score: rng.random_range(f64::MIN_POSITIVE..1.0),
    }
}

/// predict demo
///
/// demo for `query`, `data`, `resp`
///
/// @tag model
/// @response 200 ValidJson<Resp> Prediction for the language pair.
/// @example 200 Resp::example()
/// @response 403 ApiError Rejected at random.
#[validoc]
pub async fn predict(
    State(state): State<AppState>,
    ValidPath(path): ValidPath<PredictPath>,
    ValidQuery(query): ValidQuery<Query>,
    ValidJson(data): ValidJson<Data>,
) -> Result<ValidJson<Resp>, ApiError> {
    tracing::info!(source = %path.source, target = %path.target, "predict");
    tracing::info!(?data, "json");
    tracing::info!(?query, "query");

    if rand::rng().random_bool(state.reject_rate) {
        return Err(ApiError::Forbidden);
    }

    Ok(ValidJson(random_prediction()))
}

/// demo for JSON with status code and header
///
/// Answers 203 with an `X: 233` header.
///
/// @tag test
/// @tag demo
/// @response 203 LanguageReply The language from the `Lang` header.
#[validoc]
pub async fn with_code_header(
    ValidHeaders(headers): ValidHeaders<Header>,
    ValidCookies(cookies): ValidCookies<Cookie>,
) -> LanguageReply {
    tracing::info!(lang = ?headers.lang, key = %cookies.key, "header demo");

    LanguageReply(LanguageResp {
        language: headers.lang,
    })
}

/// post multipart/form-data demo
///
/// demo for 'form'
///
/// @tag file-upload
/// @response 200 Json<FileResp> Name and content type of the uploaded file.
#[validoc]
pub async fn with_file(ValidForm(form): ValidForm<FileForm>) -> Json<FileResp> {
    let file = form.file;
    tracing::info!(
        uid = ?form.uid,
        filename = ?file.filename,
        size = file.data.len(),
        "file upload"
    );

    Json(FileResp {
        filename: file.filename.unwrap_or_default(),
        content_type: file.content_type,
    })
}
