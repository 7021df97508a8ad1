use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;
use validoc::{FormFields, FromFormFields, UploadedFile, ValidationError};

/// Prediction result.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate)]
pub struct Resp {
    pub label: i64,
    #[validate(range(exclusive_min = 0.0, exclusive_max = 1.0))]
    #[schemars(extend("exclusiveMinimum" = 0, "exclusiveMaximum" = 1))]
    pub score: f64,
}

impl Resp {
    pub fn example() -> Self {
        Self {
            label: 3,
            score: 0.42,
        }
    }
}

fn default_limit() -> i64 {
    5
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate)]
#[schemars(extend("example" = {
    "uid": "very_important_user",
    "limit": 10,
    "vip": true
}))]
pub struct Data {
    pub uid: String,
    #[serde(default = "default_limit")]
    pub limit: i64,
    pub vip: bool,
}

fn default_text() -> String {
    "default query strings".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate)]
pub struct Query {
    #[serde(default = "default_text")]
    pub text: String,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            text: default_text(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Language {
    #[serde(rename = "en-US")]
    En,
    #[serde(rename = "zh-CN")]
    Zh,
}

/// Headers read by the header demo. The field matches the `Lang` header.
#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
pub struct Header {
    pub lang: Language,
}

#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
pub struct Cookie {
    pub key: String,
}

/// Language pair in the predict URL, two letters each.
#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
pub struct PredictPath {
    #[validate(length(equal = 2))]
    pub source: String,
    #[validate(length(equal = 2))]
    pub target: String,
}

#[derive(Debug, Clone, JsonSchema, Validate)]
pub struct FileForm {
    pub uid: Option<String>,
    pub file: UploadedFile,
}

impl FromFormFields for FileForm {
    fn from_fields(mut fields: FormFields) -> Result<Self, ValidationError> {
        Ok(Self {
            uid: fields.take_text("uid"),
            file: fields.take_file("file")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FileResp {
    pub filename: String,
    #[serde(rename = "type")]
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LanguageResp {
    pub language: Language,
}
