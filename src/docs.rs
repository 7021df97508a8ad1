//! OpenAPI document and documentation UI endpoints.

use std::sync::Arc;

use aide::axum::ApiRouter;
use aide::openapi::{Info, OpenApi};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json};

/// Where and under which title the API docs are served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsConfig {
    /// Path prefix without slashes, e.g. `apidoc`.
    pub path: String,
    pub title: String,
    pub version: String,
    pub description: Option<String>,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            path: "apidoc".to_string(),
            title: "Service API Document".to_string(),
            version: "0.1.0".to_string(),
            description: None,
        }
    }
}

impl DocsConfig {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// `/{path}/{endpoint}`, tolerating stray slashes in `path`.
    pub fn url(&self, endpoint: &str) -> String {
        let prefix = self.path.trim_matches('/');
        if prefix.is_empty() {
            format!("/{endpoint}")
        } else {
            format!("/{prefix}/{endpoint}")
        }
    }

    /// An empty document carrying this config's info block.
    pub fn openapi(&self) -> OpenApi {
        OpenApi {
            info: Info {
                title: self.title.clone(),
                version: self.version.clone(),
                description: self.description.clone(),
                ..Info::default()
            },
            ..OpenApi::default()
        }
    }

    pub(crate) fn mount<S>(&self, router: ApiRouter<S>) -> ApiRouter<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        let json_url = self.url("openapi.json");
        tracing::debug!(%json_url, "mounting api docs");

        #[allow(unused_mut)]
        let mut router = router
            .route(&json_url, get(serve_json))
            .route(&self.url("openapi.yaml"), get(serve_yaml));

        #[cfg(feature = "swagger")]
        {
            router = router.route(
                &self.url("swagger"),
                aide::swagger::Swagger::new(&json_url)
                    .with_title(&self.title)
                    .axum_route(),
            );
        }

        #[cfg(feature = "redoc")]
        {
            router = router.route(
                &self.url("redoc"),
                aide::redoc::Redoc::new(&json_url)
                    .with_title(&self.title)
                    .axum_route(),
            );
        }

        #[cfg(feature = "scalar")]
        {
            router = router.route(
                &self.url("scalar"),
                aide::scalar::Scalar::new(&json_url)
                    .with_title(&self.title)
                    .axum_route(),
            );
        }

        router
    }
}

async fn serve_json(Extension(api): Extension<Arc<OpenApi>>) -> Response {
    Json(api.as_ref()).into_response()
}

async fn serve_yaml(Extension(api): Extension<Arc<OpenApi>>) -> Response {
    match serde_yaml::to_string(api.as_ref()) {
        Ok(yaml) => ([(header::CONTENT_TYPE, "application/yaml")], yaml).into_response(),
        Err(error) => {
            tracing::error!(%error, "failed to render openapi yaml");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
