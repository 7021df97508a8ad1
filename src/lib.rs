//! Validated, self-documenting axum endpoints.
//!
//! Handlers take validating extractors ([`ValidJson`], [`ValidQuery`],
//! [`ValidPath`], [`ValidHeaders`], [`ValidCookies`], [`ValidForm`]) and carry
//! their OpenAPI docs in their doc comment through [`validoc`]. A [`Router`]
//! collects them and serves the finished document with the configured UIs.
//!
//! ```ignore
//! use validoc::{validoc, Router, ValidJson};
//!
//! /// Echo
//! ///
//! /// @tag demo
//! /// @response 200 ValidJson<Message> The same message.
//! #[validoc]
//! async fn echo(ValidJson(msg): ValidJson<Message>) -> ValidJson<Message> {
//!     ValidJson(msg)
//! }
//!
//! let app = Router::new()
//!     .route("/echo", validoc::post!(echo))
//!     .finish();
//! ```

extern crate self as validoc;

pub use validoc_macros::validoc;

pub use aide;
pub use schemars;
pub use validator;

mod coerce;
pub mod docs;
pub mod error;
pub mod extract;
mod view;

pub use docs::DocsConfig;
pub use error::{ErrorBody, Issue, Location, ValidationError, ValidationErrorBody, ValidationRejection};
pub use extract::{
    FormFields, FromFormFields, UploadedFile, ValidCookies, ValidForm, ValidHeaders, ValidJson,
    ValidPath, ValidQuery,
};
pub use view::MethodView;

use std::cell::Cell;
use std::sync::Arc;

use aide::axum::ApiRouter;
use aide::openapi::OpenApi;
use axum::Extension;

thread_local! {
    static GENERATOR_READY: Cell<bool> = const { Cell::new(false) };
}

/// aide keeps its generator settings per thread; set them once on each.
fn configure_generator() {
    if GENERATOR_READY.replace(true) {
        return;
    }
    aide::generate::on_error(|error| {
        tracing::warn!(%error, "openapi generation");
    });
    aide::generate::extract_schemas(true);
}

/// An axum router that records OpenAPI docs for every route it is given.
pub struct Router<S = ()> {
    inner: ApiRouter<S>,
    docs: Option<DocsConfig>,
}

impl<S> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Create an empty router.
    pub fn new() -> Self {
        configure_generator();

        Self {
            inner: ApiRouter::new(),
            docs: None,
        }
    }

    /// Add a documented route, usually built with [`get!`], [`post!`] and friends.
    pub fn route<M>(mut self, path: &str, method_router: M) -> Self
    where
        M: Into<aide::axum::routing::ApiMethodRouter<S>>,
    {
        self.inner = self.inner.api_route(path, method_router.into());
        self
    }

    /// Mount a class-based view. A view that handles no method is skipped.
    pub fn view<V>(mut self, path: &str, view: V) -> Self
    where
        V: MethodView<S>,
    {
        match view.as_view() {
            Some(method_router) => {
                self.inner = self.inner.api_route(path, method_router.into());
            }
            None => {
                tracing::warn!(path, view = std::any::type_name::<V>(), "view handles no method, skipping");
            }
        }
        self
    }

    /// Nest another router under a path prefix.
    pub fn nest(mut self, path: &str, router: Router<S>) -> Self {
        self.inner = self.inner.nest(path, router.inner);
        self
    }

    /// Merge the routes of another router. Its docs settings are ignored.
    pub fn merge(mut self, other: Router<S>) -> Self {
        self.inner = self.inner.merge(other.inner);
        self
    }

    /// Set where and how the docs are served.
    pub fn with_docs(mut self, docs: DocsConfig) -> Self {
        self.docs = Some(docs);
        self
    }

    /// Provide the router state.
    pub fn with_state<S2>(self, state: S) -> Router<S2>
    where
        S2: Clone + Send + Sync + 'static,
    {
        Router {
            inner: self.inner.with_state(state),
            docs: self.docs,
        }
    }

    /// Serve the docs endpoints and return the finished axum router.
    ///
    /// Uses [`DocsConfig::default`] unless [`Router::with_docs`] was called.
    /// The generated document is also available to handlers as
    /// `Extension<Arc<OpenApi>>`.
    pub fn finish(self) -> axum::Router<S> {
        let docs = self.docs.unwrap_or_default();
        let mut api = docs.openapi();
        let inner = docs.mount(self.inner);

        let router = inner.finish_api(&mut api);
        tracing::debug!(
            title = %api.info.title,
            paths = api.paths.as_ref().map_or(0, |paths| paths.paths.len()),
            "openapi document ready"
        );
        router.layer(Extension(Arc::new(api)))
    }

    /// Write the routes' docs into `api` without serving any docs endpoints.
    pub fn finish_api(self, api: &mut OpenApi) -> axum::Router<S> {
        self.inner.finish_api(api)
    }

    /// The underlying aide router.
    pub fn into_inner(self) -> ApiRouter<S> {
        self.inner
    }
}

impl<S> Default for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

/// A documented method router; several can be merged onto one path.
///
/// ```ignore
/// Router::new().route("/items", validoc::get!(list_items).merge(validoc::post!(create_item)))
/// ```
pub struct ApiMethodRouter<S = ()> {
    inner: aide::axum::routing::ApiMethodRouter<S>,
}

impl<S> ApiMethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new(inner: aide::axum::routing::ApiMethodRouter<S>) -> Self {
        Self { inner }
    }

    pub fn merge(self, other: impl Into<aide::axum::routing::ApiMethodRouter<S>>) -> Self {
        Self {
            inner: self.inner.merge(other.into()),
        }
    }
}

impl<S> From<ApiMethodRouter<S>> for aide::axum::routing::ApiMethodRouter<S> {
    fn from(router: ApiMethodRouter<S>) -> Self {
        router.inner
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! __documented_route {
    ($method:ident, $($handler:ident)::+) => {
        $crate::ApiMethodRouter::new($crate::aide::axum::routing::$method(
            $($handler)::+,
            $($handler)::+::docs,
        ))
    };
}

/// GET route for a `#[validoc]` handler: `validoc::get!(handlers::list)`.
#[macro_export]
macro_rules! get {
    ($($handler:ident)::+) => {
        $crate::__documented_route!(get_with, $($handler)::+)
    };
}

/// POST route for a `#[validoc]` handler.
#[macro_export]
macro_rules! post {
    ($($handler:ident)::+) => {
        $crate::__documented_route!(post_with, $($handler)::+)
    };
}

/// PUT route for a `#[validoc]` handler.
#[macro_export]
macro_rules! put {
    ($($handler:ident)::+) => {
        $crate::__documented_route!(put_with, $($handler)::+)
    };
}

/// PATCH route for a `#[validoc]` handler.
#[macro_export]
macro_rules! patch {
    ($($handler:ident)::+) => {
        $crate::__documented_route!(patch_with, $($handler)::+)
    };
}

/// DELETE route for a `#[validoc]` handler.
#[macro_export]
macro_rules! delete {
    ($($handler:ident)::+) => {
        $crate::__documented_route!(delete_with, $($handler)::+)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_is_configured_once_per_thread() {
        assert!(!GENERATOR_READY.get());
        let _first: Router = Router::new();
        assert!(GENERATOR_READY.get());
        let _second: Router = Router::new();
        assert!(GENERATOR_READY.get());

        std::thread::spawn(|| {
            assert!(!GENERATOR_READY.get());
            let _router: Router = Router::new();
            assert!(GENERATOR_READY.get());
        })
        .join()
        .unwrap();
    }
}
