use crate::ApiMethodRouter;

/// A class-based view: one type bundling the handlers of a single path.
///
/// Override the methods the view handles and mount it with
/// [`Router::view`](crate::Router::view).
///
/// ```ignore
/// struct UserApi;
///
/// impl MethodView<AppState> for UserApi {
///     fn post(&self) -> Option<ApiMethodRouter<AppState>> {
///         Some(validoc::post!(create_user))
///     }
/// }
/// ```
pub trait MethodView<S = ()>
where
    S: Clone + Send + Sync + 'static,
{
    fn get(&self) -> Option<ApiMethodRouter<S>> {
        None
    }

    fn post(&self) -> Option<ApiMethodRouter<S>> {
        None
    }

    fn put(&self) -> Option<ApiMethodRouter<S>> {
        None
    }

    fn patch(&self) -> Option<ApiMethodRouter<S>> {
        None
    }

    fn delete(&self) -> Option<ApiMethodRouter<S>> {
        None
    }

    /// Every handled method merged into one router, or `None` if the view handles nothing.
    fn as_view(&self) -> Option<ApiMethodRouter<S>> {
        [self.get(), self.post(), self.put(), self.patch(), self.delete()]
            .into_iter()
            .flatten()
            .reduce(|acc, next| acc.merge(next))
    }
}
