use validoc::{validoc, ApiMethodRouter, MethodView, ValidJson};

use crate::handlers::random_prediction;
use crate::models::{Data, Resp};
use crate::state::AppState;

/// Class-based view for `/api/user`. Only `POST` is handled.
pub struct UserApi;

impl MethodView<AppState> for UserApi {
    fn post(&self) -> Option<ApiMethodRouter<AppState>> {
        Some(validoc::post!(create_user))
    }
}

/// Score a user
///
/// @tag test
/// @response 200 ValidJson<Resp> Prediction for the user.
#[validoc]
async fn create_user(ValidJson(data): ValidJson<Data>) -> ValidJson<Resp> {
    tracing::info!(uid = %data.uid, limit = data.limit, vip = data.vip, "user");
    ValidJson(random_prediction())
}
