#![allow(deprecated)]

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use validoc::aide::openapi::{OpenApi, Operation, PathItem, ReferenceOr};
use validoc::schemars::JsonSchema;
use validoc::validator::Validate;
use validoc::{validoc, Router, ValidJson, ValidPath, ValidQuery};

#[derive(Clone)]
struct AppState;

#[derive(Serialize, Deserialize, JsonSchema, Validate, Default)]
struct User {
    id: u64,
    #[validate(length(min = 1))]
    name: String,
}

impl User {
    fn example() -> Self {
        Self {
            id: 1,
            name: "Alice".to_string(),
        }
    }
}

#[derive(Deserialize, JsonSchema, Validate)]
struct UserId {
    id: u64,
}

#[derive(Deserialize, JsonSchema, Validate)]
struct Page {
    #[validate(range(min = 1))]
    page: Option<u32>,
}

/// Get user by ID.
///
/// Returns user information for the specified ID.
///
/// @tag users
/// @tag accounts
/// @response 200 Json<User> User found successfully
/// @example 200 User::example()
/// @response 404 () User not found
#[validoc]
async fn get_user(State(_state): State<AppState>, ValidPath(UserId { id }): ValidPath<UserId>) -> Response {
    if id == 1 {
        Json(User::example()).into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

/// List all users.
///
/// @tag users
/// @id list_all_users
/// @response 200 Json<Vec<User>> List of all users
#[validoc]
async fn list_users(State(_state): State<AppState>, ValidQuery(_page): ValidQuery<Page>) -> Json<Vec<User>> {
    Json(vec![User::example()])
}

/// Create a user.
///
/// @response 201 ValidJson<User> Created user
#[validoc]
async fn create_user(ValidJson(user): ValidJson<User>) -> Response {
    (StatusCode::CREATED, ValidJson(user)).into_response()
}

/// Remove a user.
///
/// @response 204 () Removed
#[deprecated]
#[validoc]
async fn delete_user(State(_state): State<AppState>) -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Internal health check.
///
/// @hidden
/// @response 200 () Alive
#[validoc]
async fn healthcheck() -> StatusCode {
    StatusCode::OK
}

/// Touch a user.
///
/// Public description.
///
/// @response 200 () Touched
/// @validoc-ignore
/// Implementation notes that stay out of the docs.
/// @tag internal
#[validoc]
async fn touch_user() -> StatusCode {
    StatusCode::OK
}

fn generate() -> OpenApi {
    let mut api = OpenApi::default();
    let _app: axum::Router = Router::new()
        .route(
            "/users",
            validoc::get!(list_users).merge(validoc::post!(create_user)),
        )
        .route(
            "/users/{id}",
            validoc::get!(get_user).merge(validoc::delete!(delete_user)),
        )
        .route("/users/{id}/touch", validoc::put!(touch_user))
        .route("/healthcheck", validoc::get!(healthcheck))
        .with_state(AppState)
        .finish_api(&mut api);
    api
}

fn path_item<'a>(api: &'a OpenApi, path: &str) -> &'a PathItem {
    match api.paths.as_ref().and_then(|paths| paths.paths.get(path)) {
        Some(ReferenceOr::Item(item)) => item,
        Some(_) => panic!("expected path item for {path}, got a reference"),
        None => panic!("missing path {path}"),
    }
}

fn has_response(operation: &Operation, code: u16) -> bool {
    operation.responses.as_ref().is_some_and(|responses| {
        responses
            .responses
            .contains_key(&validoc::aide::openapi::StatusCode::Code(code))
    })
}

#[test]
fn contains_every_documented_path() {
    let api = generate();
    let paths = &api.paths.as_ref().unwrap().paths;
    assert!(paths.contains_key("/users"));
    assert!(paths.contains_key("/users/{id}"));
    assert!(paths.contains_key("/users/{id}/touch"));
}

#[test]
fn summary_and_description_come_from_doc_comment() {
    let api = generate();
    let op = path_item(&api, "/users/{id}").get.as_ref().unwrap();
    assert_eq!(op.summary.as_deref(), Some("Get user by ID."));
    assert!(op
        .description
        .as_deref()
        .unwrap()
        .contains("Returns user information"));
}

#[test]
fn tags_are_collected_in_order() {
    let api = generate();
    let op = path_item(&api, "/users/{id}").get.as_ref().unwrap();
    assert_eq!(op.tags, vec!["users".to_string(), "accounts".to_string()]);
}

#[test]
fn documented_and_validation_responses_are_present() {
    let api = generate();
    let op = path_item(&api, "/users/{id}").get.as_ref().unwrap();
    assert!(has_response(op, 200));
    assert!(has_response(op, 404));

    let list = path_item(&api, "/users").get.as_ref().unwrap();
    assert!(has_response(list, 200));
    assert!(has_response(list, 422));

    let create = path_item(&api, "/users").post.as_ref().unwrap();
    assert!(has_response(create, 201));
    assert!(has_response(create, 422));
}

#[test]
fn example_is_attached_to_its_response() {
    let api = generate();
    let op = path_item(&api, "/users/{id}").get.as_ref().unwrap();
    let responses = op.responses.as_ref().unwrap();
    let ReferenceOr::Item(ok) = &responses.responses[&validoc::aide::openapi::StatusCode::Code(200)] else {
        panic!("expected inline response");
    };
    let example = ok
        .content
        .get("application/json")
        .and_then(|media| media.example.as_ref())
        .expect("example on 200 response");
    assert_eq!(example["name"], "Alice");
}

#[test]
fn path_and_query_parameters_are_documented() {
    let api = generate();
    let get = path_item(&api, "/users/{id}").get.as_ref().unwrap();
    assert!(get.parameters.iter().any(|param| matches!(
        param,
        ReferenceOr::Item(validoc::aide::openapi::Parameter::Path { parameter_data, .. })
            if parameter_data.name == "id"
    )));

    let list = path_item(&api, "/users").get.as_ref().unwrap();
    assert!(list.parameters.iter().any(|param| matches!(
        param,
        ReferenceOr::Item(validoc::aide::openapi::Parameter::Query { parameter_data, .. })
            if parameter_data.name == "page"
    )));
}

#[test]
fn request_body_is_documented() {
    let api = generate();
    let create = path_item(&api, "/users").post.as_ref().unwrap();
    assert!(create.request_body.is_some());
}

#[test]
fn operation_id_is_set() {
    let api = generate();
    let list = path_item(&api, "/users").get.as_ref().unwrap();
    assert_eq!(list.operation_id.as_deref(), Some("list_all_users"));
}

#[test]
fn deprecated_attribute_marks_operation() {
    let api = generate();
    let item = path_item(&api, "/users/{id}");
    assert!(item.delete.as_ref().unwrap().deprecated);
    assert!(!item.get.as_ref().unwrap().deprecated);
}

#[test]
fn hidden_operations_are_left_out() {
    let api = generate();
    let healthcheck = api
        .paths
        .as_ref()
        .and_then(|paths| paths.paths.get("/healthcheck"));
    let documented = match healthcheck {
        Some(ReferenceOr::Item(item)) => item.get.is_some(),
        _ => false,
    };
    assert!(!documented);
}

#[test]
fn ignore_marker_stops_reading() {
    let api = generate();
    let op = path_item(&api, "/users/{id}/touch").put.as_ref().unwrap();
    assert_eq!(op.description.as_deref(), Some("Public description."));
    assert!(op.tags.is_empty());
}
