use actix_web::web;
use std::sync::Arc;

use crate::application::auth::{
  AuthenticateTokenUseCase, GetCurrentUserUseCase, LoginUserUseCase, SignUpUseCase,
};
use crate::application::users::{
  CreateUserUseCase, DeleteUserUseCase, GetUserUseCase, ListUsersUseCase, UpdateUserUseCase,
};

use super::errors::ApiError;
use super::handlers::auth::{get_current_user_handler, login_handler, signup_handler};
use super::handlers::users::{
  create_user_handler, delete_user_handler, get_user_handler, list_users_handler,
  update_user_handler,
};
use super::middleware::AuthMiddleware;

/// Every use case the JSON API dispatches to
#[derive(Clone)]
pub struct ApiRouteDependencies {
  pub sign_up_use_case: Arc<SignUpUseCase>,
  pub login_use_case: Arc<LoginUserUseCase>,
  pub authenticate_use_case: Arc<AuthenticateTokenUseCase>,
  pub get_current_user_use_case: Arc<GetCurrentUserUseCase>,
  pub create_user_use_case: Arc<CreateUserUseCase>,
  pub get_user_use_case: Arc<GetUserUseCase>,
  pub list_users_use_case: Arc<ListUsersUseCase>,
  pub update_user_use_case: Arc<UpdateUserUseCase>,
  pub delete_user_use_case: Arc<DeleteUserUseCase>,
}

/// Configure the whole JSON API under the provided scope (e.g. /api)
///
/// Malformed JSON bodies and query strings are answered with the same
/// `validation_error` body as failed field validation.
pub fn configure_api_routes(cfg: &mut web::ServiceConfig, deps: &ApiRouteDependencies) {
  cfg
    .app_data(
      web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::Validation(err.to_string()).into()),
    )
    .app_data(
      web::QueryConfig::default()
        .error_handler(|err, _req| ApiError::Validation(err.to_string()).into()),
    )
    .configure(|cfg| {
      configure_auth_routes(
        cfg,
        deps.sign_up_use_case.clone(),
        deps.login_use_case.clone(),
        deps.authenticate_use_case.clone(),
        deps.get_current_user_use_case.clone(),
      )
    })
    .service(
      web::scope("/users")
        .wrap(AuthMiddleware::new(deps.authenticate_use_case.clone()))
        .configure(|cfg| {
          configure_user_routes(
            cfg,
            deps.create_user_use_case.clone(),
            deps.get_user_use_case.clone(),
            deps.list_users_use_case.clone(),
            deps.update_user_use_case.clone(),
            deps.delete_user_use_case.clone(),
          )
        }),
    );
}

/// Configure authentication routes
///
/// # Routes
///
/// - POST /signup - Register a new user account
/// - POST /login - Authenticate and receive a bearer token
/// - GET /me - Get the caller's own record (bearer token required)
pub fn configure_auth_routes(
  cfg: &mut web::ServiceConfig,
  sign_up_use_case: Arc<SignUpUseCase>,
  login_use_case: Arc<LoginUserUseCase>,
  authenticate_use_case: Arc<AuthenticateTokenUseCase>,
  get_current_user_use_case: Arc<GetCurrentUserUseCase>,
) {
  cfg
    .app_data(web::Data::new(sign_up_use_case))
    .app_data(web::Data::new(login_use_case))
    .app_data(web::Data::new(get_current_user_use_case))
    .route("/signup", web::post().to(signup_handler))
    .route("/login", web::post().to(login_handler))
    .service(
      web::resource("/me")
        .wrap(AuthMiddleware::new(authenticate_use_case))
        .route(web::get().to(get_current_user_handler)),
    );
}

/// Configure user directory routes; the caller wraps them in `AuthMiddleware`
///
/// # Routes
///
/// - POST "" - Create a user record
/// - GET "" - List users (`?page=&limit=`)
/// - GET /{id} - Fetch one user
/// - PUT /{id} - Update the caller's own record
/// - DELETE /{id} - Delete a user
pub fn configure_user_routes(
  cfg: &mut web::ServiceConfig,
  create_use_case: Arc<CreateUserUseCase>,
  get_use_case: Arc<GetUserUseCase>,
  list_use_case: Arc<ListUsersUseCase>,
  update_use_case: Arc<UpdateUserUseCase>,
  delete_use_case: Arc<DeleteUserUseCase>,
) {
  cfg
    .app_data(web::Data::new(create_use_case))
    .app_data(web::Data::new(get_use_case))
    .app_data(web::Data::new(list_use_case))
    .app_data(web::Data::new(update_use_case))
    .app_data(web::Data::new(delete_use_case))
    .route("", web::post().to(create_user_handler))
    .route("", web::get().to(list_users_handler))
    .route("/{id}", web::get().to(get_user_handler))
    .route("/{id}", web::put().to(update_user_handler))
    .route("/{id}", web::delete().to(delete_user_handler));
}
