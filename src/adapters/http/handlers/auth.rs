use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use crate::adapters::http::{
  dtos::{LoginRequest, LoginResponse, SignUpRequest, UserResponse},
  errors::ApiError,
};
use crate::application::auth::{
  GetCurrentUserCommand, GetCurrentUserUseCase, LoginUserCommand, LoginUserUseCase, SignUpCommand,
  SignUpUseCase,
};

use super::get_authenticated_user;

/// Handler for user sign-up
///
/// POST /api/signup
/// Body: SignUpRequest (JSON)
/// Response: UserResponse (JSON) with status 201
pub async fn signup_handler(
  request: web::Json<SignUpRequest>,
  use_case: web::Data<Arc<SignUpUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let request = request.into_inner();

  let command = SignUpCommand {
    name: request.name,
    email: request.email,
    password: request.password,
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Created().json(UserResponse::from(response.user)))
}

/// Handler for user login
///
/// POST /api/login
/// Body: LoginRequest (JSON)
/// Response: LoginResponse (JSON) with status 200
pub async fn login_handler(
  request: web::Json<LoginRequest>,
  use_case: web::Data<Arc<LoginUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let request = request.into_inner();

  let command = LoginUserCommand {
    email: request.email,
    password: request.password,
  };

  let response = use_case.execute(command).await?;

  let api_response = LoginResponse {
    token: response.token,
    token_type: "Bearer".to_string(),
    expires_at: response.expires_at,
    user_id: response.user_id.into_inner(),
  };

  Ok(HttpResponse::Ok().json(api_response))
}

/// Handler for getting current user information
///
/// GET /api/me
/// Headers: Authorization: Bearer <token>
/// Response: UserResponse (JSON) with status 200
pub async fn get_current_user_handler(
  use_case: web::Data<Arc<GetCurrentUserUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let caller = get_authenticated_user(&http_req)?;

  let response = use_case
    .execute(GetCurrentUserCommand {
      user_id: caller.user_id,
    })
    .await?;

  Ok(HttpResponse::Ok().json(UserResponse::from(response.user)))
}
