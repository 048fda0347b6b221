use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use crate::adapters::http::{
  dtos::{CreateUserRequest, ListUsersQuery, UpdateUserRequest, UserListResponse, UserResponse},
  errors::{ApiError, AuthErrorKind},
  middleware::RequestIdExt,
};
use crate::application::users::{
  CreateUserCommand, CreateUserUseCase, DeleteUserCommand, DeleteUserUseCase, GetUserCommand,
  GetUserUseCase, ListUsersCommand, ListUsersUseCase, UpdateUserCommand, UpdateUserUseCase,
};
use crate::domain::auth::value_objects::UserId;

use super::get_authenticated_user;

/// POST /api/users
pub async fn create_user_handler(
  request: web::Json<CreateUserRequest>,
  use_case: web::Data<Arc<CreateUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let request = request.into_inner();

  let response = use_case
    .execute(CreateUserCommand {
      name: request.name,
      email: request.email,
      password: request.password,
    })
    .await?;

  Ok(HttpResponse::Created().json(UserResponse::from(response.user)))
}

/// GET /api/users?page=&limit=
pub async fn list_users_handler(
  query: web::Query<ListUsersQuery>,
  use_case: web::Data<Arc<ListUsersUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case
    .execute(ListUsersCommand {
      page: query.page(),
      page_size: query.limit(),
    })
    .await?;

  let api_response = UserListResponse {
    users: response.users.into_iter().map(UserResponse::from).collect(),
    page: response.page,
    page_size: response.page_size,
  };

  Ok(HttpResponse::Ok().json(api_response))
}

/// GET /api/users/{id}
pub async fn get_user_handler(
  path: web::Path<String>,
  use_case: web::Data<Arc<GetUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case
    .execute(GetUserCommand {
      user_id: path.into_inner(),
    })
    .await?;

  Ok(HttpResponse::Ok().json(UserResponse::from(response.user)))
}

/// PUT /api/users/{id}
///
/// Callers may only update their own record.
pub async fn update_user_handler(
  path: web::Path<String>,
  request: web::Json<UpdateUserRequest>,
  use_case: web::Data<Arc<UpdateUserUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let user_id = UserId::parse(&path.into_inner()).map_err(|e| ApiError::Validation(e.to_string()))?;

  let caller = get_authenticated_user(&http_req)?;
  if caller.user_id != user_id {
    tracing::warn!(
      request_id = ?http_req.request_id().map(|id| id.value()),
      caller = %caller.user_id,
      target = %user_id,
      "Rejected update of another user"
    );
    return Err(ApiError::Auth(AuthErrorKind::Forbidden));
  }

  let request = request.into_inner().without_empty_fields();
  request.validate()?;

  let response = use_case
    .execute(UpdateUserCommand {
      user_id,
      name: request.name,
      email: request.email,
      password: request.password,
    })
    .await?;

  Ok(HttpResponse::Ok().json(UserResponse::from(response.user)))
}

/// DELETE /api/users/{id}
pub async fn delete_user_handler(
  path: web::Path<String>,
  use_case: web::Data<Arc<DeleteUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  use_case
    .execute(DeleteUserCommand {
      user_id: path.into_inner(),
    })
    .await?;

  Ok(HttpResponse::NoContent().finish())
}
