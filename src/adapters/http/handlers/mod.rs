pub mod auth;
pub mod users;

use crate::adapters::http::{
  errors::{ApiError, AuthErrorKind},
  middleware::{AuthenticatedUser, RequestIdExt},
};
use actix_web::{HttpMessage, HttpRequest};

/// Extract the caller attached by `AuthMiddleware`
pub fn get_authenticated_user(req: &HttpRequest) -> Result<AuthenticatedUser, ApiError> {
  let user = req.extensions().get::<AuthenticatedUser>().copied();

  if user.is_none() {
    tracing::warn!(
      request_id = ?req.request_id().map(|id| id.value()),
      "get_authenticated_user: caller not found in request extensions for path {}",
      req.path()
    );
  }

  user.ok_or(ApiError::Auth(AuthErrorKind::InvalidToken))
}
