use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::UserId;

/// Identity proven by a valid bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticateTokenResponse {
  pub user_id: UserId,
  pub expires_at: DateTime<Utc>,
}

/// Use case for checking a presented bearer token
pub struct AuthenticateTokenUseCase {
  auth_service: Arc<AuthService>,
}

impl AuthenticateTokenUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Validates the token; no storage access is needed
  pub fn execute(&self, token: &str) -> Result<AuthenticateTokenResponse, AuthError> {
    let claims = self.auth_service.authenticate(token)?;

    Ok(AuthenticateTokenResponse {
      user_id: claims.subject,
      expires_at: claims.expires_at,
    })
  }
}
