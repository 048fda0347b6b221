use std::sync::Arc;

use crate::domain::auth::entities::UserProfile;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::UserId;

#[derive(Debug, Clone, Copy)]
pub struct GetCurrentUserCommand {
  /// Subject of an already validated bearer token
  pub user_id: UserId,
}

/// Response containing current user information
#[derive(Debug, Clone)]
pub struct GetCurrentUserResponse {
  pub user: UserProfile,
}

/// Use case for getting the current authenticated user
pub struct GetCurrentUserUseCase {
  auth_service: Arc<AuthService>,
}

impl GetCurrentUserUseCase {
  /// Creates a new instance of GetCurrentUserUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the get current user use case
  ///
  /// # Errors
  /// Returns `AuthError::NotFound` if the account no longer exists
  pub async fn execute(
    &self,
    command: GetCurrentUserCommand,
  ) -> Result<GetCurrentUserResponse, AuthError> {
    let user = self.auth_service.current_user(command.user_id).await?;
    Ok(GetCurrentUserResponse { user })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::test_support::services;

  #[tokio::test]
  async fn test_unknown_user_is_not_found() {
    let (auth, _) = services();

    let result = GetCurrentUserUseCase::new(auth)
      .execute(GetCurrentUserCommand {
        user_id: UserId::new(),
      })
      .await;

    assert!(matches!(result, Err(AuthError::NotFound)));
  }
}
