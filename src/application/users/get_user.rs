use std::sync::Arc;

use crate::domain::auth::entities::UserProfile;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::value_objects::UserId;
use crate::domain::directory::DirectoryService;

#[derive(Debug, Clone)]
pub struct GetUserCommand {
  /// Raw identifier as received from the caller
  pub user_id: String,
}

#[derive(Debug, Clone)]
pub struct GetUserResponse {
  pub user: UserProfile,
}

/// Use case for fetching one user record
pub struct GetUserUseCase {
  directory_service: Arc<DirectoryService>,
}

impl GetUserUseCase {
  pub fn new(directory_service: Arc<DirectoryService>) -> Self {
    Self { directory_service }
  }

  /// # Errors
  /// Returns `AuthError::Validation` for an unparsable id and
  /// `AuthError::NotFound` if no record has it
  pub async fn execute(&self, command: GetUserCommand) -> Result<GetUserResponse, AuthError> {
    let user_id = UserId::parse(&command.user_id)?;
    let user = self.directory_service.get_user(user_id).await?;
    Ok(GetUserResponse { user })
  }
}
