use std::sync::Arc;

use crate::domain::auth::entities::UserProfile;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::value_objects::UserId;
use crate::domain::directory::{DirectoryService, UserPatch};

/// Partial update; `None` and empty strings leave the stored value alone
#[derive(Debug, Clone)]
pub struct UpdateUserCommand {
  pub user_id: UserId,
  pub name: Option<String>,
  pub email: Option<String>,
  pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpdateUserResponse {
  pub user: UserProfile,
}

/// Use case for updating a user record
pub struct UpdateUserUseCase {
  directory_service: Arc<DirectoryService>,
}

impl UpdateUserUseCase {
  pub fn new(directory_service: Arc<DirectoryService>) -> Self {
    Self { directory_service }
  }

  /// Executes the update user use case
  ///
  /// # Errors
  /// Returns `AuthError::NotFound` for an unknown id and
  /// `AuthError::EmailInUse` if the new email belongs to someone else
  pub async fn execute(&self, command: UpdateUserCommand) -> Result<UpdateUserResponse, AuthError> {
    let patch = UserPatch::from_fields(command.name, command.email, command.password)?;

    let user = self
      .directory_service
      .update_user(command.user_id, patch)
      .await?;

    Ok(UpdateUserResponse { user })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::test_support::services;
  use crate::application::users::{CreateUserCommand, CreateUserUseCase};

  #[tokio::test]
  async fn test_update_name_only() {
    let (_, directory) = services();
    let created = CreateUserUseCase::new(directory.clone())
      .execute(CreateUserCommand {
        name: "Bob".to_string(),
        email: "bob@x.com".to_string(),
        password: "secret1".to_string(),
      })
      .await
      .unwrap()
      .user;

    let updated = UpdateUserUseCase::new(directory)
      .execute(UpdateUserCommand {
        user_id: created.id,
        name: Some("Robert".to_string()),
        email: Some(String::new()),
        password: None,
      })
      .await
      .unwrap()
      .user;

    assert_eq!(updated.name, "Robert");
    assert_eq!(updated.email, "bob@x.com");
    assert_eq!(updated.created_at, created.created_at);
  }
}
