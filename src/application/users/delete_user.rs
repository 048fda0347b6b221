use std::sync::Arc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::value_objects::UserId;
use crate::domain::directory::DirectoryService;

#[derive(Debug, Clone)]
pub struct DeleteUserCommand {
  pub user_id: String,
}

/// Use case for deleting a user record
pub struct DeleteUserUseCase {
  directory_service: Arc<DirectoryService>,
}

impl DeleteUserUseCase {
  pub fn new(directory_service: Arc<DirectoryService>) -> Self {
    Self { directory_service }
  }

  /// # Errors
  /// Returns `AuthError::NotFound` if the record is already gone
  pub async fn execute(&self, command: DeleteUserCommand) -> Result<(), AuthError> {
    let user_id = UserId::parse(&command.user_id)?;
    self.directory_service.delete_user(user_id).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::test_support::services;
  use crate::application::users::{CreateUserCommand, CreateUserUseCase};

  #[tokio::test]
  async fn test_delete_twice() {
    let (_, directory) = services();
    let created = CreateUserUseCase::new(directory.clone())
      .execute(CreateUserCommand {
        name: "Bob".to_string(),
        email: "bob@x.com".to_string(),
        password: "secret1".to_string(),
      })
      .await
      .unwrap();
    let use_case = DeleteUserUseCase::new(directory);
    let command = DeleteUserCommand {
      user_id: created.user.id.to_string(),
    };

    use_case.execute(command.clone()).await.unwrap();
    assert!(matches!(
      use_case.execute(command).await,
      Err(AuthError::NotFound)
    ));
  }
}
