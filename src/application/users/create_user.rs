use std::sync::Arc;

use crate::domain::auth::entities::UserProfile;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::value_objects::{Email, Password, UserName};
use crate::domain::directory::DirectoryService;

/// Command for creating a user record on behalf of an authenticated caller
#[derive(Debug, Clone)]
pub struct CreateUserCommand {
  pub name: String,
  pub email: String,
  /// Plain text, hashed before storage
  pub password: String,
}

#[derive(Debug, Clone)]
pub struct CreateUserResponse {
  pub user: UserProfile,
}

/// Use case for creating a user record
pub struct CreateUserUseCase {
  directory_service: Arc<DirectoryService>,
}

impl CreateUserUseCase {
  pub fn new(directory_service: Arc<DirectoryService>) -> Self {
    Self { directory_service }
  }

  /// Executes the create user use case
  ///
  /// # Errors
  /// Returns `AuthError::EmailInUse` if the email is already registered
  pub async fn execute(&self, command: CreateUserCommand) -> Result<CreateUserResponse, AuthError> {
    let name = UserName::new(command.name)?;
    let email = Email::new(command.email)?;
    let password = Password::new(command.password)?;

    let user = self
      .directory_service
      .create_user(name, email, password)
      .await?;

    Ok(CreateUserResponse { user })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::test_support::services;

  fn command(email: &str) -> CreateUserCommand {
    CreateUserCommand {
      name: "Bob".to_string(),
      email: email.to_string(),
      password: "secret1".to_string(),
    }
  }

  #[tokio::test]
  async fn test_create_then_duplicate() {
    let (_, directory) = services();
    let use_case = CreateUserUseCase::new(directory);

    let created = use_case.execute(command("bob@x.com")).await.unwrap();
    assert_eq!(created.user.email, "bob@x.com");

    assert!(matches!(
      use_case.execute(command("bob@x.com")).await,
      Err(AuthError::EmailInUse)
    ));
  }
}
