use std::sync::Arc;

use crate::domain::auth::entities::UserProfile;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::{Email, Password, UserName};

/// Command for registering a new user
#[derive(Debug, Clone)]
pub struct SignUpCommand {
  /// User's display name
  pub name: String,
  /// User's email address
  pub email: String,
  /// User's password (plain text, will be hashed)
  pub password: String,
}

/// Response after successful sign-up
#[derive(Debug, Clone)]
pub struct SignUpResponse {
  /// The newly created user, without credential material
  pub user: UserProfile,
}

/// Use case for registering a new user
pub struct SignUpUseCase {
  auth_service: Arc<AuthService>,
}

impl SignUpUseCase {
  /// Creates a new instance of SignUpUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the sign-up use case
  ///
  /// # Errors
  /// Returns `AuthError::Validation` for empty or malformed input and
  /// `AuthError::EmailInUse` if the email is already registered
  pub async fn execute(&self, command: SignUpCommand) -> Result<SignUpResponse, AuthError> {
    let name = UserName::new(command.name)?;
    let email = Email::new(command.email)?;
    let password = Password::new(command.password)?;

    let user = self.auth_service.sign_up(name, email, password).await?;

    Ok(SignUpResponse { user })
  }
}
