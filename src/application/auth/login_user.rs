use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::{Email, Password, UserId};

/// Command for logging in a user
#[derive(Debug, Clone)]
pub struct LoginUserCommand {
  /// User's email address
  pub email: String,
  /// User's password (plain text)
  pub password: String,
}

/// Response after successful user login
#[derive(Debug, Clone)]
pub struct LoginUserResponse {
  /// Identifier of the authenticated user
  pub user_id: UserId,
  /// Signed bearer token
  pub token: String,
  /// Token expiration timestamp
  pub expires_at: DateTime<Utc>,
}

/// Use case for logging in a user
pub struct LoginUserUseCase {
  auth_service: Arc<AuthService>,
}

impl LoginUserUseCase {
  /// Creates a new instance of LoginUserUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the user login use case
  ///
  /// # Returns
  /// A `LoginUserResponse` containing the bearer token and its expiry
  ///
  /// # Errors
  /// Returns `AuthError::InvalidCredentials` for an unknown email or a wrong
  /// password, without saying which
  pub async fn execute(&self, command: LoginUserCommand) -> Result<LoginUserResponse, AuthError> {
    let email = Email::new(command.email)?;
    let password = Password::new(command.password)?;

    let issued = self.auth_service.login(email, password).await?;

    Ok(LoginUserResponse {
      user_id: issued.claims.subject,
      expires_at: issued.claims.expires_at,
      token: issued.token,
    })
  }
}
