use chrono::Duration;
use std::sync::Arc;
use tokio::sync::OnceCell;

use super::entities::{IssuedToken, NewUser, TokenClaims, UserProfile};
use super::errors::{AuthError, RepositoryError};
use super::ports::{PasswordHasher, TokenService, UserRepository};
use super::value_objects::{Email, Password, PasswordDigest, UserId, UserName};

/// Default bearer token lifetime
const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Plaintext hashed once to produce the digest checked for unknown emails
const TIMING_EQUALIZER_PASSWORD: &str = "userdir-timing-equalizer";

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
  /// Lifetime of tokens issued on login
  pub token_ttl: Duration,
}

impl Default for AuthServiceConfig {
  fn default() -> Self {
    Self {
      token_ttl: Duration::hours(DEFAULT_TOKEN_TTL_HOURS),
    }
  }
}

/// Authentication service implementing sign-up, login and token checks
pub struct AuthService {
  user_repo: Arc<dyn UserRepository>,
  password_hasher: Arc<dyn PasswordHasher>,
  token_service: Arc<dyn TokenService>,
  config: AuthServiceConfig,
  timing_digest: OnceCell<PasswordDigest>,
}

impl AuthService {
  /// Creates a new instance of AuthService
  pub fn new(
    user_repo: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_service: Arc<dyn TokenService>,
    config: AuthServiceConfig,
  ) -> Self {
    Self {
      user_repo,
      password_hasher,
      token_service,
      config,
      timing_digest: OnceCell::new(),
    }
  }

  /// Registers a new user
  ///
  /// # Arguments
  /// * `name` - The user's display name
  /// * `email` - The user's email address
  /// * `password` - The user's password (will be hashed)
  ///
  /// # Returns
  /// The created user's profile; neither the plaintext nor the digest is returned
  ///
  /// # Errors
  /// Returns `AuthError::EmailInUse` if email is already registered
  pub async fn sign_up(
    &self,
    name: UserName,
    email: Email,
    password: Password,
  ) -> Result<UserProfile, AuthError> {
    // Hashing finishes before anything is written
    let password_digest = self.password_hasher.hash(&password).await?;

    let new_user = NewUser {
      name,
      email,
      password_digest,
    };

    let created_user = match self.user_repo.create(new_user).await {
      Ok(user) => user,
      Err(AuthError::Repository(RepositoryError::DuplicateKey(_))) => {
        tracing::warn!("Sign-up rejected: email already in use");
        return Err(AuthError::EmailInUse);
      }
      Err(e) => return Err(e),
    };

    tracing::info!(user_id = %created_user.id, "User signed up");

    Ok(created_user.profile())
  }

  /// Authenticates a user and issues a bearer token
  ///
  /// Unknown emails and wrong passwords fail identically with
  /// `AuthError::InvalidCredentials`, and both paths run one digest
  /// verification so their latency is comparable.
  pub async fn login(&self, email: Email, password: Password) -> Result<IssuedToken, AuthError> {
    let Some(user) = self.user_repo.find_by_email(&email).await? else {
      let digest = self.timing_digest().await?;
      // Result ignored: the outcome is the same whatever the dummy check says
      let _ = self.password_hasher.verify(&password, digest).await;
      tracing::warn!("Login rejected: invalid credentials");
      return Err(AuthError::InvalidCredentials);
    };

    let is_valid = self
      .password_hasher
      .verify(&password, &user.password_digest)
      .await
      .inspect_err(|e| {
        tracing::error!(user_id = %user.id, error = %e, "Stored password digest is unusable");
      })?;

    if !is_valid {
      tracing::warn!("Login rejected: invalid credentials");
      return Err(AuthError::InvalidCredentials);
    }

    let issued = self.token_service.issue(&user, self.config.token_ttl)?;

    tracing::info!(user_id = %user.id, expires_at = %issued.claims.expires_at, "User logged in");

    Ok(issued)
  }

  /// Validates a presented bearer token
  ///
  /// # Errors
  /// Returns `AuthError::TokenInvalid` carrying the rejection reason
  pub fn authenticate(&self, token: &str) -> Result<TokenClaims, AuthError> {
    self.token_service.validate(token).map_err(|reason| {
      tracing::debug!(%reason, "Bearer token rejected");
      AuthError::TokenInvalid(reason)
    })
  }

  /// Loads the profile of an authenticated user
  ///
  /// # Errors
  /// Returns `AuthError::NotFound` if the account was deleted after the token was issued
  pub async fn current_user(&self, user_id: UserId) -> Result<UserProfile, AuthError> {
    self
      .user_repo
      .find_by_id(user_id)
      .await?
      .map(|user| user.profile())
      .ok_or(AuthError::NotFound)
  }

  async fn timing_digest(&self) -> Result<&PasswordDigest, AuthError> {
    self
      .timing_digest
      .get_or_try_init(|| async {
        let password = Password::new(TIMING_EQUALIZER_PASSWORD)?;
        Ok::<_, AuthError>(self.password_hasher.hash(&password).await?)
      })
      .await
  }
}
