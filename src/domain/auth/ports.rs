use async_trait::async_trait;
use chrono::Duration;

use super::entities::{IssuedToken, NewUser, TokenClaims, User};
use super::errors::{AuthError, HashError, TokenError};
use super::value_objects::{Email, ListWindow, Password, PasswordDigest, UserId};

/// Repository trait for user persistence operations
///
/// Implementations own email uniqueness: a `create` or `update` that would
/// leave two records with the same email fails with
/// `RepositoryError::DuplicateKey`, even under concurrent callers. Every
/// mutation is applied as a single atomic write before the call returns.
#[async_trait]
pub trait UserRepository: Send + Sync {
  /// Creates a new user, assigning its id and timestamps
  async fn create(&self, new_user: NewUser) -> Result<User, AuthError>;

  /// Finds a user by their unique identifier
  async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AuthError>;

  /// Finds a user by their email address
  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError>;

  /// Lists users ordered by id ascending
  async fn list(&self, window: ListWindow) -> Result<Vec<User>, AuthError>;

  /// Replaces the mutable fields of an existing user and refreshes `updated_at`
  async fn update(&self, user: User) -> Result<User, AuthError>;

  /// Removes a user permanently
  async fn delete(&self, id: UserId) -> Result<(), AuthError>;
}

/// Service trait for password hashing operations
#[async_trait]
pub trait PasswordHasher: Send + Sync {
  /// Hashes a plain text password with a fresh salt
  async fn hash(&self, password: &Password) -> Result<PasswordDigest, HashError>;

  /// Verifies a plain text password against a stored digest
  ///
  /// Returns `Ok(false)` on mismatch and an error only for digests this
  /// hasher cannot parse.
  async fn verify(&self, password: &Password, digest: &PasswordDigest) -> Result<bool, HashError>;
}

/// Service trait for bearer token issuance and validation
pub trait TokenService: Send + Sync {
  /// Signs a token for the user that expires `ttl` after issuance
  fn issue(&self, user: &User, ttl: Duration) -> Result<IssuedToken, TokenError>;

  /// Verifies a presented token and returns its claims
  fn validate(&self, token: &str) -> Result<TokenClaims, TokenError>;
}
