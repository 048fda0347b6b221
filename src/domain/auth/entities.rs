use chrono::{DateTime, Utc};
use serde::Serialize;

use super::value_objects::{Email, PasswordDigest, UserId, UserName};

/// User entity representing a record in the directory
#[derive(Debug, Clone)]
pub struct User {
  /// Unique identifier, assigned by the directory
  pub id: UserId,
  /// User's display name
  pub name: String,
  /// User's email address (unique, exact match)
  pub email: String,
  /// Argon2id digest of the user's password
  pub password_digest: PasswordDigest,
  /// Timestamp when the user was created
  pub created_at: DateTime<Utc>,
  /// Timestamp when the user was last updated
  pub updated_at: DateTime<Utc>,
}

impl User {
  /// Materializes a new record from validated input. Only the directory calls this.
  pub fn create(new_user: NewUser, id: UserId, now: DateTime<Utc>) -> Self {
    Self {
      id,
      name: new_user.name.into_inner(),
      email: new_user.email.into_inner(),
      password_digest: new_user.password_digest,
      created_at: now,
      updated_at: now,
    }
  }

  /// Updates the user's display name
  pub fn update_name(&mut self, name: UserName) {
    self.name = name.into_inner();
    self.touch();
  }

  /// Updates the user's email
  pub fn update_email(&mut self, email: Email) {
    self.email = email.into_inner();
    self.touch();
  }

  /// Updates the user's password digest
  pub fn update_password_digest(&mut self, digest: PasswordDigest) {
    self.password_digest = digest;
    self.touch();
  }

  /// Moves `updated_at` to now, never backwards
  pub fn touch(&mut self) {
    self.updated_at = Utc::now().max(self.updated_at);
  }

  /// Public view of the record without credential material
  pub fn profile(&self) -> UserProfile {
    UserProfile {
      id: self.id,
      name: self.name.clone(),
      email: self.email.clone(),
      created_at: self.created_at,
      updated_at: self.updated_at,
    }
  }
}

/// Input for creating a user; the password has already been hashed
#[derive(Debug, Clone)]
pub struct NewUser {
  pub name: UserName,
  pub email: Email,
  pub password_digest: PasswordDigest,
}

/// A user as seen outside the domain services
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
  pub id: UserId,
  pub name: String,
  pub email: String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Decoded payload of a bearer token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
  /// The user the token was issued to
  pub subject: UserId,
  pub issued_at: DateTime<Utc>,
  pub expires_at: DateTime<Utc>,
}

impl TokenClaims {
  /// Checks whether the token is expired at the given instant
  pub fn is_expired_at(&self, at: DateTime<Utc>) -> bool {
    at >= self.expires_at
  }
}

/// A freshly signed token together with the claims it carries
#[derive(Clone)]
pub struct IssuedToken {
  pub token: String,
  pub claims: TokenClaims,
}

impl std::fmt::Debug for IssuedToken {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("IssuedToken")
      .field("token", &"***")
      .field("claims", &self.claims)
      .finish()
  }
}
