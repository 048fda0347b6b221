use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use validator::ValidateEmail;
use zeroize::Zeroizing;

use super::errors::ValidationError;

// ============================================================================
// Email Value Object
// ============================================================================

/// Email address used as the unique identity attribute.
///
/// Compared as an exact string: no case folding or trimming is applied, so
/// `Ann@x.com` and `ann@x.com` are two distinct identities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
  /// Creates a new Email after validation
  pub fn new(email: impl Into<String>) -> Result<Self, ValidationError> {
    let email = email.into();

    if email.is_empty() {
      return Err(ValidationError::missing("email"));
    }

    if !email.validate_email() {
      return Err(ValidationError::InvalidEmail);
    }

    Ok(Self(email))
  }

  /// Returns the email as a string slice
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Consumes self and returns the inner String
  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for Email {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl AsRef<str> for Email {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

// ============================================================================
// UserName Value Object
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserName(String);

impl UserName {
  const MAX_LENGTH: usize = 255;

  /// Creates a display name; blank names are rejected
  pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
    let name = name.into();

    if name.trim().is_empty() {
      return Err(ValidationError::missing("name"));
    }

    if name.chars().count() > Self::MAX_LENGTH {
      return Err(ValidationError::InvalidField {
        field: "name".to_string(),
      });
    }

    Ok(Self(name))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

// ============================================================================
// Password Value Object (Plain Password - Never Stored)
// ============================================================================

/// Plaintext password. The buffer is wiped when the value is dropped.
#[derive(Clone)]
pub struct Password(Zeroizing<String>);

impl Password {
  const MAX_LENGTH: usize = 128;

  /// Creates a new Password after validation
  pub fn new(password: impl Into<String>) -> Result<Self, ValidationError> {
    let password = Zeroizing::new(password.into());

    if password.is_empty() {
      return Err(ValidationError::missing("password"));
    }

    if password.chars().count() > Self::MAX_LENGTH {
      return Err(ValidationError::PasswordTooLong {
        max: Self::MAX_LENGTH,
      });
    }

    Ok(Self(password))
  }

  /// Returns the password as a string slice (use with caution)
  pub fn as_str(&self) -> &str {
    self.0.as_str()
  }
}

// Implement Debug without exposing the password
impl fmt::Debug for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Password(***)")
  }
}

// Implement Display without exposing the password
impl fmt::Display for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("***")
  }
}

// ============================================================================
// PasswordDigest Value Object (PHC string produced by the hasher)
// ============================================================================

/// Self-describing password digest (algorithm, cost and salt are embedded).
///
/// Construction does not parse the string so that mapping stored rows stays
/// total; a malformed digest is reported by the hasher at verification time.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
  pub fn new(digest: impl Into<String>) -> Self {
    Self(digest.into())
  }

  /// Returns the digest as a string slice
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Consumes self and returns the inner String
  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Debug for PasswordDigest {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("PasswordDigest(***)")
  }
}

// ============================================================================
// UserId Value Object
// ============================================================================

/// Directory-assigned user identifier.
///
/// UUID v7: time-ordered, so ascending id order follows creation order, and
/// ids are never handed out twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
  /// Creates a new time-ordered UserId
  pub fn new() -> Self {
    Self(Uuid::now_v7())
  }

  /// Creates a UserId from an existing UUID
  pub fn from_uuid(uuid: Uuid) -> Self {
    Self(uuid)
  }

  /// Parses a UserId from its hyphenated string form
  pub fn parse(value: &str) -> Result<Self, ValidationError> {
    Uuid::parse_str(value)
      .map(Self)
      .map_err(|_| ValidationError::InvalidField {
        field: "id".to_string(),
      })
  }

  /// Returns the inner UUID
  pub fn into_inner(self) -> Uuid {
    self.0
  }

  /// Returns a reference to the inner UUID
  pub fn as_uuid(&self) -> &Uuid {
    &self.0
  }
}

impl Default for UserId {
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Display for UserId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl From<Uuid> for UserId {
  fn from(uuid: Uuid) -> Self {
    Self(uuid)
  }
}

impl From<UserId> for Uuid {
  fn from(user_id: UserId) -> Self {
    user_id.0
  }
}

// ============================================================================
// ListWindow Value Object
// ============================================================================

/// Offset/limit window accepted by the user directory when listing.
///
/// Negative offsets clamp to zero; the limit is clamped to `[1, MAX_LIMIT]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListWindow {
  offset: u64,
  limit: u64,
}

impl ListWindow {
  pub const MAX_LIMIT: u64 = 100;

  pub fn new(offset: i64, limit: i64) -> Self {
    let offset = u64::try_from(offset).unwrap_or(0);
    let limit = u64::try_from(limit).unwrap_or(0).clamp(1, Self::MAX_LIMIT);
    Self { offset, limit }
  }

  pub fn offset(&self) -> u64 {
    self.offset
  }

  pub fn limit(&self) -> u64 {
    self.limit
  }
}
