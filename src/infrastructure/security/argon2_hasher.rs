use argon2::password_hash::SaltString;
use argon2::{
  Algorithm, Argon2, Params, Version,
  password_hash::{
    PasswordHash as Argon2PasswordHash, PasswordHasher as Argon2PasswordHasherTrait,
    PasswordVerifier,
  },
};
use async_trait::async_trait;

use crate::domain::auth::errors::{AuthError, HashError};
use crate::domain::auth::ports::PasswordHasher;
use crate::domain::auth::value_objects::{Password, PasswordDigest};

/// Argon2id password hasher implementation
///
/// Default parameters:
/// - Memory cost: 19 MiB (19456 KiB)
/// - Time cost: 2 iterations
/// - Parallelism: 1 thread
///
/// The produced PHC string embeds algorithm, version, cost and salt, so
/// verification needs nothing besides the digest itself.
pub struct Argon2PasswordHasher {
  argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
  pub const DEFAULT_MEMORY_KIB: u32 = 19456;
  pub const DEFAULT_ITERATIONS: u32 = 2;
  pub const DEFAULT_PARALLELISM: u32 = 1;

  /// Creates a hasher with the default parameters
  pub fn new() -> Result<Self, AuthError> {
    Self::with_params(
      Self::DEFAULT_MEMORY_KIB,
      Self::DEFAULT_ITERATIONS,
      Self::DEFAULT_PARALLELISM,
    )
  }

  /// Creates a hasher with explicit cost parameters
  ///
  /// # Errors
  /// Returns `AuthError::Configuration` if argon2 rejects the parameters
  pub fn with_params(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, AuthError> {
    // Output length: 32 bytes
    let params = Params::new(memory_kib, iterations, parallelism, Some(32)).map_err(|e| {
      AuthError::Configuration(format!("Failed to create Argon2 params: {}", e))
    })?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    Ok(Self { argon2 })
  }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
  async fn hash(&self, password: &Password) -> Result<PasswordDigest, HashError> {
    let salt = SaltString::generate(&mut rand::rngs::OsRng);

    let hash = self
      .argon2
      .hash_password(password.as_str().as_bytes(), &salt)
      .map_err(|e| HashError::HashingFailed(e.to_string()))?;

    Ok(PasswordDigest::new(hash.to_string()))
  }

  /// Uses argon2's constant-time comparison of the recomputed output
  async fn verify(&self, password: &Password, digest: &PasswordDigest) -> Result<bool, HashError> {
    let parsed_hash =
      Argon2PasswordHash::new(digest.as_str()).map_err(|_| HashError::InvalidFormat)?;

    match self
      .argon2
      .verify_password(password.as_str().as_bytes(), &parsed_hash)
    {
      Ok(()) => Ok(true),
      Err(argon2::password_hash::Error::Password) => Ok(false),
      Err(e) => Err(HashError::VerificationFailed(e.to_string())),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn cheap_hasher() -> Argon2PasswordHasher {
    Argon2PasswordHasher::with_params(64, 1, 1).unwrap()
  }

  #[tokio::test]
  async fn test_hash_password() {
    let hasher = cheap_hasher();
    let password = Password::new("test_password_123").unwrap();

    let digest = hasher.hash(&password).await.unwrap();

    assert!(digest.as_str().starts_with("$argon2id$"));
    assert_ne!(digest.as_str(), password.as_str());
  }

  #[tokio::test]
  async fn test_verify_correct_and_incorrect_password() {
    let hasher = cheap_hasher();
    let password = Password::new("test_password_123").unwrap();
    let wrong_password = Password::new("wrong_password").unwrap();

    let digest = hasher.hash(&password).await.unwrap();

    assert!(hasher.verify(&password, &digest).await.unwrap());
    assert!(!hasher.verify(&wrong_password, &digest).await.unwrap());
  }

  #[tokio::test]
  async fn test_hash_produces_different_salts() {
    let hasher = cheap_hasher();
    let password = Password::new("test_password_123").unwrap();

    let digest1 = hasher.hash(&password).await.unwrap();
    let digest2 = hasher.hash(&password).await.unwrap();

    assert_ne!(digest1.as_str(), digest2.as_str());
    assert!(hasher.verify(&password, &digest1).await.unwrap());
    assert!(hasher.verify(&password, &digest2).await.unwrap());
  }

  #[tokio::test]
  async fn test_verify_malformed_digest_is_an_error() {
    let hasher = cheap_hasher();
    let password = Password::new("test_password_123").unwrap();

    let result = hasher
      .verify(&password, &PasswordDigest::new("test_password_123"))
      .await;

    assert!(matches!(result, Err(HashError::InvalidFormat)));
  }

  #[tokio::test]
  async fn test_digest_embeds_parameters() {
    let hasher = Argon2PasswordHasher::new().unwrap();
    let password = Password::new("test_password_123").unwrap();

    let digest = hasher.hash(&password).await.unwrap();
    let parsed = Argon2PasswordHash::new(digest.as_str()).unwrap();

    assert_eq!(parsed.version, Some(Version::V0x13 as u32));
    assert!(digest.as_str().contains("m=19456,t=2,p=1"));
  }

  #[test]
  fn test_invalid_params_are_rejected() {
    assert!(matches!(
      Argon2PasswordHasher::with_params(1, 0, 0),
      Err(AuthError::Configuration(_))
    ));
  }
}
