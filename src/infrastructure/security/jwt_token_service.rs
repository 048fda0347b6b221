use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::auth::entities::{IssuedToken, TokenClaims, User};
use crate::domain::auth::errors::{AuthError, TokenError};
use crate::domain::auth::ports::TokenService;
use crate::domain::auth::value_objects::UserId;

/// Registered JWT claims carried by every token
#[derive(Debug, Serialize, Deserialize)]
struct JwtClaims {
  sub: String,
  iat: i64,
  exp: i64,
}

/// HS256 JSON Web Token issuer and validator
///
/// The signing secret is fixed at construction. Validation only accepts the
/// configured algorithm, checks the signature before looking at any claim, and
/// treats a token as expired from the `exp` second onwards.
pub struct JwtTokenService {
  algorithm: Algorithm,
  encoding_key: EncodingKey,
  decoding_key: DecodingKey,
  validation: Validation,
}

impl JwtTokenService {
  /// Creates a token service signing with the given secret
  ///
  /// # Errors
  /// Returns `AuthError::Configuration` if the secret is empty
  pub fn new(secret: &[u8]) -> Result<Self, AuthError> {
    if secret.is_empty() {
      return Err(AuthError::Configuration(
        "JWT signing secret must not be empty".to_string(),
      ));
    }

    let algorithm = Algorithm::HS256;

    let mut validation = Validation::new(algorithm);
    // Expiry is checked against our own clock in `validate_at`
    validation.validate_exp = false;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "iat", "sub"]);

    Ok(Self {
      algorithm,
      encoding_key: EncodingKey::from_secret(secret),
      decoding_key: DecodingKey::from_secret(secret),
      validation,
    })
  }

  /// Validates a token as of the given instant
  pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, TokenError> {
    let data = decode::<JwtClaims>(token, &self.decoding_key, &self.validation)?;

    let subject = UserId::parse(&data.claims.sub).map_err(|_| TokenError::Malformed)?;
    let issued_at = DateTime::from_timestamp(data.claims.iat, 0).ok_or(TokenError::Malformed)?;
    let expires_at = DateTime::from_timestamp(data.claims.exp, 0).ok_or(TokenError::Malformed)?;

    let claims = TokenClaims {
      subject,
      issued_at,
      expires_at,
    };

    if claims.is_expired_at(now) {
      return Err(TokenError::Expired);
    }

    Ok(claims)
  }

  /// Signs a token as of the given instant
  pub fn issue_at(
    &self,
    user: &User,
    ttl: Duration,
    now: DateTime<Utc>,
  ) -> Result<IssuedToken, TokenError> {
    // JWT timestamps have second precision
    let issued_at = DateTime::from_timestamp(now.timestamp(), 0).ok_or(TokenError::Malformed)?;
    let expires_at = issued_at
      .checked_add_signed(ttl)
      .ok_or_else(|| TokenError::SigningFailed("token lifetime out of range".to_string()))?;

    let jwt_claims = JwtClaims {
      sub: user.id.to_string(),
      iat: issued_at.timestamp(),
      exp: expires_at.timestamp(),
    };

    let token = encode(&Header::new(self.algorithm), &jwt_claims, &self.encoding_key)
      .map_err(|e| TokenError::SigningFailed(e.to_string()))?;

    Ok(IssuedToken {
      token,
      claims: TokenClaims {
        subject: user.id,
        issued_at,
        expires_at,
      },
    })
  }
}

impl TokenService for JwtTokenService {
  fn issue(&self, user: &User, ttl: Duration) -> Result<IssuedToken, TokenError> {
    self.issue_at(user, ttl, Utc::now())
  }

  fn validate(&self, token: &str) -> Result<TokenClaims, TokenError> {
    self.validate_at(token, Utc::now())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::entities::NewUser;
  use crate::domain::auth::value_objects::{Email, PasswordDigest, UserName};

  const SECRET: &[u8] = b"test-secret-for-jwt-token-service";

  fn user() -> User {
    User::create(
      NewUser {
        name: UserName::new("Ann").unwrap(),
        email: Email::new("ann@x.com").unwrap(),
        password_digest: PasswordDigest::new("$argon2id$digest"),
      },
      UserId::new(),
      Utc::now(),
    )
  }

  #[test]
  fn test_issue_and_validate_round_trip() {
    let service = JwtTokenService::new(SECRET).unwrap();
    let user = user();

    let issued = service.issue(&user, Duration::hours(1)).unwrap();
    let claims = service.validate(&issued.token).unwrap();

    assert_eq!(claims.subject, user.id);
    assert_eq!(claims, issued.claims);
    assert_eq!(claims.expires_at - claims.issued_at, Duration::hours(1));
  }

  #[test]
  fn test_token_valid_until_expiry_then_expired() {
    let service = JwtTokenService::new(SECRET).unwrap();
    let now = Utc::now();
    let issued = service
      .issue_at(&user(), Duration::seconds(60), now)
      .unwrap();
    let issued_at = issued.claims.issued_at;

    assert!(service.validate_at(&issued.token, issued_at).is_ok());
    assert!(
      service
        .validate_at(&issued.token, issued_at + Duration::seconds(59))
        .is_ok()
    );
    assert_eq!(
      service
        .validate_at(&issued.token, issued_at + Duration::seconds(60))
        .unwrap_err(),
      TokenError::Expired
    );
  }

  #[test]
  fn test_out_of_range_lifetime_fails_to_sign() {
    let service = JwtTokenService::new(SECRET).unwrap();
    let ttl = Duration::try_seconds(9_000_000_000_000).unwrap();

    assert!(matches!(
      service.issue(&user(), ttl),
      Err(TokenError::SigningFailed(_))
    ));
  }

  #[test]
  fn test_token_signed_with_other_secret_is_rejected() {
    let service = JwtTokenService::new(SECRET).unwrap();
    let other = JwtTokenService::new(b"a-completely-different-secret").unwrap();

    let issued = other.issue(&user(), Duration::hours(1)).unwrap();

    assert_eq!(
      service.validate(&issued.token).unwrap_err(),
      TokenError::BadSignature
    );
  }

  #[test]
  fn test_tampered_payload_is_rejected() {
    let service = JwtTokenService::new(SECRET).unwrap();
    let issued = service.issue(&user(), Duration::hours(1)).unwrap();
    let forged = service.issue(&user(), Duration::hours(1)).unwrap();

    // Splice another token's payload onto this token's signature
    let parts: Vec<&str> = issued.token.split('.').collect();
    let forged_parts: Vec<&str> = forged.token.split('.').collect();
    let spliced = format!("{}.{}.{}", parts[0], forged_parts[1], parts[2]);

    assert_eq!(
      service.validate(&spliced).unwrap_err(),
      TokenError::BadSignature
    );
  }

  #[test]
  fn test_other_algorithm_is_rejected() {
    let service = JwtTokenService::new(SECRET).unwrap();
    let user = user();
    let now = Utc::now().timestamp();
    let claims = JwtClaims {
      sub: user.id.to_string(),
      iat: now,
      exp: now + 3600,
    };

    let token = encode(
      &Header::new(Algorithm::HS512),
      &claims,
      &EncodingKey::from_secret(SECRET),
    )
    .unwrap();

    assert_eq!(
      service.validate(&token).unwrap_err(),
      TokenError::UnsupportedAlgorithm
    );
  }

  #[test]
  fn test_malformed_tokens_are_rejected() {
    let service = JwtTokenService::new(SECRET).unwrap();

    assert_eq!(service.validate("").unwrap_err(), TokenError::Malformed);
    assert_eq!(
      service.validate("abc.def").unwrap_err(),
      TokenError::Malformed
    );
    assert_eq!(
      service.validate("not a token at all").unwrap_err(),
      TokenError::Malformed
    );
  }

  #[test]
  fn test_non_uuid_subject_is_malformed() {
    let service = JwtTokenService::new(SECRET).unwrap();
    let now = Utc::now().timestamp();
    let claims = JwtClaims {
      sub: "42".to_string(),
      iat: now,
      exp: now + 3600,
    };
    let token = encode(
      &Header::new(Algorithm::HS256),
      &claims,
      &EncodingKey::from_secret(SECRET),
    )
    .unwrap();

    assert_eq!(service.validate(&token).unwrap_err(), TokenError::Malformed);
  }

  #[test]
  fn test_empty_secret_is_a_configuration_error() {
    assert!(matches!(
      JwtTokenService::new(b""),
      Err(AuthError::Configuration(_))
    ));
  }
}
