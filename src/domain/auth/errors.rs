use thiserror::Error;

/// Main error type for authentication and directory operations
#[derive(Debug, Error)]
pub enum AuthError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValidationError),

  #[error("Email already in use")]
  EmailInUse,

  #[error("User not found")]
  NotFound,

  #[error("Invalid credentials provided")]
  InvalidCredentials,

  /// The subkind is kept for diagnostics; callers only see "invalid token".
  #[error("Invalid token")]
  TokenInvalid(#[from] TokenError),

  #[error("Repository error: {0}")]
  Repository(#[from] RepositoryError),

  #[error("Hash error: {0}")]
  Hash(#[from] HashError),

  #[error("Configuration error: {0}")]
  Configuration(String),
}

/// Repository-related errors
#[derive(Debug, Error)]
pub enum RepositoryError {
  #[error("Database connection failed: {0}")]
  ConnectionFailed(String),

  #[error("Query execution failed: {0}")]
  QueryFailed(String),

  #[error("Record not found")]
  NotFound,

  #[error("Duplicate key violation: {0}")]
  DuplicateKey(String),

  #[error("Database error: {0}")]
  DatabaseError(String),
}

/// Password hashing and verification errors
#[derive(Debug, Error)]
pub enum HashError {
  #[error("Failed to hash password: {0}")]
  HashingFailed(String),

  #[error("Failed to verify password: {0}")]
  VerificationFailed(String),

  #[error("Invalid hash format")]
  InvalidFormat,
}

/// Reasons a bearer token is rejected or could not be produced
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
  #[error("token is malformed")]
  Malformed,

  #[error("token signature does not match")]
  BadSignature,

  #[error("token has expired")]
  Expired,

  #[error("token uses an unsupported signing algorithm")]
  UnsupportedAlgorithm,

  #[error("failed to sign token: {0}")]
  SigningFailed(String),
}

/// Input validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("Invalid email format")]
  InvalidEmail,

  #[error("Password too long, maximum {max} characters allowed")]
  PasswordTooLong { max: usize },

  #[error("Invalid field: {field}")]
  InvalidField { field: String },

  #[error("Missing required field: {field}")]
  MissingField { field: String },
}

impl ValidationError {
  pub fn missing(field: &str) -> Self {
    ValidationError::MissingField {
      field: field.to_string(),
    }
  }
}

// Automatic conversions from external error types

impl From<sqlx::Error> for RepositoryError {
  fn from(error: sqlx::Error) -> Self {
    match error {
      sqlx::Error::RowNotFound => RepositoryError::NotFound,
      sqlx::Error::Database(db_err) => {
        if db_err.is_unique_violation() {
          RepositoryError::DuplicateKey(db_err.message().to_string())
        } else {
          RepositoryError::DatabaseError(db_err.message().to_string())
        }
      }
      sqlx::Error::PoolTimedOut => RepositoryError::ConnectionFailed("Pool timed out".to_string()),
      sqlx::Error::PoolClosed => RepositoryError::ConnectionFailed("Pool closed".to_string()),
      _ => RepositoryError::QueryFailed(error.to_string()),
    }
  }
}

impl From<sqlx::Error> for AuthError {
  fn from(error: sqlx::Error) -> Self {
    AuthError::Repository(RepositoryError::from(error))
  }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
  fn from(error: jsonwebtoken::errors::Error) -> Self {
    use jsonwebtoken::errors::ErrorKind;
    match error.kind() {
      ErrorKind::InvalidSignature => TokenError::BadSignature,
      ErrorKind::ExpiredSignature => TokenError::Expired,
      ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
        TokenError::UnsupportedAlgorithm
      }
      _ => TokenError::Malformed,
    }
  }
}
