use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use serde::Serialize;
use std::fmt;

use crate::domain::auth::errors::{AuthError, RepositoryError, TokenError};

use super::dtos::ErrorResponse;

/// API error type that maps domain errors to HTTP responses
#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum ApiError {
  /// Validation error (400 Bad Request)
  Validation(String),

  /// Authentication or authorization error (401, 403, 404 or 409)
  Auth(AuthErrorKind),

  /// Internal server error (500 Internal Server Error)
  Internal(String),
}

/// Authentication error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AuthErrorKind {
  /// Unknown email or wrong password (401)
  InvalidCredentials,

  /// Missing, malformed, forged or expired bearer token (401)
  InvalidToken,

  /// Authenticated caller may not touch this record (403)
  Forbidden,

  /// Email already exists (409)
  EmailAlreadyExists,

  /// User not found (404)
  UserNotFound,
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
      ApiError::Auth(kind) => write!(f, "Authentication error: {:?}", kind),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::Auth(kind) => match kind {
        AuthErrorKind::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AuthErrorKind::InvalidToken => StatusCode::UNAUTHORIZED,
        AuthErrorKind::Forbidden => StatusCode::FORBIDDEN,
        AuthErrorKind::EmailAlreadyExists => StatusCode::CONFLICT,
        AuthErrorKind::UserNotFound => StatusCode::NOT_FOUND,
      },
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    let (error_type, message) = match self {
      ApiError::Validation(msg) => ("validation_error", msg.clone()),
      ApiError::Auth(kind) => match kind {
        AuthErrorKind::InvalidCredentials => (
          "invalid_credentials",
          "Invalid email or password".to_string(),
        ),
        AuthErrorKind::InvalidToken => (
          "invalid_token",
          "Invalid or missing authorization token".to_string(),
        ),
        AuthErrorKind::Forbidden => (
          "forbidden",
          "You can update only your own profile".to_string(),
        ),
        AuthErrorKind::EmailAlreadyExists => (
          "email_already_exists",
          "An account with this email already exists".to_string(),
        ),
        AuthErrorKind::UserNotFound => ("user_not_found", "User not found".to_string()),
      },
      ApiError::Internal(msg) => {
        // Don't expose internal error details to clients
        tracing::error!("Internal error: {}", msg);
        (
          "internal_error",
          "An internal server error occurred".to_string(),
        )
      }
    };

    let error_response = ErrorResponse {
      error: error_type.to_string(),
      message,
      details: None,
    };

    HttpResponse::build(status)
      .content_type(ContentType::json())
      .json(error_response)
  }
}

/// Convert AuthError to ApiError
impl From<AuthError> for ApiError {
  fn from(error: AuthError) -> Self {
    match error {
      AuthError::Validation(err) => ApiError::Validation(err.to_string()),
      AuthError::EmailInUse => ApiError::Auth(AuthErrorKind::EmailAlreadyExists),
      AuthError::NotFound => ApiError::Auth(AuthErrorKind::UserNotFound),
      AuthError::InvalidCredentials => ApiError::Auth(AuthErrorKind::InvalidCredentials),
      AuthError::TokenInvalid(TokenError::SigningFailed(msg)) => {
        ApiError::Internal(format!("Token signing failed: {}", msg))
      }
      AuthError::TokenInvalid(_) => ApiError::Auth(AuthErrorKind::InvalidToken),
      AuthError::Repository(err) => match err {
        RepositoryError::NotFound => ApiError::Auth(AuthErrorKind::UserNotFound),
        RepositoryError::DuplicateKey(_) => ApiError::Auth(AuthErrorKind::EmailAlreadyExists),
        _ => ApiError::Internal(err.to_string()),
      },
      AuthError::Hash(err) => ApiError::Internal(err.to_string()),
      AuthError::Configuration(msg) => ApiError::Internal(msg),
    }
  }
}

/// Convert validation errors from validator crate
impl From<validator::ValidationErrors> for ApiError {
  fn from(errors: validator::ValidationErrors) -> Self {
    let mut messages: Vec<String> = errors
      .field_errors()
      .iter()
      .flat_map(|(field, errors)| {
        errors
          .iter()
          .map(|error| {
            error
              .message
              .as_ref()
              .map(|m| m.to_string())
              .unwrap_or_else(|| format!("Invalid field: {}", field))
          })
          .collect::<Vec<_>>()
      })
      .collect();
    // Field iteration order is unspecified
    messages.sort();

    ApiError::Validation(messages.join(", "))
  }
}
