use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::auth::entities::UserProfile;

/// Request for user sign-up
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignUpRequest {
  /// User's display name
  #[validate(length(
    min = 1,
    max = 255,
    message = "Name must be between 1 and 255 characters"
  ))]
  pub name: String,

  /// User's email address
  #[validate(email(message = "Invalid email format"))]
  pub email: String,

  /// User's password
  #[validate(length(
    min = 6,
    max = 128,
    message = "Password must be between 6 and 128 characters"
  ))]
  pub password: String,
}

/// Request for user login
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
  /// User's email address
  #[validate(email(message = "Invalid email format"))]
  pub email: String,

  /// User's password
  #[validate(length(min = 1, message = "Password is required"))]
  pub password: String,
}

/// Request for creating a user record from an authenticated session
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
  #[validate(length(
    min = 1,
    max = 255,
    message = "Name must be between 1 and 255 characters"
  ))]
  pub name: String,

  #[validate(email(message = "Invalid email format"))]
  pub email: String,

  #[validate(length(
    min = 6,
    max = 128,
    message = "Password must be between 6 and 128 characters"
  ))]
  pub password: String,
}

/// Partial update of a user record; omitted or empty fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
  #[validate(length(
    min = 1,
    max = 255,
    message = "Name must be between 1 and 255 characters"
  ))]
  pub name: Option<String>,

  #[validate(email(message = "Invalid email format"))]
  pub email: Option<String>,

  #[validate(length(
    min = 6,
    max = 128,
    message = "Password must be between 6 and 128 characters"
  ))]
  pub password: Option<String>,
}

impl UpdateUserRequest {
  /// Drops empty strings so they count as "not supplied"
  pub fn without_empty_fields(self) -> Self {
    let supplied = |value: Option<String>| value.filter(|v| !v.is_empty());
    Self {
      name: supplied(self.name),
      email: supplied(self.email),
      password: supplied(self.password),
    }
  }
}

/// Query string for listing users; unparsable values fall back to defaults
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListUsersQuery {
  pub page: Option<String>,
  pub limit: Option<String>,
}

impl ListUsersQuery {
  pub fn page(&self) -> Option<i64> {
    self.page.as_deref().and_then(|v| v.trim().parse().ok())
  }

  pub fn limit(&self) -> Option<i64> {
    self.limit.as_deref().and_then(|v| v.trim().parse().ok())
  }
}

/// Public representation of a user record
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
  pub id: Uuid,
  pub name: String,
  pub email: String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl From<UserProfile> for UserResponse {
  fn from(profile: UserProfile) -> Self {
    Self {
      id: profile.id.into_inner(),
      name: profile.name,
      email: profile.email,
      created_at: profile.created_at,
      updated_at: profile.updated_at,
    }
  }
}

/// One page of users
#[derive(Debug, Clone, Serialize)]
pub struct UserListResponse {
  pub users: Vec<UserResponse>,
  pub page: i64,
  pub page_size: i64,
}

/// Response after successful user login
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
  /// Signed bearer token
  pub token: String,

  /// Always `Bearer`
  pub token_type: String,

  /// Token expiration timestamp
  pub expires_at: DateTime<Utc>,

  /// Unique identifier of the user
  pub user_id: Uuid,
}

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
  /// Error type/code
  pub error: String,

  /// Human-readable error message
  pub message: String,

  /// Optional detailed error information
  #[serde(skip_serializing_if = "Option::is_none")]
  pub details: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
  use super::*;
  use validator::Validate;

  fn sign_up(name: &str, email: &str, password: &str) -> SignUpRequest {
    SignUpRequest {
      name: name.to_string(),
      email: email.to_string(),
      password: password.to_string(),
    }
  }

  #[test]
  fn test_sign_up_request_validation_valid() {
    assert!(sign_up("Ann", "ann@x.com", "secret1").validate().is_ok());
  }

  #[test]
  fn test_sign_up_request_validation_invalid() {
    assert!(sign_up("Ann", "not-an-email", "secret1").validate().is_err());
    assert!(sign_up("Ann", "ann@x.com", "short").validate().is_err());
    assert!(sign_up("", "ann@x.com", "secret1").validate().is_err());
    assert!(
      sign_up("Ann", "ann@x.com", &"x".repeat(129))
        .validate()
        .is_err()
    );
  }

  #[test]
  fn test_update_request_empty_fields_are_dropped() {
    let request = UpdateUserRequest {
      name: Some(String::new()),
      email: Some(String::new()),
      password: Some("newpass".to_string()),
    }
    .without_empty_fields();

    assert!(request.name.is_none());
    assert!(request.email.is_none());
    assert!(request.validate().is_ok());
  }

  #[test]
  fn test_update_request_validates_supplied_fields() {
    let request = UpdateUserRequest {
      password: Some("short".to_string()),
      ..Default::default()
    };
    assert!(request.validate().is_err());
  }

  #[test]
  fn test_list_query_is_lenient() {
    let query = ListUsersQuery {
      page: Some("abc".to_string()),
      limit: Some(" 5 ".to_string()),
    };

    assert_eq!(query.page(), None);
    assert_eq!(query.limit(), Some(5));
  }

  #[test]
  fn test_user_response_has_no_credentials() {
    let profile = UserProfile {
      id: crate::domain::auth::value_objects::UserId::new(),
      name: "Ann".to_string(),
      email: "ann@x.com".to_string(),
      created_at: Utc::now(),
      updated_at: Utc::now(),
    };

    let json = serde_json::to_value(UserResponse::from(profile)).unwrap();
    let object = json.as_object().unwrap();

    assert!(object.contains_key("id"));
    assert!(!object.contains_key("password"));
    assert!(!object.contains_key("password_digest"));
  }
}
