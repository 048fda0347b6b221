use std::sync::Arc;

use crate::domain::auth::entities::{NewUser, UserProfile};
use crate::domain::auth::errors::{AuthError, RepositoryError, ValidationError};
use crate::domain::auth::ports::{PasswordHasher, UserRepository};
use crate::domain::auth::value_objects::{Email, Password, UserId, UserName};

use super::pagination::PageRequest;

/// Partial update of a user record. `None` fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
  pub name: Option<UserName>,
  pub email: Option<Email>,
  pub password: Option<Password>,
}

impl UserPatch {
  /// Builds a patch from raw input; empty strings count as "not supplied"
  pub fn from_fields(
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
  ) -> Result<Self, ValidationError> {
    let supplied = |value: Option<String>| value.filter(|v| !v.is_empty());

    Ok(Self {
      name: supplied(name).map(UserName::new).transpose()?,
      email: supplied(email).map(Email::new).transpose()?,
      password: supplied(password).map(Password::new).transpose()?,
    })
  }

  pub fn is_empty(&self) -> bool {
    self.name.is_none() && self.email.is_none() && self.password.is_none()
  }
}

/// Directory service implementing user record management
pub struct DirectoryService {
  user_repo: Arc<dyn UserRepository>,
  password_hasher: Arc<dyn PasswordHasher>,
}

impl DirectoryService {
  /// Creates a new instance of DirectoryService
  pub fn new(user_repo: Arc<dyn UserRepository>, password_hasher: Arc<dyn PasswordHasher>) -> Self {
    Self {
      user_repo,
      password_hasher,
    }
  }

  /// Creates a user record
  ///
  /// # Errors
  /// Returns `AuthError::EmailInUse` if another record already holds the email
  pub async fn create_user(
    &self,
    name: UserName,
    email: Email,
    password: Password,
  ) -> Result<UserProfile, AuthError> {
    if self.user_repo.find_by_email(&email).await?.is_some() {
      tracing::warn!("User creation rejected: email already in use");
      return Err(AuthError::EmailInUse);
    }

    let password_digest = self.password_hasher.hash(&password).await?;

    let created = self
      .user_repo
      .create(NewUser {
        name,
        email,
        password_digest,
      })
      .await
      .map_err(translate_write_error)?;

    tracing::info!(user_id = %created.id, "User created");

    Ok(created.profile())
  }

  /// Fetches a single user
  pub async fn get_user(&self, id: UserId) -> Result<UserProfile, AuthError> {
    self
      .user_repo
      .find_by_id(id)
      .await?
      .map(|user| user.profile())
      .ok_or(AuthError::NotFound)
  }

  /// Lists one page of users ordered by id
  pub async fn list_users(&self, page: PageRequest) -> Result<Vec<UserProfile>, AuthError> {
    let users = self.user_repo.list(page.window()).await?;
    Ok(users.iter().map(|user| user.profile()).collect())
  }

  /// Applies a partial update to a user
  ///
  /// A new password is hashed before the record reaches the repository.
  ///
  /// # Errors
  /// Returns `AuthError::NotFound` if the user does not exist and
  /// `AuthError::EmailInUse` if the new email belongs to another user
  pub async fn update_user(&self, id: UserId, patch: UserPatch) -> Result<UserProfile, AuthError> {
    let mut user = self
      .user_repo
      .find_by_id(id)
      .await?
      .ok_or(AuthError::NotFound)?;

    if let Some(email) = &patch.email {
      if email.as_str() != user.email {
        if let Some(holder) = self.user_repo.find_by_email(email).await? {
          if holder.id != user.id {
            tracing::warn!(user_id = %user.id, "User update rejected: email already in use");
            return Err(AuthError::EmailInUse);
          }
        }
      }
    }

    let new_digest = match &patch.password {
      Some(password) => Some(self.password_hasher.hash(password).await?),
      None => None,
    };

    if let Some(name) = patch.name {
      user.update_name(name);
    }
    if let Some(email) = patch.email {
      user.update_email(email);
    }
    if let Some(digest) = new_digest {
      user.update_password_digest(digest);
    }

    let updated = self
      .user_repo
      .update(user)
      .await
      .map_err(translate_write_error)?;

    tracing::info!(user_id = %updated.id, "User updated");

    Ok(updated.profile())
  }

  /// Deletes a user; deleting an absent id reports `AuthError::NotFound`
  pub async fn delete_user(&self, id: UserId) -> Result<(), AuthError> {
    self
      .user_repo
      .delete(id)
      .await
      .map_err(translate_write_error)?;

    tracing::info!(user_id = %id, "User deleted");

    Ok(())
  }
}

/// Maps repository write failures onto the directory's error taxonomy
fn translate_write_error(error: AuthError) -> AuthError {
  match error {
    AuthError::Repository(RepositoryError::DuplicateKey(_)) => {
      tracing::warn!("Directory write rejected: email already in use");
      AuthError::EmailInUse
    }
    AuthError::Repository(RepositoryError::NotFound) => AuthError::NotFound,
    other => other,
  }
}
