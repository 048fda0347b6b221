use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

use crate::domain::auth::{
  entities::{NewUser, User},
  errors::{AuthError, RepositoryError},
  ports::UserRepository,
  value_objects::{Email, ListWindow, UserId},
};

#[derive(Default)]
struct Directory {
  users: BTreeMap<UserId, User>,
  email_index: HashMap<String, UserId>,
}

/// In-process implementation of the UserRepository trait
///
/// Records and the email index sit behind one lock. Every mutation runs to
/// completion while holding the write guard without awaiting, so concurrent
/// callers observe the uniqueness check and the write as one step and a
/// cancelled caller can never leave half a write behind.
#[derive(Default)]
pub struct InMemoryUserRepository {
  directory: RwLock<Directory>,
}

impl InMemoryUserRepository {
  /// Creates an empty repository
  pub fn new() -> Self {
    Self::default()
  }

  /// Number of stored users
  pub async fn len(&self) -> usize {
    self.directory.read().await.users.len()
  }

  pub async fn is_empty(&self) -> bool {
    self.len().await == 0
  }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
  async fn create(&self, new_user: NewUser) -> Result<User, AuthError> {
    let mut directory = self.directory.write().await;

    if directory.email_index.contains_key(new_user.email.as_str()) {
      return Err(RepositoryError::DuplicateKey("users.email".to_string()).into());
    }

    let user = User::create(new_user, UserId::new(), Utc::now());
    directory.email_index.insert(user.email.clone(), user.id);
    directory.users.insert(user.id, user.clone());

    Ok(user)
  }

  async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AuthError> {
    Ok(self.directory.read().await.users.get(&id).cloned())
  }

  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError> {
    let directory = self.directory.read().await;
    Ok(
      directory
        .email_index
        .get(email.as_str())
        .and_then(|id| directory.users.get(id))
        .cloned(),
    )
  }

  async fn list(&self, window: ListWindow) -> Result<Vec<User>, AuthError> {
    let directory = self.directory.read().await;
    let offset = usize::try_from(window.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(window.limit()).unwrap_or(usize::MAX);

    Ok(
      directory
        .users
        .values()
        .skip(offset)
        .take(limit)
        .cloned()
        .collect(),
    )
  }

  async fn update(&self, user: User) -> Result<User, AuthError> {
    let mut directory = self.directory.write().await;

    let stored = directory
      .users
      .get(&user.id)
      .cloned()
      .ok_or(RepositoryError::NotFound)?;

    if stored.email != user.email {
      if let Some(holder) = directory.email_index.get(&user.email) {
        if *holder != user.id {
          return Err(RepositoryError::DuplicateKey("users.email".to_string()).into());
        }
      }
    }

    let mut updated = User {
      id: stored.id,
      name: user.name,
      email: user.email,
      password_digest: user.password_digest,
      created_at: stored.created_at,
      updated_at: stored.updated_at.max(user.updated_at),
    };
    updated.touch();

    directory.email_index.remove(&stored.email);
    directory.email_index.insert(updated.email.clone(), updated.id);
    directory.users.insert(updated.id, updated.clone());

    Ok(updated)
  }

  async fn delete(&self, id: UserId) -> Result<(), AuthError> {
    let mut directory = self.directory.write().await;

    let removed = directory
      .users
      .remove(&id)
      .ok_or(RepositoryError::NotFound)?;
    directory.email_index.remove(&removed.email);

    Ok(())
  }
}
