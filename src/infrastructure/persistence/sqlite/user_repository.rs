use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::auth::{
  entities::{NewUser, User},
  errors::{AuthError, RepositoryError},
  ports::UserRepository,
  value_objects::{Email, ListWindow, PasswordDigest, UserId},
};

/// SQLite implementation of the UserRepository trait
///
/// Email uniqueness is enforced by the `UNIQUE` constraint on `users.email`,
/// so two racing inserts cannot both succeed regardless of connection count.
pub struct SqliteUserRepository {
  pool: SqlitePool,
}

impl SqliteUserRepository {
  /// Creates a new instance of SqliteUserRepository
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }
}

/// Database row structure for users table
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
  id: Uuid,
  name: String,
  email: String,
  password_digest: String,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
  fn from(row: UserRow) -> Self {
    User {
      id: UserId::from_uuid(row.id),
      name: row.name,
      email: row.email,
      password_digest: PasswordDigest::new(row.password_digest),
      created_at: row.created_at,
      updated_at: row.updated_at,
    }
  }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
  async fn create(&self, new_user: NewUser) -> Result<User, AuthError> {
    let user = User::create(new_user, UserId::new(), Utc::now());

    let row = sqlx::query_as::<_, UserRow>(
      r#"
            INSERT INTO users (id, name, email, password_digest, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, name, email, password_digest, created_at, updated_at
            "#,
    )
    .bind(user.id.into_inner())
    .bind(&user.name)
    .bind(&user.email)
    .bind(user.password_digest.as_str())
    .bind(user.created_at)
    .bind(user.updated_at)
    .fetch_one(&self.pool)
    .await?;

    Ok(row.into())
  }

  async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AuthError> {
    let row = sqlx::query_as::<_, UserRow>(
      r#"
            SELECT id, name, email, password_digest, created_at, updated_at
            FROM users
            WHERE id = ?
            "#,
    )
    .bind(id.into_inner())
    .fetch_optional(&self.pool)
    .await?;

    Ok(row.map(Into::into))
  }

  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError> {
    let row = sqlx::query_as::<_, UserRow>(
      r#"
            SELECT id, name, email, password_digest, created_at, updated_at
            FROM users
            WHERE email = ?
            "#,
    )
    .bind(email.as_str())
    .fetch_optional(&self.pool)
    .await?;

    Ok(row.map(Into::into))
  }

  async fn list(&self, window: ListWindow) -> Result<Vec<User>, AuthError> {
    // SQLite integers are signed 64-bit
    let limit = i64::try_from(window.limit()).unwrap_or(i64::MAX);
    let offset = i64::try_from(window.offset()).unwrap_or(i64::MAX);

    let rows = sqlx::query_as::<_, UserRow>(
      r#"
            SELECT id, name, email, password_digest, created_at, updated_at
            FROM users
            ORDER BY id ASC
            LIMIT ? OFFSET ?
            "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(&self.pool)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
  }

  async fn update(&self, user: User) -> Result<User, AuthError> {
    let updated_at = Utc::now().max(user.updated_at);

    let row = sqlx::query_as::<_, UserRow>(
      r#"
            UPDATE users
            SET name = ?, email = ?, password_digest = ?, updated_at = ?
            WHERE id = ?
            RETURNING id, name, email, password_digest, created_at, updated_at
            "#,
    )
    .bind(&user.name)
    .bind(&user.email)
    .bind(user.password_digest.as_str())
    .bind(updated_at)
    .bind(user.id.into_inner())
    .fetch_optional(&self.pool)
    .await?;

    row.map(Into::into).ok_or_else(|| RepositoryError::NotFound.into())
  }

  async fn delete(&self, id: UserId) -> Result<(), AuthError> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
      .bind(id.into_inner())
      .execute(&self.pool)
      .await?;

    if result.rows_affected() == 0 {
      return Err(RepositoryError::NotFound.into());
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::value_objects::UserName;
  use sqlx::sqlite::SqlitePoolOptions;
  use std::sync::Arc;

  async fn setup_repo() -> SqliteUserRepository {
    // A single never-recycled connection keeps the in-memory database alive
    let pool = SqlitePoolOptions::new()
      .max_connections(1)
      .idle_timeout(None)
      .max_lifetime(None)
      .connect("sqlite::memory:")
      .await
      .expect("create sqlite pool");

    sqlx::migrate!("./migrations")
      .run(&pool)
      .await
      .expect("run migrations");

    SqliteUserRepository::new(pool)
  }

  fn new_user(name: &str, email: &str) -> NewUser {
    NewUser {
      name: UserName::new(name).unwrap(),
      email: Email::new(email).unwrap(),
      password_digest: PasswordDigest::new("$argon2id$digest"),
    }
  }

  #[tokio::test]
  async fn test_create_and_find() {
    let repo = setup_repo().await;

    let created = repo.create(new_user("Ann", "ann@x.com")).await.unwrap();
    let by_id = repo.find_by_id(created.id).await.unwrap().unwrap();
    let by_email = repo
      .find_by_email(&Email::new("ann@x.com").unwrap())
      .await
      .unwrap()
      .unwrap();

    assert_eq!(by_id.id, created.id);
    assert_eq!(by_id.name, "Ann");
    assert_eq!(by_id.password_digest, created.password_digest);
    assert_eq!(by_email.id, created.id);
    assert_eq!(by_id.created_at, created.created_at);
  }

  #[tokio::test]
  async fn test_duplicate_email_is_duplicate_key() {
    let repo = setup_repo().await;
    repo.create(new_user("Ann", "ann@x.com")).await.unwrap();

    let result = repo.create(new_user("Other", "ann@x.com")).await;

    assert!(matches!(
      result,
      Err(AuthError::Repository(RepositoryError::DuplicateKey(_)))
    ));
  }

  #[tokio::test]
  async fn test_email_is_case_sensitive() {
    let repo = setup_repo().await;
    repo.create(new_user("Ann", "ann@x.com")).await.unwrap();

    assert!(repo.create(new_user("Ann", "ANN@x.com")).await.is_ok());
    assert!(
      repo
        .find_by_email(&Email::new("Ann@x.com").unwrap())
        .await
        .unwrap()
        .is_none()
    );
  }

  #[tokio::test]
  async fn test_concurrent_creates_with_same_email() {
    let repo = Arc::new(setup_repo().await);

    let handles: Vec<_> = (0..16)
      .map(|i| {
        let repo = repo.clone();
        tokio::spawn(async move { repo.create(new_user(&format!("User {i}"), "race@x.com")).await })
      })
      .collect();

    let mut successes = 0;
    for handle in handles {
      match handle.await.unwrap() {
        Ok(_) => successes += 1,
        Err(AuthError::Repository(RepositoryError::DuplicateKey(_))) => {}
        Err(e) => panic!("unexpected error: {e}"),
      }
    }

    assert_eq!(successes, 1);
    let all = repo.list(ListWindow::new(0, 100)).await.unwrap();
    assert_eq!(all.len(), 1);
  }

  #[tokio::test]
  async fn test_list_orders_by_id_and_applies_window() {
    let repo = setup_repo().await;
    let mut ids = Vec::new();
    for i in 0..5 {
      let user = repo
        .create(new_user(&format!("User {i}"), &format!("u{i}@x.com")))
        .await
        .unwrap();
      ids.push(user.id);
    }

    let all = repo.list(ListWindow::new(0, 100)).await.unwrap();
    let page = repo.list(ListWindow::new(3, 10)).await.unwrap();

    assert_eq!(all.iter().map(|u| u.id).collect::<Vec<_>>(), ids);
    assert_eq!(page.iter().map(|u| u.id).collect::<Vec<_>>(), ids[3..].to_vec());
  }

  #[tokio::test]
  async fn test_update_keeps_id_and_created_at() {
    let repo = setup_repo().await;
    let created = repo.create(new_user("Ann", "ann@x.com")).await.unwrap();

    let mut changed = created.clone();
    changed.name = "Ann B".to_string();
    changed.email = "annb@x.com".to_string();
    changed.created_at = Utc::now() + chrono::Duration::days(1);

    let updated = repo.update(changed).await.unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Ann B");
    assert_eq!(updated.email, "annb@x.com");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);
  }

  #[tokio::test]
  async fn test_update_into_taken_email_is_rejected() {
    let repo = setup_repo().await;
    repo.create(new_user("Ann", "ann@x.com")).await.unwrap();
    let bob = repo.create(new_user("Bob", "bob@x.com")).await.unwrap();

    let mut changed = bob.clone();
    changed.email = "ann@x.com".to_string();

    assert!(matches!(
      repo.update(changed).await,
      Err(AuthError::Repository(RepositoryError::DuplicateKey(_)))
    ));
    let stored = repo.find_by_id(bob.id).await.unwrap().unwrap();
    assert_eq!(stored.email, "bob@x.com");
  }

  #[tokio::test]
  async fn test_update_and_delete_missing_user() {
    let repo = setup_repo().await;
    let ghost = User::create(new_user("Ghost", "ghost@x.com"), UserId::new(), Utc::now());

    assert!(matches!(
      repo.update(ghost.clone()).await,
      Err(AuthError::Repository(RepositoryError::NotFound))
    ));
    assert!(matches!(
      repo.delete(ghost.id).await,
      Err(AuthError::Repository(RepositoryError::NotFound))
    ));
  }

  #[tokio::test]
  async fn test_delete_removes_record() {
    let repo = setup_repo().await;
    let created = repo.create(new_user("Ann", "ann@x.com")).await.unwrap();

    repo.delete(created.id).await.unwrap();

    assert!(repo.find_by_id(created.id).await.unwrap().is_none());
    assert!(repo.create(new_user("Ann", "ann@x.com")).await.is_ok());
  }
}
