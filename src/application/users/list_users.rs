use std::sync::Arc;

use crate::domain::auth::entities::UserProfile;
use crate::domain::auth::errors::AuthError;
use crate::domain::directory::{DirectoryService, PageRequest};

/// Raw paging parameters; absent values fall back to the configured defaults
#[derive(Debug, Clone, Default)]
pub struct ListUsersCommand {
  pub page: Option<i64>,
  pub page_size: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct ListUsersResponse {
  pub users: Vec<UserProfile>,
  /// Effective page after clamping
  pub page: i64,
  /// Effective page size after clamping
  pub page_size: i64,
}

/// Use case for listing user records one page at a time
pub struct ListUsersUseCase {
  directory_service: Arc<DirectoryService>,
  default_page_size: i64,
  max_page_size: i64,
}

impl ListUsersUseCase {
  pub fn new(directory_service: Arc<DirectoryService>) -> Self {
    Self {
      directory_service,
      default_page_size: PageRequest::DEFAULT_PAGE_SIZE,
      max_page_size: PageRequest::MAX_PAGE_SIZE,
    }
  }

  /// Overrides the page size bounds
  pub fn with_page_limits(mut self, default_page_size: i64, max_page_size: i64) -> Self {
    self.default_page_size = default_page_size;
    self.max_page_size = max_page_size;
    self
  }

  pub async fn execute(&self, command: ListUsersCommand) -> Result<ListUsersResponse, AuthError> {
    let request = PageRequest::with_limits(
      command.page.unwrap_or(1),
      command.page_size.unwrap_or(self.default_page_size),
      self.default_page_size,
      self.max_page_size,
    );

    let users = self.directory_service.list_users(request).await?;

    Ok(ListUsersResponse {
      users,
      page: request.page(),
      page_size: request.page_size(),
    })
  }
}
