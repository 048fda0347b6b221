use crate::domain::auth::value_objects::ListWindow;

/// 1-based page request as received from callers.
///
/// `page < 1` is treated as the first page; a `page_size` outside
/// `[1, MAX_PAGE_SIZE]` falls back to `DEFAULT_PAGE_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
  page: i64,
  page_size: i64,
}

impl PageRequest {
  pub const DEFAULT_PAGE_SIZE: i64 = 10;
  pub const MAX_PAGE_SIZE: i64 = 100;

  pub fn new(page: i64, page_size: i64) -> Self {
    Self::with_limits(page, page_size, Self::DEFAULT_PAGE_SIZE, Self::MAX_PAGE_SIZE)
  }

  /// Same clamping as `new` with deployment-specific bounds.
  ///
  /// `max_size` never exceeds `MAX_PAGE_SIZE` and `default_size` is kept
  /// inside `[1, max_size]`.
  pub fn with_limits(page: i64, page_size: i64, default_size: i64, max_size: i64) -> Self {
    let max_size = max_size.clamp(1, Self::MAX_PAGE_SIZE);
    let default_size = default_size.clamp(1, max_size);

    let page = page.max(1);
    let page_size = if (1..=max_size).contains(&page_size) {
      page_size
    } else {
      default_size
    };
    Self { page, page_size }
  }

  pub fn page(&self) -> i64 {
    self.page
  }

  pub fn page_size(&self) -> i64 {
    self.page_size
  }

  /// Number of records skipped before this page
  pub fn offset(&self) -> i64 {
    (self.page - 1).saturating_mul(self.page_size)
  }

  pub fn window(&self) -> ListWindow {
    ListWindow::new(self.offset(), self.page_size)
  }
}

impl Default for PageRequest {
  fn default() -> Self {
    Self::new(1, Self::DEFAULT_PAGE_SIZE)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_offset_from_page() {
    let page = PageRequest::new(3, 20);
    assert_eq!(page.offset(), 40);
    assert_eq!(page.window().offset(), 40);
    assert_eq!(page.window().limit(), 20);
  }

  #[test]
  fn test_page_below_one_clamps_to_first() {
    assert_eq!(PageRequest::new(0, 10).page(), 1);
    assert_eq!(PageRequest::new(-7, 10).offset(), 0);
  }

  #[test]
  fn test_page_size_out_of_range_uses_default() {
    assert_eq!(PageRequest::new(1, 0).page_size(), 10);
    assert_eq!(PageRequest::new(1, 101).page_size(), 10);
    assert_eq!(PageRequest::new(1, 100).page_size(), 100);
  }

  #[test]
  fn test_configured_limits() {
    assert_eq!(PageRequest::with_limits(1, 50, 20, 25).page_size(), 20);
    assert_eq!(PageRequest::with_limits(1, 25, 20, 25).page_size(), 25);
    // Bounds are capped to what the directory will return
    assert_eq!(PageRequest::with_limits(1, 500, 20, 1000).page_size(), 20);
    assert_eq!(PageRequest::with_limits(1, 0, 0, 5).page_size(), 1);
  }

  #[test]
  fn test_huge_page_does_not_overflow() {
    let page = PageRequest::new(i64::MAX, 100);
    assert_eq!(page.offset(), i64::MAX);
  }
}
