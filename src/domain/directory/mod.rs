//! User directory use-cases: create, read, list, update and delete user
//! records independently of authentication.

pub mod pagination;
pub mod services;

pub use pagination::PageRequest;
pub use services::{DirectoryService, UserPatch};
