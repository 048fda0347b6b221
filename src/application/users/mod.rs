//! Directory use cases
//!
//! CRUD and paginated listing of user records.

mod create_user;
mod delete_user;
mod get_user;
mod list_users;
mod update_user;

pub use create_user::{CreateUserCommand, CreateUserResponse, CreateUserUseCase};
pub use delete_user::{DeleteUserCommand, DeleteUserUseCase};
pub use get_user::{GetUserCommand, GetUserResponse, GetUserUseCase};
pub use list_users::{ListUsersCommand, ListUsersResponse, ListUsersUseCase};
pub use update_user::{UpdateUserCommand, UpdateUserResponse, UpdateUserUseCase};
