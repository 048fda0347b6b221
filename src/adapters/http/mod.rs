pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;

// Re-export commonly used types
pub use dtos::{
  CreateUserRequest, ErrorResponse, ListUsersQuery, LoginRequest, LoginResponse, SignUpRequest,
  UpdateUserRequest, UserListResponse, UserResponse,
};
pub use errors::{ApiError, AuthErrorKind};
pub use middleware::{
  AuthMiddleware, AuthenticatedUser, RequestId, RequestIdExt, RequestIdMiddleware,
};
pub use routes::{
  ApiRouteDependencies, configure_api_routes, configure_auth_routes, configure_user_routes,
};
