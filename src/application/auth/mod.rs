//! Authentication use cases
//!
//! Sign-up, login, bearer token checks and the current-user lookup.

mod authenticate_token;
mod get_current_user;
mod login_user;
mod sign_up;

pub use authenticate_token::{AuthenticateTokenResponse, AuthenticateTokenUseCase};
pub use get_current_user::{GetCurrentUserCommand, GetCurrentUserResponse, GetCurrentUserUseCase};
pub use login_user::{LoginUserCommand, LoginUserResponse, LoginUserUseCase};
pub use sign_up::{SignUpCommand, SignUpResponse, SignUpUseCase};
