pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::{IssuedToken, NewUser, TokenClaims, User, UserProfile};
pub use errors::{AuthError, HashError, RepositoryError, TokenError, ValidationError};
pub use services::{AuthService, AuthServiceConfig};
pub use value_objects::{Email, ListWindow, Password, PasswordDigest, UserId, UserName};
