pub mod auth;
pub mod directory;

// Re-export auth module for easier access
pub use auth::*;
