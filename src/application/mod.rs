//! Application layer
//!
//! This layer contains use cases that orchestrate domain logic to implement
//! application-specific workflows. Each use case turns raw command input into
//! validated value objects and delegates to a domain service.

pub mod auth;
pub mod users;
