//! User directory service.
//!
//! Account registration, credential verification and bearer-token issuance
//! laid out as ports and adapters:
//!
//! - [`domain`]: entities, value objects, ports and the two domain services
//!   (`AuthService`, `DirectoryService`)
//! - [`application`]: one use case per inbound operation
//! - [`adapters`]: the actix-web transport
//! - [`infrastructure`]: configuration, persistence and security adapters

pub mod adapters;
pub mod application;
pub mod domain;
pub mod infrastructure;
