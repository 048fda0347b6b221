pub mod pool;
mod user_repository;

pub use user_repository::SqliteUserRepository;
