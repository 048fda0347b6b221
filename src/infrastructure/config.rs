use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

// Default timeout functions
fn default_db_connect_timeout() -> u64 {
  5
}

fn default_db_acquire_timeout() -> u64 {
  3
}

fn default_token_ttl() -> u64 {
  86_400
}

fn default_argon2_memory_kib() -> u32 {
  19_456
}

fn default_argon2_iterations() -> u32 {
  2
}

fn default_argon2_parallelism() -> u32 {
  1
}

fn default_page_size() -> i64 {
  10
}

fn default_max_page_size() -> i64 {
  100
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  pub server: ServerConfig,
  pub database: DatabaseConfig,
  pub security: SecurityConfig,
  #[serde(default)]
  pub pagination: PaginationConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host: String,
  pub port: u16,
}

/// Storage backend holding the user directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
  Sqlite,
  Memory,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
  pub backend: DatabaseBackend,
  pub url: String,
  pub max_connections: u32,
  #[serde(default = "default_db_connect_timeout")]
  pub connect_timeout_seconds: u64,
  #[serde(default = "default_db_acquire_timeout")]
  pub acquire_timeout_seconds: u64,
}

/// Security configuration
#[derive(Clone, Deserialize)]
pub struct SecurityConfig {
  /// HMAC secret for signing bearer tokens
  pub jwt_secret: String,
  #[serde(default = "default_token_ttl")]
  pub token_ttl_seconds: u64,
  #[serde(default = "default_argon2_memory_kib")]
  pub argon2_memory_kib: u32,
  #[serde(default = "default_argon2_iterations")]
  pub argon2_iterations: u32,
  #[serde(default = "default_argon2_parallelism")]
  pub argon2_parallelism: u32,
}

// Keep the signing secret out of logs
impl std::fmt::Debug for SecurityConfig {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SecurityConfig")
      .field("jwt_secret", &"***")
      .field("token_ttl_seconds", &self.token_ttl_seconds)
      .field("argon2_memory_kib", &self.argon2_memory_kib)
      .field("argon2_iterations", &self.argon2_iterations)
      .field("argon2_parallelism", &self.argon2_parallelism)
      .finish()
  }
}

/// Listing page size bounds
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationConfig {
  #[serde(default = "default_page_size")]
  pub default_page_size: i64,
  #[serde(default = "default_max_page_size")]
  pub max_page_size: i64,
}

impl Default for PaginationConfig {
  fn default() -> Self {
    Self {
      default_page_size: default_page_size(),
      max_page_size: default_max_page_size(),
    }
  }
}

impl Config {
  /// Load configuration from files and environment variables
  ///
  /// Configuration is loaded in the following order (later sources override earlier ones):
  /// 1. config/default.toml
  /// 2. config/local.toml (if exists)
  /// 3. config/{RUN_MODE}.toml (if exists)
  /// 4. Environment variables with USERDIR_ prefix
  ///
  /// # Environment Variables
  ///
  /// Environment variables use the USERDIR_ prefix and are separated by double underscores:
  /// - `USERDIR_SERVER__HOST=0.0.0.0`
  /// - `USERDIR_SERVER__PORT=8080`
  /// - `USERDIR_DATABASE__BACKEND=memory`
  /// - `USERDIR_DATABASE__URL=sqlite://data/userdir.db`
  /// - `USERDIR_SECURITY__JWT_SECRET=...`
  /// - `USERDIR_SECURITY__TOKEN_TTL_SECONDS=3600`
  /// - `USERDIR_PAGINATION__MAX_PAGE_SIZE=50`
  ///
  /// # Errors
  ///
  /// Returns a `ConfigError` if:
  /// - Required configuration files are missing
  /// - Configuration files contain invalid TOML
  /// - Required configuration values are missing
  /// - Configuration values have invalid types
  pub fn load() -> Result<Self, ConfigError> {
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    let config = ConfigBuilder::builder()
      .add_source(File::with_name("config/default").required(true))
      .add_source(File::with_name("config/local").required(false))
      .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
      // Double underscore separates sections: USERDIR_SERVER__PORT=8080
      .add_source(
        Environment::with_prefix("USERDIR")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?;

    config.try_deserialize()
  }
}
