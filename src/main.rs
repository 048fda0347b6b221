use actix_web::{App, HttpServer, middleware::Logger, web};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use userdir::{
  adapters::http::{ApiRouteDependencies, RequestIdMiddleware, configure_api_routes},
  application::auth::{
    AuthenticateTokenUseCase, GetCurrentUserUseCase, LoginUserUseCase, SignUpUseCase,
  },
  application::users::{
    CreateUserUseCase, DeleteUserUseCase, GetUserUseCase, ListUsersUseCase, UpdateUserUseCase,
  },
  domain::auth::ports::UserRepository,
  domain::auth::services::{AuthService, AuthServiceConfig},
  domain::directory::DirectoryService,
  infrastructure::{
    config::{Config, DatabaseBackend},
    persistence::{
      memory::InMemoryUserRepository,
      sqlite::{SqliteUserRepository, pool},
    },
    security::{Argon2PasswordHasher, JwtTokenService},
  },
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "userdir=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting userdir");

  let config = Config::load().map_err(|e| {
    tracing::error!("Failed to load configuration: {}", e);
    std::io::Error::other(format!("Configuration error: {}", e))
  })?;
  tracing::info!("Configuration loaded successfully");

  // Select the directory backend once; nothing downstream branches on it
  let user_repo: Arc<dyn UserRepository> = match config.database.backend {
    DatabaseBackend::Sqlite => {
      tracing::info!("Connecting to database: {}", config.database.url);

      let db_pool = tokio::time::timeout(
        Duration::from_secs(config.database.connect_timeout_seconds),
        pool::connect(&config.database),
      )
      .await
      .map_err(|_| {
        tracing::error!(
          "Database connection timed out after {} seconds",
          config.database.connect_timeout_seconds
        );
        std::io::Error::new(
          std::io::ErrorKind::TimedOut,
          format!(
            "Database connection timed out after {} seconds",
            config.database.connect_timeout_seconds
          ),
        )
      })?
      .map_err(|e| {
        tracing::error!("Failed to open database: {}", e);
        std::io::Error::other(format!("Database error: {}", e))
      })?;

      Arc::new(SqliteUserRepository::new(db_pool))
    }
    DatabaseBackend::Memory => {
      tracing::warn!("Using in-memory user directory; records are lost on shutdown");
      Arc::new(InMemoryUserRepository::new())
    }
  };

  let password_hasher = Arc::new(
    Argon2PasswordHasher::with_params(
      config.security.argon2_memory_kib,
      config.security.argon2_iterations,
      config.security.argon2_parallelism,
    )
    .map_err(|e| std::io::Error::other(e.to_string()))?,
  );

  let token_service = Arc::new(
    JwtTokenService::new(config.security.jwt_secret.as_bytes())
      .map_err(|e| std::io::Error::other(e.to_string()))?,
  );

  // Token expiry must stay representable for the lifetime of the process
  let token_ttl = i64::try_from(config.security.token_ttl_seconds)
    .ok()
    .and_then(chrono::Duration::try_seconds)
    .filter(|ttl| chrono::Utc::now().checked_add_signed(*ttl).is_some())
    .ok_or_else(|| std::io::Error::other("security.token_ttl_seconds is out of range"))?;

  // Domain services
  let auth_service = Arc::new(AuthService::new(
    user_repo.clone(),
    password_hasher.clone(),
    token_service,
    AuthServiceConfig { token_ttl },
  ));
  let directory_service = Arc::new(DirectoryService::new(user_repo, password_hasher));

  // Use cases
  let deps = ApiRouteDependencies {
    sign_up_use_case: Arc::new(SignUpUseCase::new(auth_service.clone())),
    login_use_case: Arc::new(LoginUserUseCase::new(auth_service.clone())),
    authenticate_use_case: Arc::new(AuthenticateTokenUseCase::new(auth_service.clone())),
    get_current_user_use_case: Arc::new(GetCurrentUserUseCase::new(auth_service)),
    create_user_use_case: Arc::new(CreateUserUseCase::new(directory_service.clone())),
    get_user_use_case: Arc::new(GetUserUseCase::new(directory_service.clone())),
    list_users_use_case: Arc::new(
      ListUsersUseCase::new(directory_service.clone()).with_page_limits(
        config.pagination.default_page_size,
        config.pagination.max_page_size,
      ),
    ),
    update_user_use_case: Arc::new(UpdateUserUseCase::new(directory_service.clone())),
    delete_user_use_case: Arc::new(DeleteUserUseCase::new(directory_service)),
  };

  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  HttpServer::new(move || {
    App::new()
      .wrap(RequestIdMiddleware::new())
      .wrap(Logger::default())
      .service(web::scope("/api").configure(|cfg| configure_api_routes(cfg, &deps)))
      .route("/health", web::get().to(health_check))
  })
  .bind((server_host.as_str(), server_port))?
  .run()
  .await
}

/// Health check endpoint
async fn health_check() -> &'static str {
  "OK"
}
