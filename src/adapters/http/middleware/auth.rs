use actix_web::{
  Error, HttpMessage, ResponseError,
  body::EitherBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::{
  future::{Ready, ready},
  rc::Rc,
  sync::Arc,
};

use crate::{
  adapters::http::errors::{ApiError, AuthErrorKind},
  application::auth::AuthenticateTokenUseCase,
  domain::auth::value_objects::UserId,
};

/// Identity attached to the request by `AuthMiddleware`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
  pub user_id: UserId,
}

/// Authentication middleware that validates bearer tokens and attaches the caller to the request
///
/// This middleware:
/// 1. Extracts the bearer token from the Authorization header
/// 2. Validates it using AuthenticateTokenUseCase
/// 3. Attaches an `AuthenticatedUser` to request extensions for downstream handlers
/// 4. Returns 401 `invalid_token` if the token is missing, malformed, forged or expired
///
/// # Example
///
/// ```no_run
/// use actix_web::{App, web};
/// use std::sync::Arc;
/// # use userdir::application::auth::AuthenticateTokenUseCase;
/// # use userdir::adapters::http::middleware::auth::AuthMiddleware;
///
/// # async fn example(authenticate_use_case: Arc<AuthenticateTokenUseCase>) {
/// let app = App::new()
///   .wrap(AuthMiddleware::new(authenticate_use_case))
///   .service(
///     web::resource("/protected")
///       .route(web::get().to(|| async { "Protected endpoint" }))
///   );
/// # }
/// ```
pub struct AuthMiddleware {
  authenticate_use_case: Arc<AuthenticateTokenUseCase>,
}

impl AuthMiddleware {
  pub fn new(authenticate_use_case: Arc<AuthenticateTokenUseCase>) -> Self {
    Self {
      authenticate_use_case,
    }
  }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Transform = AuthMiddlewareService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(AuthMiddlewareService {
      service: Rc::new(service),
      authenticate_use_case: self.authenticate_use_case.clone(),
    }))
  }
}

pub struct AuthMiddlewareService<S> {
  service: Rc<S>,
  authenticate_use_case: Arc<AuthenticateTokenUseCase>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let service = Rc::clone(&self.service);
    let authenticate_use_case = self.authenticate_use_case.clone();

    Box::pin(async move {
      let authenticated = extract_bearer_token(&req).and_then(|token| {
        authenticate_use_case
          .execute(token)
          .map_err(ApiError::from)
      });

      let identity = match authenticated {
        Ok(identity) => identity,
        Err(e) => {
          let (request, _) = req.into_parts();
          let response = e.error_response().map_into_right_body();
          return Ok(ServiceResponse::new(request, response));
        }
      };

      req.extensions_mut().insert(AuthenticatedUser {
        user_id: identity.user_id,
      });

      let res = service.call(req).await?;
      Ok(res.map_into_left_body())
    })
  }
}

/// Extract bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Result<&str, ApiError> {
  req
    .headers()
    .get("Authorization")
    .and_then(|h| h.to_str().ok())
    .and_then(|s| s.strip_prefix("Bearer "))
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .ok_or(ApiError::Auth(AuthErrorKind::InvalidToken))
}
