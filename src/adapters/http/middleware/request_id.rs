use actix_web::{
  Error, HttpMessage,
  body::MessageBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::LocalBoxFuture;
use std::{
  future::{Ready, ready},
  rc::Rc,
};
use tracing::Instrument;
use uuid::Uuid;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request ID middleware that generates a unique ID for each request
///
/// This middleware:
/// 1. Reuses a well-formed incoming `x-request-id` or generates a UUID v4
/// 2. Stores the ID in request extensions and in a tracing span around the call
/// 3. Echoes the ID back in the `x-request-id` response header, including on
///    error responses produced further down the stack
///
/// # Example
///
/// ```no_run
/// use actix_web::App;
/// # use userdir::adapters::http::middleware::request_id::RequestIdMiddleware;
///
/// let app = App::new()
///   .wrap(RequestIdMiddleware::default());
/// ```
///
/// # Accessing Request ID in Handlers
///
/// ```ignore
/// use actix_web::{HttpRequest, HttpResponse};
/// use userdir::adapters::http::middleware::RequestIdExt;
///
/// async fn handler(req: HttpRequest) -> HttpResponse {
///   let request_id = req.request_id();
///   HttpResponse::Ok().body(format!("Request ID: {:?}", request_id))
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestIdMiddleware;

impl RequestIdMiddleware {
  /// Creates a new request ID middleware
  pub fn new() -> Self {
    Self
  }
}

impl<S, B> Transform<S, ServiceRequest> for RequestIdMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: MessageBody + 'static,
{
  type Response = ServiceResponse<B>;
  type Error = Error;
  type Transform = RequestIdMiddlewareService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(RequestIdMiddlewareService {
      service: Rc::new(service),
    }))
  }
}

pub struct RequestIdMiddlewareService<S> {
  service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequestIdMiddlewareService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: MessageBody + 'static,
{
  type Response = ServiceResponse<B>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let service = Rc::clone(&self.service);

    Box::pin(async move {
      let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .map(RequestId)
        .unwrap_or_default();

      req.extensions_mut().insert(request_id);

      let span = tracing::info_span!("request", request_id = %request_id);
      let mut res = service.call(req).instrument(span).await?;

      res.headers_mut().insert(
        HeaderName::from_static(REQUEST_ID_HEADER),
        HeaderValue::from_str(&request_id.as_str())
          .unwrap_or_else(|_| HeaderValue::from_static("invalid-uuid")),
      );

      Ok(res)
    })
  }
}

/// Request ID wrapper for UUID
///
/// This type is stored in request extensions and can be retrieved by handlers.
#[derive(Debug, Clone, Copy)]
pub struct RequestId(pub Uuid);

impl RequestId {
  /// Creates a new request ID
  pub fn new() -> Self {
    Self(Uuid::new_v4())
  }

  /// Returns the UUID value
  pub fn value(&self) -> Uuid {
    self.0
  }

  /// Returns the request ID as a string
  pub fn as_str(&self) -> String {
    self.0.to_string()
  }
}

impl Default for RequestId {
  fn default() -> Self {
    Self::new()
  }
}

impl std::fmt::Display for RequestId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Extension trait to easily extract request ID from request
pub trait RequestIdExt {
  /// Get the request ID from request extensions
  ///
  /// Returns None if the request ID is not present (middleware not configured).
  fn request_id(&self) -> Option<RequestId>;
}

impl RequestIdExt for actix_web::HttpRequest {
  fn request_id(&self) -> Option<RequestId> {
    self.extensions().get::<RequestId>().cloned()
  }
}
