use crate::presentation::handlers::{ApiError, AppState};
use actix_web::http::header::{AUTHORIZATION, HeaderName, HeaderValue};
use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest, web,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
};
use std::{
    future::{Ready, ready},
    pin::Pin,
    rc::Rc,
    task::{Context, Poll},
    time::Instant,
};
use tracing::info;
use uuid::Uuid;

/// Token taken from an `Authorization: Bearer <token>` header. Returns
/// `None` when the header is absent or carries no second word.
pub fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .split_whitespace()
        .nth(1)
}

/// Verified identity of the caller, decoded from the session token.
/// Possession of a currently-valid token is both authentication and
/// authorization for the subject's own resources.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub username: String,
}

/// Extractor for routes where every auth failure, a missing header
/// included, collapses to the same 403. The profile route needs its
/// distinct missing-header response and checks the header itself.
impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let result = match req.app_data::<web::Data<AppState>>() {
            Some(state) => bearer_token(req)
                .ok_or(ApiError::InvalidToken)
                .and_then(|token| state.auth.authenticate(token).map_err(ApiError::from))
                .map(|claims| AuthenticatedUser {
                    user_id: claims.user_id,
                    username: claims.username,
                }),
            None => Err(ApiError::Internal),
        };
        ready(result)
    }
}

// Request Trace Middleware: assigns each request an id, logs outcome and
// latency, and exposes both as response headers.
pub struct RequestTraceMiddleware;

impl<S, B> Transform<S, ServiceRequest> for RequestTraceMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestTraceMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestTraceMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct RequestTraceMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequestTraceMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let start = Instant::now();
        let request_id = Uuid::new_v4().to_string();
        let method = req.method().clone();
        let path = req.path().to_string();

        req.extensions_mut().insert(request_id.clone());

        let fut = service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;
            let duration_ms = start.elapsed().as_millis();

            res.headers_mut().insert(
                HeaderName::from_static("x-request-id"),
                HeaderValue::from_str(&request_id)
                    .unwrap_or_else(|_| HeaderValue::from_static("unknown")),
            );
            res.headers_mut().insert(
                HeaderName::from_static("x-response-time"),
                HeaderValue::from_str(&format!("{}ms", duration_ms))
                    .unwrap_or_else(|_| HeaderValue::from_static("0ms")),
            );

            info!(
                method = %method,
                path = %path,
                status = %res.status(),
                duration_ms = duration_ms,
                request_id = %request_id,
                "Request processed"
            );

            Ok(res)
        })
    }
}
