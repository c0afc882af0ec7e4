use std::future::{ready, Ready};

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderValue, AUTHORIZATION},
    web, Error, HttpMessage, ResponseError,
};
use anyhow::anyhow;
use futures_util::future::LocalBoxFuture;

use super::{Identity, Role, TokenService};
use crate::error::{ApiError, ApiResult};

pub const NO_TOKEN: &str = "No token provided";

/// Decides whether a request may pass, given its `Authorization` header.
pub fn authorize(
    header: Option<&HeaderValue>,
    tokens: &TokenService,
    required: Option<Role>,
) -> ApiResult<Identity> {
    let token = header
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(ApiError::Unauthenticated(NO_TOKEN))?;

    let identity = tokens.verify(token)?;
    match required {
        Some(role) if role != identity.role => Err(ApiError::Forbidden),
        _ => Ok(identity),
    }
}

/// Rejects requests without a valid token (401) or with the wrong role (403),
/// and attaches the [`Identity`] to the request for handlers to read through
/// `web::ReqData<Identity>`.
#[derive(Clone, Copy)]
pub struct AccessGuard {
    required: Option<Role>,
}

impl AccessGuard {
    pub fn require(role: Role) -> Self {
        Self {
            required: Some(role),
        }
    }

    /// Any valid token passes, whatever its role.
    pub fn any() -> Self {
        Self { required: None }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AccessGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AccessGuardMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AccessGuardMiddleware {
            service,
            required: self.required,
        }))
    }
}

pub struct AccessGuardMiddleware<S> {
    service: S,
    required: Option<Role>,
}

impl<S, B> Service<ServiceRequest> for AccessGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let verdict = match req.app_data::<web::Data<TokenService>>() {
            Some(tokens) => authorize(req.headers().get(AUTHORIZATION), tokens, self.required),
            None => Err(ApiError::Server(anyhow!("token service is not registered"))),
        };

        match verdict {
            Ok(identity) => {
                req.extensions_mut().insert(identity);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(err) => {
                tracing::debug!(path = req.path(), "rejected: {}", err);
                let response = err.error_response().map_into_right_body();
                let (req, _) = req.into_parts();
                Box::pin(async move { Ok(ServiceResponse::new(req, response)) })
            }
        }
    }
}
