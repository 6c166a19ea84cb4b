use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;
use tracing::{debug, warn};

use crate::api_error::ApiError;
use crate::auth::jwt_service::{Claims, JwtError, JwtService};

/// Guard for admin-only routes. Validates the bearer token and rejects the
/// request before any mutation is attempted.
pub struct AdminAuth {
    jwt_service: Rc<JwtService>,
}

impl AdminAuth {
    pub fn new(jwt_service: JwtService) -> Self {
        Self {
            jwt_service: Rc::new(jwt_service),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AdminAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AdminAuthService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminAuthService {
            service: Rc::new(service),
            jwt_service: self.jwt_service.clone(),
        }))
    }
}

pub struct AdminAuthService<S> {
    service: Rc<S>,
    jwt_service: Rc<JwtService>,
}

impl<S, B> Service<ServiceRequest> for AdminAuthService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let jwt_service = self.jwt_service.clone();
        let service = self.service.clone();

        Box::pin(async move {
            let auth_header = req
                .headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok());

            let Some(auth_value) = auth_header else {
                warn!("Missing authorization header");
                return Err(ApiError::unauthorized("No authorization token provided").into());
            };

            let Some(token) = auth_value.strip_prefix("Bearer ") else {
                warn!("Invalid authorization header format");
                return Err(ApiError::unauthorized("Invalid authorization header format").into());
            };

            match jwt_service.validate(token) {
                Ok(claims) => {
                    debug!(admin = %claims.username, "Request authenticated");
                    req.extensions_mut().insert(claims);
                    service.call(req).await
                }
                Err(JwtError::TokenExpired) => {
                    warn!("Token expired");
                    Err(ApiError::unauthorized("Token has expired, please login again").into())
                }
                Err(e) => {
                    warn!(error = %e, "Token validation failed");
                    Err(ApiError::unauthorized("Invalid or tampered token").into())
                }
            }
        })
    }
}

/// Extract claims from request (use in route handlers).
pub trait ClaimsExt {
    fn claims(&self) -> Option<Claims>;
    fn admin_id(&self) -> Option<uuid::Uuid>;
}

impl ClaimsExt for actix_web::HttpRequest {
    fn claims(&self) -> Option<Claims> {
        self.extensions().get::<Claims>().cloned()
    }

    fn admin_id(&self) -> Option<uuid::Uuid> {
        self.claims()
            .and_then(|c| uuid::Uuid::parse_str(&c.sub).ok())
    }
}
