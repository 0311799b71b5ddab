use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::Method,
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::token::TokenService;
use crate::error::AppError;

/// Bearer-token authentication for the `/api` scope.
///
/// Verified claims are inserted into request extensions, where the
/// `AuthenticatedUserId` extractor picks them up. Requests without a valid
/// token are rejected before any handler or repository code runs.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

/// Routes that establish an identity instead of presenting one.
fn is_public(method: &Method, path: &str) -> bool {
    if path == "/health" {
        return true;
    }
    *method == Method::POST
        && (path == "/api/users" || path == "/api/users/login" || path == "/api/users/logout")
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if is_public(req.method(), req.path()) {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        let auth_header = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        match auth_header {
            Some(token) => {
                let Some(tokens) = req.app_data::<web::Data<TokenService>>() else {
                    let app_err =
                        AppError::InternalServerError("Token service not configured".into());
                    return Box::pin(async move { Err(app_err.into()) });
                };
                match tokens.verify(token) {
                    Ok(claims) => {
                        req.extensions_mut().insert(claims);
                        let fut = self.service.call(req);
                        Box::pin(fut)
                    }
                    Err(app_err) => Box::pin(async move { Err(app_err.into()) }),
                }
            }
            None => {
                let app_err = AppError::Unauthorized("Missing token".into());
                Box::pin(async move { Err(app_err.into()) })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_route_table() {
        assert!(is_public(&Method::GET, "/health"));
        assert!(is_public(&Method::POST, "/api/users"));
        assert!(is_public(&Method::POST, "/api/users/login"));
        assert!(is_public(&Method::POST, "/api/users/logout"));

        // Same paths with other methods are protected
        assert!(!is_public(&Method::GET, "/api/users"));
        assert!(!is_public(&Method::PUT, "/api/users"));

        // Task routes are always protected
        assert!(!is_public(&Method::GET, "/api/tasks"));
        assert!(!is_public(&Method::POST, "/api/tasks/userTasks"));
        assert!(!is_public(&Method::DELETE, "/api/tasks/deleteAllTasks"));
    }
}
