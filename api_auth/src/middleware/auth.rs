use std::{future::Future, pin::Pin, sync::Arc};

use actix_web::{
    Error, HttpMessage,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures::future::{Ready, ok};

use common::jwt::get_jwt_claims_or_error;

/// Guards a scope behind a valid session token. Relies on the extractor
/// middleware having decoded the token; on success the claims are exposed to
/// handlers as `web::ReqData<JwtClaims>`.
pub struct AuthMiddleware {}

impl AuthMiddleware {
    pub fn new() -> Self {
        AuthMiddleware {}
    }
}

impl Default for AuthMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Arc::new(service),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Arc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = Arc::clone(&self.service);

        Box::pin(async move {
            match get_jwt_claims_or_error(&req) {
                Ok(claims) => {
                    req.extensions_mut().insert(claims);
                    srv.call(req).await.map(|res| res.map_into_boxed_body())
                }
                Err(response) => Ok(req.into_response(response.map_into_boxed_body())),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use actix_web::{App, HttpResponse, dev::Service as _, http::StatusCode, test, web};
    use common::{
        error::{AppError, Res},
        jwt::JwtClaims,
    };
    use uuid::Uuid;

    async fn whoami(claims: web::ReqData<JwtClaims>) -> HttpResponse {
        HttpResponse::Ok().body(claims.email.clone())
    }

    #[actix_web::test]
    async fn missing_token_is_unauthorized() {
        let app = test::init_service(
            App::new()
                .wrap(AuthMiddleware::new())
                .route("/", web::get().to(whoami)),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "No authorization token provided");
    }

    #[actix_web::test]
    async fn rejected_token_is_unauthorized() {
        let app = test::init_service(
            App::new()
                .wrap(AuthMiddleware::new())
                .wrap_fn(|req, srv| {
                    req.extensions_mut().insert::<Res<JwtClaims>>(Err(
                        AppError::Unauthorized("Invalid token".to_string()),
                    ));
                    srv.call(req)
                })
                .route("/", web::get().to(whoami)),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn valid_claims_reach_the_handler() {
        let app = test::init_service(
            App::new()
                .wrap(AuthMiddleware::new())
                .wrap_fn(|req, srv| {
                    req.extensions_mut().insert::<Res<JwtClaims>>(Ok(JwtClaims {
                        user_id: 3,
                        email: "ana@acme.com".to_string(),
                        tenant_id: Uuid::new_v4(),
                        exp: usize::MAX,
                    }));
                    srv.call(req)
                })
                .route("/", web::get().to(whoami)),
        )
        .await;

        let req = test::TestRequest::get().uri("/").to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(&body[..], b"ana@acme.com");
    }
}
